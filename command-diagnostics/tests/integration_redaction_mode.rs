//! Tests for the process-wide redaction toggle.
//!
//! These live in their own test binary because they flip global state. No
//! other test binary turns the toggle on.

use std::sync::Arc;

use command_diagnostics::{
    set_should_redact_logs, should_redact_logs, Command, NamespaceString, NetworkOp,
    OperationContext, Printer, RedactionMode,
};
use serde_json::json;

#[derive(Command)]
#[command(name = "mockCmd", sensitive_fields("sensitive"), diagnostics)]
struct MockCmd;

#[test]
fn global_toggle_redacts_all_values_and_restores_cleanly() {
    let op_ctx = OperationContext::new();
    op_ctx.lock_cur_op().set_generic_op_request_details(
        NamespaceString::parse("myDB.myColl").unwrap(),
        Some(Arc::new(MockCmd)),
        json!({"mockCmd": "abcdefgh", "sensitive": "12345678"}),
        NetworkOp::DbQuery,
    );
    let printer = Printer::new(Some(&op_ctx));

    assert!(!should_redact_logs());
    let before = printer.to_string();
    assert!(before.contains("abcdefgh"));
    assert!(!before.contains("12345678"));

    set_should_redact_logs(true);
    let redacted = printer.to_string();
    assert!(redacted.contains("mockCmd"));
    assert!(redacted.contains("sensitive"));
    assert!(!redacted.contains("abcdefgh"));
    assert!(!redacted.contains("12345678"));

    // A pinned mode cannot relax the toggle.
    let pinned = printer
        .with_redaction_mode(RedactionMode::SensitiveOnly)
        .to_string();
    assert_eq!(pinned, redacted);
    assert!(!pinned.contains("abcdefgh"));
    assert!(!pinned.contains("12345678"));

    // Reset so later calls see the default again.
    set_should_redact_logs(false);
    assert_eq!(printer.to_string(), before);
}
