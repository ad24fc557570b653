//! Test: a downstream crate derives commands and prints them.

use std::sync::Arc;

use command_diagnostics::{
    Command, NamespaceString, NetworkOp, OperationContext, Printer, RedactionMode,
    SensitiveFields,
};

#[derive(Command)]
#[command(name = "saslStart", sensitive_fields("payload"), diagnostics)]
struct SaslStart {
    #[allow(dead_code)]
    mechanism: &'static str,
}

#[derive(Command)]
#[command(name = "getMore", diagnostics = true)]
enum GetMore {
    #[allow(dead_code)]
    Batch(u32),
}

fn main() {
    let sasl = SaslStart {
        mechanism: "SCRAM-SHA-256",
    };
    assert!(sasl.is_sensitive_field("payload"));
    assert!(GetMore::Batch(1).sensitive_field_names().is_empty());

    let op_ctx = OperationContext::new();
    op_ctx.lock_cur_op().set_generic_op_request_details(
        NamespaceString::parse("admin.$cmd").unwrap(),
        Some(Arc::new(sasl)),
        serde_json::json!({"saslStart": 1, "payload": "c2VjcmV0"}),
        NetworkOp::DbMsg,
    );
    let out = Printer::new(Some(&op_ctx))
        .with_redaction_mode(RedactionMode::SensitiveOnly)
        .to_string();
    assert!(out.contains("saslStart"));
    assert!(!out.contains("c2VjcmV0"));
}
