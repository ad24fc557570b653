//! Test: generic command types carry their bounds into the derived impls.

use command_diagnostics::{Command, SensitiveFields};

#[derive(Command)]
#[command(name = "aggregate", sensitive_fields("let"), diagnostics)]
struct Aggregate<P: Send + Sync> {
    #[allow(dead_code)]
    pipeline: P,
}

fn describe(cmd: &dyn Command) -> String {
    format!("{} {}", cmd.name(), cmd.enable_diagnostic_printing_on_failure())
}

fn main() {
    let cmd = Aggregate {
        pipeline: vec!["$match"],
    };
    assert_eq!(describe(&cmd), "aggregate true");
    assert!(cmd.is_sensitive_field("let"));
}
