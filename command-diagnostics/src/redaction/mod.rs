//! Redaction of request documents for diagnostic output.
//!
//! - **`mode`**: the process-wide "redact all logs" toggle (`RedactionMode`)
//! - **`fields`**: the field redactor that hides values while keeping names
//!
//! Which fields are sensitive is declared by commands, see `crate::command`.

mod fields;
mod mode;

pub use fields::{redact_fields, REDACTED_PLACEHOLDER};
pub use mode::{set_should_redact_logs, should_redact_logs, RedactionMode};
