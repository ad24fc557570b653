//! The diagnostic printer.
//!
//! [`Printer`] describes the command running on an operation in one line. It
//! decides, in a fixed order, whether the command may be shown at all:
//!
//! 1. no operation context: [`OP_CTX_IS_NULL_MSG`]
//! 2. no command bound to the operation: [`OMIT_UNRECOGNIZED_COMMAND_MSG`]
//! 3. the operation asked to omit diagnostics: [`OMIT_UNSUPPORTED_CUR_OP_MSG`]
//! 4. the command type does not allow printing: [`OMIT_UNSUPPORTED_COMMAND_MSG`]
//!
//! Otherwise the request document is printed through the field redactor.
//!
//! Formatting runs on failure paths, so it never returns an error and never
//! panics on missing or malformed state.

use std::{fmt, sync::Arc};

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::{
    operation::CurOp,
    redaction::{redact_fields, RedactionMode},
    Command, OperationContext,
};

/// Printed when there is no operation context.
pub const OP_CTX_IS_NULL_MSG: &str = "opCtx is null";
/// Printed when no command is bound to the operation.
pub const OMIT_UNRECOGNIZED_COMMAND_MSG: &str = "omitted: unrecognized command";
/// Printed when the operation asked to omit diagnostic information.
pub const OMIT_UNSUPPORTED_CUR_OP_MSG: &str =
    "omitted: this CurOp does not support diagnostic printing";
/// Printed when the command type does not enable diagnostic printing.
pub const OMIT_UNSUPPORTED_COMMAND_MSG: &str =
    "omitted: command does not support diagnostic printing";

/// Why the printer shows a placeholder instead of the command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Omission {
    /// There is no operation context.
    NullOperationContext,
    /// No command is bound to the operation.
    UnrecognizedCommand,
    /// The operation's omit flag is set.
    UnsupportedCurOp,
    /// The command type has diagnostic printing disabled.
    UnsupportedCommand,
}

impl Omission {
    /// The placeholder printed for this omission.
    pub fn message(self) -> &'static str {
        match self {
            Self::NullOperationContext => OP_CTX_IS_NULL_MSG,
            Self::UnrecognizedCommand => OMIT_UNRECOGNIZED_COMMAND_MSG,
            Self::UnsupportedCurOp => OMIT_UNSUPPORTED_CUR_OP_MSG,
            Self::UnsupportedCommand => OMIT_UNSUPPORTED_COMMAND_MSG,
        }
    }
}

impl fmt::Display for Omission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// The printable description of a command, with values already redacted.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticReport {
    command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    ns: Option<String>,
    op_description: JsonValue,
}

impl DiagnosticReport {
    /// The command name.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// The target namespace, when one was bound.
    pub fn ns(&self) -> Option<&str> {
        self.ns.as_deref()
    }

    /// The redacted request document.
    pub fn op_description(&self) -> &JsonValue {
        &self.op_description
    }
}

impl fmt::Display for DiagnosticReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{'command': {}", self.command)?;
        if let Some(ns) = &self.ns {
            write!(f, ", 'ns': {ns}")?;
        }
        write!(f, ", 'opDescription': {}}}", self.op_description)
    }
}

/// Result of resolving an operation: exactly one placeholder, or a report.
#[derive(Clone, Debug, PartialEq)]
pub enum Diagnostics {
    /// Printing is not allowed; show the placeholder.
    Omitted(Omission),
    /// Printing is allowed; show the redacted report.
    Report(DiagnosticReport),
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Omitted(omission) => fmt::Display::fmt(omission, f),
            Self::Report(report) => fmt::Display::fmt(report, f),
        }
    }
}

/// Rules 2-4, in order. Rule 1 is checked by the callers before locking.
fn check_cur_op(cur_op: &CurOp) -> Result<&Arc<dyn Command>, Omission> {
    let Some(command) = cur_op.command() else {
        return Err(Omission::UnrecognizedCommand);
    };
    if cur_op.should_omit_diagnostic_information() {
        return Err(Omission::UnsupportedCurOp);
    }
    if !command.enable_diagnostic_printing_on_failure() {
        return Err(Omission::UnsupportedCommand);
    }
    Ok(command)
}

fn resolve(op_ctx: Option<&OperationContext>, mode: RedactionMode) -> Diagnostics {
    let Some(op_ctx) = op_ctx else {
        return Diagnostics::Omitted(Omission::NullOperationContext);
    };

    // The request leaves the critical section already redacted.
    let cur_op = op_ctx.lock_cur_op();
    let command = match check_cur_op(&cur_op) {
        Ok(command) => command,
        Err(omission) => return Diagnostics::Omitted(omission),
    };
    let op_description = redact_fields(cur_op.op_description(), &**command, mode);
    let report = DiagnosticReport {
        command: command.name().to_string(),
        ns: cur_op.ns().map(ToString::to_string),
        op_description: JsonValue::Object(op_description),
    };
    drop(cur_op);

    Diagnostics::Report(report)
}

/// Returns the placeholder the printer would show for `op_ctx`, or `None`
/// when it would show the command.
///
/// Failure handlers use this to decide whether a diagnostic line is worth
/// attaching before building one.
pub fn is_ineligible_for_diagnostic_printing(
    op_ctx: Option<&OperationContext>,
) -> Option<&'static str> {
    let Some(op_ctx) = op_ctx else {
        return Some(OP_CTX_IS_NULL_MSG);
    };
    check_cur_op(&op_ctx.lock_cur_op())
        .err()
        .map(Omission::message)
}

/// Lazily formats the command running on an operation.
///
/// Nothing is read at construction. Each `Display` call locks the operation's
/// snapshot once and reads the global redaction mode once, so the output
/// reflects the state at format time and repeated calls agree while that state
/// is unchanged.
///
/// ```rust
/// use command_diagnostics::{Printer, OP_CTX_IS_NULL_MSG};
///
/// assert_eq!(Printer::new(None).to_string(), OP_CTX_IS_NULL_MSG);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Printer<'a> {
    op_ctx: Option<&'a OperationContext>,
    mode: Option<RedactionMode>,
}

impl<'a> Printer<'a> {
    /// Binds a printer to an operation, which may be absent.
    pub fn new(op_ctx: Option<&'a OperationContext>) -> Self {
        Self { op_ctx, mode: None }
    }

    /// Pins a minimum redaction mode.
    ///
    /// The global toggle still applies: pinning [`RedactionMode::All`] hides
    /// every value even when the toggle is off, and pinning
    /// [`RedactionMode::SensitiveOnly`] cannot reveal values while it is on.
    #[must_use]
    pub fn with_redaction_mode(mut self, mode: RedactionMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Resolves the operation into a placeholder or a redacted report.
    pub fn render(&self) -> Diagnostics {
        let global = RedactionMode::current();
        let mode = self.mode.map_or(global, |pinned| pinned.strictest(global));
        resolve(self.op_ctx, mode)
    }
}

impl<'a> From<&'a OperationContext> for Printer<'a> {
    fn from(op_ctx: &'a OperationContext) -> Self {
        Self::new(Some(op_ctx))
    }
}

impl fmt::Display for Printer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.render(), f)
    }
}
