//! Redacting diagnostic printer for in-flight database commands.
//!
//! When a server crashes, hangs or trips an assertion, operators need to know
//! which command was running without the log leaking what the command carried.
//! This crate separates:
//! - **Eligibility**: whether the command may be described at all.
//! - **Redaction**: which values of its request document are hidden.
//!
//! The [`Printer`] binds to an [`OperationContext`] and does all of its work
//! when formatted. It checks, in order: no operation context, no bound command,
//! the operation's omit flag, and the command's own opt-in. The first rule that
//! matches prints its placeholder. Otherwise the request is printed with the
//! values of sensitive fields (or of every field, in [`RedactionMode::All`])
//! replaced by [`REDACTED_PLACEHOLDER`].
//!
//! Key rules:
//! - Field names and the command name are always shown; only values are hidden.
//! - Sensitive fields are declared per command type with [`SensitiveFields`],
//!   usually through `#[derive(Command)]`.
//! - Only top-level field names are matched.
//!
//! What this crate does:
//! - models the operation snapshot and command descriptors the printer reads
//! - formats a single diagnostic line through `Display`
//! - provides integrations behind feature flags (e.g. `slog`)
//!
//! What it does not do:
//! - perform I/O or logging
//! - decide when diagnostics are emitted

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

pub use command_diagnostics_derive::Command;

// Module declarations
mod command;
mod operation;
mod printer;
mod redaction;
#[cfg(feature = "slog")]
pub mod slog;

/// A request document: field names mapped to values, in insertion order.
pub type Document = serde_json::Map<String, serde_json::Value>;

// Re-exports
pub use command::{Command, CommandRegistry, RegistryError, SensitiveFields};
pub use operation::{CurOp, NamespaceError, NamespaceString, NetworkOp, OperationContext};
pub use printer::{
    is_ineligible_for_diagnostic_printing, DiagnosticReport, Diagnostics, Omission, Printer,
    OMIT_UNRECOGNIZED_COMMAND_MSG, OMIT_UNSUPPORTED_COMMAND_MSG, OMIT_UNSUPPORTED_CUR_OP_MSG,
    OP_CTX_IS_NULL_MSG,
};
pub use redaction::{
    redact_fields, set_should_redact_logs, should_redact_logs, RedactionMode,
    REDACTED_PLACEHOLDER,
};
