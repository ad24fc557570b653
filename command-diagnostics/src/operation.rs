//! The in-flight operation the diagnostic printer reads from.
//!
//! An [`OperationContext`] owns the [`CurOp`] snapshot of the command it is
//! running. The operation's own thread writes the snapshot; other threads
//! (watchdogs, crash handlers) read it. Every access goes through
//! [`OperationContext::lock_cur_op`], so a reader sees the command binding,
//! request document and omit flag from the same moment.

use std::{fmt, sync::Arc};

use parking_lot::{Mutex, MutexGuard};
use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::{Command, Document};

/// Errors returned by [`NamespaceString::parse`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NamespaceError {
    /// The database component is empty.
    #[error("namespace `{0}` has an empty database name")]
    EmptyDatabase(String),
    /// The database component contains a character databases may not use.
    #[error("database name `{db}` contains invalid character {ch:?}")]
    InvalidDatabaseChar {
        /// The offending database name.
        db: String,
        /// The first invalid character.
        ch: char,
    },
}

const INVALID_DB_CHARS: &[char] = &['/', '\\', '.', ' ', '"', '$', '\0'];

/// A `db.collection` namespace.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NamespaceString {
    db: String,
    coll: String,
}

impl NamespaceString {
    /// Builds a namespace from its parts.
    pub fn new(db: impl Into<String>, coll: impl Into<String>) -> Result<Self, NamespaceError> {
        let db = db.into();
        let coll = coll.into();
        if db.is_empty() {
            return Err(NamespaceError::EmptyDatabase(format!(".{coll}")));
        }
        if let Some(ch) = db.chars().find(|ch| INVALID_DB_CHARS.contains(ch)) {
            return Err(NamespaceError::InvalidDatabaseChar { db, ch });
        }
        Ok(Self { db, coll })
    }

    /// Parses `db.collection`. The collection may itself contain dots and may
    /// be absent (`admin`).
    pub fn parse(ns: &str) -> Result<Self, NamespaceError> {
        match ns.split_once('.') {
            Some((db, coll)) => {
                if db.is_empty() {
                    return Err(NamespaceError::EmptyDatabase(ns.to_string()));
                }
                Self::new(db, coll)
            }
            None if ns.is_empty() => Err(NamespaceError::EmptyDatabase(String::new())),
            None => Self::new(ns, ""),
        }
    }

    /// The database name.
    pub fn db(&self) -> &str {
        &self.db
    }

    /// The collection name; empty for database-level namespaces.
    pub fn coll(&self) -> &str {
        &self.coll
    }
}

impl fmt::Display for NamespaceString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.coll.is_empty() {
            f.write_str(&self.db)
        } else {
            write!(f, "{}.{}", self.db, self.coll)
        }
    }
}

/// The wire operation that carried the request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NetworkOp {
    /// Not set yet.
    #[default]
    Invalid,
    /// Legacy query op.
    DbQuery,
    /// Modern message op.
    DbMsg,
    /// Legacy reply op.
    OpReply,
    /// Compressed wrapper op.
    DbCompressed,
}

/// Snapshot of the command currently running on an operation.
#[derive(Default)]
pub struct CurOp {
    ns: Option<NamespaceString>,
    command: Option<Arc<dyn Command>>,
    op_description: Option<Document>,
    network_op: NetworkOp,
    should_omit_diagnostic_information: bool,
}

impl CurOp {
    /// Binds the command, its namespace and its request document.
    ///
    /// A request that is not a document is recorded as absent.
    pub fn set_generic_op_request_details(
        &mut self,
        ns: NamespaceString,
        command: Option<Arc<dyn Command>>,
        request: JsonValue,
        network_op: NetworkOp,
    ) {
        self.ns = Some(ns);
        self.command = command;
        self.op_description = match request {
            JsonValue::Object(document) => Some(document),
            _ => None,
        };
        self.network_op = network_op;
    }

    /// Forces the diagnostic printer to omit everything for this operation.
    pub fn set_should_omit_diagnostic_information(&mut self, omit: bool) {
        self.should_omit_diagnostic_information = omit;
    }

    /// Whether the diagnostic printer must omit everything for this operation.
    pub fn should_omit_diagnostic_information(&self) -> bool {
        self.should_omit_diagnostic_information
    }

    /// The bound command descriptor, if any.
    pub fn command(&self) -> Option<&Arc<dyn Command>> {
        self.command.as_ref()
    }

    /// The captured request document, if any.
    pub fn op_description(&self) -> Option<&Document> {
        self.op_description.as_ref()
    }

    /// The target namespace, if any.
    pub fn ns(&self) -> Option<&NamespaceString> {
        self.ns.as_ref()
    }

    /// The wire operation that carried the request.
    pub fn network_op(&self) -> NetworkOp {
        self.network_op
    }
}

// The request document is never formatted here; use the diagnostic printer.
impl fmt::Debug for CurOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CurOp")
            .field("ns", &self.ns)
            .field("command", &self.command)
            .field(
                "op_description",
                &self.op_description.as_ref().map(|_| "[OMITTED]"),
            )
            .field("network_op", &self.network_op)
            .field(
                "should_omit_diagnostic_information",
                &self.should_omit_diagnostic_information,
            )
            .finish()
    }
}

/// Execution context of one operation.
#[derive(Debug, Default)]
pub struct OperationContext {
    cur_op: Mutex<CurOp>,
}

impl OperationContext {
    /// Creates a context with an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the snapshot.
    ///
    /// The lock does not poison; a thread that panicked while holding it
    /// leaves the snapshot readable.
    pub fn lock_cur_op(&self) -> MutexGuard<'_, CurOp> {
        self.cur_op.lock()
    }
}
