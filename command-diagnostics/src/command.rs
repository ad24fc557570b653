//! Command descriptors and their registry.
//!
//! A command descriptor is the static definition of a command type. It carries
//! two capabilities the diagnostic printer depends on:
//!
//! - [`SensitiveFields`]: which top-level request fields must never be shown.
//! - [`Command::enable_diagnostic_printing_on_failure`]: whether the command type
//!   allows its request to be printed at all.
//!
//! Both are fixed when the command type is defined, never per request.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    sync::Arc,
};

use thiserror::Error;

use crate::Document;

/// Declares which top-level request fields carry confidential values.
///
/// Matching is by exact top-level field name. Nested documents under a
/// sensitive key are hidden as a whole because their key matches; keys inside
/// nested documents are not consulted.
pub trait SensitiveFields {
    /// Returns the names of the fields whose values must be redacted.
    fn sensitive_field_names(&self) -> BTreeSet<&str> {
        BTreeSet::new()
    }

    /// Returns `true` when `name` is declared sensitive.
    fn is_sensitive_field(&self, name: &str) -> bool {
        self.sensitive_field_names().contains(name)
    }
}

/// The registered definition of a command type.
///
/// Implement it with `#[derive(Command)]` or by hand:
///
/// ```rust
/// use std::collections::BTreeSet;
///
/// use command_diagnostics::{Command, SensitiveFields};
///
/// struct CreateUser;
///
/// impl SensitiveFields for CreateUser {
///     fn sensitive_field_names(&self) -> BTreeSet<&str> {
///         BTreeSet::from(["pwd"])
///     }
/// }
///
/// impl Command for CreateUser {
///     fn name(&self) -> &str {
///         "createUser"
///     }
///
///     fn enable_diagnostic_printing_on_failure(&self) -> bool {
///         true
///     }
/// }
///
/// let cmd = CreateUser;
/// assert_eq!(cmd.name(), "createUser");
/// assert!(cmd.is_sensitive_field("pwd"));
/// assert!(cmd.enable_diagnostic_printing_on_failure());
/// ```
pub trait Command: SensitiveFields + Send + Sync {
    /// The command name, which is also the first field of its request document.
    fn name(&self) -> &str;

    /// Whether the request may be printed by the diagnostic printer on failure.
    ///
    /// Disabled unless a command type opts in.
    fn enable_diagnostic_printing_on_failure(&self) -> bool {
        false
    }
}

impl fmt::Debug for dyn Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name())
            .field("diagnostics", &self.enable_diagnostic_printing_on_failure())
            .finish_non_exhaustive()
    }
}

/// Errors returned when registering a command.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A command with the same name is already registered.
    #[error("command `{0}` is already registered")]
    DuplicateCommand(String),
    /// The command reported an empty name.
    #[error("command name must not be empty")]
    EmptyName,
}

/// Lookup table from command name to descriptor.
#[derive(Default)]
pub struct CommandRegistry {
    commands: BTreeMap<String, Arc<dyn Command>>,
}

impl CommandRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a command under its own name.
    ///
    /// Names are unique; a second registration under the same name is rejected
    /// and leaves the first in place.
    pub fn register<C>(&mut self, command: C) -> Result<Arc<dyn Command>, RegistryError>
    where
        C: Command + 'static,
    {
        self.register_arc(Arc::new(command))
    }

    /// Registers an already shared command.
    pub fn register_arc(
        &mut self,
        command: Arc<dyn Command>,
    ) -> Result<Arc<dyn Command>, RegistryError> {
        let name = command.name();
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.commands.contains_key(name) {
            return Err(RegistryError::DuplicateCommand(name.to_string()));
        }
        self.commands.insert(name.to_string(), Arc::clone(&command));
        Ok(command)
    }

    /// Looks up a command by name.
    pub fn find(&self, name: &str) -> Option<Arc<dyn Command>> {
        self.commands.get(name).cloned()
    }

    /// Looks up the command a request document targets.
    ///
    /// The command is named by the request's first field.
    pub fn find_for_request(&self, request: &Document) -> Option<Arc<dyn Command>> {
        request.keys().next().and_then(|name| self.find(name))
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.commands.keys()).finish()
    }
}
