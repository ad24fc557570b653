//! The process-wide "redact all logs" toggle.
//!
//! The toggle is flipped by operators, rarely, and read on every diagnostic
//! format call. Reads use relaxed ordering: a formatter racing a toggle may see
//! the previous value, which only changes how much is hidden, never memory
//! safety.

use std::sync::atomic::{AtomicBool, Ordering};

static SHOULD_REDACT_LOGS: AtomicBool = AtomicBool::new(false);

/// Returns `true` when every logged value must be redacted.
pub fn should_redact_logs() -> bool {
    SHOULD_REDACT_LOGS.load(Ordering::Relaxed)
}

/// Turns global log redaction on or off.
pub fn set_should_redact_logs(enabled: bool) {
    SHOULD_REDACT_LOGS.store(enabled, Ordering::Relaxed);
}

/// How much of a request document the field redactor hides.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RedactionMode {
    /// Hide only the fields the command declares sensitive.
    #[default]
    SensitiveOnly,
    /// Hide every value. Per-field declarations are irrelevant in this mode.
    All,
}

impl RedactionMode {
    /// Reads the global toggle once.
    pub fn current() -> Self {
        Self::from_flag(should_redact_logs())
    }

    /// Maps a "redact all logs" flag to a mode.
    pub fn from_flag(redact_all: bool) -> Self {
        if redact_all {
            Self::All
        } else {
            Self::SensitiveOnly
        }
    }

    /// Returns the stricter of the two modes.
    #[must_use]
    pub fn strictest(self, other: Self) -> Self {
        if self.redacts_all() || other.redacts_all() {
            Self::All
        } else {
            Self::SensitiveOnly
        }
    }

    /// Returns `true` for [`RedactionMode::All`].
    pub fn redacts_all(self) -> bool {
        matches!(self, Self::All)
    }
}

#[cfg(test)]
mod tests {
    use super::RedactionMode;

    #[test]
    fn default_mode_hides_only_sensitive_fields() {
        assert_eq!(RedactionMode::default(), RedactionMode::SensitiveOnly);
        assert!(!RedactionMode::default().redacts_all());
    }

    #[test]
    fn flag_maps_to_mode() {
        assert_eq!(RedactionMode::from_flag(true), RedactionMode::All);
        assert_eq!(RedactionMode::from_flag(false), RedactionMode::SensitiveOnly);
        assert!(RedactionMode::All.redacts_all());
    }

    #[test]
    fn strictest_never_relaxes() {
        use RedactionMode::{All, SensitiveOnly};

        assert_eq!(SensitiveOnly.strictest(SensitiveOnly), SensitiveOnly);
        assert_eq!(SensitiveOnly.strictest(All), All);
        assert_eq!(All.strictest(SensitiveOnly), All);
        assert_eq!(All.strictest(All), All);
    }
}
