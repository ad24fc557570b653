//! The field redactor.
//!
//! Rewrites a request document so that disallowed values become
//! [`REDACTED_PLACEHOLDER`]. Field names and field order are always kept.
//! Only top-level names are matched against the sensitive set; a nested
//! document under a sensitive key is replaced whole, and a nested document
//! under a non-sensitive key is kept whole.

use serde_json::Value as JsonValue;

use super::RedactionMode;
use crate::{Document, SensitiveFields};

/// Text substituted for every redacted value.
pub const REDACTED_PLACEHOLDER: &str = "###";

/// Returns a copy of `document` with redacted values.
///
/// A value is redacted when `mode` is [`RedactionMode::All`], when its field
/// name is one of `fields`' sensitive names, or when
/// [`SensitiveFields::is_sensitive_field`] reports it. An absent document
/// yields an empty one.
///
/// This function is total (it does not return errors).
#[must_use]
pub fn redact_fields<S>(document: Option<&Document>, fields: &S, mode: RedactionMode) -> Document
where
    S: SensitiveFields + ?Sized,
{
    let Some(document) = document else {
        return Document::new();
    };

    let redact_all = mode.redacts_all();
    let sensitive = fields.sensitive_field_names();

    document
        .iter()
        .map(|(name, value)| {
            let value = if redact_all
                || sensitive.contains(name.as_str())
                || fields.is_sensitive_field(name)
            {
                JsonValue::String(REDACTED_PLACEHOLDER.to_string())
            } else {
                value.clone()
            };
            (name.clone(), value)
        })
        .collect()
}
