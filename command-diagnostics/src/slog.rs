//! Adapters for emitting diagnostics through `slog`.
//!
//! This module implements `slog::Value` for [`Printer`] and [`Diagnostics`] so a
//! diagnostic line can be attached to a log record as a key-value pair.
//!
//! It is responsible for:
//! - Emitting placeholders as plain strings.
//! - Emitting printable commands as a nested JSON report built from the
//!   already-redacted request document.
//! - Avoiding fallible logging APIs: serialization failures are represented as
//!   placeholder strings rather than propagated as errors.
//!
//! It does not configure `slog` or decide when diagnostics are logged.

use serde_json::Value as JsonValue;
use slog::{Key, Record, Result as SlogResult, Serializer, Value as SlogValue};

use crate::{Diagnostics, Printer};

/// Emitted in place of a report that could not be converted to JSON.
pub const SERIALIZATION_FAILED_MSG: &str = "Failed to serialize diagnostic report";

impl SlogValue for Diagnostics {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        match self {
            Self::Omitted(omission) => serializer.emit_str(key, omission.message()),
            Self::Report(report) => {
                let json = serde_json::to_value(report)
                    .unwrap_or_else(|_| JsonValue::String(SERIALIZATION_FAILED_MSG.to_string()));
                let nested = slog::Serde(json);
                SlogValue::serialize(&nested, record, key, serializer)
            }
        }
    }
}

/// Renders at serialization time, so the record reflects the operation as it
/// is when the drain writes it.
impl SlogValue for Printer<'_> {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        SlogValue::serialize(&self.render(), record, key, serializer)
    }
}
