use crate::level::Severity;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Reserved field name carrying an error value, mirrored into the outgoing
/// document as the error's display message.
pub const ERROR_FIELD: &str = "error";

/// A single structured log entry as seen by the hook.
///
/// Entries are normally produced by [`crate::layer::ElasticLayer`] from
/// `tracing` events, but can be built manually for direct [`fire`] calls
/// (e.g. for `Fatal`/`Panic` severities that `tracing` does not emit).
///
/// [`fire`]: crate::hook::ElasticHook::fire
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: Severity,
    pub message: String,
    pub fields: BTreeMap<String, serde_json::Value>,
}

impl LogEntry {
    /// New entry stamped with the current time and no structured fields.
    pub fn new(level: Severity, message: impl Into<String>) -> Self {
        LogEntry {
            timestamp: Utc::now(),
            level,
            message: message.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Attach an error under [`ERROR_FIELD`].
    ///
    /// Errors are not otherwise serializable, so the display message is
    /// captured here, while the typed value is still available; the indexed
    /// field is that string rather than an opaque serialization.
    pub fn with_error(mut self, err: &(dyn std::error::Error + 'static)) -> Self {
        self.fields
            .insert(ERROR_FIELD.to_string(), serde_json::Value::String(err.to_string()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn with_error_stores_the_display_message() {
        let err = io::Error::new(io::ErrorKind::Other, "connection reset");
        let entry = LogEntry::new(Severity::Error, "request failed").with_error(&err);
        assert_eq!(
            entry.fields.get(ERROR_FIELD),
            Some(&serde_json::Value::String("connection reset".to_string()))
        );
    }

    #[test]
    fn with_field_accumulates() {
        let entry = LogEntry::new(Severity::Info, "hello")
            .with_field("user_id", 42)
            .with_field("region", "eu-west-1");
        assert_eq!(entry.fields.len(), 2);
        assert_eq!(entry.fields["user_id"], serde_json::json!(42));
    }
}
