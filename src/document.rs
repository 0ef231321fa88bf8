use crate::entry::LogEntry;
use chrono::SecondsFormat;
use serde_json::{Map, Value};

/// Document type literal attached to every index request.
pub const DOCUMENT_TYPE: &str = "log";

/// One buffered write: a document destined for a concrete index.
///
/// The index name is resolved at [`fire`] time, not at delivery time, so a
/// rotating resolver stamps each entry with the index that was current when
/// the entry was produced.
///
/// [`fire`]: crate::hook::ElasticHook::fire
#[derive(Debug, Clone)]
pub struct IndexRequest {
    pub index: String,
    pub doc_type: &'static str,
    pub document: Map<String, Value>,
}

/// Translate an entry into the flat outgoing document.
///
/// Fixed envelope keys (`Host`, `@timestamp`, `Message`, `Level`) are merged
/// with the structured fields at the top level; structured fields win on key
/// collision. `@timestamp` is the entry time in UTC, RFC3339 with nanosecond
/// precision.
pub fn document_for(entry: &LogEntry, host: &str) -> Map<String, Value> {
    let mut doc = Map::new();
    doc.insert("Host".to_string(), Value::String(host.to_string()));
    doc.insert(
        "@timestamp".to_string(),
        Value::String(entry.timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true)),
    );
    doc.insert("Message".to_string(), Value::String(entry.message.clone()));
    doc.insert("Level".to_string(), Value::String(entry.level.as_str().to_string()));

    for (name, value) in &entry.fields {
        doc.insert(name.clone(), value.clone());
    }

    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Severity;
    use chrono::TimeZone;

    #[test]
    fn envelope_and_fields_are_flat_merged() {
        let entry = LogEntry::new(Severity::Warn, "disk almost full")
            .with_field("mount", "/var")
            .with_field("used_pct", 93);
        let doc = document_for(&entry, "web-1");

        assert_eq!(doc["Host"], "web-1");
        assert_eq!(doc["Message"], "disk almost full");
        assert_eq!(doc["Level"], "WARN");
        assert_eq!(doc["mount"], "/var");
        assert_eq!(doc["used_pct"], 93);
    }

    #[test]
    fn structured_fields_win_on_collision() {
        let entry = LogEntry::new(Severity::Info, "original").with_field("Message", "shadowed");
        let doc = document_for(&entry, "web-1");
        assert_eq!(doc["Message"], "shadowed");
    }

    #[test]
    fn timestamp_is_rfc3339_with_nanoseconds() {
        let ts = chrono::Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap()
            + chrono::Duration::nanoseconds(123_456_789);
        let entry = LogEntry::new(Severity::Error, "boom").with_timestamp(ts);
        let doc = document_for(&entry, "web-1");
        assert_eq!(doc["@timestamp"], "2020-01-02T03:04:05.123456789Z");
    }
}
