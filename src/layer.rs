use crate::entry::LogEntry;
use crate::hook::ElasticHook;
use crate::level::Severity;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

/// `tracing_subscriber` layer that turns matching events into [`LogEntry`]s
/// and hands them to an [`ElasticHook`].
///
/// Events are filtered against the hook's precomputed severity set before
/// any field is visited; everything below the hook's minimum level is
/// ignored. The layer never blocks and never fails: enqueueing is handled
/// entirely by the hook.
pub struct ElasticLayer {
    hook: Arc<ElasticHook>,
}

impl ElasticLayer {
    pub fn new(hook: Arc<ElasticHook>) -> Self {
        ElasticLayer { hook }
    }
}

impl<S> Layer<S> for ElasticLayer
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fn on_event(&self, event: &Event, _ctx: Context<'_, S>) {
        let level = Severity::from(event.metadata().level());
        if !self.hook.levels().contains(&level) {
            return;
        }

        let mut fields = BTreeMap::new();
        let mut message: Option<String> = None;

        let mut visitor = FieldVisitor {
            fields: &mut fields,
            message: &mut message,
        };
        event.record(&mut visitor);

        let entry = LogEntry {
            timestamp: Utc::now(),
            level,
            message: message.unwrap_or_default(),
            fields,
        };

        self.hook.fire(&entry);
    }
}

use tracing::field::{Field, Visit};

/// Extracts the message and structured fields from a `tracing` event.
///
/// Error-typed values are captured as their display message under the
/// recorded field name, so `error!(error = &e as &dyn Error, ..)` lands in
/// the reserved `error` field as a plain string.
pub struct FieldVisitor<'a> {
    pub fields: &'a mut BTreeMap<String, serde_json::Value>,
    pub message: &'a mut Option<String>,
}

impl<'a> Visit for FieldVisitor<'a> {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            *self.message = Some(value.to_string());
        } else {
            self.fields
                .insert(field.name().to_string(), serde_json::Value::String(value.to_string()));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields.insert(field.name().to_string(), serde_json::Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields.insert(field.name().to_string(), serde_json::Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.fields.insert(field.name().to_string(), serde_json::Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.fields.insert(field.name().to_string(), serde_json::Value::from(value));
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.fields
            .insert(field.name().to_string(), serde_json::Value::String(value.to_string()));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        // The free-text message arrives here as `fmt::Arguments`.
        if field.name() == "message" {
            *self.message = Some(format!("{:?}", value));
        } else {
            self.fields
                .insert(field.name().to_string(), serde_json::Value::String(format!("{:?}", value)));
        }
    }
}
