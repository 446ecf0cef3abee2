//! Structured (JSON) record renderer

use super::composer::Composition;
use super::output_format::RenderContext;
use super::timestamp::format_timestamp;
use super::value::LogValue;
use serde_json::{Map, Value};

/// One structured log record.
///
/// Key precedence, lowest first: additional fields, then `timestamp`,
/// `service`, `level`, `context`, `data`, then `tags` (only when the tag
/// sequence is non-empty) and `timestampDiff` (only when timestamping).
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredRecord {
    fields: Map<String, Value>,
}

impl StructuredRecord {
    /// Build a record from an already-redacted message
    pub fn build(ctx: &RenderContext<'_>, message: &LogValue, composition: &Composition) -> Self {
        let mut fields = composition.overlay().clone();

        fields.insert(
            "timestamp".to_string(),
            Value::String(format_timestamp(&ctx.timestamp)),
        );
        fields.insert("service".to_string(), Value::String(ctx.service_id.to_string()));
        fields.insert("level".to_string(), Value::String(ctx.level.to_str().to_string()));
        fields.insert(
            "context".to_string(),
            ctx.context
                .map(|c| Value::String(c.to_string()))
                .unwrap_or(Value::Null),
        );
        fields.insert("data".to_string(), Self::data(message));

        if !composition.tags().is_empty() {
            fields.insert("tags".to_string(), Value::Array(composition.record_tags()));
        }
        if let Some(diff) = composition.timestamp_diff() {
            fields.insert("timestampDiff".to_string(), Value::from(diff));
        }

        Self { fields }
    }

    /// `data` payload for a message
    fn data(message: &LogValue) -> Value {
        match message {
            LogValue::Error(err) => {
                let mut data = Map::new();
                data.insert("error".to_string(), err.to_json_value());
                Value::Object(data)
            }
            LogValue::Json(v @ (Value::Array(_) | Value::Object(_))) => v.clone(),
            other => {
                let mut data = Map::new();
                data.insert("message".to_string(), Value::String(other.stringify()));
                Value::Object(data)
            }
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }

    /// Serialize to a single-line JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.fields)
    }

    /// Serialize to indented JSON
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.fields)
    }
}
