//! Merges persistent fields, context params and per-call parameters
//!
//! The composer produces the two things every renderer needs besides the
//! message itself:
//! - the tag sequence: context params, then the call's parameters in order
//! - the record overlay: additional fields with reserved keys removed
//!
//! When timestamping is on it also consumes one tracker tick.

use super::timestamp::TimestampTracker;
use super::value::LogValue;
use serde_json::{Map, Value};

/// Keys the structured renderer always computes itself
pub const RESERVED_KEYS: [&str; 7] = [
    "timestamp",
    "service",
    "level",
    "context",
    "data",
    "tags",
    "timestampDiff",
];

pub fn is_reserved_key(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

/// Composed per-record data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Composition {
    tags: Vec<LogValue>,
    overlay: Map<String, Value>,
    timestamp_diff: Option<i64>,
}

impl Composition {
    /// Compose one record.
    ///
    /// `params` must already be redacted. `tracker` is `Some` only when
    /// timestamping is enabled.
    pub fn compose(
        additional_fields: &Map<String, Value>,
        ctx_params: &[String],
        params: Vec<LogValue>,
        tracker: Option<&mut TimestampTracker>,
    ) -> Self {
        let mut tags = Vec::with_capacity(ctx_params.len() + params.len());
        tags.extend(ctx_params.iter().map(LogValue::from));
        tags.extend(params);

        let overlay = additional_fields
            .iter()
            .filter(|(key, _)| !is_reserved_key(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Self {
            tags,
            overlay,
            timestamp_diff: tracker.map(TimestampTracker::tick),
        }
    }

    pub fn tags(&self) -> &[LogValue] {
        &self.tags
    }

    /// Tags as strings, for the text renderer
    pub fn text_tags(&self) -> Vec<String> {
        self.tags.iter().map(LogValue::stringify).collect()
    }

    /// Tags in structural form, for the structured renderer
    pub fn record_tags(&self) -> Vec<Value> {
        self.tags.iter().map(LogValue::to_json_value).collect()
    }

    pub fn overlay(&self) -> &Map<String, Value> {
        &self.overlay
    }

    pub fn timestamp_diff(&self) -> Option<i64> {
        self.timestamp_diff
    }
}
