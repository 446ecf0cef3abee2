//! Recursive redaction of sensitive keys
//!
//! Keys are matched case-insensitively. A matching key has its value
//! replaced by [`REDACTED`] without descending into it; every other value is
//! traversed. `serde_json::Value` is an owned tree, so traversal always
//! terminates: a self-referential value cannot be built.

use super::value::LogValue;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Sentinel written in place of a redacted value
pub const REDACTED: &str = "[REDACTED]";

/// Set of sensitive keys, stored lower-cased
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Redactor {
    keys: HashSet<String>,
}

impl Redactor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from any list of keys. Blank keys are ignored.
    pub fn with_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut redactor = Self::new();
        redactor.add_keys(keys);
        redactor
    }

    pub fn add_key(&mut self, key: impl AsRef<str>) {
        let key = key.as_ref().trim();
        if !key.is_empty() {
            self.keys.insert(key.to_lowercase());
        }
    }

    pub fn add_keys<I, S>(&mut self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for key in keys {
            self.add_key(key);
        }
    }

    pub fn remove_key(&mut self, key: impl AsRef<str>) {
        self.keys.remove(&key.as_ref().trim().to_lowercase());
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Current keys, lower-cased
    pub fn keys(&self) -> &HashSet<String> {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// True when `key` matches a configured key, ignoring case
    pub fn matches(&self, key: &str) -> bool {
        !self.keys.is_empty() && self.keys.contains(&key.to_lowercase())
    }

    /// Return a copy of `value` with every sensitive key's value replaced
    pub fn redact(&self, value: &Value) -> Value {
        if self.keys.is_empty() {
            return value.clone();
        }
        self.redact_inner(value)
    }

    fn redact_inner(&self, value: &Value) -> Value {
        match value {
            Value::Array(items) => Value::Array(items.iter().map(|v| self.redact_inner(v)).collect()),
            Value::Object(fields) => {
                let mut out = Map::with_capacity(fields.len());
                for (key, field) in fields {
                    let redacted = if self.matches(key) {
                        Value::String(REDACTED.to_string())
                    } else {
                        self.redact_inner(field)
                    };
                    out.insert(key.clone(), redacted);
                }
                Value::Object(out)
            }
            primitive => primitive.clone(),
        }
    }

    /// Redact a call-site value. Errors and primitives pass through.
    pub fn redact_log_value(&self, value: LogValue) -> LogValue {
        match value {
            LogValue::Json(v) if !self.keys.is_empty() && (v.is_array() || v.is_object()) => {
                LogValue::Json(self.redact_inner(&v))
            }
            other => other,
        }
    }
}
