//! Construction-time logger options
//!
//! Options come from three layers, merged in increasing priority:
//! built-in defaults, module-wide defaults supplied by the host, and the
//! options passed for one logger instance.

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Environment key holding the default service identifier
pub const SERVICE_ID_ENV: &str = "SERVICE_ID";

/// Service identifier used when neither options nor the environment set one
pub const DEFAULT_SERVICE_ID: &str = "Nest";

/// Logger options. Every field is optional; an unset field falls through
/// to the next layer.
///
/// # Example
///
/// ```
/// use context_logger::LoggerOptions;
///
/// let options = LoggerOptions::from_json(
///     r#"{ "serviceId": "billing", "logLevels": ["error", "warn"], "json": true }"#,
/// ).unwrap();
/// assert_eq!(options.service_id.as_deref(), Some("billing"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggerOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_levels: Option<Vec<LogLevel>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redact_keys: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_fields: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ctx_params: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretty_print: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<bool>,
}

impl LoggerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in defaults: every level enabled, nothing redacted, text output
    pub fn builtin(service_id: impl Into<String>) -> Self {
        Self {
            context: None,
            service_id: Some(service_id.into()),
            log_levels: Some(LogLevel::ALL.to_vec()),
            redact_keys: Some(Vec::new()),
            additional_fields: Some(Map::new()),
            ctx_params: Some(Vec::new()),
            json: Some(false),
            pretty_print: Some(false),
            timestamp: Some(false),
        }
    }

    /// Parse options from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| LoggerError::config("LoggerOptions", e.to_string()))
    }

    /// Layer `higher` over `self`; fields set in `higher` win
    #[must_use]
    pub fn merge(self, higher: LoggerOptions) -> LoggerOptions {
        LoggerOptions {
            context: higher.context.or(self.context),
            service_id: higher.service_id.or(self.service_id),
            log_levels: higher.log_levels.or(self.log_levels),
            redact_keys: higher.redact_keys.or(self.redact_keys),
            additional_fields: higher.additional_fields.or(self.additional_fields),
            ctx_params: higher.ctx_params.or(self.ctx_params),
            json: higher.json.or(self.json),
            pretty_print: higher.pretty_print.or(self.pretty_print),
            timestamp: higher.timestamp.or(self.timestamp),
        }
    }

    #[must_use]
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    #[must_use]
    pub fn service_id(mut self, service_id: impl Into<String>) -> Self {
        self.service_id = Some(service_id.into());
        self
    }

    #[must_use]
    pub fn log_levels(mut self, levels: impl IntoIterator<Item = LogLevel>) -> Self {
        self.log_levels = Some(levels.into_iter().collect());
        self
    }

    #[must_use]
    pub fn redact_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.redact_keys = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn additional_fields(mut self, fields: Map<String, Value>) -> Self {
        self.additional_fields = Some(fields);
        self
    }

    #[must_use]
    pub fn ctx_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ctx_params = Some(params.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn json(mut self, enabled: bool) -> Self {
        self.json = Some(enabled);
        self
    }

    #[must_use]
    pub fn pretty_print(mut self, enabled: bool) -> Self {
        self.pretty_print = Some(enabled);
        self
    }

    #[must_use]
    pub fn timestamp(mut self, enabled: bool) -> Self {
        self.timestamp = Some(enabled);
        self
    }
}

/// Read the default service identifier once from the environment
pub fn service_id_from_env() -> String {
    resolve_service_id(std::env::var(SERVICE_ID_ENV).ok())
}

fn resolve_service_id(raw: Option<String>) -> String {
    raw.map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_SERVICE_ID.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_priority() {
        let builtin = LoggerOptions::builtin("Nest");
        let module = LoggerOptions::new().service_id("module-svc").json(true);
        let caller = LoggerOptions::new().service_id("caller-svc");

        let merged = builtin.merge(module).merge(caller);
        assert_eq!(merged.service_id.as_deref(), Some("caller-svc"));
        assert_eq!(merged.json, Some(true));
        assert_eq!(merged.pretty_print, Some(false));
        assert_eq!(merged.log_levels.map(|l| l.len()), Some(7));
    }

    #[test]
    fn test_from_json_camel_case() {
        let options = LoggerOptions::from_json(
            r#"{
                "context": "Billing",
                "redactKeys": ["password"],
                "ctxParams": ["env:test"],
                "additionalFields": {"region": "eu"},
                "prettyPrint": true
            }"#,
        )
        .unwrap();
        assert_eq!(options.context.as_deref(), Some("Billing"));
        assert_eq!(options.redact_keys, Some(vec!["password".to_string()]));
        assert_eq!(options.ctx_params, Some(vec!["env:test".to_string()]));
        assert_eq!(options.pretty_print, Some(true));
        assert!(options.json.is_none());
    }

    #[test]
    fn test_from_json_rejects_unknown_level() {
        let err = LoggerOptions::from_json(r#"{ "logLevels": ["trace"] }"#).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_resolve_service_id() {
        assert_eq!(resolve_service_id(None), DEFAULT_SERVICE_ID);
        assert_eq!(resolve_service_id(Some("  ".to_string())), DEFAULT_SERVICE_ID);
        assert_eq!(resolve_service_id(Some("orders".to_string())), "orders");
    }
}
