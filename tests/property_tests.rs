//! Property-based tests for context_logger using proptest

use context_logger::prelude::*;
use proptest::prelude::*;
use serde_json::{json, Map, Value};

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Log),
        Just(LogLevel::Error),
        Just(LogLevel::Warn),
        Just(LogLevel::Debug),
        Just(LogLevel::Verbose),
        Just(LogLevel::Fatal),
        Just(LogLevel::Info),
    ]
}

/// Arbitrary JSON trees with keys drawn from a small alphabet so that
/// sensitive keys actually show up.
fn any_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-z]{0,8}".prop_map(Value::String),
    ];
    leaf.prop_recursive(6, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec(
                (prop_oneof![Just("password"), Just("PassWord"), Just("user"), Just("id")], inner),
                0..6,
            )
            .prop_map(|pairs| {
                let map: Map<String, Value> =
                    pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect();
                Value::Object(map)
            }),
        ]
    })
}

/// True when no object anywhere in `value` has a sensitive key whose value
/// differs from the sentinel
fn fully_redacted(value: &Value, key: &str) -> bool {
    match value {
        Value::Array(items) => items.iter().all(|v| fully_redacted(v, key)),
        Value::Object(fields) => fields.iter().all(|(k, v)| {
            if k.eq_ignore_ascii_case(key) {
                v == &Value::String(REDACTED.to_string())
            } else {
                fully_redacted(v, key)
            }
        }),
        _ => true,
    }
}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    /// Level names parse back to the same level regardless of case
    #[test]
    fn test_log_level_name_roundtrip(level in any_level(), upper in any::<bool>()) {
        let name = if upper { level.to_str().to_string() } else { level.name().to_string() };
        let parsed: LogLevel = name.parse().unwrap();
        prop_assert_eq!(level, parsed);
    }

    /// Display matches to_str
    #[test]
    fn test_log_level_display(level in any_level()) {
        prop_assert_eq!(format!("{}", level), level.to_str());
    }

    /// Only enabled levels write anything
    #[test]
    fn test_gate_matches_membership(
        enabled in prop::collection::hash_set(any_level(), 0..7),
        called in any_level(),
    ) {
        let appender = MemoryAppender::new();
        let mut logger = Logger::builder().appender(appender.clone()).build();
        logger.set_log_levels(enabled.iter().copied());

        logger.emit(called, "message", Vec::new());

        let expected = usize::from(enabled.contains(&called));
        prop_assert_eq!(appender.len(), expected);
    }
}

// ============================================================================
// Redaction Tests
// ============================================================================

proptest! {
    /// Every sensitive key is replaced, at any depth
    #[test]
    fn test_redaction_is_complete(value in any_json()) {
        let redactor = Redactor::with_keys(["password"]);
        let redacted = redactor.redact(&value);
        prop_assert!(fully_redacted(&redacted, "password"));
    }

    /// Redacting twice gives the same result as redacting once
    #[test]
    fn test_redaction_is_idempotent(value in any_json()) {
        let redactor = Redactor::with_keys(["password", "id"]);
        let once = redactor.redact(&value);
        let twice = redactor.redact(&once);
        prop_assert_eq!(once, twice);
    }

    /// Without sensitive keys the value is untouched
    #[test]
    fn test_redaction_without_keys_is_identity(value in any_json()) {
        let redactor = Redactor::new();
        prop_assert_eq!(redactor.redact(&value), value);
    }

    /// Nesting depth does not matter
    #[test]
    fn test_redaction_depth_independent(depth in 0usize..200) {
        let mut value = json!({"password": "hunter2"});
        for _ in 0..depth {
            value = json!({"wrapper": [value]});
        }
        let redacted = Redactor::with_keys(["PASSWORD"]).redact(&value);
        prop_assert!(fully_redacted(&redacted, "password"));
        prop_assert!(!redacted.to_string().contains("hunter2"));
    }
}

// ============================================================================
// Structured Record Tests
// ============================================================================

proptest! {
    /// Any message produces a record with the fixed key set
    #[test]
    fn test_record_has_fixed_keys(message in any_json(), level in any_level()) {
        let appender = MemoryAppender::new();
        let mut logger = Logger::builder().appender(appender.clone()).build();
        logger.set_json(true);

        logger.emit(level, message, Vec::new());

        let entries = appender.entries();
        let record: Value = serde_json::from_str(&entries[0].1).unwrap();
        let mut keys: Vec<&str> = record.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        prop_assert_eq!(keys, vec!["context", "data", "level", "service", "timestamp"]);
        prop_assert_eq!(record["level"].as_str(), Some(level.to_str()));
    }
}
