//! Output format selection and the human-readable text renderer
//!
//! - Text: colored `[service] timestamp LEVEL [Context][tags] message`
//! - Json: one structured record per call, see [`StructuredRecord`]

use super::composer::Composition;
use super::level_format::LevelFormat;
use super::log_level::LogLevel;
use super::structured_entry::StructuredRecord;
use super::timestamp::format_timestamp;
use super::value::LogValue;
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde_json::Value;

/// Width the level label is centered in (`VERBOSE` is the longest label)
pub const LEVEL_TAG_WIDTH: usize = 7;

/// Per-record rendering inputs owned by the logger
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    pub level: LogLevel,
    pub service_id: &'a str,
    pub context: Option<&'a str>,
    pub timestamp: DateTime<Utc>,
    pub pretty_print: bool,
    pub level_format: Option<&'a LevelFormat>,
}

/// Output format for log records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable colored text (default)
    ///
    /// Example: `[Nest] 2025-01-08T10:30:45.123Z   LOG   [App][env:test] Request processed`
    #[default]
    Text,

    /// Structured JSON record
    ///
    /// Example: `{"context":"App","data":{"message":"Request processed"},"level":"LOG",...}`
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }

    /// Render one record. `message` must already be redacted.
    pub fn format(
        &self,
        ctx: &RenderContext<'_>,
        message: &LogValue,
        composition: &Composition,
    ) -> String {
        match self {
            OutputFormat::Text => TextLine::render(ctx, message, composition).join(),
            OutputFormat::Json => {
                let record = StructuredRecord::build(ctx, message, composition);
                let encoded = if ctx.pretty_print {
                    record.to_json_pretty()
                } else {
                    record.to_json()
                };
                match encoded {
                    Ok(json) => json,
                    Err(e) => {
                        eprintln!("[LOGGER ERROR] Failed to encode structured record: {}", e);
                        TextLine::render(ctx, message, composition).join()
                    }
                }
            }
        }
    }
}

/// Rendered text segments, joined with single spaces for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    pub prefix: String,
    pub level_tag: String,
    pub context_tag: String,
    pub body: String,
}

impl TextLine {
    pub fn render(ctx: &RenderContext<'_>, message: &LogValue, composition: &Composition) -> Self {
        let default_format = LevelFormat::plain();
        let level_format = ctx.level_format.unwrap_or(&default_format);

        let timestamp = format_timestamp(&ctx.timestamp);
        let prefix = if ctx.service_id.is_empty() {
            timestamp
        } else {
            format!("[{}] {}", ctx.service_id, timestamp)
        };

        let level_tag = format!("{:^width$}", ctx.level.to_str(), width = LEVEL_TAG_WIDTH);

        let context_tag: String = ctx
            .context
            .filter(|c| !c.is_empty())
            .map(String::from)
            .into_iter()
            .chain(composition.text_tags())
            .map(|tag| format!("[{}]", tag))
            .collect();

        let mut body = match message {
            LogValue::Json(Value::String(s)) => level_format.paint_message(s),
            LogValue::Json(v @ (Value::Array(_) | Value::Object(_))) => encode(v, ctx.pretty_print),
            LogValue::Error(err) => encode(&err.to_json_value(), ctx.pretty_print),
            other => other.stringify(),
        };
        if let Some(diff) = composition.timestamp_diff() {
            body.push(' ');
            body.push_str(&format!("+{}ms", diff).yellow().to_string());
        }

        Self {
            prefix: prefix.green().to_string(),
            level_tag: level_format.paint_level(&level_tag),
            context_tag: if context_tag.is_empty() {
                context_tag
            } else {
                context_tag.yellow().to_string()
            },
            body,
        }
    }

    /// Join the non-empty segments with single spaces
    pub fn join(&self) -> String {
        [&self.prefix, &self.level_tag, &self.context_tag, &self.body]
            .iter()
            .filter(|segment| !segment.is_empty())
            .map(|segment| segment.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn encode(value: &Value, pretty: bool) -> String {
    let encoded = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    encoded.unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::value::ErrorValue;
    use serde_json::json;
    use std::sync::Arc;

    fn ctx<'a>(context: Option<&'a str>, format: Option<&'a LevelFormat>) -> RenderContext<'a> {
        RenderContext {
            level: LogLevel::Log,
            service_id: "Nest",
            context,
            timestamp: Utc::now(),
            pretty_print: false,
            level_format: format,
        }
    }

    fn strip(s: &str) -> String {
        // drop ANSI escape sequences
        let mut out = String::new();
        let mut chars = s.chars();
        while let Some(c) = chars.next() {
            if c == '\u{1b}' {
                for c in chars.by_ref() {
                    if c == 'm' {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    #[test]
    fn test_text_segments() {
        let composition = Composition::compose(
            &serde_json::Map::new(),
            &["env:test".to_string()],
            vec![LogValue::from("tag1")],
            None,
        );
        let line = TextLine::render(&ctx(Some("App"), None), &"hello".into(), &composition);
        assert!(strip(&line.prefix).starts_with("[Nest] "));
        assert_eq!(strip(&line.level_tag), "  LOG  ");
        assert_eq!(strip(&line.context_tag), "[App][env:test][tag1]");
        assert_eq!(strip(&line.body), "hello");
    }

    #[test]
    fn test_empty_service_and_context_omitted() {
        let mut c = ctx(None, None);
        c.service_id = "";
        let line = TextLine::render(&c, &"hello".into(), &Composition::default());
        assert!(!strip(&line.prefix).contains('['));
        assert!(line.context_tag.is_empty());
        assert_eq!(strip(&line.join()).matches("  ").count(), 2);
    }

    #[test]
    fn test_message_color_applies_to_strings_only() {
        let format = LevelFormat::plain()
            .with_level_color(Arc::new(|s: &str| format!("<{}>", s.trim())))
            .with_message_color(Arc::new(|s: &str| format!("*{}*", s)));
        let line = TextLine::render(&ctx(None, Some(&format)), &"hi".into(), &Composition::default());
        assert_eq!(line.level_tag, "<LOG>");
        assert_eq!(line.body, "*hi*");

        let line = TextLine::render(
            &ctx(None, Some(&format)),
            &json!({"a": 1}).into(),
            &Composition::default(),
        );
        assert_eq!(line.body, r#"{"a":1}"#);
    }

    #[test]
    fn test_error_body_renders_projection() {
        let line = TextLine::render(
            &ctx(None, None),
            &ErrorValue::new("Error", "boom").into(),
            &Composition::default(),
        );
        assert!(line.body.contains("\"message\":\"boom\""));
    }

    #[test]
    fn test_timestamp_diff_suffix() {
        let mut tracker = crate::core::timestamp::TimestampTracker::new();
        let composition =
            Composition::compose(&serde_json::Map::new(), &[], Vec::new(), Some(&mut tracker));
        let line = TextLine::render(&ctx(None, None), &"hi".into(), &composition);
        assert_eq!(strip(&line.body), "hi +0ms");
    }

    #[test]
    fn test_null_message_stringified() {
        let line = TextLine::render(&ctx(None, None), &LogValue::Json(Value::Null), &Composition::default());
        assert_eq!(line.body, "null");
    }

    #[test]
    fn test_json_format_pretty_toggle() {
        let mut c = ctx(Some("App"), None);
        let compact = OutputFormat::Json.format(&c, &"hi".into(), &Composition::default());
        assert!(!compact.contains('\n'));
        c.pretty_print = true;
        let pretty = OutputFormat::Json.format(&c, &"hi".into(), &Composition::default());
        assert!(pretty.contains('\n'));
    }
}
