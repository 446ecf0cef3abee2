//! # Context Logger
//!
//! A per-instance structured logger. Each call turns a message plus optional
//! parameters into either a colored text line or a JSON record, after
//! level gating, sensitive-field redaction and contextual tagging.
//!
//! ## Features
//!
//! - **Level gating**: seven independently enabled levels
//! - **Redaction**: case-insensitive sensitive keys, replaced at any depth
//! - **Context tags**: context name, persistent params and per-call params
//! - **Two renderers**: colored text or single-line / pretty JSON
//! - **Timestamp diffs**: `+Nms` since the previous record

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, MemoryAppender};
    pub use crate::core::{
        Appender, ErrorValue, LevelFormat, LogLevel, LogValue, Logger, LoggerBuilder,
        LoggerError, LoggerMetrics, LoggerOptions, OutputFormat, Redactor, Result, Severity,
        REDACTED,
    };
}

pub use crate::appenders::{ConsoleAppender, MemoryAppender};
pub use crate::core::{
    Appender, ColorFn, Composition, ErrorValue, LevelFormat, LogLevel, LogValue, Logger,
    LoggerBuilder, LoggerError, LoggerMetrics, LoggerOptions, OutputFormat, Redactor, Result,
    Severity, StructuredRecord, TextLine, TimestampTracker, DEFAULT_SERVICE_ID, REDACTED,
    SERVICE_ID_ENV,
};
