//! Core logger types and traits

pub mod appender;
pub mod composer;
pub mod error;
pub mod level_format;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod options;
pub mod output_format;
pub mod redaction;
pub mod structured_entry;
pub mod timestamp;
pub mod value;

pub use appender::{Appender, Severity};
pub use composer::{Composition, RESERVED_KEYS};
pub use error::{LoggerError, Result};
pub use level_format::{bold_color_fn, color_fn, default_level_formats, ColorFn, LevelFormat};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use options::{LoggerOptions, DEFAULT_SERVICE_ID, SERVICE_ID_ENV};
pub use output_format::{OutputFormat, RenderContext, TextLine};
pub use redaction::{Redactor, REDACTED};
pub use structured_entry::StructuredRecord;
pub use timestamp::{format_timestamp, TimestampTracker};
pub use value::{ErrorValue, LogValue};
