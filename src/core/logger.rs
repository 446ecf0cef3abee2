//! Main logger implementation

use super::{
    appender::{Appender, Severity},
    composer::Composition,
    error::Result,
    level_format::{default_level_formats, LevelFormat},
    log_level::LogLevel,
    metrics::LoggerMetrics,
    options::{service_id_from_env, LoggerOptions},
    output_format::{OutputFormat, RenderContext},
    redaction::Redactor,
    timestamp::TimestampTracker,
    value::LogValue,
};
use crate::appenders::ConsoleAppender;
use chrono::Utc;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};

/// Per-instance logger.
///
/// Owns all of its configuration; nothing is shared between instances.
/// Configuration methods take `&mut self` and return `&mut Self` so they
/// chain, and never fail: invalid input is coerced or ignored.
///
/// # Example
///
/// ```
/// use context_logger::prelude::*;
///
/// let mut logger = Logger::builder()
///     .context("Payments")
///     .appender(MemoryAppender::new())
///     .build();
///
/// logger
///     .set_json(true)
///     .add_redact_key("password")
///     .set_ctx_params(["env:test"]);
/// logger.log("charge accepted");
/// ```
pub struct Logger {
    context: Option<String>,
    service_id: String,
    levels: HashSet<LogLevel>,
    redactor: Redactor,
    additional_fields: Map<String, Value>,
    ctx_params: Vec<String>,
    json: bool,
    pretty_print: bool,
    timestamp: bool,
    level_formats: HashMap<LogLevel, LevelFormat>,
    tracker: TimestampTracker,
    appender: Box<dyn Appender>,
    metrics: LoggerMetrics,
}

impl Logger {
    /// Logger writing to the console, with built-in defaults
    #[must_use]
    pub fn new() -> Self {
        LoggerBuilder::new().build()
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use context_logger::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .caller_hint("OrdersService")
    ///     .options(LoggerOptions::new().log_levels([LogLevel::Error, LogLevel::Warn]))
    ///     .build();
    /// assert_eq!(logger.context(), Some("OrdersService"));
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    fn from_parts(
        options: LoggerOptions,
        caller_hint: Option<String>,
        level_formats: HashMap<LogLevel, LevelFormat>,
        appender: Box<dyn Appender>,
    ) -> Self {
        let mut logger = Self {
            context: None,
            service_id: String::new(),
            levels: HashSet::new(),
            redactor: Redactor::new(),
            additional_fields: Map::new(),
            ctx_params: Vec::new(),
            json: false,
            pretty_print: false,
            timestamp: false,
            level_formats,
            tracker: TimestampTracker::new(),
            appender,
            metrics: LoggerMetrics::new(),
        };
        logger.set_options(options);
        if logger.context.is_none() {
            logger.context = caller_hint.filter(|hint| !hint.is_empty());
        }
        logger
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    /// Set the logical source name. An empty name clears it.
    pub fn set_context(&mut self, context: impl Into<String>) -> &mut Self {
        let context = context.into();
        self.context = if context.is_empty() { None } else { Some(context) };
        self
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    pub fn service_id(&self) -> &str {
        &self.service_id
    }

    /// Merge `options` into the current configuration. Fields set in
    /// `options` replace the current values; unset fields are left alone.
    pub fn set_options(&mut self, options: LoggerOptions) -> &mut Self {
        if let Some(context) = options.context {
            self.set_context(context);
        }
        if let Some(service_id) = options.service_id {
            self.service_id = service_id;
        }
        if let Some(levels) = options.log_levels {
            self.set_log_levels(levels);
        }
        if let Some(keys) = options.redact_keys {
            self.set_redact_keys(keys);
        }
        if let Some(fields) = options.additional_fields {
            self.additional_fields = fields;
        }
        if let Some(params) = options.ctx_params {
            self.ctx_params = params;
        }
        if let Some(json) = options.json {
            self.json = json;
        }
        if let Some(pretty_print) = options.pretty_print {
            self.pretty_print = pretty_print;
        }
        if let Some(timestamp) = options.timestamp {
            self.timestamp = timestamp;
        }
        self
    }

    /// Replace the enabled levels. An empty set disables all output.
    pub fn set_log_levels(&mut self, levels: impl IntoIterator<Item = LogLevel>) -> &mut Self {
        self.levels = levels.into_iter().collect();
        self
    }

    pub fn add_log_level(&mut self, level: LogLevel) -> &mut Self {
        self.levels.insert(level);
        self
    }

    pub fn add_log_levels(&mut self, levels: impl IntoIterator<Item = LogLevel>) -> &mut Self {
        self.levels.extend(levels);
        self
    }

    pub fn remove_log_level(&mut self, level: LogLevel) -> &mut Self {
        self.levels.remove(&level);
        self
    }

    pub fn remove_log_levels(&mut self, levels: impl IntoIterator<Item = LogLevel>) -> &mut Self {
        for level in levels {
            self.levels.remove(&level);
        }
        self
    }

    /// Currently enabled levels
    pub fn log_levels(&self) -> &HashSet<LogLevel> {
        &self.levels
    }

    #[inline]
    pub fn is_level_enabled(&self, level: LogLevel) -> bool {
        self.levels.contains(&level)
    }

    /// Replace the persistent tags rendered after the context
    pub fn set_ctx_params<I, S>(&mut self, params: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ctx_params = params.into_iter().map(Into::into).collect();
        self
    }

    pub fn ctx_params(&self) -> &[String] {
        &self.ctx_params
    }

    /// Make the next timestamped record report a diff of 0
    pub fn reset_timestamp(&mut self) -> &mut Self {
        self.tracker.reset();
        self
    }

    pub fn set_json(&mut self, enabled: bool) -> &mut Self {
        self.json = enabled;
        self
    }

    pub fn set_pretty_print(&mut self, enabled: bool) -> &mut Self {
        self.pretty_print = enabled;
        self
    }

    pub fn set_timestamp(&mut self, enabled: bool) -> &mut Self {
        self.timestamp = enabled;
        self
    }

    pub fn output_format(&self) -> OutputFormat {
        OutputFormat::from_json_flag(self.json)
    }

    /// Add a field merged into every structured record
    pub fn add_field(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.additional_fields.insert(key.into(), value.into());
        self
    }

    pub fn add_fields(&mut self, fields: Map<String, Value>) -> &mut Self {
        self.additional_fields.extend(fields);
        self
    }

    pub fn remove_field(&mut self, key: &str) -> &mut Self {
        self.additional_fields.remove(key);
        self
    }

    pub fn remove_fields<I, S>(&mut self, keys: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for key in keys {
            self.additional_fields.remove(key.as_ref());
        }
        self
    }

    pub fn additional_fields(&self) -> &Map<String, Value> {
        &self.additional_fields
    }

    /// Replace the sensitive keys. Matching ignores case.
    pub fn set_redact_keys<I, S>(&mut self, keys: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.redactor = Redactor::with_keys(keys);
        self
    }

    pub fn add_redact_key(&mut self, key: impl AsRef<str>) -> &mut Self {
        self.redactor.add_key(key);
        self
    }

    pub fn add_redact_keys<I, S>(&mut self, keys: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.redactor.add_keys(keys);
        self
    }

    pub fn remove_redact_key(&mut self, key: impl AsRef<str>) -> &mut Self {
        self.redactor.remove_key(key);
        self
    }

    pub fn remove_redact_keys<I, S>(&mut self, keys: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for key in keys {
            self.redactor.remove_key(key);
        }
        self
    }

    /// Current sensitive keys, lower-cased
    pub fn redact_keys(&self) -> &HashSet<String> {
        self.redactor.keys()
    }

    /// Set the colors used for `level` in text output
    pub fn set_level_format(&mut self, level: LogLevel, format: LevelFormat) -> &mut Self {
        self.level_formats.insert(level, format);
        self
    }

    /// Render `level` uncolored in text output
    pub fn clear_level_format(&mut self, level: LogLevel) -> &mut Self {
        self.level_formats.remove(&level);
        self
    }

    /// Get the logger metrics
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn flush(&mut self) -> Result<()> {
        self.appender.flush()
    }

    // ------------------------------------------------------------------
    // Logging
    // ------------------------------------------------------------------

    /// Emit one record at `level`.
    ///
    /// Disabled levels return before any conversion, redaction or
    /// timestamping takes place.
    pub fn emit(&mut self, level: LogLevel, message: impl Into<LogValue>, params: Vec<LogValue>) {
        if !self.is_level_enabled(level) {
            self.metrics.record_suppressed();
            return;
        }

        let message = self.redactor.redact_log_value(message.into());
        let params = params
            .into_iter()
            .map(|param| self.redactor.redact_log_value(param))
            .collect();

        let tracker = if self.timestamp {
            Some(&mut self.tracker)
        } else {
            None
        };
        let composition =
            Composition::compose(&self.additional_fields, &self.ctx_params, params, tracker);

        let ctx = RenderContext {
            level,
            service_id: &self.service_id,
            context: self.context.as_deref(),
            timestamp: Utc::now(),
            pretty_print: self.pretty_print,
            level_format: self.level_formats.get(&level),
        };
        let output = self.output_format().format(&ctx, &message, &composition);

        self.write(level.severity(), &output);
    }

    /// Hand the rendered record to the appender with panic isolation.
    /// Failures are counted and reported on stderr, never returned.
    fn write(&mut self, severity: Severity, output: &str) {
        let appender = &mut self.appender;
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            appender.write(severity, output)
        }));

        match result {
            Ok(Ok(())) => {
                self.metrics.record_emitted();
            }
            Ok(Err(e)) => {
                self.metrics.record_write_failure();
                eprintln!("[LOGGER ERROR] Appender '{}' failed: {}", self.appender.name(), e);
            }
            Err(panic_info) => {
                self.metrics.record_write_failure();
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                eprintln!(
                    "[LOGGER CRITICAL] Appender '{}' panicked: {}",
                    self.appender.name(),
                    panic_msg
                );
            }
        }
    }

    #[inline]
    pub fn log(&mut self, message: impl Into<LogValue>) {
        self.emit(LogLevel::Log, message, Vec::new());
    }

    #[inline]
    pub fn error(&mut self, message: impl Into<LogValue>) {
        self.emit(LogLevel::Error, message, Vec::new());
    }

    #[inline]
    pub fn warn(&mut self, message: impl Into<LogValue>) {
        self.emit(LogLevel::Warn, message, Vec::new());
    }

    #[inline]
    pub fn debug(&mut self, message: impl Into<LogValue>) {
        self.emit(LogLevel::Debug, message, Vec::new());
    }

    #[inline]
    pub fn verbose(&mut self, message: impl Into<LogValue>) {
        self.emit(LogLevel::Verbose, message, Vec::new());
    }

    #[inline]
    pub fn fatal(&mut self, message: impl Into<LogValue>) {
        self.emit(LogLevel::Fatal, message, Vec::new());
    }

    #[inline]
    pub fn info(&mut self, message: impl Into<LogValue>) {
        self.emit(LogLevel::Info, message, Vec::new());
    }

    /// `log` with trailing parameters, rendered as tags
    #[inline]
    pub fn log_with(&mut self, message: impl Into<LogValue>, params: Vec<LogValue>) {
        self.emit(LogLevel::Log, message, params);
    }

    #[inline]
    pub fn error_with(&mut self, message: impl Into<LogValue>, params: Vec<LogValue>) {
        self.emit(LogLevel::Error, message, params);
    }

    #[inline]
    pub fn warn_with(&mut self, message: impl Into<LogValue>, params: Vec<LogValue>) {
        self.emit(LogLevel::Warn, message, params);
    }

    #[inline]
    pub fn debug_with(&mut self, message: impl Into<LogValue>, params: Vec<LogValue>) {
        self.emit(LogLevel::Debug, message, params);
    }

    #[inline]
    pub fn verbose_with(&mut self, message: impl Into<LogValue>, params: Vec<LogValue>) {
        self.emit(LogLevel::Verbose, message, params);
    }

    #[inline]
    pub fn fatal_with(&mut self, message: impl Into<LogValue>, params: Vec<LogValue>) {
        self.emit(LogLevel::Fatal, message, params);
    }

    #[inline]
    pub fn info_with(&mut self, message: impl Into<LogValue>, params: Vec<LogValue>) {
        self.emit(LogLevel::Info, message, params);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// Options are layered: built-in defaults (including the service id read
/// once from the environment), then [`module_defaults`](Self::module_defaults),
/// then [`options`](Self::options) and [`context`](Self::context).
///
/// # Example
/// ```
/// use context_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .module_defaults(LoggerOptions::new().service_id("shop").json(true))
///     .options(LoggerOptions::new().json(false))
///     .context("Cart")
///     .appender(MemoryAppender::new())
///     .build();
/// assert_eq!(logger.service_id(), "shop");
/// assert_eq!(logger.output_format(), OutputFormat::Text);
/// ```
pub struct LoggerBuilder {
    context: Option<String>,
    caller_hint: Option<String>,
    module_defaults: Option<LoggerOptions>,
    options: LoggerOptions,
    level_formats: HashMap<LogLevel, LevelFormat>,
    appender: Option<Box<dyn Appender>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            context: None,
            caller_hint: None,
            module_defaults: None,
            options: LoggerOptions::new(),
            level_formats: default_level_formats(),
            appender: None,
        }
    }

    /// Explicit context, wins over options and the caller hint
    #[must_use = "builder methods return a new value"]
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Context used when none is configured
    #[must_use = "builder methods return a new value"]
    pub fn caller_hint(mut self, hint: impl Into<String>) -> Self {
        self.caller_hint = Some(hint.into());
        self
    }

    /// Host-wide defaults, below per-instance options
    #[must_use = "builder methods return a new value"]
    pub fn module_defaults(mut self, defaults: LoggerOptions) -> Self {
        self.module_defaults = Some(defaults);
        self
    }

    /// Per-instance options. Repeated calls merge, later values win.
    #[must_use = "builder methods return a new value"]
    pub fn options(mut self, options: LoggerOptions) -> Self {
        self.options = self.options.merge(options);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn level_format(mut self, level: LogLevel, format: LevelFormat) -> Self {
        self.level_formats.insert(level, format);
        self
    }

    /// Render every level uncolored
    #[must_use = "builder methods return a new value"]
    pub fn without_level_colors(mut self) -> Self {
        self.level_formats.clear();
        self
    }

    /// Set the output destination. Defaults to [`ConsoleAppender`].
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appender = Some(Box::new(appender));
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let mut options = LoggerOptions::builtin(service_id_from_env());
        if let Some(defaults) = self.module_defaults {
            options = options.merge(defaults);
        }
        options = options.merge(self.options);
        if let Some(context) = self.context {
            options.context = Some(context);
        }

        let appender = self
            .appender
            .unwrap_or_else(|| Box::new(ConsoleAppender::new()));

        Logger::from_parts(options, self.caller_hint, self.level_formats, appender)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
