//! Logging macros taking a message plus any number of parameters.
//!
//! Each parameter is converted with `Into<LogValue>`, so strings, numbers,
//! `serde_json::Value`s and [`ErrorValue`](crate::ErrorValue)s can be mixed.
//!
//! # Examples
//!
//! ```
//! use context_logger::prelude::*;
//! use context_logger::{info, warn};
//!
//! let mut logger = Logger::builder().appender(MemoryAppender::new()).build();
//!
//! // Message only
//! info!(logger, "Server started");
//!
//! // Message plus tags
//! let port = 8080;
//! info!(logger, "Listening", "http", port);
//! warn!(logger, serde_json::json!({"queue": "mail", "depth": 900}), "backlog");
//! ```

/// Emit at a runtime level.
///
/// # Examples
///
/// ```
/// # use context_logger::prelude::*;
/// # let mut logger = Logger::builder().appender(MemoryAppender::new()).build();
/// use context_logger::emit;
/// emit!(logger, LogLevel::Info, "Simple message");
/// emit!(logger, LogLevel::Error, "Request failed", 500);
/// ```
#[macro_export]
macro_rules! emit {
    ($logger:expr, $level:expr, $message:expr $(, $param:expr)* $(,)?) => {
        $logger.emit(
            $level,
            $message,
            ::std::vec![$($crate::LogValue::from($param)),*],
        )
    };
}

/// Emit at the `log` level.
#[macro_export]
macro_rules! log {
    ($logger:expr, $message:expr $(, $param:expr)* $(,)?) => {
        $crate::emit!($logger, $crate::LogLevel::Log, $message $(, $param)*)
    };
}

/// Emit at the `error` level.
#[macro_export]
macro_rules! error {
    ($logger:expr, $message:expr $(, $param:expr)* $(,)?) => {
        $crate::emit!($logger, $crate::LogLevel::Error, $message $(, $param)*)
    };
}

/// Emit at the `warn` level.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $message:expr $(, $param:expr)* $(,)?) => {
        $crate::emit!($logger, $crate::LogLevel::Warn, $message $(, $param)*)
    };
}

/// Emit at the `debug` level.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $message:expr $(, $param:expr)* $(,)?) => {
        $crate::emit!($logger, $crate::LogLevel::Debug, $message $(, $param)*)
    };
}

/// Emit at the `verbose` level.
#[macro_export]
macro_rules! verbose {
    ($logger:expr, $message:expr $(, $param:expr)* $(,)?) => {
        $crate::emit!($logger, $crate::LogLevel::Verbose, $message $(, $param)*)
    };
}

/// Emit at the `fatal` level.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $message:expr $(, $param:expr)* $(,)?) => {
        $crate::emit!($logger, $crate::LogLevel::Fatal, $message $(, $param)*)
    };
}

/// Emit at the `info` level.
#[macro_export]
macro_rules! info {
    ($logger:expr, $message:expr $(, $param:expr)* $(,)?) => {
        $crate::emit!($logger, $crate::LogLevel::Info, $message $(, $param)*)
    };
}

#[cfg(test)]
mod tests {
    use crate::appenders::MemoryAppender;
    use crate::core::{Logger, LogLevel, Severity};

    fn logger() -> (Logger, MemoryAppender) {
        let appender = MemoryAppender::new();
        let logger = Logger::builder()
            .appender(appender.clone())
            .without_level_colors()
            .build();
        (logger, appender)
    }

    #[test]
    fn test_level_macros_route_to_buckets() {
        let (mut logger, appender) = logger();
        crate::log!(logger, "a");
        crate::error!(logger, "b", "tag");
        crate::warn!(logger, "c", 1, 2);
        crate::debug!(logger, "d");
        crate::verbose!(logger, "e");
        crate::fatal!(logger, "f");
        crate::info!(logger, "g",);

        assert_eq!(appender.len(), 7);
        assert_eq!(appender.outputs(Severity::Error).len(), 2);
        assert_eq!(appender.outputs(Severity::Warn).len(), 1);
    }

    #[test]
    fn test_params_become_tags() {
        let (mut logger, appender) = logger();
        crate::emit!(logger, LogLevel::Log, "msg", "first", 2);
        let output = &appender.entries()[0].1;
        assert!(output.contains("[first]"));
        assert!(output.contains("[2]"));
    }
}
