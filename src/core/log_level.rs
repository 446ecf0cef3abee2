//! Log level definitions

use super::appender::Severity;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named logging level. Levels are enabled independently, there is no
/// ordering between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Log,
    Error,
    Warn,
    Debug,
    Verbose,
    Fatal,
    Info,
}

impl LogLevel {
    /// Every level, in declaration order
    pub const ALL: [LogLevel; 7] = [
        LogLevel::Log,
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Debug,
        LogLevel::Verbose,
        LogLevel::Fatal,
        LogLevel::Info,
    ];

    /// Lower-case level name, as used in configuration
    pub fn name(&self) -> &'static str {
        match self {
            LogLevel::Log => "log",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Debug => "debug",
            LogLevel::Verbose => "verbose",
            LogLevel::Fatal => "fatal",
            LogLevel::Info => "info",
        }
    }

    /// Upper-case label, as rendered in output
    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Log => "LOG",
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Debug => "DEBUG",
            LogLevel::Verbose => "VERBOSE",
            LogLevel::Fatal => "FATAL",
            LogLevel::Info => "INFO",
        }
    }

    /// Sink bucket this level is written to. Fixed per level.
    pub fn severity(&self) -> Severity {
        match self {
            LogLevel::Error | LogLevel::Fatal => Severity::Error,
            LogLevel::Warn => Severity::Warn,
            _ => Severity::Standard,
        }
    }

    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Log => Green,
            LogLevel::Error => Red,
            LogLevel::Warn => Yellow,
            LogLevel::Debug => Magenta,
            LogLevel::Verbose => Cyan,
            LogLevel::Fatal => BrightRed,
            LogLevel::Info => Blue,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "log" => Ok(LogLevel::Log),
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "debug" => Ok(LogLevel::Debug),
            "verbose" => Ok(LogLevel::Verbose),
            "fatal" => Ok(LogLevel::Fatal),
            "info" => Ok(LogLevel::Info),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}
