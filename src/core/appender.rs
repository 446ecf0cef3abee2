//! Appender trait for log output destinations

use super::error::Result;

/// Severity bucket an output line is written to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Standard,
    Warn,
    Error,
}

/// Destination for rendered log lines, one write operation per severity bucket.
///
/// The logger hands every rendered record to exactly one of the `write_*`
/// methods. Failures are counted by the logger and never reach the caller.
pub trait Appender: Send {
    fn write_standard(&mut self, output: &str) -> Result<()>;
    fn write_warn(&mut self, output: &str) -> Result<()>;
    fn write_error(&mut self, output: &str) -> Result<()>;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;

    /// Dispatch to the write operation for `severity`
    fn write(&mut self, severity: Severity, output: &str) -> Result<()> {
        match severity {
            Severity::Standard => self.write_standard(output),
            Severity::Warn => self.write_warn(output),
            Severity::Error => self.write_error(output),
        }
    }
}
