//! Console appender implementation

use crate::core::{Appender, Result};
use std::io::Write;

/// Writes standard records to stdout, warnings and errors to stderr
#[derive(Debug, Default)]
pub struct ConsoleAppender;

impl ConsoleAppender {
    pub fn new() -> Self {
        Self
    }
}

impl Appender for ConsoleAppender {
    fn write_standard(&mut self, output: &str) -> Result<()> {
        writeln!(std::io::stdout().lock(), "{}", output)?;
        Ok(())
    }

    fn write_warn(&mut self, output: &str) -> Result<()> {
        writeln!(std::io::stderr().lock(), "{}", output)?;
        Ok(())
    }

    fn write_error(&mut self, output: &str) -> Result<()> {
        writeln!(std::io::stderr().lock(), "{}", output)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        // Flush both stdout and stderr since we write to both
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
