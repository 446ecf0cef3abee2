//! In-memory appender capturing rendered records

use crate::core::{Appender, Result, Severity};
use parking_lot::Mutex;
use std::sync::Arc;

/// Captures every rendered record with its severity bucket.
///
/// Clones share the same buffer, so a handle kept by the caller observes
/// what the logger wrote.
///
/// # Example
///
/// ```
/// use context_logger::prelude::*;
///
/// let appender = MemoryAppender::new();
/// let mut logger = Logger::builder().appender(appender.clone()).build();
/// logger.warn("disk almost full");
///
/// let entries = appender.entries();
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].0, Severity::Warn);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryAppender {
    entries: Arc<Mutex<Vec<(Severity, String)>>>,
}

impl MemoryAppender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything written so far
    pub fn entries(&self) -> Vec<(Severity, String)> {
        self.entries.lock().clone()
    }

    /// Rendered records written to `severity`
    pub fn outputs(&self, severity: Severity) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, output)| output.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    fn push(&self, severity: Severity, output: &str) -> Result<()> {
        self.entries.lock().push((severity, output.to_string()));
        Ok(())
    }
}

impl Appender for MemoryAppender {
    fn write_standard(&mut self, output: &str) -> Result<()> {
        self.push(Severity::Standard, output)
    }

    fn write_warn(&mut self, output: &str) -> Result<()> {
        self.push(Severity::Warn, output)
    }

    fn write_error(&mut self, output: &str) -> Result<()> {
        self.push(Severity::Error, output)
    }

    fn name(&self) -> &str {
        "memory"
    }
}
