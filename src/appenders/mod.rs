//! Appender implementations

pub mod console;
pub mod memory;

pub use console::ConsoleAppender;
pub use memory::MemoryAppender;

// Re-export the trait for convenience
pub use crate::core::Appender;
