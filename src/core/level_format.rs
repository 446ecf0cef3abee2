//! Per-level colors for the text renderer

use super::log_level::LogLevel;
use colored::{Color, Colorize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Function coloring a rendered segment
pub type ColorFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Color function painting text in `color`
pub fn color_fn(color: Color) -> ColorFn {
    Arc::new(move |text: &str| text.color(color).to_string())
}

/// Color function painting text bold in `color`
pub fn bold_color_fn(color: Color) -> ColorFn {
    Arc::new(move |text: &str| text.color(color).bold().to_string())
}

/// Level tag and message colors for one level. A missing function leaves
/// the segment uncolored.
#[derive(Clone, Default)]
pub struct LevelFormat {
    level: Option<ColorFn>,
    message: Option<ColorFn>,
}

impl LevelFormat {
    /// Uncolored level tag and message
    pub fn plain() -> Self {
        Self::default()
    }

    /// Level tag and message both painted in `color`
    pub fn colored(color: Color) -> Self {
        Self {
            level: Some(color_fn(color)),
            message: Some(color_fn(color)),
        }
    }

    #[must_use]
    pub fn with_level_color(mut self, f: ColorFn) -> Self {
        self.level = Some(f);
        self
    }

    #[must_use]
    pub fn with_message_color(mut self, f: ColorFn) -> Self {
        self.message = Some(f);
        self
    }

    pub fn paint_level(&self, text: &str) -> String {
        paint(self.level.as_ref(), text)
    }

    pub fn paint_message(&self, text: &str) -> String {
        paint(self.message.as_ref(), text)
    }
}

impl fmt::Debug for LevelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LevelFormat")
            .field("level", &self.level.is_some())
            .field("message", &self.message.is_some())
            .finish()
    }
}

fn paint(f: Option<&ColorFn>, text: &str) -> String {
    match f {
        Some(f) => f(text),
        None => text.to_string(),
    }
}

/// Built-in color table. Fatal is bold.
pub fn default_level_formats() -> HashMap<LogLevel, LevelFormat> {
    LogLevel::ALL
        .iter()
        .map(|&level| {
            let format = match level {
                LogLevel::Fatal => LevelFormat::plain()
                    .with_level_color(bold_color_fn(level.color_code()))
                    .with_message_color(bold_color_fn(level.color_code())),
                _ => LevelFormat::colored(level.color_code()),
            };
            (level, format)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_format_leaves_text_untouched() {
        let format = LevelFormat::plain();
        assert_eq!(format.paint_level("LOG"), "LOG");
        assert_eq!(format.paint_message("hello"), "hello");
    }

    #[test]
    fn test_custom_color_fns() {
        let format = LevelFormat::plain()
            .with_level_color(Arc::new(|s: &str| format!("<{}>", s)))
            .with_message_color(Arc::new(|s: &str| s.to_uppercase()));
        assert_eq!(format.paint_level("WARN"), "<WARN>");
        assert_eq!(format.paint_message("careful"), "CAREFUL");
    }

    #[test]
    fn test_default_table_covers_every_level() {
        let formats = default_level_formats();
        for level in LogLevel::ALL {
            let format = formats.get(&level).expect("level has a format");
            assert!(format.paint_level(level.to_str()).contains(level.to_str()));
        }
    }
}
