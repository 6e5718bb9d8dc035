//! Console sink

use super::Sink;
use crate::core::{JsonFormatter, LogEvent, LogLevel, RecordFormatter, Result};
use colored::Colorize;

/// Writes formatted records to stdout, routing ERROR and CRITICAL to stderr
pub struct ConsoleSink {
    formatter: Box<dyn RecordFormatter>,
    use_colors: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            formatter: Box::new(JsonFormatter::new()),
            use_colors: true,
        }
    }

    pub fn with_formatter(formatter: Box<dyn RecordFormatter>) -> Self {
        Self {
            formatter,
            use_colors: true,
        }
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn emit(&mut self, event: &LogEvent) -> Result<()> {
        let line = self.formatter.format(event);
        let line = if self.use_colors {
            line.color(event.level.color_code()).to_string()
        } else {
            line
        };

        match event.level {
            LogLevel::Error | LogLevel::Critical => eprintln!("{}", line),
            _ => println!("{}", line),
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        use std::io::Write;
        // Flush both streams since we write to both
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
