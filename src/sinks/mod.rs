//! Sink trait and built-in sinks

pub mod aggregate;
pub mod console;
pub mod file;

pub use aggregate::AggregatorSink;
pub use console::ConsoleSink;
pub use file::FileSink;

use crate::core::{LogEvent, Result};

/// Terminal consumer of log events
pub trait Sink: Send + Sync {
    fn emit(&mut self, event: &LogEvent) -> Result<()>;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}
