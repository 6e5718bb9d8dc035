//! Append-only file sink

use super::Sink;
use crate::core::{JsonFormatter, LogEvent, LoggerError, RecordFormatter, Result};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Appends formatted records to a caller-supplied path, one per line
///
/// No rotation is performed; rotation belongs to an external collector.
pub struct FileSink {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    formatter: Box<dyn RecordFormatter>,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        Self::with_formatter(path, Box::new(JsonFormatter::new()))
    }

    pub fn with_formatter(
        path: impl Into<PathBuf>,
        formatter: Box<dyn RecordFormatter>,
    ) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LoggerError::file_sink(path.display().to_string(), e.to_string()))?;

        Ok(Self {
            path,
            writer: Some(BufWriter::new(file)),
            formatter,
        })
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl Sink for FileSink {
    fn emit(&mut self, event: &LogEvent) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::sink("file", "writer not initialized"))?;

        let mut line = self.formatter.format(event);
        line.push('\n');
        writer.write_all(line.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.flush();
    }
}
