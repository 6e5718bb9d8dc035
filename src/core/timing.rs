//! Timed operation guard
//!
//! Logs the start of an operation when created and its outcome when finished.
//! Dropping the guard without an explicit outcome logs completion, or failure
//! if the thread is unwinding, so an operation's duration is recorded on
//! every exit path.

use super::fields::FieldSet;
use super::logger::StructuredLogger;
use std::time::{Duration, Instant};

pub struct TimedOperation<'a> {
    logger: &'a StructuredLogger,
    operation: String,
    started: Instant,
    finished: bool,
}

impl<'a> TimedOperation<'a> {
    /// Begin timing; logs a debug record immediately
    pub fn start(logger: &'a StructuredLogger, operation: impl Into<String>) -> Self {
        let operation = operation.into();
        logger.debug_with(
            format!("Starting {}", operation),
            FieldSet::new().with_field("operation", operation.as_str()),
        );
        Self {
            logger,
            operation,
            started: Instant::now(),
            finished: false,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    fn outcome_fields(&self, status: &str) -> FieldSet {
        FieldSet::new()
            .with_field("operation", self.operation.as_str())
            .with_field("execution_time_ms", self.elapsed().as_secs_f64() * 1000.0)
            .with_field("status", status)
    }

    /// Record successful completion
    pub fn succeed(mut self) {
        self.finished = true;
        self.logger.info_with(
            format!("Completed {}", self.operation),
            self.outcome_fields("success"),
        );
    }

    /// Record failure with the causing error
    pub fn fail<E: std::error::Error>(mut self, error: &E) {
        self.finished = true;
        self.logger.error_with_exception(
            format!("Failed {}", self.operation),
            error,
            self.outcome_fields("error"),
        );
    }
}

impl Drop for TimedOperation<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        if std::thread::panicking() {
            self.logger.error_with(
                format!("Failed {}", self.operation),
                self.outcome_fields("error"),
            );
        } else {
            self.logger.info_with(
                format!("Completed {}", self.operation),
                self.outcome_fields("success"),
            );
        }
    }
}
