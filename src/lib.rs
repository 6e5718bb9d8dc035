//! # correlog
//!
//! An in-process structured-logging and diagnostic-context engine for
//! long-running, multi-threaded test and automation workloads.
//!
//! ## Features
//!
//! - **Structured Records**: Every event formats to a canonical JSON shape
//! - **Correlation Context**: Per-thread correlation IDs and key/value
//!   context, propagated without parameter threading
//! - **Sensitive-Data Masking**: Secrets are redacted before a record leaves
//!   the process
//! - **Bounded Aggregation**: A capped in-memory window of recent records
//!   with running statistics
//! - **Best-Effort Routing**: Predicate-gated secondary delivery that never
//!   breaks the primary log path

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        correlation, AggregatedEntry, AggregatedStats, ContextFilter, ContextScope,
        CorrelationScope, ExceptionInfo, FieldSet, FieldValue, JsonFormatter, LogAggregator,
        LogEvent, LogLevel, LogRouter, LoggerConfig, LoggerError, LoggerRegistry, MaskingRule,
        PlainFormatter, RecordFormatter, Result, SensitiveDataMasker, SourceLocation,
        StructuredLogger, TimedOperation, TimestampFormat,
    };
    pub use crate::sinks::{AggregatorSink, ConsoleSink, FileSink, Sink};
}

pub use core::{
    configure_logging, get_log_statistics, get_logger, get_logger_with, AggregatedEntry,
    AggregatedStats, ContextFilter, ContextScope, CorrelationScope, ExceptionInfo, FieldSet,
    FieldValue, JsonFormatter, LogAggregator, LogEvent, LogLevel, LogRouter, LoggerConfig,
    LoggerError, LoggerRegistry, MaskingRule, PlainFormatter, RecordFormatter, Result,
    SensitiveDataMasker, SourceLocation, StructuredLogger, TimedOperation, TimestampFormat,
};
pub use core::correlation::{
    add_global_context, clear_global_context, get_global_correlation_id, set_global_correlation_id,
};
pub use sinks::{AggregatorSink, ConsoleSink, FileSink, Sink};
