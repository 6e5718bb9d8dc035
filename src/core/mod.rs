//! Core logging types and traits

pub mod aggregator;
pub mod correlation;
pub mod error;
pub mod fallback;
pub mod fields;
pub mod filter;
pub mod formatter;
pub mod log_event;
pub mod log_level;
pub mod logger;
pub mod masking;
pub mod registry;
pub mod router;
pub mod scope;
pub mod timestamp;
pub mod timing;

pub use aggregator::{AggregatedEntry, AggregatedStats, LogAggregator, DEFAULT_MAX_ENTRIES};
pub use error::{LoggerError, Result};
pub use fallback::{clear_diagnostic_hook, set_diagnostic_hook};
pub use fields::{FieldSet, FieldValue};
pub use filter::ContextFilter;
pub use formatter::{JsonFormatter, PlainFormatter, RecordFormatter, RESERVED_FIELDS};
pub use log_event::{ExceptionInfo, LogEvent, SourceLocation};
pub use log_level::LogLevel;
pub use logger::{LoggerConfig, StructuredLogger};
pub use masking::{MaskingRule, Replacement, SensitiveDataMasker, MASKED};
pub use registry::{
    configure_logging, get_log_statistics, get_logger, get_logger_with, LoggerRegistry,
};
pub use router::LogRouter;
pub use scope::{ContextScope, CorrelationScope};
pub use timestamp::TimestampFormat;
pub use timing::TimedOperation;
