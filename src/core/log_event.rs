//! Log event structure

use super::fields::FieldSet;
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

// Thread-local caches for thread information to avoid repeated allocations
thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
    static THREAD_NAME_CACHE: RefCell<Option<Option<String>>> = const { RefCell::new(None) };
}

/// Get cached thread ID, computing and caching it on first access
fn get_thread_id() -> String {
    THREAD_ID_CACHE
        .try_with(|cache| {
            let mut cache = cache.borrow_mut();
            if cache.is_none() {
                *cache = Some(format!("{:?}", std::thread::current().id()));
            }
            cache
                .as_ref()
                .expect("thread_id cache initialized in previous line")
                .clone()
        })
        .unwrap_or_else(|_| format!("{:?}", std::thread::current().id()))
}

/// Get cached thread name, computing and caching it on first access
fn get_thread_name() -> Option<String> {
    THREAD_NAME_CACHE
        .try_with(|cache| {
            let mut cache = cache.borrow_mut();
            if cache.is_none() {
                *cache = Some(std::thread::current().name().map(String::from));
            }
            cache
                .as_ref()
                .expect("thread_name cache initialized in previous line")
                .clone()
        })
        .unwrap_or_else(|_| std::thread::current().name().map(String::from))
}

/// Where in the source an event was emitted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub module: Option<String>,
    pub function: Option<String>,
    pub file: Option<String>,
    pub line: Option<u32>,
}

impl SourceLocation {
    pub fn new(module: &str, function: &str, file: &str, line: u32) -> Self {
        Self {
            module: Some(module.to_string()),
            function: Some(function.to_string()),
            file: Some(file.to_string()),
            line: Some(line),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.module.is_none() && self.function.is_none() && self.file.is_none() && self.line.is_none()
    }
}

/// Captured error information attached to an event
///
/// `chain` holds the rendered `source()` chain, outermost first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExceptionInfo {
    pub kind: String,
    pub message: String,
    pub chain: Vec<String>,
}

impl ExceptionInfo {
    /// Capture an error's type name, message, and source chain
    pub fn from_error<E: std::error::Error>(error: &E) -> Self {
        let mut chain = vec![error.to_string()];
        let mut source = error.source();
        while let Some(cause) = source {
            chain.push(cause.to_string());
            source = cause.source();
        }
        Self {
            kind: std::any::type_name::<E>().to_string(),
            message: error.to_string(),
            chain,
        }
    }
}

/// A single log record, created per emit call and immutable once dispatched
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEvent {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub logger: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "SourceLocation::is_empty")]
    pub location: SourceLocation,
    pub thread_id: String,
    pub thread_name: Option<String>,
    pub process_id: u32,
    /// Stamped by the context filter before formatting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    #[serde(default, skip_serializing_if = "FieldSet::is_empty")]
    pub extra: FieldSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exception: Option<ExceptionInfo>,
}

impl LogEvent {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// to prevent attackers from injecting fake log entries.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: LogLevel, logger: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            logger: logger.into(),
            message: Self::sanitize_message(&message.into()),
            location: SourceLocation::default(),
            thread_id: get_thread_id(),
            thread_name: get_thread_name(),
            process_id: std::process::id(),
            correlation_id: None,
            extra: FieldSet::new(),
            exception: None,
        }
    }

    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = location;
        self
    }

    pub fn with_extra(mut self, extra: FieldSet) -> Self {
        self.extra = extra;
        self
    }

    pub fn with_exception(mut self, exception: ExceptionInfo) -> Self {
        self.exception = Some(exception);
        self
    }

    /// Module of the emit site, falling back to the logger name
    ///
    /// Events emitted through plain method calls carry no location, so the
    /// aggregator keys their counts by logger instead.
    pub fn source_key(&self) -> &str {
        self.location.module.as_deref().unwrap_or(&self.logger)
    }
}
