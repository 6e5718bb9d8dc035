//! Structured logger façade
//!
//! Wires a sink chain (console, optional file, optional aggregator) through
//! the context filter and the configured formatter, and owns a router for
//! predicate-based secondary delivery. Emit calls never fail and never
//! panic: each sink is isolated the same way the router isolates its rules.

use super::aggregator::{AggregatedStats, LogAggregator};
use super::error::Result;
use super::fallback;
use super::fields::FieldSet;
use super::filter::ContextFilter;
use super::formatter::{JsonFormatter, PlainFormatter, RecordFormatter};
use super::log_event::{ExceptionInfo, LogEvent, SourceLocation};
use super::log_level::LogLevel;
use super::router::LogRouter;
use super::timestamp::TimestampFormat;
use crate::sinks::{AggregatorSink, ConsoleSink, FileSink, Sink};
use parking_lot::{Mutex, RwLock};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::Arc;

/// Construction-time logger configuration
///
/// Consulted only when a logger is created; changing defaults afterwards has
/// no effect on loggers that already exist.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Minimum level delivered to sinks (routing is exempt)
    pub min_level: LogLevel,
    /// Structured (JSON) vs plain formatting
    pub structured: bool,
    /// Attach the context filter and embed the context map
    pub enable_correlation: bool,
    /// Attach a bounded aggregator sink
    pub enable_aggregation: bool,
    /// Run the masker over formatted records
    pub mask_sensitive_data: bool,
    /// Optional append-only file sink path
    pub log_file: Option<PathBuf>,
    pub timestamp_format: TimestampFormat,
    /// Colorize console output by level
    pub console_colors: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            structured: true,
            enable_correlation: true,
            enable_aggregation: true,
            mask_sensitive_data: true,
            log_file: None,
            timestamp_format: TimestampFormat::default(),
            console_colors: true,
        }
    }
}

impl LoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    #[must_use]
    pub fn with_structured(mut self, structured: bool) -> Self {
        self.structured = structured;
        self
    }

    #[must_use]
    pub fn with_correlation(mut self, enable: bool) -> Self {
        self.enable_correlation = enable;
        self
    }

    #[must_use]
    pub fn with_aggregation(mut self, enable: bool) -> Self {
        self.enable_aggregation = enable;
        self
    }

    #[must_use]
    pub fn with_masking(mut self, mask: bool) -> Self {
        self.mask_sensitive_data = mask;
        self
    }

    #[must_use]
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn with_console_colors(mut self, colors: bool) -> Self {
        self.console_colors = colors;
        self
    }

    fn make_formatter(&self) -> Box<dyn RecordFormatter> {
        if self.structured {
            Box::new(
                JsonFormatter::new()
                    .with_include_context(self.enable_correlation)
                    .with_masking(self.mask_sensitive_data)
                    .with_timestamp_format(self.timestamp_format.clone()),
            )
        } else {
            Box::new(PlainFormatter::new().with_timestamp_format(self.timestamp_format.clone()))
        }
    }
}

struct SinkSlot {
    sink: Box<dyn Sink>,
    filter: Option<ContextFilter>,
}

/// Per-name structured logger
pub struct StructuredLogger {
    name: String,
    min_level: RwLock<LogLevel>,
    slots: RwLock<Vec<SinkSlot>>,
    aggregator: Option<Arc<LogAggregator>>,
    router: Mutex<LogRouter>,
}

impl StructuredLogger {
    /// Build a logger and its sink chain from `config`
    pub fn new(name: impl Into<String>, config: &LoggerConfig) -> Result<Self> {
        let name = name.into();
        let filter = config.enable_correlation.then(ContextFilter::new);

        let mut slots = Vec::new();

        let console =
            ConsoleSink::with_formatter(config.make_formatter()).with_colors(config.console_colors);
        slots.push(SinkSlot {
            sink: Box::new(console),
            filter,
        });

        if let Some(ref path) = config.log_file {
            let file = FileSink::with_formatter(path, config.make_formatter())?;
            slots.push(SinkSlot {
                sink: Box::new(file),
                filter,
            });
        }

        let aggregator = config
            .enable_aggregation
            .then(|| Arc::new(LogAggregator::new()));
        if let Some(ref aggregator) = aggregator {
            slots.push(SinkSlot {
                sink: Box::new(AggregatorSink::new(Arc::clone(aggregator))),
                filter: None,
            });
        }

        Ok(Self {
            name,
            min_level: RwLock::new(config.min_level),
            slots: RwLock::new(slots),
            aggregator,
            router: Mutex::new(LogRouter::new()),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn min_level(&self) -> LogLevel {
        *self.min_level.read()
    }

    pub fn set_min_level(&self, level: LogLevel) {
        *self.min_level.write() = level;
    }

    /// Append a custom sink to the chain (no context filter)
    pub fn add_sink(&self, sink: Box<dyn Sink>) {
        self.slots.write().push(SinkSlot { sink, filter: None });
    }

    /// Append a custom sink stamped by the given context filter
    pub fn add_filtered_sink(&self, sink: Box<dyn Sink>, filter: ContextFilter) {
        self.slots.write().push(SinkSlot {
            sink,
            filter: Some(filter),
        });
    }

    /// Register a routing rule on this logger's router
    pub fn add_route<P>(&self, predicate: P, sink: Box<dyn Sink>)
    where
        P: Fn(&LogEvent) -> bool + Send + Sync + 'static,
    {
        self.router.lock().add_route(predicate, sink);
    }

    /// Statistics snapshot from the attached aggregator, if any
    pub fn statistics(&self) -> Option<AggregatedStats> {
        self.aggregator.as_ref().map(|a| a.statistics())
    }

    pub fn aggregator(&self) -> Option<Arc<LogAggregator>> {
        self.aggregator.as_ref().map(Arc::clone)
    }

    pub fn flush(&self) -> Result<()> {
        let mut slots = self.slots.write();
        for slot in slots.iter_mut() {
            slot.sink.flush()?;
        }
        Ok(())
    }

    /// Deliver an event: route it, gate it, then fan out to the sink chain
    fn dispatch(&self, event: LogEvent) {
        // Routing sees raw events regardless of level, so routes can capture
        // low-level diagnostics selectively
        self.router.lock().route_event(&event);

        if event.level < *self.min_level.read() {
            return;
        }

        let mut slots = self.slots.write();
        for (idx, slot) in slots.iter_mut().enumerate() {
            let mut stamped = event.clone();
            let pass = match slot.filter {
                Some(filter) => filter.apply(&mut stamped),
                None => true,
            };
            if !pass {
                continue;
            }

            let result = {
                let sink = &mut slot.sink;
                catch_unwind(AssertUnwindSafe(|| sink.emit(&stamped)))
            };
            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    fallback::report(&format!(
                        "Sink #{} ({}) failed: {}",
                        idx,
                        slot.sink.name(),
                        e
                    ));
                }
                Err(_) => {
                    fallback::report(&format!(
                        "Sink #{} ({}) panicked; other sinks continue",
                        idx,
                        slot.sink.name()
                    ));
                }
            }
        }
    }

    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        self.log_with(level, message, FieldSet::new());
    }

    /// Emit with caller-supplied extra fields
    pub fn log_with(&self, level: LogLevel, message: impl Into<String>, fields: FieldSet) {
        let event = LogEvent::new(level, self.name.as_str(), message).with_extra(fields);
        self.dispatch(event);
    }

    /// Emit with a captured source location (used by the logging macros)
    pub fn log_located(&self, level: LogLevel, message: String, location: SourceLocation) {
        let event = LogEvent::new(level, self.name.as_str(), message).with_location(location);
        self.dispatch(event);
    }

    #[inline]
    pub fn trace(&self, message: impl Into<String>) {
        self.log(LogLevel::Trace, message);
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warning(&self, message: impl Into<String>) {
        self.log(LogLevel::Warning, message);
    }

    #[inline]
    pub fn critical(&self, message: impl Into<String>) {
        self.log(LogLevel::Critical, message);
    }

    pub fn trace_with(&self, message: impl Into<String>, fields: FieldSet) {
        self.log_with(LogLevel::Trace, message, fields);
    }

    pub fn debug_with(&self, message: impl Into<String>, fields: FieldSet) {
        self.log_with(LogLevel::Debug, message, fields);
    }

    pub fn info_with(&self, message: impl Into<String>, fields: FieldSet) {
        self.log_with(LogLevel::Info, message, fields);
    }

    pub fn warning_with(&self, message: impl Into<String>, fields: FieldSet) {
        self.log_with(LogLevel::Warning, message, fields);
    }

    pub fn critical_with(&self, message: impl Into<String>, fields: FieldSet) {
        self.log_with(LogLevel::Critical, message, fields);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    pub fn error_with(&self, message: impl Into<String>, fields: FieldSet) {
        self.log_with(LogLevel::Error, message, fields);
    }

    /// Emit an error carrying captured exception info
    ///
    /// The error's type name and message are mirrored into the extra fields,
    /// and the full source chain is attached to the event.
    pub fn error_with_exception<E: std::error::Error>(
        &self,
        message: impl Into<String>,
        error: &E,
        fields: FieldSet,
    ) {
        let info = ExceptionInfo::from_error(error);
        let mut fields = fields;
        fields.add_field("exception_type", info.kind.clone());
        fields.add_field("exception_message", info.message.clone());

        let event = LogEvent::new(LogLevel::Error, self.name.as_str(), message)
            .with_extra(fields)
            .with_exception(info);
        self.dispatch(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::LoggerError;
    use parking_lot::Mutex as PlMutex;

    struct CaptureSink {
        events: Arc<PlMutex<Vec<LogEvent>>>,
    }

    impl CaptureSink {
        fn new() -> (Self, Arc<PlMutex<Vec<LogEvent>>>) {
            let events = Arc::new(PlMutex::new(Vec::new()));
            (
                Self {
                    events: Arc::clone(&events),
                },
                events,
            )
        }
    }

    impl Sink for CaptureSink {
        fn emit(&mut self, event: &LogEvent) -> Result<()> {
            self.events.lock().push(event.clone());
            Ok(())
        }

        fn name(&self) -> &str {
            "capture"
        }
    }

    struct FailingSink;

    impl Sink for FailingSink {
        fn emit(&mut self, _event: &LogEvent) -> Result<()> {
            Err(LoggerError::sink("failing", "simulated failure"))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn quiet_config() -> LoggerConfig {
        // Trace-level logger with no console noise beyond the capture sinks
        LoggerConfig::new()
            .with_min_level(LogLevel::Trace)
            .with_console_colors(false)
    }

    #[test]
    fn test_level_gating() {
        let logger = StructuredLogger::new(
            "gating",
            &LoggerConfig::new().with_min_level(LogLevel::Warning),
        )
        .unwrap();
        let (sink, events) = CaptureSink::new();
        logger.add_sink(Box::new(sink));

        logger.debug("below threshold");
        logger.info("also below");
        logger.warning("at threshold");
        logger.error("above");

        let seen = events.lock();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].level, LogLevel::Warning);
        assert_eq!(seen[1].level, LogLevel::Error);
    }

    #[test]
    fn test_routing_is_exempt_from_level_gating() {
        let logger = StructuredLogger::new(
            "routing",
            &LoggerConfig::new().with_min_level(LogLevel::Error),
        )
        .unwrap();
        let (route_sink, routed) = CaptureSink::new();
        logger.add_route(|e| e.level == LogLevel::Debug, Box::new(route_sink));

        logger.debug("captured by route only");

        assert_eq!(routed.lock().len(), 1);
        // Gated from the primary chain: the aggregator saw nothing
        assert_eq!(logger.statistics().unwrap().total, 0);
    }

    #[test]
    fn test_failing_sink_does_not_block_chain() {
        let logger = StructuredLogger::new("isolation", &quiet_config()).unwrap();
        logger.add_sink(Box::new(FailingSink));
        let (sink, events) = CaptureSink::new();
        logger.add_sink(Box::new(sink));

        logger.info("delivered past the failure");
        assert_eq!(events.lock().len(), 1);
    }

    #[test]
    fn test_error_with_exception_captures_chain() {
        let logger = StructuredLogger::new("errors", &quiet_config()).unwrap();
        let (sink, events) = CaptureSink::new();
        logger.add_sink(Box::new(sink));

        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "handshake timed out");
        logger.error_with_exception("request failed", &io, FieldSet::new());

        let seen = events.lock();
        let event = &seen[0];
        assert_eq!(event.level, LogLevel::Error);
        let exception = event.exception.as_ref().unwrap();
        assert_eq!(exception.message, "handshake timed out");
        assert!(event.extra.get("exception_type").is_some());
        assert!(event.extra.get("exception_message").is_some());
    }

    #[test]
    fn test_aggregator_attached_by_default() {
        let logger = StructuredLogger::new("agg", &quiet_config()).unwrap();
        logger.info("one");
        logger.warning("two");

        let stats = logger.statistics().unwrap();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.by_level["WARNING"], 1);
    }

    #[test]
    fn test_aggregation_disabled() {
        let logger = StructuredLogger::new(
            "no-agg",
            &LoggerConfig::new().with_aggregation(false),
        )
        .unwrap();
        logger.info("unaggregated");
        assert!(logger.statistics().is_none());
    }

    #[test]
    fn test_set_min_level_at_runtime() {
        let logger = StructuredLogger::new("dynamic", &quiet_config()).unwrap();
        let (sink, events) = CaptureSink::new();
        logger.add_sink(Box::new(sink));

        logger.set_min_level(LogLevel::Critical);
        logger.error("gated now");
        logger.critical("still delivered");

        let seen = events.lock();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].level, LogLevel::Critical);
    }
}
