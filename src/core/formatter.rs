//! Record formatters: canonical JSON and plain text
//!
//! The JSON formatter renders the canonical field set, embeds the thread's
//! diagnostic context, and runs the masker over the final serialized string
//! (whole-message masking, not per-field, which is what the masking rules
//! expect). Formatting never fails: a serializer error degrades to the plain
//! rendering instead of propagating.

use super::correlation;
use super::log_event::LogEvent;
use super::masking::SensitiveDataMasker;
use super::timestamp::TimestampFormat;
use serde_json::{Map, Value};

/// Field names owned by the formatter; colliding extra fields are dropped
/// rather than overwritten, so a caller-supplied `message` can never shadow
/// the real one.
pub const RESERVED_FIELDS: &[&str] = &[
    "timestamp",
    "level",
    "logger",
    "message",
    "module",
    "function",
    "line",
    "file",
    "thread_id",
    "thread_name",
    "process",
    "correlation_id",
    "context",
    "exception",
    "extra",
];

/// Renders a log event into its final sink representation
pub trait RecordFormatter: Send + Sync {
    fn format(&self, event: &LogEvent) -> String;
}

/// Canonical structured (JSON) formatter
pub struct JsonFormatter {
    include_context: bool,
    masker: Option<SensitiveDataMasker>,
    timestamp_format: TimestampFormat,
}

impl JsonFormatter {
    /// Context inclusion and masking both enabled
    pub fn new() -> Self {
        Self {
            include_context: true,
            masker: Some(SensitiveDataMasker::new()),
            timestamp_format: TimestampFormat::default(),
        }
    }

    #[must_use]
    pub fn with_include_context(mut self, include: bool) -> Self {
        self.include_context = include;
        self
    }

    #[must_use]
    pub fn with_masking(mut self, mask: bool) -> Self {
        self.masker = if mask {
            Some(SensitiveDataMasker::new())
        } else {
            None
        };
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Access the masker, e.g. to register custom patterns
    pub fn masker_mut(&mut self) -> Option<&mut SensitiveDataMasker> {
        self.masker.as_mut()
    }

    fn optional_string(value: &Option<String>) -> Value {
        value
            .as_ref()
            .map(|s| Value::String(s.clone()))
            .unwrap_or(Value::Null)
    }

    fn build_map(&self, event: &LogEvent) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert(
            "timestamp".to_string(),
            Value::String(self.timestamp_format.format(&event.timestamp)),
        );
        map.insert(
            "level".to_string(),
            Value::String(event.level.to_str().to_string()),
        );
        map.insert("logger".to_string(), Value::String(event.logger.clone()));
        map.insert("message".to_string(), Value::String(event.message.clone()));
        map.insert(
            "module".to_string(),
            Self::optional_string(&event.location.module),
        );
        map.insert(
            "function".to_string(),
            Self::optional_string(&event.location.function),
        );
        map.insert(
            "line".to_string(),
            event
                .location
                .line
                .map(|l| Value::Number(l.into()))
                .unwrap_or(Value::Null),
        );
        if let Some(ref file) = event.location.file {
            map.insert("file".to_string(), Value::String(file.clone()));
        }
        map.insert(
            "thread_id".to_string(),
            Value::String(event.thread_id.clone()),
        );
        if let Some(ref name) = event.thread_name {
            map.insert("thread_name".to_string(), Value::String(name.clone()));
        }
        map.insert(
            "process".to_string(),
            Value::Number(event.process_id.into()),
        );

        // Stamped id wins; otherwise read the store directly so unfiltered
        // sinks still carry the correlation id
        let correlation_id = event
            .correlation_id
            .clone()
            .or_else(correlation::correlation_id);
        if let Some(id) = correlation_id {
            map.insert("correlation_id".to_string(), Value::String(id));
        }

        if self.include_context {
            let context = correlation::context_snapshot();
            if !context.is_empty() {
                map.insert("context".to_string(), context.to_json_object());
            }
        }

        if let Some(ref exception) = event.exception {
            let mut exc = Map::new();
            exc.insert("type".to_string(), Value::String(exception.kind.clone()));
            exc.insert(
                "message".to_string(),
                Value::String(exception.message.clone()),
            );
            exc.insert(
                "chain".to_string(),
                Value::Array(
                    exception
                        .chain
                        .iter()
                        .map(|c| Value::String(c.clone()))
                        .collect(),
                ),
            );
            map.insert("exception".to_string(), Value::Object(exc));
        }

        if !event.extra.is_empty() {
            let mut extra = Map::new();
            for (key, value) in event.extra.iter() {
                if RESERVED_FIELDS.contains(&key.as_str()) {
                    continue;
                }
                extra.insert(key.clone(), value.to_json_value());
            }
            if !extra.is_empty() {
                map.insert("extra".to_string(), Value::Object(extra));
            }
        }

        map
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordFormatter for JsonFormatter {
    fn format(&self, event: &LogEvent) -> String {
        let map = self.build_map(event);
        let serialized = serde_json::to_string(&Value::Object(map)).unwrap_or_else(|_| {
            format!(
                "{} - {} - {} - {}",
                self.timestamp_format.format(&event.timestamp),
                event.logger,
                event.level,
                event.message
            )
        });

        match &self.masker {
            Some(masker) => masker.mask_data(&serialized),
            None => serialized,
        }
    }
}

/// Plain single-line formatter: `timestamp - logger - LEVEL - message`
pub struct PlainFormatter {
    timestamp_format: TimestampFormat,
}

impl PlainFormatter {
    pub fn new() -> Self {
        Self {
            timestamp_format: TimestampFormat::default(),
        }
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }
}

impl Default for PlainFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordFormatter for PlainFormatter {
    fn format(&self, event: &LogEvent) -> String {
        format!(
            "{} - {} - {} - {}",
            self.timestamp_format.format(&event.timestamp),
            event.logger,
            event.level,
            event.message
        )
    }
}
