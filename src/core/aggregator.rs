//! Bounded in-memory log aggregation
//!
//! Retains a FIFO ring of the most recent entries plus independently bounded
//! lists of the last ERROR and WARNING entries. The by-level and by-module
//! counters are lifetime totals: they keep counting after the ring starts
//! evicting, so `total` can exceed `retained`. All mutation happens under one
//! mutex whose critical sections cover only in-memory updates; readers get
//! snapshot copies, never references into internal state.

use super::log_event::LogEvent;
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

/// Default ring capacity
pub const DEFAULT_MAX_ENTRIES: usize = 10_000;

/// Cap on the retained recent-error and recent-warning lists
const RECENT_SEVERITY_CAP: usize = 100;

/// Compact record retained by the aggregator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub logger: String,
    pub message: String,
    pub module: Option<String>,
    pub correlation_id: Option<String>,
}

impl AggregatedEntry {
    fn from_event(event: &LogEvent) -> Self {
        Self {
            timestamp: event.timestamp,
            level: event.level,
            logger: event.logger.clone(),
            message: event.message.clone(),
            module: event.location.module.clone(),
            correlation_id: event
                .correlation_id
                .clone()
                .or_else(super::correlation::correlation_id),
        }
    }
}

/// Snapshot of aggregated statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedStats {
    /// Lifetime event count, never reset by ring eviction
    pub total: u64,
    /// Lifetime counts keyed by level name
    pub by_level: HashMap<String, u64>,
    /// Lifetime counts keyed by emitting module (logger name when unknown)
    pub by_module: HashMap<String, u64>,
    /// Length of the retained recent-error list
    pub recent_errors: usize,
    /// Length of the retained recent-warning list
    pub recent_warnings: usize,
    /// Entries currently retained in the ring
    pub retained: usize,
}

#[derive(Default)]
struct AggregatorInner {
    entries: VecDeque<AggregatedEntry>,
    total: u64,
    by_level: HashMap<String, u64>,
    by_module: HashMap<String, u64>,
    errors: VecDeque<AggregatedEntry>,
    warnings: VecDeque<AggregatedEntry>,
}

/// Bounded aggregator fed by the logger's sink chain
pub struct LogAggregator {
    max_entries: usize,
    inner: Mutex<AggregatorInner>,
}

impl LogAggregator {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_ENTRIES)
    }

    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            max_entries,
            inner: Mutex::new(AggregatorInner::default()),
        }
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Record one event
    pub fn add_event(&self, event: &LogEvent) {
        let entry = AggregatedEntry::from_event(event);
        let mut inner = self.inner.lock();

        inner.entries.push_back(entry.clone());
        if inner.entries.len() > self.max_entries {
            inner.entries.pop_front();
        }

        inner.total += 1;
        *inner
            .by_level
            .entry(event.level.to_str().to_string())
            .or_insert(0) += 1;
        *inner
            .by_module
            .entry(event.source_key().to_string())
            .or_insert(0) += 1;

        match event.level {
            LogLevel::Error | LogLevel::Critical => {
                inner.errors.push_back(entry);
                if inner.errors.len() > RECENT_SEVERITY_CAP {
                    inner.errors.pop_front();
                }
            }
            LogLevel::Warning => {
                inner.warnings.push_back(entry);
                if inner.warnings.len() > RECENT_SEVERITY_CAP {
                    inner.warnings.pop_front();
                }
            }
            _ => {}
        }
    }

    /// Snapshot of the running statistics
    pub fn statistics(&self) -> AggregatedStats {
        let inner = self.inner.lock();
        AggregatedStats {
            total: inner.total,
            by_level: inner.by_level.clone(),
            by_module: inner.by_module.clone(),
            recent_errors: inner.errors.len(),
            recent_warnings: inner.warnings.len(),
            retained: inner.entries.len(),
        }
    }

    /// The most recent `count` retained entries, oldest first, optionally
    /// narrowed to one level after the count window is taken
    pub fn recent_entries(&self, count: usize, level: Option<LogLevel>) -> Vec<AggregatedEntry> {
        let inner = self.inner.lock();
        let skip = inner.entries.len().saturating_sub(count);
        inner
            .entries
            .iter()
            .skip(skip)
            .filter(|e| level.map_or(true, |l| e.level == l))
            .cloned()
            .collect()
    }

    /// Copy of the retained recent-error list (ERROR and CRITICAL), oldest first
    pub fn recent_errors(&self) -> Vec<AggregatedEntry> {
        self.inner.lock().errors.iter().cloned().collect()
    }

    /// Copy of the retained recent-warning list, oldest first
    pub fn recent_warnings(&self) -> Vec<AggregatedEntry> {
        self.inner.lock().warnings.iter().cloned().collect()
    }
}

impl Default for LogAggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(level: LogLevel, message: &str) -> LogEvent {
        LogEvent::new(level, "agg.test", message)
    }

    #[test]
    fn test_counts_by_level_and_module() {
        let aggregator = LogAggregator::new();
        aggregator.add_event(&event(LogLevel::Info, "one"));
        aggregator.add_event(&event(LogLevel::Info, "two"));
        aggregator.add_event(&event(LogLevel::Error, "boom"));

        let stats = aggregator.statistics();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.by_level["INFO"], 2);
        assert_eq!(stats.by_level["ERROR"], 1);
        assert_eq!(stats.by_module["agg.test"], 3);
        assert_eq!(stats.retained, 3);
    }

    #[test]
    fn test_ring_eviction_keeps_counters() {
        let aggregator = LogAggregator::with_capacity(10);
        for i in 0..15 {
            aggregator.add_event(&event(LogLevel::Info, &format!("msg {}", i)));
        }

        let stats = aggregator.statistics();
        assert_eq!(stats.retained, 10);
        // Lifetime totals are not reset by eviction
        assert_eq!(stats.total, 15);
        assert_eq!(stats.by_level["INFO"], 15);

        // FIFO: the oldest five were evicted
        let retained = aggregator.recent_entries(usize::MAX, None);
        assert_eq!(retained.len(), 10);
        assert_eq!(retained[0].message, "msg 5");
        assert_eq!(retained[9].message, "msg 14");
    }

    #[test]
    fn test_recent_severity_lists_are_bounded() {
        let aggregator = LogAggregator::new();
        for i in 0..5 {
            aggregator.add_event(&event(LogLevel::Error, &format!("error {}", i)));
        }
        for i in 0..150 {
            aggregator.add_event(&event(LogLevel::Warning, &format!("warning {}", i)));
        }

        let stats = aggregator.statistics();
        assert_eq!(stats.by_level["WARNING"], 150);
        assert_eq!(stats.recent_warnings, 100);
        assert_eq!(stats.recent_errors, 5);

        let warnings = aggregator.recent_warnings();
        assert_eq!(warnings.len(), 100);
        // Oldest evicted first
        assert_eq!(warnings[0].message, "warning 50");
        assert_eq!(warnings[99].message, "warning 149");
    }

    #[test]
    fn test_recent_entries_level_filter() {
        let aggregator = LogAggregator::new();
        aggregator.add_event(&event(LogLevel::Info, "a"));
        aggregator.add_event(&event(LogLevel::Error, "b"));
        aggregator.add_event(&event(LogLevel::Info, "c"));

        let errors = aggregator.recent_entries(10, Some(LogLevel::Error));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "b");

        let last_two = aggregator.recent_entries(2, None);
        assert_eq!(last_two.len(), 2);
        assert_eq!(last_two[0].message, "b");
    }

    #[test]
    fn test_concurrent_writers() {
        use std::sync::Arc;

        let aggregator = Arc::new(LogAggregator::with_capacity(1_000));
        let mut handles = Vec::new();
        for _ in 0..4 {
            let aggregator = Arc::clone(&aggregator);
            handles.push(std::thread::spawn(move || {
                for i in 0..250 {
                    aggregator.add_event(&event(LogLevel::Info, &format!("m{}", i)));
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let stats = aggregator.statistics();
        assert_eq!(stats.total, 1_000);
        assert_eq!(stats.retained, 1_000);
    }
}
