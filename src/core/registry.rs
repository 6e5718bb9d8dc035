//! Process-scoped logger registry
//!
//! Loggers are created once per name and cached for the life of the process
//! (or until `reset`). Default configuration is consulted only at creation
//! time: reconfiguring defaults never touches loggers that already exist.
//! First use of a name from several threads yields exactly one cached logger;
//! sink construction happens outside the registry lock so the critical
//! section covers only the map update.

use super::aggregator::AggregatedStats;
use super::error::Result;
use super::logger::{LoggerConfig, StructuredLogger};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

static GLOBAL: LazyLock<LoggerRegistry> = LazyLock::new(LoggerRegistry::new);

/// Registry of named loggers plus the creation-time defaults
pub struct LoggerRegistry {
    loggers: RwLock<HashMap<String, Arc<StructuredLogger>>>,
    defaults: RwLock<LoggerConfig>,
}

impl LoggerRegistry {
    pub fn new() -> Self {
        Self::with_defaults(LoggerConfig::default())
    }

    pub fn with_defaults(defaults: LoggerConfig) -> Self {
        Self {
            loggers: RwLock::new(HashMap::new()),
            defaults: RwLock::new(defaults),
        }
    }

    /// The process-wide registry instance
    pub fn global() -> &'static LoggerRegistry {
        &GLOBAL
    }

    /// Get or create the logger for `name` using the current defaults
    pub fn get_logger(&self, name: &str) -> Result<Arc<StructuredLogger>> {
        let config = self.defaults.read().clone();
        self.get_logger_with(name, config)
    }

    /// Get or create the logger for `name`
    ///
    /// `config` applies only if this call creates the logger; for an existing
    /// name the cached logger is returned unchanged.
    pub fn get_logger_with(&self, name: &str, config: LoggerConfig) -> Result<Arc<StructuredLogger>> {
        if let Some(logger) = self.loggers.read().get(name) {
            return Ok(Arc::clone(logger));
        }

        // Build outside the write lock so sink construction (file open) never
        // runs under it
        let candidate = Arc::new(StructuredLogger::new(name, &config)?);

        let mut loggers = self.loggers.write();
        if let Some(existing) = loggers.get(name) {
            // Another thread won the race; its logger is the cached one
            return Ok(Arc::clone(existing));
        }
        loggers.insert(name.to_string(), Arc::clone(&candidate));
        Ok(candidate)
    }

    /// Replace the creation-time defaults
    pub fn configure(&self, config: LoggerConfig) {
        *self.defaults.write() = config;
    }

    /// Update the creation-time defaults in place
    pub fn configure_with(&self, update: impl FnOnce(&mut LoggerConfig)) {
        update(&mut self.defaults.write());
    }

    /// Copy of the current defaults
    pub fn defaults(&self) -> LoggerConfig {
        self.defaults.read().clone()
    }

    /// Statistics snapshots for every registered logger with an aggregator
    pub fn statistics(&self) -> HashMap<String, AggregatedStats> {
        let loggers = self.loggers.read();
        loggers
            .iter()
            .filter_map(|(name, logger)| logger.statistics().map(|s| (name.clone(), s)))
            .collect()
    }

    /// Drop every cached logger
    pub fn reset(&self) {
        self.loggers.write().clear();
    }

    pub fn len(&self) -> usize {
        self.loggers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.read().is_empty()
    }
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Get or create a logger in the process-wide registry
pub fn get_logger(name: &str) -> Result<Arc<StructuredLogger>> {
    LoggerRegistry::global().get_logger(name)
}

/// Get or create a logger in the process-wide registry with explicit config
pub fn get_logger_with(name: &str, config: LoggerConfig) -> Result<Arc<StructuredLogger>> {
    LoggerRegistry::global().get_logger_with(name, config)
}

/// Update the process-wide creation-time defaults
///
/// Affects only loggers created afterwards.
pub fn configure_logging(update: impl FnOnce(&mut LoggerConfig)) {
    LoggerRegistry::global().configure_with(update);
}

/// Statistics snapshots across all loggers in the process-wide registry
pub fn get_log_statistics() -> HashMap<String, AggregatedStats> {
    LoggerRegistry::global().statistics()
}
