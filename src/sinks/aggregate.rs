//! Sink feeding the bounded aggregator

use super::Sink;
use crate::core::{LogAggregator, LogEvent, Result};
use std::sync::Arc;

/// Forwards every event into a shared `LogAggregator`
pub struct AggregatorSink {
    aggregator: Arc<LogAggregator>,
}

impl AggregatorSink {
    pub fn new(aggregator: Arc<LogAggregator>) -> Self {
        Self { aggregator }
    }

    pub fn aggregator(&self) -> &Arc<LogAggregator> {
        &self.aggregator
    }
}

impl Sink for AggregatorSink {
    fn emit(&mut self, event: &LogEvent) -> Result<()> {
        self.aggregator.add_event(event);
        Ok(())
    }

    fn name(&self) -> &str {
        "aggregator"
    }
}
