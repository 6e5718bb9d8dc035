//! Context-injecting filter
//!
//! A pass-through gate that stamps the thread's correlation ID and the
//! well-known context keys onto an event before it is formatted. It never
//! vetoes an event: context reads degrade to "absent" rather than failing.

use super::correlation;
use super::log_event::LogEvent;

/// Context keys the filter promotes onto every event when present
const INJECTED_KEYS: &[&str] = &["test_name", "environment", "performance"];

/// Stamps diagnostic context onto events; always passes
#[derive(Debug, Clone, Copy)]
pub struct ContextFilter {
    auto_inject: bool,
}

impl ContextFilter {
    pub fn new() -> Self {
        Self { auto_inject: true }
    }

    /// A filter that passes events through without stamping
    pub fn disabled() -> Self {
        Self { auto_inject: false }
    }

    pub fn auto_inject(&self) -> bool {
        self.auto_inject
    }

    /// Stamp context onto the event; returns whether the event should emit
    /// (always `true`)
    pub fn apply(&self, event: &mut LogEvent) -> bool {
        if self.auto_inject {
            if let Some(id) = correlation::correlation_id() {
                event.correlation_id = Some(id);
            }
            for key in INJECTED_KEYS {
                if let Some(value) = correlation::context_value(key) {
                    event.extra.add_field(*key, value);
                }
            }
        }
        true
    }
}

impl Default for ContextFilter {
    fn default() -> Self {
        Self::new()
    }
}
