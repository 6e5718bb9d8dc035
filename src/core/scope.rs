//! RAII guards for scoped context and correlation IDs
//!
//! Entering a scope snapshots the prior value of every overridden key and
//! applies the new values; dropping the guard restores exactly the prior
//! state, on every exit path including unwinding.

use super::correlation;
use super::fields::{FieldSet, FieldValue};

/// Scoped context values, restored on drop
///
/// # Example
///
/// ```
/// use correlog::core::{ContextScope, FieldSet};
/// use correlog::core::correlation;
///
/// correlation::set_context_value("environment", "staging");
/// {
///     let _scope = ContextScope::enter(
///         FieldSet::new().with_field("environment", "production"),
///     );
///     assert_eq!(
///         correlation::context_value("environment").unwrap().to_string(),
///         "production",
///     );
/// }
/// assert_eq!(
///     correlation::context_value("environment").unwrap().to_string(),
///     "staging",
/// );
/// # correlation::clear_global_context();
/// ```
pub struct ContextScope {
    saved: Vec<(String, Option<FieldValue>)>,
}

impl ContextScope {
    /// Apply `values` to the current thread's context for the scope's lifetime
    pub fn enter(values: FieldSet) -> Self {
        let mut saved = Vec::with_capacity(values.len());
        for (key, value) in values {
            saved.push((key.clone(), correlation::context_value(&key)));
            correlation::set_context_value(key, value);
        }
        Self { saved }
    }
}

impl Drop for ContextScope {
    fn drop(&mut self) {
        // Restore in reverse so nested scopes over the same key unwind cleanly
        for (key, previous) in self.saved.drain(..).rev() {
            match previous {
                Some(value) => correlation::set_context_value(key, value),
                None => {
                    correlation::remove_context_value(&key);
                }
            }
        }
    }
}

/// Scoped correlation ID, restored on drop
///
/// When no ID is supplied a fresh UUID is generated; `id()` exposes the
/// active ID for the scope.
pub struct CorrelationScope {
    id: String,
    previous: Option<String>,
}

impl CorrelationScope {
    pub fn enter(id: Option<String>) -> Self {
        let id = id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let previous = correlation::correlation_id();
        correlation::set_correlation_id(id.clone());
        Self { id, previous }
    }

    /// The correlation ID active for this scope
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Drop for CorrelationScope {
    fn drop(&mut self) {
        match self.previous.take() {
            Some(previous) => correlation::set_correlation_id(previous),
            None => correlation::clear_correlation_id(),
        }
    }
}
