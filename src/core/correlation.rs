//! Thread-local correlation ID and diagnostic context storage
//!
//! Every thread owns its own correlation ID slot and context map; nothing in
//! this module is visible across threads. Slots are created lazily on first
//! access and discarded with the thread. Accessors use `LocalKey::try_with`
//! so reads during thread teardown degrade to "absent" instead of panicking.

use super::fields::{FieldSet, FieldValue};
use std::cell::RefCell;

thread_local! {
    static CORRELATION_ID: RefCell<Option<String>> = const { RefCell::new(None) };
    static CONTEXT: RefCell<FieldSet> = RefCell::new(FieldSet::new());
}

/// Set the correlation ID for the current thread
pub fn set_correlation_id(id: impl Into<String>) {
    let id = id.into();
    let _ = CORRELATION_ID.try_with(|slot| *slot.borrow_mut() = Some(id));
}

/// Get the correlation ID for the current thread
pub fn correlation_id() -> Option<String> {
    CORRELATION_ID
        .try_with(|slot| slot.borrow().clone())
        .unwrap_or(None)
}

/// Clear the correlation ID for the current thread
pub fn clear_correlation_id() {
    let _ = CORRELATION_ID.try_with(|slot| *slot.borrow_mut() = None);
}

/// Set a context value for the current thread
pub fn set_context_value(key: impl Into<String>, value: impl Into<FieldValue>) {
    let key = key.into();
    let value = value.into();
    let _ = CONTEXT.try_with(|slot| slot.borrow_mut().add_field(key, value));
}

/// Get a single context value for the current thread
pub fn context_value(key: &str) -> Option<FieldValue> {
    CONTEXT
        .try_with(|slot| slot.borrow().get(key).cloned())
        .unwrap_or(None)
}

/// Remove a context value for the current thread, returning its prior value
pub fn remove_context_value(key: &str) -> Option<FieldValue> {
    CONTEXT
        .try_with(|slot| slot.borrow_mut().remove(key))
        .unwrap_or(None)
}

/// Snapshot the full context map for the current thread
///
/// Returns a copy; mutating it does not touch the stored context.
pub fn context_snapshot() -> FieldSet {
    CONTEXT
        .try_with(|slot| slot.borrow().clone())
        .unwrap_or_default()
}

/// Clear all context values for the current thread
pub fn clear_context() {
    let _ = CONTEXT.try_with(|slot| slot.borrow_mut().clear());
}

/// Set the correlation ID, generating a fresh UUID when none is given
///
/// Returns the ID now in effect.
pub fn set_global_correlation_id(id: Option<String>) -> String {
    let id = id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    set_correlation_id(id.clone());
    id
}

/// Get the correlation ID now in effect, if any
pub fn get_global_correlation_id() -> Option<String> {
    correlation_id()
}

/// Add a context value visible to every emit on this thread
pub fn add_global_context(key: impl Into<String>, value: impl Into<FieldValue>) {
    set_context_value(key, value);
}

/// Clear both the context map and the correlation ID
pub fn clear_global_context() {
    clear_context();
    clear_correlation_id();
}
