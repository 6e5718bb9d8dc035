//! Diagnostic side channel for internal failures
//!
//! Sink and routing failures are reported here instead of propagating out of
//! an emit call. By default messages go to stderr; a process can install a
//! hook to hand them to its own diagnostics (fire-and-forget, no return
//! value expected).

use parking_lot::RwLock;

type DiagnosticHook = Box<dyn Fn(&str) + Send + Sync>;

static HOOK: RwLock<Option<DiagnosticHook>> = RwLock::new(None);

/// Install a hook receiving every internal diagnostic message
pub fn set_diagnostic_hook<F>(hook: F)
where
    F: Fn(&str) + Send + Sync + 'static,
{
    *HOOK.write() = Some(Box::new(hook));
}

/// Remove the installed hook, restoring the stderr default
pub fn clear_diagnostic_hook() {
    *HOOK.write() = None;
}

/// Report an internal failure; never fails, never blocks on the caller
pub(crate) fn report(message: &str) {
    let hook = HOOK.read();
    match hook.as_ref() {
        Some(hook) => hook(message),
        None => eprintln!("[LOGGER ERROR] {}", message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_hook_receives_reports() {
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_clone = Arc::clone(&seen);
        set_diagnostic_hook(move |_| {
            seen_clone.fetch_add(1, Ordering::Relaxed);
        });

        report("sink failed");
        report("route failed");
        assert!(seen.load(Ordering::Relaxed) >= 2);

        clear_diagnostic_hook();
        // Default path must not panic
        report("after hook removed");
    }
}
