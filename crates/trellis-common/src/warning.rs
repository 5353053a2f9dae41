//! Deduplicated layout warnings.
//!
//! Layout runs many times over the same tree, so a warning about an ignored
//! property would otherwise be emitted once per pass. Each unique
//! `(component, message)` pair is reported through [`tracing::warn!`] once
//! until [`clear_warnings`] is called.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Global set of warnings we've already emitted (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

fn warning_key(component: &str, message: &str) -> String {
    format!("[{component}] {message}")
}

/// Warn about an ignored or unsupported input (emitted once per unique message)
///
/// # Example
/// ```
/// trellis_common::warning::warn_once("Pagination", "break-before: column ignored outside multicol");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let should_emit = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(warning_key(component, message));

    if should_emit {
        tracing::warn!(target: "trellis", component, "{message}");
    }
}

/// Whether `warn_once` has already emitted this message.
#[must_use]
pub fn has_warned(component: &str, message: &str) -> bool {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .is_some_and(|set| set.contains(&warning_key(component, message)))
}

/// Forget all recorded warnings (call when loading a new scene)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
