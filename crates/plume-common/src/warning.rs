//! Renderer warnings routed through the `log` facade.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by style resolution, text layout and painters to report unsupported
//! features.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Global set of warnings we've already emitted (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about an unsupported feature (logs once per unique message)
///
/// The `component` doubles as the log target, so `RUST_LOG=style=warn`
/// filters style-resolution warnings only.
///
/// # Example
/// ```ignore
/// warn_once("style", "unsupported unit 'vh' in width: 10vh");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let should_log = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_log {
        log::warn!(target: component, "{message}");
    }
}

/// Number of distinct warnings emitted since the last [`clear_warnings`]
#[must_use]
pub fn warning_count() -> usize {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .map_or(0, HashSet::len)
}

/// Clear all recorded warnings (call before starting an unrelated render)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

