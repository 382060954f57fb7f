use chrono::{DateTime, Utc};
use tracing::debug;

use torchtalk_core::models::{OrderState, ShortMemory};

/// Enforce the short-memory TTL on a freshly loaded state. An absent or
/// stale timestamp resets the whole structure; there is no partial expiry.
/// Returns true when a reset happened.
pub fn normalize_short_memory(state: &mut OrderState, now: DateTime<Utc>, ttl_secs: i64) -> bool {
    let stale = match state.short_memory_at {
        Some(ts) => now.signed_duration_since(ts).num_seconds() > ttl_secs,
        None => true,
    };
    if stale {
        let had_content = state.short_memory != ShortMemory::default();
        state.short_memory = ShortMemory::default();
        if had_content {
            debug!(ttl_secs, "short memory expired, reset");
        }
    }
    stale
}
