use serde::{Deserialize, Serialize};

use super::defaults;
use super::vocabulary::Vocabulary;
use crate::constants::BULK_QTY_THRESHOLD_ENV;
use crate::errors::{CoreError, CoreResult};

/// Engine-wide tunables. Loadable from TOML; every field has a default so a
/// missing file or partial file is fine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Short memory lifetime in seconds.
    pub short_memory_ttl_secs: i64,
    /// Quantity at or above which contact collection is forced.
    /// `None` derives it from catalog bulk-qty columns per turn.
    pub bulk_qty_threshold: Option<u32>,
    /// Capacity of the in-memory session store.
    pub max_sessions: usize,
    /// Cap on related accessories appended per turn.
    pub max_related_items: usize,
    /// Contact reminders per collection cycle.
    pub contact_reminder_limit: u32,
    /// Toggle for related-item expansion.
    pub related_expansion: bool,
    pub vocabulary: Vocabulary,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            short_memory_ttl_secs: defaults::DEFAULT_SHORT_MEMORY_TTL_SECS,
            bulk_qty_threshold: None,
            max_sessions: defaults::DEFAULT_MAX_SESSIONS,
            max_related_items: defaults::DEFAULT_MAX_RELATED_ITEMS,
            contact_reminder_limit: defaults::DEFAULT_CONTACT_REMINDER_LIMIT,
            related_expansion: defaults::DEFAULT_RELATED_EXPANSION,
            vocabulary: Vocabulary::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(raw: &str) -> CoreResult<Self> {
        toml::from_str(raw).map_err(|e| CoreError::Config(e.to_string()))
    }

    /// Environment override wins over the configured threshold.
    pub fn effective_bulk_threshold(&self) -> Option<u32> {
        if let Ok(raw) = std::env::var(BULK_QTY_THRESHOLD_ENV) {
            if let Ok(v) = raw.trim().parse::<u32>() {
                if v > 0 {
                    return Some(v);
                }
            }
        }
        self.bulk_qty_threshold
    }
}
