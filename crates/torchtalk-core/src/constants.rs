/// TorchTalk engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Short memory expires this many seconds after its last write.
pub const SHORT_MEMORY_TTL_SECS: i64 = 15 * 60;

/// Maximum product codes carried in `last_context_codes`.
pub const MAX_CONTEXT_CODES: usize = 4;

/// Maximum related accessories appended by the guard in one turn.
pub const MAX_RELATED_ITEMS: usize = 6;

/// Contact reminders are sent at most this many times per collection cycle.
pub const CONTACT_REMINDER_LIMIT: u32 = 1;

/// Word-count ceilings for the short-message dialogue act shapes.
pub const AFFIRM_MAX_WORDS: usize = 4;
pub const AMP_ONLY_MAX_WORDS: usize = 4;
pub const AMP_FOLLOWUP_MAX_WORDS: usize = 6;
pub const TYPE_ONLY_MAX_WORDS: usize = 6;
pub const QUANTITY_FOLLOWUP_MAX_WORDS: usize = 8;

/// A message this short counts as a follow-up when an anchor is held.
pub const SHORT_FOLLOWUP_MAX_WORDS: usize = 4;

/// Bare technical lookups stay deterministic up to this many words.
pub const TECH_LOOKUP_MAX_WORDS: usize = 6;

/// Default capacity of the in-memory session store.
pub const DEFAULT_MAX_SESSIONS: usize = 1000;

/// Environment variable overriding the bulk-quantity threshold.
pub const BULK_QTY_THRESHOLD_ENV: &str = "TORCHTALK_BULK_QTY_THRESHOLD";
