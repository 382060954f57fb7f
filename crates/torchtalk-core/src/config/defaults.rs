//! Scalar configuration defaults.

pub const DEFAULT_SHORT_MEMORY_TTL_SECS: i64 = 15 * 60;
pub const DEFAULT_MAX_RELATED_ITEMS: usize = 6;
pub const DEFAULT_MAX_SESSIONS: usize = 1000;
pub const DEFAULT_CONTACT_REMINDER_LIMIT: u32 = 1;
pub const DEFAULT_RELATED_EXPANSION: bool = true;
