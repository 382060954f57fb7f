//! # torchtalk-memory
//!
//! Short memory lifecycle: TTL normalization at turn start, contextual
//! resolution of the parsed turn, and the single end-of-turn writer.

pub mod resolver;
pub mod ttl;
pub mod updater;

pub use resolver::MemoryResolver;
pub use ttl::normalize_short_memory;
pub use updater::{MemoryUpdater, TurnRecord};
