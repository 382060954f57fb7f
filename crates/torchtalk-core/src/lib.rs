//! # torchtalk-core
//!
//! Foundation crate for the TorchTalk dialogue state engine.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod dialogue;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::{EngineConfig, Vocabulary};
pub use dialogue::{DialogueAct, Intent, MissingSlot, NextAction, Topic};
pub use errors::{CoreError, CoreResult};
pub use models::{
    CatalogItem, ChatMessage, Constraints, ContextFlags, IntentDecision, OrderState, ParsedSlots,
    ProductGroup, Provenance, ResolvedRequest, ShortMemory, TorchType,
};
