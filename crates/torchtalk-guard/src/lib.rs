//! # torchtalk-guard
//!
//! Post-decision presentation guard: derives the render/ask/form flags from
//! the decision, the retrieved items, and the transcript, applying the
//! per-intent override tables last so they always win.

pub mod contact;
pub mod guard;
pub mod items;

pub use contact::{contact_state, history_asked_type, ContactState};
pub use guard::{ContextGuard, GuardInput};
