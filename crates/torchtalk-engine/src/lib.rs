//! # torchtalk-engine
//!
//! Turn orchestration over the stage crates, plus the DashMap-backed
//! in-memory session store.

pub mod engine;
pub mod session;

pub use engine::{TurnEngine, TurnOutcome};
pub use session::SessionManager;
