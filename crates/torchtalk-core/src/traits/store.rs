use crate::errors::CoreResult;
use crate::models::OrderState;

/// Session persistence boundary. Whole-state replace per turn: the engine
/// reads one snapshot at turn start and writes one replacement at turn end,
/// so implementations never need intra-state locking.
pub trait ISessionStore: Send + Sync {
    /// Snapshot for a session; a fresh default when the session is unknown.
    fn get(&self, session_id: &str) -> CoreResult<OrderState>;

    /// Replace a session's state atomically.
    fn set(&self, session_id: &str, state: OrderState) -> CoreResult<()>;

    /// Drop a session. Unknown ids are a no-op.
    fn remove(&self, session_id: &str) -> CoreResult<()>;
}
