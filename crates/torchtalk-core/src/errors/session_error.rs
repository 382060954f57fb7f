/// Session persistence errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session not found: {session_id}")]
    NotFound { session_id: String },

    #[error("session store at capacity ({max} sessions)")]
    AtCapacity { max: usize },

    #[error("session write failed: {reason}")]
    WriteFailed { reason: String },
}
