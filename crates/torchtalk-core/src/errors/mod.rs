mod generation_error;
mod retrieval_error;
mod session_error;

pub use generation_error::GenerationError;
pub use retrieval_error::RetrievalError;
pub use session_error::SessionError;

/// Top-level engine error. Subsystem errors convert via `From`.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("config error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;
