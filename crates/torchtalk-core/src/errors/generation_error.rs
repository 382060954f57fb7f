/// Text generation errors. The engine treats these as soft failures:
/// a failed generation degrades to the deterministic fallback decision.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("generator backend unavailable: {reason}")]
    BackendUnavailable { reason: String },

    #[error("generation timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("generation failed: {reason}")]
    Failed { reason: String },
}
