/// Catalog retrieval errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("catalog backend unavailable: {reason}")]
    BackendUnavailable { reason: String },

    #[error("malformed catalog row for code {code}: {reason}")]
    MalformedRow { code: String, reason: String },

    #[error("retrieval failed: {reason}")]
    QueryFailed { reason: String },
}
