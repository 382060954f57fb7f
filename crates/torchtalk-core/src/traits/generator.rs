use crate::errors::CoreResult;
use crate::models::GenerationRequest;

/// Text generation boundary for the fallback intent guess. The output is
/// free text that may contain one JSON object; the caller parses and
/// tolerates garbage. A failed call degrades to the rule fallback.
pub trait ITextGenerator: Send + Sync {
    fn generate(&self, request: &GenerationRequest) -> CoreResult<String>;
}
