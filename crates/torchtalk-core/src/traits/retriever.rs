use crate::errors::CoreResult;
use crate::models::{CatalogItem, RetrievalRequest};

/// Catalog lookup boundary. Implementations own matching strategy and
/// ranking; the engine only shapes the request and post-filters results.
pub trait ICatalogRetriever: Send + Sync {
    fn retrieve(&self, request: &RetrievalRequest) -> CoreResult<Vec<CatalogItem>>;

    /// Exact lookup by code across all code families. Default implementation
    /// goes through `retrieve` with a single-code request.
    fn lookup_code(&self, code: &str) -> CoreResult<Option<CatalogItem>> {
        let request = RetrievalRequest {
            codes: vec![code.to_string()],
            ..RetrievalRequest::default()
        };
        Ok(self.retrieve(&request)?.into_iter().next())
    }
}
