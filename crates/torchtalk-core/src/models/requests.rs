use serde::{Deserialize, Serialize};

use super::constraints::Constraints;
use super::product::{ProductGroup, TorchType};
use crate::dialogue::Intent;

/// What the engine asks the catalog collaborator for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalRequest {
    pub intent: Option<Intent>,
    /// Exact codes to look up, when the turn named any.
    pub codes: Vec<String>,
    pub group: Option<ProductGroup>,
    /// Accessory roles for bundle retrieval.
    pub parts: Vec<ProductGroup>,
    pub torch_type: Option<TorchType>,
    pub constraints: Constraints,
    /// Free-text fallback query (normalized message).
    pub query: String,
}

/// What the engine hands the text generator for the fallback path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationRequest {
    /// The user message, normalized.
    pub message: String,
    /// Wire names of recently shown codes, for coreference.
    pub recent_codes: Vec<String>,
    /// Wire name of the previous intent, if any.
    pub last_intent: Option<String>,
}
