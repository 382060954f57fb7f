use serde::{Deserialize, Serialize};

use super::constraints::Constraints;
use super::product::ProductGroup;
use crate::dialogue::{Intent, Topic};

/// The product the conversation is currently "about".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Anchor {
    pub sku: Option<String>,
    pub category: Option<String>,
    pub line_amp: Option<String>,
    pub is_robot: Option<bool>,
    pub name: Option<String>,
}

impl Anchor {
    pub fn is_set(&self) -> bool {
        self.sku.is_some()
    }
}

/// Progress through a multi-part accessory request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PendingRequest {
    pub required_parts: Vec<ProductGroup>,
    /// Technical fields still unknown for the request, e.g. `AMP`, `SYSTEM`.
    pub missing_fields: Vec<String>,
    pub done_parts: Vec<ProductGroup>,
    pub todo_parts: Vec<ProductGroup>,
}

impl PendingRequest {
    pub fn is_empty(&self) -> bool {
        self.required_parts.is_empty() && self.done_parts.is_empty() && self.todo_parts.is_empty()
    }
}

/// An offer made last turn that a bare "ok" can accept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingAction {
    pub action: Intent,
    pub required_parts: Vec<ProductGroup>,
    pub anchor_sku: Option<String>,
    pub product_group: Option<ProductGroup>,
    #[serde(default)]
    pub constraints: Constraints,
}

/// Commercial signals carried across turns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommercialContext {
    pub quantity: Option<u32>,
    pub contact_collected: bool,
    pub show_form: bool,
}

/// Rolling 15-minute conversational memory. Expiry resets the whole
/// structure before any read; there is no partial expiry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortMemory {
    pub last_anchor: Anchor,
    pub last_intent: Option<Intent>,
    pub last_topic: Option<Topic>,
    /// Codes shown to the user most recently, display order.
    pub last_results: Vec<String>,
    pub pending_request: PendingRequest,
    pub pending_action: Option<PendingAction>,
    pub last_user_constraints: Constraints,
    pub last_commercial_context: CommercialContext,
}
