use serde::{Deserialize, Serialize};

use super::catalog_item::CatalogItem;
use super::product::TorchType;

/// Presentation flags derived by the context guard. The renderer obeys
/// these; it never re-derives conversational state on its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextFlags {
    pub is_asking_price: bool,
    pub is_availability_query: bool,
    pub is_asking_related: bool,
    pub is_info_only: bool,
    pub is_close_intent: bool,

    /// Ask the hand-vs-robot question this turn.
    pub should_ask_type: bool,
    /// Question was asked before and never answered; assume hand-held.
    pub force_default_hand: Option<TorchType>,
    pub should_show_form: bool,
    pub should_remind_contact: bool,
    pub should_render_products: bool,
    /// Why contact collection was forced, when it was (e.g. bulk order).
    pub contact_reason: Option<String>,

    /// Items to render, after pruning and related expansion.
    pub display_items: Vec<CatalogItem>,
    /// Related accessories appended by expansion (subset of display items).
    pub related_items: Vec<CatalogItem>,
}
