use serde::{Deserialize, Serialize};

use super::constraints::Constraints;
use super::product::ProductGroup;
use crate::dialogue::{DialogueAct, Intent};

/// Output of memory resolution: the parsed turn with contextual gaps
/// filled from short memory. Derived fresh each turn, never mutated after.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolvedRequest {
    /// The code this turn is about, explicit or inherited.
    pub anchor_sku: Option<String>,
    /// True when the anchor came from memory rather than this message.
    pub anchor_from_memory: bool,
    pub anchor_category: Option<String>,
    pub anchor_name: Option<String>,

    pub group: Option<ProductGroup>,
    pub line_amp: Option<String>,
    pub is_robot: Option<bool>,
    pub quantity: Option<u32>,
    /// Remembered constraints overlaid with this turn's.
    pub constraints: Constraints,

    /// Accessory roles still wanted, after any narrowing re-ask.
    pub required_parts: Vec<ProductGroup>,
    pub expand_bundle: bool,

    /// This turn reads as a continuation of the previous request.
    pub is_followup: bool,
    /// Intent forced deterministically; skips the generator when set.
    pub force_intent: Option<Intent>,
    /// The stored pending action was consumed or invalidated this turn.
    pub clear_pending_action: bool,
    /// A pending action's fields were folded into this request (AFFIRM).
    pub pending_action_consumed: bool,

    pub dialogue_act: DialogueAct,
}
