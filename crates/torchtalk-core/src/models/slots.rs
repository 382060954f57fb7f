use serde::{Deserialize, Serialize};

use super::constraints::Constraints;
use super::product::ProductGroup;

/// Everything the detectors found in one user message. Built once per turn
/// and read-only afterwards; absence of a signal is `None`/empty, never an
/// error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsedSlots {
    /// Original message text.
    pub raw: String,
    /// Diacritic-folded lowercase text all detectors ran against.
    pub normalized: String,
    pub word_count: usize,

    /// Product codes in order of appearance; first is primary.
    pub codes: Vec<String>,
    pub quantity: Option<u32>,
    /// Message was nothing but a quantity ("2 cai", "30", "mot bo").
    pub pure_quantity: Option<u32>,
    pub single_unit: bool,
    pub constraints: Constraints,
    pub is_robot: Option<bool>,
    pub group: Option<ProductGroup>,
    /// Accessory roles named this turn ("than giu va su" → TipBody, Orifice).
    pub requested_parts: Vec<ProductGroup>,

    // Phrasing cues, all computed on the normalized text.
    pub bundle_hint: bool,
    pub bundle_query: bool,
    pub related_query: bool,
    pub listing: bool,
    pub price_talk: bool,
    pub availability: bool,
    pub info_query: bool,
    pub info_only: bool,
    pub close_intent: bool,
    pub buy_intent: bool,
    pub selling_verb: bool,
    pub selling_scope: bool,
    pub followup_cue: bool,
    pub compatibility: bool,
    pub product_info: bool,
    pub repeat_request: bool,
    pub lookup_hint: bool,
    pub contact_mention: bool,
    /// Message starts with the re-ask marker "con ..." naming parts.
    pub narrowing_reask: bool,
}

impl ParsedSlots {
    pub fn primary_code(&self) -> Option<&str> {
        self.codes.first().map(String::as_str)
    }

    pub fn has_codes(&self) -> bool {
        !self.codes.is_empty()
    }

    /// Any signal strong enough to stand on its own as a new request.
    /// A pending action from last turn does not survive a turn that has one.
    pub fn has_independent_signal(&self) -> bool {
        self.has_codes()
            || self.listing
            || self.price_talk
            || self.availability
            || self.related_query
            || self.group.is_some()
            || self.quantity.is_some()
            || self.constraints.amp.is_some()
    }
}
