use serde::{Deserialize, Serialize};

use super::constraints::Constraints;
use super::product::ProductGroup;
use crate::dialogue::{Intent, MissingSlot, NextAction, Topic};

/// Entities attached to an intent decision.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionEntities {
    pub skus: Vec<String>,
    pub product_group: Option<ProductGroup>,
    pub quantity: Option<u32>,
    pub constraints: Constraints,
}

/// The per-turn intent decision after merge and the hard-rule pass.
/// This is the contract the guard and the reply renderer consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentDecision {
    pub intent: Intent,
    pub topic: Topic,
    pub entities: DecisionEntities,
    pub missing: Vec<MissingSlot>,
    pub buy_intent: bool,
    pub collect_contact: bool,
    /// Question is about origin/brand only; suppress product rendering.
    pub info_only: bool,
    pub next_action: NextAction,
    /// For SLOT_FILL_AMP: the technical intent the amp is completing.
    pub slot_target_intent: Option<Intent>,
}

impl Default for IntentDecision {
    fn default() -> Self {
        Self {
            intent: Intent::Other,
            topic: Topic::Product,
            entities: DecisionEntities::default(),
            missing: Vec::new(),
            buy_intent: false,
            collect_contact: false,
            info_only: false,
            next_action: NextAction::AnswerOnly,
            slot_target_intent: None,
        }
    }
}

impl IntentDecision {
    pub fn is_missing(&self, slot: MissingSlot) -> bool {
        self.missing.contains(&slot)
    }

    pub fn drop_missing(&mut self, slot: MissingSlot) {
        self.missing.retain(|m| *m != slot);
    }

    pub fn add_missing(&mut self, slot: MissingSlot) {
        if !self.missing.contains(&slot) {
            self.missing.push(slot);
        }
    }
}
