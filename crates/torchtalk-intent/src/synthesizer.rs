use tracing::{debug, warn};

use torchtalk_core::constants::TECH_LOOKUP_MAX_WORDS;
use torchtalk_core::dialogue::{DialogueAct, Intent, Topic};
use torchtalk_core::models::{
    Constraints, DecisionEntities, GenerationRequest, IntentDecision, OrderState, ParsedSlots,
    ResolvedRequest, ShortMemory,
};
use torchtalk_core::traits::ITextGenerator;
use torchtalk_nlu::extractor::loose_size;

use crate::parse::parse_generator_output;
use crate::rules::{apply_hard_rules, derive_missing, detect_topic, deterministic_overrides};

/// Produces the per-turn `IntentDecision`. Deterministic fast paths run
/// first in a fixed order; the generator is consulted only when none of
/// them claims the turn, and even then every regex-confirmed signal
/// overrides its guess.
pub struct IntentSynthesizer<'a> {
    generator: &'a dyn ITextGenerator,
}

impl<'a> IntentSynthesizer<'a> {
    pub fn new(generator: &'a dyn ITextGenerator) -> Self {
        Self { generator }
    }

    pub fn synthesize(
        &self,
        slots: &ParsedSlots,
        resolved: &ResolvedRequest,
        memory: &ShortMemory,
        state: &OrderState,
    ) -> IntentDecision {
        let mut decision = self
            .fast_path(slots, resolved, memory, state)
            .unwrap_or_else(|| self.generator_path(slots, resolved, memory));

        derive_missing(&mut decision, resolved, state);
        apply_hard_rules(&mut decision, slots, state);
        debug!(
            intent = %decision.intent,
            action = ?decision.next_action,
            missing = decision.missing.len(),
            "synthesized decision"
        );
        decision
    }

    fn fast_path(
        &self,
        slots: &ParsedSlots,
        resolved: &ResolvedRequest,
        memory: &ShortMemory,
        state: &OrderState,
    ) -> Option<IntentDecision> {
        if self.is_selling_scope(slots) {
            return Some(IntentDecision {
                intent: Intent::AskSellingScope,
                topic: Topic::Product,
                ..IntentDecision::default()
            });
        }

        if resolved.dialogue_act == DialogueAct::SlotFillType {
            return Some(self.type_only_decision(slots, resolved, memory));
        }

        if resolved.dialogue_act == DialogueAct::SlotFillAmp {
            return Some(self.amp_only_decision(slots, resolved, memory));
        }

        if resolved.dialogue_act == DialogueAct::SlotFillQuantity {
            let mut d = IntentDecision {
                intent: Intent::QuantityFollowup,
                topic: Topic::Commercial,
                buy_intent: true,
                ..IntentDecision::default()
            };
            d.entities.quantity = resolved.quantity;
            d.entities.skus = resolved.anchor_sku.iter().cloned().collect();
            d.collect_contact = state.contact.is_none() && resolved.anchor_sku.is_some();
            return Some(d);
        }

        if let Some(intent) = resolved.force_intent {
            let mut d = IntentDecision {
                intent,
                topic: detect_topic(slots),
                buy_intent: slots.buy_intent,
                info_only: slots.info_only,
                ..IntentDecision::default()
            };
            d.entities = entities_from_resolved(slots, resolved);
            return Some(d);
        }

        if self.is_tech_product_inquiry(slots) || self.is_technical_lookup(slots) {
            let mut d = IntentDecision {
                intent: Intent::ProductLookup,
                topic: Topic::Product,
                ..IntentDecision::default()
            };
            d.entities = entities_from_resolved(slots, resolved);
            d.entities.constraints = lookup_constraints(slots, resolved);
            return Some(d);
        }

        None
    }

    /// "tay"/"robot" alone: a stored pending action gets completed with the
    /// type; otherwise it is a type switch over the anchor.
    fn type_only_decision(
        &self,
        slots: &ParsedSlots,
        resolved: &ResolvedRequest,
        memory: &ShortMemory,
    ) -> IntentDecision {
        if let Some(pa) = &memory.pending_action {
            let mut d = IntentDecision {
                intent: pa.action,
                topic: Topic::Product,
                ..IntentDecision::default()
            };
            d.entities.skus = pa
                .anchor_sku
                .clone()
                .or_else(|| resolved.anchor_sku.clone())
                .into_iter()
                .collect();
            d.entities.product_group = pa.product_group.or(resolved.group);
            d.entities.constraints = pa.constraints.merged_with(&resolved.constraints);
            return d;
        }
        let mut d = IntentDecision {
            intent: Intent::TypeSwitch,
            topic: Topic::Product,
            info_only: slots.info_only,
            ..IntentDecision::default()
        };
        d.entities = entities_from_resolved(slots, resolved);
        d
    }

    /// "350a": the amp completes whatever was in flight — a pending
    /// action, a running bundle, or the last technical intent.
    fn amp_only_decision(
        &self,
        slots: &ParsedSlots,
        resolved: &ResolvedRequest,
        memory: &ShortMemory,
    ) -> IntentDecision {
        let slot_target = memory
            .pending_action
            .as_ref()
            .map(|pa| pa.action)
            .or_else(|| {
                if !memory.pending_request.is_empty() {
                    Some(Intent::AccessoryBundleLookup)
                } else {
                    None
                }
            })
            .or_else(|| memory.last_intent.filter(|i| i.is_technical()));

        let mut d = IntentDecision {
            intent: Intent::SlotFillAmp,
            topic: Topic::Product,
            slot_target_intent: slot_target,
            ..IntentDecision::default()
        };
        d.entities = entities_from_resolved(slots, resolved);
        d
    }

    fn generator_path(
        &self,
        slots: &ParsedSlots,
        resolved: &ResolvedRequest,
        memory: &ShortMemory,
    ) -> IntentDecision {
        let request = GenerationRequest {
            message: slots.normalized.clone(),
            recent_codes: memory.last_results.clone(),
            last_intent: memory.last_intent.map(|i| i.as_str().to_string()),
        };
        let output = match self.generator.generate(&request) {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "generator failed, falling back to rules");
                String::new()
            }
        };

        let guess = parse_generator_output(&output);
        let mut decision = IntentDecision {
            intent: guess.intent.unwrap_or(if slots.availability {
                Intent::ProductAvailability
            } else {
                Intent::Other
            }),
            topic: guess.topic.unwrap_or_else(|| detect_topic(slots)),
            buy_intent: guess
                .buy_intent
                .unwrap_or(slots.buy_intent || (slots.close_intent && slots.quantity.is_some())),
            collect_contact: guess.collect_contact.unwrap_or(false),
            info_only: guess.info_only.unwrap_or(slots.info_only),
            ..IntentDecision::default()
        };
        decision.entities.skus = guess.skus;
        decision.entities.quantity = guess.quantity;
        if let Some(action) = guess.next_action {
            decision.next_action = action;
        }

        deterministic_overrides(&mut decision, slots, resolved);
        merge_with_resolved(&mut decision, slots, resolved);
        decision
    }

    /// "shop ban gi": a scope question, not a product request.
    fn is_selling_scope(&self, slots: &ParsedSlots) -> bool {
        slots.selling_scope
            || (slots.selling_verb
                && slots.group.is_none()
                && slots.codes.is_empty()
                && slots.constraints.amp.is_none()
                && !slots.constraints.has_technical())
    }

    /// "co ban bec 0.8x45l khong": a selling verb over a concrete spec is
    /// a lookup, not a scope question.
    fn is_tech_product_inquiry(&self, slots: &ParsedSlots) -> bool {
        slots.selling_verb
            && slots.group.is_some()
            && slots.codes.is_empty()
            && (slots.constraints.has_technical() || loose_size(&slots.normalized).is_some())
    }

    /// Short bare lookups like "bec 350a" skip the generator.
    fn is_technical_lookup(&self, slots: &ParsedSlots) -> bool {
        slots.group.is_some()
            && slots.codes.is_empty()
            && !slots.price_talk
            && !slots.availability
            && slots.quantity.is_none()
            && !slots.buy_intent
            && (slots.lookup_hint || slots.word_count <= TECH_LOOKUP_MAX_WORDS)
    }
}

fn entities_from_resolved(slots: &ParsedSlots, resolved: &ResolvedRequest) -> DecisionEntities {
    DecisionEntities {
        skus: resolved.anchor_sku.iter().cloned().collect(),
        product_group: resolved.group,
        quantity: resolved.quantity,
        constraints: resolved.constraints.clone(),
    }
}

/// Gaps in the generator's entities fill from the resolver, never the
/// other way round.
fn merge_with_resolved(
    decision: &mut IntentDecision,
    slots: &ParsedSlots,
    resolved: &ResolvedRequest,
) {
    if decision.entities.skus.is_empty() {
        if !slots.codes.is_empty() {
            decision.entities.skus = slots.codes.clone();
        } else if let Some(anchor) = &resolved.anchor_sku {
            decision.entities.skus = vec![anchor.clone()];
        }
    }
    if decision.entities.product_group.is_none() {
        decision.entities.product_group = resolved.group;
    }
    if decision.entities.quantity.is_none() {
        decision.entities.quantity = resolved.quantity;
    }
    decision.entities.constraints = resolved
        .constraints
        .merged_with(&decision.entities.constraints);
}

/// Constraints for a deterministic product lookup: this turn's literal
/// values plus the loose tip diameter shape.
fn lookup_constraints(slots: &ParsedSlots, resolved: &ResolvedRequest) -> Constraints {
    let mut c = resolved.constraints.clone();
    if c.size.is_none() {
        c.size = loose_size(&slots.normalized);
    }
    c
}
