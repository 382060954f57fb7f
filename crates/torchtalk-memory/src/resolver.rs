use tracing::debug;

use torchtalk_core::constants::SHORT_FOLLOWUP_MAX_WORDS;
use torchtalk_core::dialogue::{DialogueAct, Intent};
use torchtalk_core::models::{ParsedSlots, ProductGroup, ResolvedRequest, ShortMemory};

/// Fills contextual gaps in a parsed turn from short memory. Pure function
/// of (slots, act, memory); the memory itself is written only by the
/// updater at end of turn.
pub struct MemoryResolver;

impl MemoryResolver {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve(
        &self,
        slots: &ParsedSlots,
        act: DialogueAct,
        memory: &ShortMemory,
    ) -> ResolvedRequest {
        let mut r = ResolvedRequest {
            dialogue_act: act,
            ..ResolvedRequest::default()
        };

        r.is_followup = slots.followup_cue
            || slots.quantity.is_some()
            || slots.constraints.amp.is_some()
            || slots.is_robot.is_some()
            || slots.bundle_hint
            || (slots.word_count <= SHORT_FOLLOWUP_MAX_WORDS && memory.last_anchor.is_set());

        // Anchor ladder: explicit code, then remembered anchor, then a
        // single-result display from last turn.
        if let Some(code) = slots.primary_code() {
            r.anchor_sku = Some(code.to_string());
            r.anchor_from_memory = false;
            if memory.last_anchor.sku.as_deref() == Some(code) {
                r.anchor_category = memory.last_anchor.category.clone();
                r.anchor_name = memory.last_anchor.name.clone();
            }
        } else if r.is_followup {
            if memory.last_anchor.is_set() {
                r.anchor_sku = memory.last_anchor.sku.clone();
                r.anchor_from_memory = true;
                r.anchor_category = memory.last_anchor.category.clone();
                r.anchor_name = memory.last_anchor.name.clone();
            } else if memory.last_results.len() == 1 {
                r.anchor_sku = memory.last_results.first().cloned();
                r.anchor_from_memory = true;
            }
        }

        r.group = slots.group.or_else(|| {
            r.anchor_category
                .as_deref()
                .and_then(ProductGroup::parse)
        });
        r.line_amp = slots
            .constraints
            .amp
            .clone()
            .or_else(|| memory.last_user_constraints.amp.clone());
        r.is_robot = slots.is_robot.or(memory.last_anchor.is_robot);
        r.quantity = slots.quantity.or(slots.pure_quantity);
        r.constraints = memory.last_user_constraints.merged_with(&slots.constraints);

        r.required_parts = slots.requested_parts.clone();
        r.expand_bundle = slots.bundle_query || slots.bundle_hint;

        // "con <parts> thi sao" narrows a running bundle to the parts named
        // this turn instead of re-expanding everything.
        if slots.narrowing_reask {
            r.required_parts = slots.requested_parts.clone();
            r.expand_bundle = false;
            if r.required_parts.len() == 1 {
                r.group = r.required_parts.first().copied();
            }
        }

        // An insulator mention always pins the group: "cach dien" is never
        // an incidental word in this domain.
        if slots.requested_parts.contains(&ProductGroup::Insulator) {
            r.group = Some(ProductGroup::Insulator);
            if !r.required_parts.contains(&ProductGroup::Insulator) {
                r.required_parts.push(ProductGroup::Insulator);
            }
        }

        r.force_intent = self.forced_intent(slots, memory, &r);
        self.settle_pending_action(slots, act, memory, &mut r);

        debug!(
            anchor = ?r.anchor_sku,
            from_memory = r.anchor_from_memory,
            force = ?r.force_intent,
            followup = r.is_followup,
            "resolved request"
        );
        r
    }

    fn forced_intent(
        &self,
        slots: &ParsedSlots,
        memory: &ShortMemory,
        r: &ResolvedRequest,
    ) -> Option<Intent> {
        // A quantity-only turn is commercial, never a technical replay.
        if slots.pure_quantity.is_some() || r.dialogue_act == DialogueAct::SlotFillQuantity {
            return None;
        }
        if slots.listing || r.anchor_sku.is_none() {
            return None;
        }
        if !r.required_parts.is_empty() || r.expand_bundle || slots.bundle_hint {
            return Some(Intent::AccessoryBundleLookup);
        }
        let last_technical = memory.last_intent.filter(|i| i.is_technical());
        if slots.constraints.amp.is_some() {
            if let Some(last) = last_technical {
                return Some(last);
            }
        }
        if slots.is_robot.is_some() {
            if let Some(last) = last_technical {
                return Some(last);
            }
        }
        None
    }

    /// Pending-action lifecycle. AFFIRM consumes it; slot fills and NEGATE
    /// drop it; a new intent drops it only when the turn can stand alone.
    fn settle_pending_action(
        &self,
        slots: &ParsedSlots,
        act: DialogueAct,
        memory: &ShortMemory,
        r: &mut ResolvedRequest,
    ) {
        match act {
            DialogueAct::Affirm => {
                if let Some(pa) = &memory.pending_action {
                    r.force_intent = Some(pa.action);
                    if r.anchor_sku.is_none() {
                        r.anchor_sku = pa.anchor_sku.clone();
                        r.anchor_from_memory = true;
                    }
                    if r.group.is_none() {
                        r.group = pa.product_group;
                    }
                    if r.required_parts.is_empty() {
                        r.required_parts = pa.required_parts.clone();
                    }
                    r.constraints = pa.constraints.merged_with(&r.constraints);
                    r.clear_pending_action = true;
                    r.pending_action_consumed = true;
                }
            }
            DialogueAct::SlotFillAmp
            | DialogueAct::SlotFillType
            | DialogueAct::SlotFillQuantity
            | DialogueAct::Negate => {
                r.clear_pending_action = memory.pending_action.is_some();
            }
            DialogueAct::NewIntent => {
                if memory.pending_action.is_some() && slots.has_independent_signal() {
                    r.clear_pending_action = true;
                }
            }
        }
    }
}

impl Default for MemoryResolver {
    fn default() -> Self {
        Self::new()
    }
}
