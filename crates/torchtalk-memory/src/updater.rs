use chrono::{DateTime, Utc};
use tracing::debug;

use torchtalk_core::config::Vocabulary;
use torchtalk_core::constants::MAX_CONTEXT_CODES;
use torchtalk_core::dialogue::Intent;
use torchtalk_core::models::{
    Anchor, CatalogItem, CommercialContext, Constraints, ContextFlags, IntentDecision, OrderState,
    ParsedSlots, PendingAction, ProductGroup, Provenance, ResolvedRequest,
};
use torchtalk_guard::items::{detect_amp_line, detect_item_type, item_group};
use torchtalk_nlu::normalize::{any_term, digits_of};
use torchtalk_nlu::patterns::{get, RE_PHONE};

/// Everything the updater reads at end of turn.
pub struct TurnRecord<'a> {
    pub slots: &'a ParsedSlots,
    pub resolved: &'a ResolvedRequest,
    pub decision: &'a IntentDecision,
    pub flags: &'a ContextFlags,
    /// Items retrieved this turn, pre-display.
    pub items: &'a [CatalogItem],
    /// Catalog row for the already-selected SKU, when no item was retrieved.
    pub anchor_fallback: Option<&'a CatalogItem>,
    /// The rendered reply, used only to detect an accessory invitation.
    pub answer: &'a str,
    pub now: DateTime<Utc>,
}

/// Single writer of durable state. Folds the turn into `OrderState` and
/// rewrites short memory; nothing upstream mutates either.
pub struct MemoryUpdater {
    vocab: Vocabulary,
}

impl MemoryUpdater {
    pub fn new(vocab: Vocabulary) -> Self {
        Self { vocab }
    }

    pub fn apply(&self, state: &mut OrderState, rec: &TurnRecord<'_>) {
        self.fold_order_state(state, rec);
        self.update_short_memory(state, rec);
        state.short_memory_at = Some(rec.now);
        debug!(
            anchor = ?state.short_memory.last_anchor.sku,
            intent = ?state.short_memory.last_intent,
            pending = state.short_memory.pending_action.is_some(),
            "memory updated"
        );
    }

    fn fold_order_state(&self, state: &mut OrderState, rec: &TurnRecord<'_>) {
        let slots = rec.slots;

        if let Some(code) = rec
            .decision
            .entities
            .skus
            .first()
            .map(String::as_str)
            .or_else(|| slots.primary_code())
        {
            state.selected_sku = Some(code.to_string());
        }
        if let Some(group) = rec.decision.entities.product_group.or(slots.group) {
            state.selected_group = Some(group);
        }

        let quantity = rec
            .decision
            .entities
            .quantity
            .or(slots.quantity)
            .or_else(|| {
                // A bare number only binds as an order size once something
                // is selected.
                if state.selected_sku.is_some() {
                    slots.pure_quantity
                } else {
                    None
                }
            });
        if let Some(q) = quantity {
            state.quantity = Some(q);
        }

        if let Some(is_robot) = slots.is_robot {
            state.hand_or_robot = Some(if is_robot {
                torchtalk_core::models::TorchType::Robot
            } else {
                torchtalk_core::models::TorchType::Hand
            });
            state.hand_or_robot_source = Some(Provenance::User);
        } else if let Some(default) = rec.flags.force_default_hand {
            if state.hand_or_robot.is_none() {
                state.hand_or_robot = Some(default);
                state.hand_or_robot_source = Some(Provenance::AssumedDefault);
            }
        }

        if let Some(contact) = extract_contact(slots, &self.vocab) {
            state.contact = Some(contact);
        }

        if rec.flags.should_ask_type {
            state.asked_hand_robot = true;
        }
        if rec.flags.should_show_form {
            state.asked_contact_form = true;
        }
        if rec.decision.intent == Intent::AskSellingScope {
            state.selling_scope_variant = state.selling_scope_variant.wrapping_add(1);
        }

        state.last_intent = Some(rec.decision.intent);
        state.last_context_codes = rec
            .flags
            .display_items
            .iter()
            .take(MAX_CONTEXT_CODES)
            .map(|i| i.code.clone())
            .collect();
        if let Some(group) = rec.resolved.group {
            state.last_group = Some(group);
        }
        state.last_constraints = rec.resolved.constraints.clone();
    }

    fn update_short_memory(&self, state: &mut OrderState, rec: &TurnRecord<'_>) {
        let sm = &mut state.short_memory;

        sm.last_intent = Some(rec.decision.intent);
        sm.last_topic = Some(rec.decision.topic);
        sm.last_results = rec
            .flags
            .display_items
            .iter()
            .map(|i| i.code.clone())
            .collect();

        // Anchor refresh: retrieved item first, then displayed, then the
        // standing selection.
        let anchor_item = rec
            .items
            .first()
            .or_else(|| rec.flags.display_items.first())
            .or(rec.anchor_fallback);
        if let Some(item) = anchor_item {
            let explicit_type = if state.hand_or_robot_source == Some(Provenance::User) {
                state.hand_or_robot.map(|t| t.is_robot())
            } else {
                None
            };
            sm.last_anchor = Anchor {
                sku: Some(item.code.clone()),
                category: Some(item.category.clone()),
                line_amp: detect_amp_line(item, &self.vocab)
                    .or_else(|| rec.resolved.line_amp.clone()),
                is_robot: explicit_type.or(Some(detect_item_type(item).is_robot())),
                name: Some(item.name.clone()),
            };
        }

        self.update_pending_request(sm, rec);
        self.update_pending_action(sm, rec);

        // Only this turn's literal statements overlay remembered
        // constraints; inherited values never echo back in.
        sm.last_user_constraints = sm.last_user_constraints.merged_with(&rec.slots.constraints);

        sm.last_commercial_context = CommercialContext {
            quantity: state.quantity,
            contact_collected: state.contact.is_some(),
            show_form: rec.flags.should_show_form,
        };
    }

    /// Bundle progress. The first turn's required set stays the baseline
    /// while later turns narrow it, so `todo` reflects the original ask.
    fn update_pending_request(&self, sm: &mut torchtalk_core::models::ShortMemory, rec: &TurnRecord<'_>) {
        let required = &rec.resolved.required_parts;
        let bundleish = rec.decision.intent == Intent::AccessoryBundleLookup || !required.is_empty();
        if !bundleish {
            return;
        }

        let pr = &mut sm.pending_request;
        let is_narrowing =
            !pr.required_parts.is_empty() && required.iter().all(|p| pr.required_parts.contains(p));
        let baseline: Vec<ProductGroup> = if is_narrowing {
            pr.required_parts.clone()
        } else {
            required.clone()
        };

        let covered: Vec<ProductGroup> = rec
            .flags
            .display_items
            .iter()
            .filter_map(|i| item_group(i, &self.vocab))
            .collect();
        for part in covered {
            if baseline.contains(&part) && !pr.done_parts.contains(&part) {
                pr.done_parts.push(part);
            }
        }

        pr.required_parts = baseline.clone();
        pr.todo_parts = baseline
            .into_iter()
            .filter(|p| !pr.done_parts.contains(p))
            .collect();

        pr.missing_fields.clear();
        if rec.resolved.line_amp.is_none() {
            pr.missing_fields.push("AMP".to_string());
        }
        if rec.resolved.constraints.system.is_none() {
            pr.missing_fields.push("SYSTEM".to_string());
        }
    }

    /// Pending-action lifecycle: honor the resolver's clear, then recreate
    /// when this turn's reply invited the user to complete the set.
    fn update_pending_action(&self, sm: &mut torchtalk_core::models::ShortMemory, rec: &TurnRecord<'_>) {
        if rec.resolved.clear_pending_action {
            sm.pending_action = None;
        }

        let invited = {
            let folded = torchtalk_nlu::normalize_text(rec.answer);
            any_term(&folded, &self.vocab.accessory_invite_terms)
        };
        let eligible = (rec.decision.intent.is_technical()
            || rec.decision.intent == Intent::CodeLookup)
            && !rec.flags.should_show_form
            && !rec.flags.is_asking_price
            && !rec.flags.is_availability_query
            && invited;
        if !eligible {
            return;
        }

        let anchor = &sm.last_anchor;
        let anchor_group = anchor
            .category
            .as_deref()
            .and_then(ProductGroup::parse)
            .or(rec.resolved.group);
        let required: Vec<ProductGroup> = self
            .vocab
            .default_bundle_parts
            .iter()
            .copied()
            .filter(|p| Some(*p) != anchor_group)
            .collect();

        sm.pending_action = Some(PendingAction {
            action: Intent::AccessoryBundleLookup,
            required_parts: required,
            anchor_sku: anchor.sku.clone(),
            product_group: anchor_group,
            constraints: Constraints {
                amp: anchor.line_amp.clone().or_else(|| rec.resolved.line_amp.clone()),
                system: rec.resolved.constraints.system.clone(),
                ..Constraints::default()
            },
        });
    }
}

/// Phone digits, or digits following a contact keyword.
fn extract_contact(slots: &ParsedSlots, vocab: &Vocabulary) -> Option<String> {
    if let Some(re) = get(&RE_PHONE) {
        if let Some(m) = re.find(&slots.normalized) {
            return Some(m.as_str().to_string());
        }
    }
    if any_term(&slots.normalized, &vocab.contact_terms) {
        let digits = digits_of(&slots.normalized);
        if digits.len() >= 4 {
            return Some(digits);
        }
    }
    None
}
