use tracing::debug;

use torchtalk_core::config::EngineConfig;
use torchtalk_core::dialogue::{Intent, NextAction};
use torchtalk_core::models::{
    CatalogItem, ChatMessage, ContextFlags, IntentDecision, OrderState, ParsedSlots, ProductGroup,
    ResolvedRequest, TorchType,
};
use torchtalk_nlu::{normalize_key, quantity_followup_shape};

use crate::contact::{contact_state, history_asked_type};
use crate::items::{
    ambiguous_amp_skus, bundle_entry_score, dedupe_by_sku, dedupe_key, detect_amp_line,
    detect_system_tag, min_bulk_qty,
};

/// Everything the guard reads for one turn. All borrowed; the guard never
/// mutates upstream records.
pub struct GuardInput<'a> {
    pub slots: &'a ParsedSlots,
    pub resolved: &'a ResolvedRequest,
    pub decision: &'a IntentDecision,
    /// Items retrieved for the decision itself.
    pub items: &'a [CatalogItem],
    /// Wider pool for related-accessory expansion.
    pub related_pool: &'a [CatalogItem],
    pub history: &'a [ChatMessage],
    pub state: &'a OrderState,
}

/// Derives the presentation flags for a turn. Ordered: base detectors,
/// question gating, commercial gating, per-intent overrides, bulk check,
/// related expansion, display pruning. Later steps override earlier ones.
pub struct ContextGuard {
    config: EngineConfig,
}

impl ContextGuard {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn derive(&self, input: GuardInput<'_>) -> ContextFlags {
        let GuardInput {
            slots,
            resolved,
            decision,
            items,
            related_pool,
            history,
            state,
        } = input;
        let vocab = &self.config.vocabulary;
        let mut f = ContextFlags::default();

        // ── Base detectors ────────────────────────────────────────────────
        f.is_asking_price = slots.price_talk;
        f.is_availability_query = slots.availability;
        f.is_asking_related = slots.related_query && !slots.availability;
        f.is_info_only = slots.info_only
            && !(slots.listing || slots.has_codes() || slots.related_query || slots.quantity.is_some());
        f.is_close_intent = slots.buy_intent || slots.close_intent || slots.price_talk;

        // A compatibility question about tips is a related-accessory ask in
        // disguise.
        if !f.is_asking_related && slots.compatibility && slots.group == Some(ProductGroup::Tip) {
            f.is_asking_related = true;
        }

        // ── Hand-vs-robot question gating ─────────────────────────────────
        let has_asked_type = state.asked_hand_robot || history_asked_type(history);
        let type_answered = state.type_answered_by_user() || slots.is_robot.is_some();

        f.should_ask_type = !has_asked_type
            && !type_answered
            && !f.is_asking_related
            && !f.is_availability_query
            && !slots.info_query
            && !f.is_info_only;
        match decision.next_action {
            NextAction::AskHandVsRobotOnce => {
                f.should_ask_type = !has_asked_type && !type_answered;
            }
            NextAction::AnswerOnly
            | NextAction::AskForSkuOrGroup
            | NextAction::RequestContactForm => {
                if decision.intent != Intent::ProductAvailability {
                    f.should_ask_type = false;
                }
            }
            NextAction::CommercialNeutralReply => f.should_ask_type = false,
        }
        if has_asked_type && !type_answered {
            f.force_default_hand = Some(TorchType::Hand);
        }

        // ── Contact collection gating ─────────────────────────────────────
        let cstate = contact_state(history);
        let contact_missing = state.contact.is_none() && !cstate.contact_received;
        let has_selected = state.selected_sku.is_some() || resolved.anchor_sku.is_some();
        let quantity = decision
            .entities
            .quantity
            .or(state.quantity)
            .or(slots.quantity)
            .or(slots.pure_quantity);

        f.should_show_form = has_selected
            && quantity.is_some()
            && contact_missing
            && !slots.single_unit
            && !f.is_info_only
            && (decision.buy_intent
                || f.is_close_intent
                || decision.next_action == NextAction::RequestContactForm);
        if decision.next_action == NextAction::AskForSkuOrGroup {
            f.should_show_form = false;
        }
        if f.is_asking_price || f.is_availability_query {
            f.should_show_form = false;
        }
        // A bare quantity answer is the order moving forward; it reopens
        // the form even though it carries no buy verb.
        let quantity_shaped = slots.pure_quantity.is_some() || quantity_followup_shape(slots);
        if quantity_shaped
            && has_selected
            && quantity.is_some()
            && contact_missing
            && !slots.single_unit
            && !f.is_info_only
        {
            f.should_show_form = true;
        }

        f.should_remind_contact = cstate.waiting_for_contact
            && (decision.buy_intent || f.is_close_intent)
            && !f.should_ask_type
            && cstate.reminder_count < self.config.contact_reminder_limit
            && !slots.info_query
            && !f.is_info_only
            && !f.is_asking_price
            && !f.is_availability_query;

        // ── Product rendering ─────────────────────────────────────────────
        f.should_render_products = !f.is_info_only
            && (f.is_asking_related
                || slots.has_codes()
                || slots.listing
                || slots.product_info
                || (f.is_close_intent && slots.has_codes()));
        if f.is_availability_query {
            f.should_render_products = !items.is_empty();
        }
        if matches!(
            decision.next_action,
            NextAction::AskForSkuOrGroup
                | NextAction::RequestContactForm
                | NextAction::CommercialNeutralReply
        ) {
            f.should_render_products = false;
        }

        // ── Per-intent overrides ──────────────────────────────────────────
        match decision.intent {
            Intent::ProductLookup | Intent::TypeSwitch => {
                f.is_asking_price = false;
                f.is_availability_query = false;
                f.is_close_intent = false;
                f.should_show_form = false;
                f.should_remind_contact = false;
                f.should_ask_type = false;
                f.should_render_products = true;
            }
            Intent::AccessoryLookup | Intent::AccessoryBundleLookup => {
                f.is_asking_related = true;
                f.is_close_intent = false;
                f.should_show_form = false;
                f.should_remind_contact = false;
                f.should_ask_type = false;
                f.should_render_products = true;
            }
            Intent::List => {
                f.should_render_products = true;
                f.should_ask_type = false;
                if !type_answered {
                    f.force_default_hand = Some(TorchType::Hand);
                }
            }
            Intent::CodeLookup => {
                if !decision.buy_intent {
                    f.should_show_form = false;
                }
                f.should_ask_type = false;
                f.should_render_products = !f.is_info_only;
            }
            _ => {}
        }

        // ── Bulk quantity ─────────────────────────────────────────────────
        let threshold = self
            .config
            .effective_bulk_threshold()
            .or_else(|| min_bulk_qty(items, vocab));
        if let (Some(q), Some(t)) = (quantity, threshold) {
            if q >= t && contact_missing {
                f.should_show_form = true;
                f.contact_reason = Some("bulk_quantity_order".to_string());
            }
        }

        // ── Related expansion ─────────────────────────────────────────────
        // A bundle lookup already retrieves the companion parts; expansion
        // on top would double them up.
        if decision.intent != Intent::AccessoryBundleLookup
            && f.is_asking_related
            && !f.is_availability_query
            && !items.is_empty()
            && self.config.related_expansion
        {
            f.related_items = self.expand_related(resolved, items, state, related_pool);
        }

        // ── Display list ──────────────────────────────────────────────────
        let mut display = dedupe_by_sku(items);
        display.extend(f.related_items.iter().cloned());
        if !slots.repeat_request {
            let shown: Vec<String> = state
                .last_context_codes
                .iter()
                .chain(state.short_memory.last_results.iter())
                .map(|c| normalize_key(c))
                .collect();
            display.retain(|item| !shown.contains(&normalize_key(&item.code)));
        }
        if !f.should_render_products {
            display.clear();
        }
        if !display.is_empty() {
            f.should_ask_type = false;
        }
        f.display_items = display;

        if decision.intent == Intent::AccessoryBundleLookup {
            let ambiguous = ambiguous_amp_skus(&f.display_items, vocab);
            if !ambiguous.is_empty() {
                debug!(?ambiguous, "amp line differs across rows of the same code");
            }
            let top = f.display_items.iter().max_by_key(|item| {
                bundle_entry_score(
                    item,
                    resolved.line_amp.as_deref(),
                    resolved.constraints.system.as_deref(),
                    state.hand_or_robot,
                    vocab,
                )
            });
            if let Some(top) = top {
                debug!(code = %top.code, "top bundle entry");
            }
        }

        debug!(
            intent = %decision.intent,
            render = f.should_render_products,
            ask_type = f.should_ask_type,
            show_form = f.should_show_form,
            display = f.display_items.len(),
            related = f.related_items.len(),
            "context guard derived"
        );
        f
    }

    /// Same-line accessories from the pool, capped, never duplicating the
    /// items already retrieved. The line is pinned by the first retrieved
    /// item; when its amp is not printed on the row, the remembered amp
    /// constraint pins it instead.
    fn expand_related(
        &self,
        resolved: &ResolvedRequest,
        items: &[CatalogItem],
        state: &OrderState,
        pool: &[CatalogItem],
    ) -> Vec<CatalogItem> {
        let vocab = &self.config.vocabulary;
        let main = items.first();
        let target_amp = main
            .and_then(|i| detect_amp_line(i, vocab))
            .or_else(|| resolved.line_amp.clone())
            .or_else(|| state.last_constraints.amp.clone());
        let target_system = main
            .and_then(detect_system_tag)
            .or_else(|| resolved.constraints.system.clone());
        let already: Vec<String> = items.iter().map(dedupe_key).collect();
        let mut out = Vec::new();
        for item in pool {
            if out.len() >= self.config.max_related_items {
                break;
            }
            let category = normalize_key(&item.category);
            if !vocab
                .related_categories
                .iter()
                .any(|c| category.contains(c.as_str()))
            {
                continue;
            }
            if already.contains(&dedupe_key(item)) {
                continue;
            }
            if let (Some(target), Some(amp)) = (&target_amp, detect_amp_line(item, vocab)) {
                if amp != *target {
                    continue;
                }
            }
            if let (Some(target), Some(system)) = (&target_system, detect_system_tag(item)) {
                if system != *target {
                    continue;
                }
            }
            out.push(item.clone());
        }
        out
    }
}
