//! TurnEngine: wires the six stages in data-flow order.
//!
//! Two-phase API: `resolve_turn` produces the decision and flags the caller
//! renders from; `commit_turn` folds the turn (including the rendered
//! answer) into durable state. Rendering itself lives outside this crate.

use chrono::Utc;
use tracing::{debug, info, warn};

use torchtalk_core::config::EngineConfig;
use torchtalk_core::dialogue::Intent;
use torchtalk_core::errors::CoreResult;
use torchtalk_core::models::{
    CatalogItem, ChatMessage, ContextFlags, IntentDecision, OrderState, ParsedSlots,
    ProductGroup, ResolvedRequest, RetrievalRequest, TorchType,
};
use torchtalk_core::traits::{ICatalogRetriever, ISessionStore, ITextGenerator};
use torchtalk_guard::{ContextGuard, GuardInput};
use torchtalk_intent::IntentSynthesizer;
use torchtalk_memory::{normalize_short_memory, MemoryResolver, MemoryUpdater, TurnRecord};
use torchtalk_nlu::{DialogueActClassifier, SlotExtractor};

/// Everything one resolved turn produced, in stage order. Immutable once
/// built; `commit_turn` consumes it together with the rendered answer.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    pub session_id: String,
    pub slots: ParsedSlots,
    pub resolved: ResolvedRequest,
    pub decision: IntentDecision,
    pub flags: ContextFlags,
    /// Items retrieved for the decision, pre-display.
    pub items: Vec<CatalogItem>,
    /// State snapshot the turn was resolved against (post TTL check).
    pub state: OrderState,
}

/// The per-turn resolution engine. Collaborators are borrowed trait
/// objects; all stage components are owned and stateless across turns.
pub struct TurnEngine<'a> {
    retriever: &'a dyn ICatalogRetriever,
    store: &'a dyn ISessionStore,
    config: EngineConfig,
    extractor: SlotExtractor,
    classifier: DialogueActClassifier,
    resolver: MemoryResolver,
    synthesizer: IntentSynthesizer<'a>,
    guard: ContextGuard,
    updater: MemoryUpdater,
}

impl<'a> TurnEngine<'a> {
    pub fn new(
        retriever: &'a dyn ICatalogRetriever,
        generator: &'a dyn ITextGenerator,
        store: &'a dyn ISessionStore,
        config: EngineConfig,
    ) -> Self {
        let vocab = config.vocabulary.clone();
        Self {
            retriever,
            store,
            extractor: SlotExtractor::new(vocab.clone()),
            classifier: DialogueActClassifier::new(vocab.clone()),
            resolver: MemoryResolver::new(),
            synthesizer: IntentSynthesizer::new(generator),
            guard: ContextGuard::new(config.clone()),
            updater: MemoryUpdater::new(vocab),
            config,
        }
    }

    /// Phase 1: extract → classify → resolve → synthesize → retrieve →
    /// guard. No state is written.
    pub fn resolve_turn(
        &self,
        session_id: &str,
        message: &str,
        history: &[ChatMessage],
    ) -> CoreResult<TurnOutcome> {
        let mut state = self.store.get(session_id)?;
        let reset = normalize_short_memory(&mut state, Utc::now(), self.config.short_memory_ttl_secs);
        if reset {
            debug!(session_id, "short memory reset");
        }

        let slots = self.extractor.extract(message);
        let act = self.classifier.classify(&slots);
        let resolved = self.resolver.resolve(&slots, act, &state.short_memory);
        let decision = self
            .synthesizer
            .synthesize(&slots, &resolved, &state.short_memory, &state);

        let items = self.retrieve_items(&slots, &resolved, &decision);
        let related_pool = self.retrieve_related_pool(&slots, &resolved, &decision);

        let flags = self.guard.derive(GuardInput {
            slots: &slots,
            resolved: &resolved,
            decision: &decision,
            items: &items,
            related_pool: &related_pool,
            history,
            state: &state,
        });

        info!(
            session_id,
            intent = %decision.intent,
            action = ?decision.next_action,
            items = items.len(),
            render = flags.should_render_products,
            "turn resolved"
        );

        Ok(TurnOutcome {
            session_id: session_id.to_string(),
            slots,
            resolved,
            decision,
            flags,
            items,
            state,
        })
    }

    /// Phase 2: fold the turn and the rendered answer into durable state
    /// and persist it.
    pub fn commit_turn(&self, outcome: &TurnOutcome, answer: &str) -> CoreResult<OrderState> {
        let mut state = outcome.state.clone();

        let anchor_fallback = if outcome.items.is_empty() && outcome.flags.display_items.is_empty()
        {
            match state.selected_sku.as_deref() {
                Some(sku) => self.retriever.lookup_code(sku).unwrap_or_else(|e| {
                    warn!(error = %e, "anchor lookup failed");
                    None
                }),
                None => None,
            }
        } else {
            None
        };

        self.updater.apply(
            &mut state,
            &TurnRecord {
                slots: &outcome.slots,
                resolved: &outcome.resolved,
                decision: &outcome.decision,
                flags: &outcome.flags,
                items: &outcome.items,
                anchor_fallback: anchor_fallback.as_ref(),
                answer,
                now: Utc::now(),
            },
        );

        self.store.set(&outcome.session_id, state.clone())?;
        Ok(state)
    }

    /// Convenience for flows that render nothing between phases.
    pub fn handle_turn(
        &self,
        session_id: &str,
        message: &str,
        history: &[ChatMessage],
    ) -> CoreResult<TurnOutcome> {
        let outcome = self.resolve_turn(session_id, message, history)?;
        self.commit_turn(&outcome, "")?;
        Ok(outcome)
    }

    fn retrieve_items(
        &self,
        slots: &ParsedSlots,
        resolved: &ResolvedRequest,
        decision: &IntentDecision,
    ) -> Vec<CatalogItem> {
        // Scope and pure-commercial turns render fixed text, nothing to fetch.
        if matches!(
            decision.intent,
            Intent::AskSellingScope | Intent::Other | Intent::QuantityFollowup
        ) && decision.entities.skus.is_empty()
        {
            return Vec::new();
        }

        let request = self.build_retrieval(slots, resolved, decision);
        match self.retriever.retrieve(&request) {
            Ok(items) => items,
            Err(e) => {
                warn!(error = %e, "retrieval failed, continuing without items");
                Vec::new()
            }
        }
    }

    fn build_retrieval(
        &self,
        slots: &ParsedSlots,
        resolved: &ResolvedRequest,
        decision: &IntentDecision,
    ) -> RetrievalRequest {
        let vocab = &self.config.vocabulary;
        let group = decision.entities.product_group.or(resolved.group);
        let parts: Vec<ProductGroup> =
            if decision.intent == Intent::AccessoryBundleLookup && resolved.required_parts.is_empty()
            {
                vocab
                    .default_bundle_parts
                    .iter()
                    .copied()
                    .filter(|p| Some(*p) != group)
                    .collect()
            } else {
                resolved.required_parts.clone()
            };
        // Parts carry the families to fetch; a group filter on top would
        // pin everything to the anchor's own family.
        let group = if !parts.is_empty() { None } else { group };

        let mut constraints = resolved.constraints.clone();
        if constraints.amp.is_none() {
            constraints.amp = resolved.line_amp.clone();
        }

        // Accessory flows fetch the parts around the anchor, never the
        // anchor itself.
        let codes = if matches!(
            decision.intent,
            Intent::AccessoryLookup | Intent::AccessoryBundleLookup
        ) {
            Vec::new()
        } else {
            decision.entities.skus.clone()
        };

        RetrievalRequest {
            intent: Some(decision.intent),
            codes,
            group,
            parts,
            torch_type: resolved.is_robot.map(|r| {
                if r {
                    TorchType::Robot
                } else {
                    TorchType::Hand
                }
            }),
            constraints,
            query: slots.normalized.clone(),
        }
    }

    /// Wider same-line pool the guard expands related accessories from.
    fn retrieve_related_pool(
        &self,
        slots: &ParsedSlots,
        resolved: &ResolvedRequest,
        decision: &IntentDecision,
    ) -> Vec<CatalogItem> {
        let wants_related = slots.related_query
            || slots.compatibility
            || matches!(
                decision.intent,
                Intent::AccessoryLookup | Intent::AccessoryBundleLookup
            );
        if !wants_related || !self.config.related_expansion {
            return Vec::new();
        }

        let request = RetrievalRequest {
            parts: self.config.vocabulary.default_bundle_parts.clone(),
            constraints: torchtalk_core::models::Constraints {
                amp: resolved.line_amp.clone(),
                system: resolved.constraints.system.clone(),
                ..Default::default()
            },
            ..RetrievalRequest::default()
        };
        self.retriever.retrieve(&request).unwrap_or_else(|e| {
            warn!(error = %e, "related pool retrieval failed");
            Vec::new()
        })
    }
}
