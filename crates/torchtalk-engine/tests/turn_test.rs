use chrono::{Duration, Utc};

use test_fixtures::{MockGenerator, MockRetriever};
use torchtalk_core::config::EngineConfig;
use torchtalk_core::dialogue::{Intent, NextAction};
use torchtalk_core::models::{Anchor, ChatMessage, MessageMeta, OrderState, Role};
use torchtalk_core::traits::ISessionStore;
use torchtalk_engine::{SessionManager, TurnEngine};

fn display_codes(outcome: &torchtalk_engine::TurnOutcome) -> Vec<String> {
    outcome
        .flags
        .display_items
        .iter()
        .map(|i| i.code.clone())
        .collect()
}

// ── Single-turn resolution ─────────────────────────────────────────────────

#[test]
fn spec_inquiry_resolves_to_matching_tips() {
    let retriever = MockRetriever::new();
    let generator = MockGenerator::silent();
    let store = SessionManager::new(10);
    let engine = TurnEngine::new(&retriever, &generator, &store, EngineConfig::default());
    let session = store.create_session();

    let outcome = engine
        .handle_turn(&session, "Có bán béc 0.8x45L không?", &[])
        .unwrap();

    assert_eq!(outcome.decision.intent, Intent::ProductLookup);
    assert_eq!(
        outcome.resolved.constraints.size.as_deref(),
        Some("0.8")
    );
    let codes = display_codes(&outcome);
    assert!(codes.contains(&"004002".to_string()));
    assert!(codes.contains(&"004010".to_string()));
    assert!(!codes.contains(&"004003".to_string()));
    // Both torch lines are on screen, so the question answers itself.
    assert!(!outcome.flags.should_ask_type);

    let state = store.get(&session).unwrap();
    assert_eq!(
        state.short_memory.last_anchor.sku.as_deref(),
        Some("004002")
    );
    assert_eq!(state.short_memory.last_intent, Some(Intent::ProductLookup));
}

// ── Cross-turn accessory narrowing ─────────────────────────────────────────

#[test]
fn insulator_reask_inherits_the_anchor_line() {
    let retriever = MockRetriever::new();
    let generator = MockGenerator::silent();
    let store = SessionManager::new(10);
    let engine = TurnEngine::new(&retriever, &generator, &store, EngineConfig::default());
    let session = store.create_session();

    let first = engine.resolve_turn(&session, "cho minh ma 004002 350a", &[]).unwrap();
    assert_eq!(first.decision.intent, Intent::CodeLookup);
    engine
        .commit_turn(&first, "Day la ma 004002, ben minh co du linh kien di kem cung he.")
        .unwrap();

    let state = store.get(&session).unwrap();
    assert_eq!(
        state.short_memory.last_anchor.line_amp.as_deref(),
        Some("350A")
    );
    assert!(state.short_memory.pending_action.is_some());

    let second = engine
        .handle_turn(&session, "còn cách điện thì sao", &[])
        .unwrap();
    assert_eq!(second.decision.intent, Intent::AccessoryBundleLookup);
    assert_eq!(
        second.resolved.anchor_sku.as_deref(),
        Some("004002")
    );
    let codes = display_codes(&second);
    // The 350A insulator, never its 500A sibling.
    assert!(codes.contains(&"P300401".to_string()));
    assert!(!codes.contains(&"P300402".to_string()));
}

#[test]
fn bare_ok_accepts_the_accessory_offer() {
    let retriever = MockRetriever::new();
    let generator = MockGenerator::silent();
    let store = SessionManager::new(10);
    let engine = TurnEngine::new(&retriever, &generator, &store, EngineConfig::default());
    let session = store.create_session();

    let first = engine.resolve_turn(&session, "004002", &[]).unwrap();
    engine
        .commit_turn(&first, "Ma 004002 day a, co du linh kien di kem neu can.")
        .unwrap();

    let second = engine.handle_turn(&session, "ok", &[]).unwrap();
    assert_eq!(second.decision.intent, Intent::AccessoryBundleLookup);
    assert!(!display_codes(&second).is_empty());

    // The offer is consumed; a later "ok" has nothing to accept.
    let state = store.get(&session).unwrap();
    assert!(state.short_memory.pending_action.is_none());
}

// ── Short memory TTL ───────────────────────────────────────────────────────

#[test]
fn expired_memory_drops_the_anchor() {
    let retriever = MockRetriever::new();
    let generator = MockGenerator::silent();
    let store = SessionManager::new(10);
    let engine = TurnEngine::new(&retriever, &generator, &store, EngineConfig::default());
    let session = store.create_session();

    let mut state = OrderState::default();
    state.short_memory.last_anchor = Anchor {
        sku: Some("004002".to_string()),
        category: Some("TIP".to_string()),
        line_amp: Some("350A".to_string()),
        is_robot: Some(false),
        name: Some("Bec han".to_string()),
    };
    state.short_memory.last_intent = Some(Intent::ProductLookup);
    state.short_memory_at = Some(Utc::now() - Duration::seconds(25 * 60));
    store.set(&session, state).unwrap();

    let outcome = engine.resolve_turn(&session, "350a thì sao", &[]).unwrap();
    assert_eq!(outcome.resolved.anchor_sku, None);
    assert_eq!(outcome.decision.slot_target_intent, None);
    assert_eq!(outcome.state.short_memory, Default::default());
}

// ── Contact form lifecycle ─────────────────────────────────────────────────

#[test]
fn ok_after_the_form_never_shows_it_twice() {
    let retriever = MockRetriever::new();
    let generator = MockGenerator::silent();
    let store = SessionManager::new(10);
    let engine = TurnEngine::new(&retriever, &generator, &store, EngineConfig::default());
    let session = store.create_session();

    let mut state = OrderState::default();
    state.selected_sku = Some("004002".to_string());
    state.quantity = Some(30);
    state.asked_contact_form = true;
    state.short_memory_at = Some(Utc::now());
    store.set(&session, state).unwrap();

    let history = vec![
        ChatMessage {
            role: Role::Assistant,
            content: "Ban de lai so dien thoai de ben minh bao gia nhe.".to_string(),
            meta: MessageMeta {
                asked_form: true,
                ..MessageMeta::default()
            },
        },
        ChatMessage::user("ok"),
    ];
    let outcome = engine.resolve_turn(&session, "ok", &history).unwrap();
    assert!(!outcome.flags.should_show_form);
    assert!(!outcome.flags.should_remind_contact);
}

#[test]
fn bulk_order_forces_contact_collection() {
    let retriever = MockRetriever::new();
    let generator = MockGenerator::silent();
    let store = SessionManager::new(10);
    let config = EngineConfig {
        bulk_qty_threshold: Some(50),
        ..EngineConfig::default()
    };
    let engine = TurnEngine::new(&retriever, &generator, &store, config);
    let session = store.create_session();

    let mut state = OrderState::default();
    state.selected_sku = Some("004002".to_string());
    state.short_memory.last_anchor = Anchor {
        sku: Some("004002".to_string()),
        category: Some("TIP".to_string()),
        line_amp: Some("350A".to_string()),
        is_robot: Some(false),
        name: Some("Bec han".to_string()),
    };
    state.short_memory_at = Some(Utc::now());
    store.set(&session, state).unwrap();

    let outcome = engine.handle_turn(&session, "lay 60 cai nhe", &[]).unwrap();
    assert_eq!(outcome.decision.intent, Intent::QuantityFollowup);
    assert_eq!(outcome.decision.next_action, NextAction::RequestContactForm);
    assert!(outcome.flags.should_show_form);
    assert_eq!(
        outcome.flags.contact_reason.as_deref(),
        Some("bulk_quantity_order")
    );

    let state = store.get(&session).unwrap();
    assert_eq!(state.quantity, Some(60));
    assert!(state.asked_contact_form);
}

// ── Resolution is read-only ────────────────────────────────────────────────

#[test]
fn resolving_without_committing_changes_nothing() {
    let retriever = MockRetriever::new();
    let generator = MockGenerator::silent();
    let store = SessionManager::new(10);
    let engine = TurnEngine::new(&retriever, &generator, &store, EngineConfig::default());
    let session = store.create_session();

    let a = engine
        .resolve_turn(&session, "co ban bec 0.8x45l khong", &[])
        .unwrap();
    let b = engine
        .resolve_turn(&session, "co ban bec 0.8x45l khong", &[])
        .unwrap();
    assert_eq!(a, b);
    assert_eq!(store.get(&session).unwrap(), OrderState::default());
}

// ── Session store ──────────────────────────────────────────────────────────

#[test]
fn unknown_session_reads_as_default_state() {
    let store = SessionManager::new(10);
    assert_eq!(store.get("nope").unwrap(), OrderState::default());
}

#[test]
fn store_evicts_least_recently_touched_at_capacity() {
    let store = SessionManager::new(2);
    store.set("a", OrderState::default()).unwrap();
    store.set("b", OrderState::default()).unwrap();
    store.set("c", OrderState::default()).unwrap();
    assert_eq!(store.session_count(), 2);
    assert!(store.session_ids().contains(&"c".to_string()));

    // Rewriting an existing session at capacity is not an insert.
    store.set("c", OrderState::default()).unwrap();
    assert_eq!(store.session_count(), 2);
}
