use test_fixtures::catalog;
use torchtalk_core::config::{EngineConfig, Vocabulary};
use torchtalk_core::dialogue::{Intent, NextAction};
use torchtalk_core::models::{
    CatalogItem, ChatMessage, Constraints, IntentDecision, MessageMeta, OrderState, ParsedSlots,
    ResolvedRequest, Role, TorchType,
};
use torchtalk_guard::{contact_state, history_asked_type, ContextGuard, GuardInput};
use torchtalk_nlu::SlotExtractor;

fn slots(message: &str) -> ParsedSlots {
    SlotExtractor::new(Vocabulary::default()).extract(message)
}

fn decision(intent: Intent, next_action: NextAction) -> IntentDecision {
    IntentDecision {
        intent,
        next_action,
        ..IntentDecision::default()
    }
}

fn by_code(code: &str) -> CatalogItem {
    catalog().into_iter().find(|i| i.code == code).unwrap()
}

fn derive(
    config: EngineConfig,
    slots: &ParsedSlots,
    resolved: &ResolvedRequest,
    decision: &IntentDecision,
    items: &[CatalogItem],
    related_pool: &[CatalogItem],
    history: &[ChatMessage],
    state: &OrderState,
) -> torchtalk_core::models::ContextFlags {
    ContextGuard::new(config).derive(GuardInput {
        slots,
        resolved,
        decision,
        items,
        related_pool,
        history,
        state,
    })
}

fn form_message() -> ChatMessage {
    ChatMessage {
        role: Role::Assistant,
        content: "Ban de lai so dien thoai hoac Zalo de ben minh bao gia nhe.".to_string(),
        meta: MessageMeta {
            asked_form: true,
            ..MessageMeta::default()
        },
    }
}

// ── Hand-vs-robot gating ───────────────────────────────────────────────────

#[test]
fn open_question_asks_hand_vs_robot_once() {
    let s = slots("can mua hang");
    let d = decision(Intent::Other, NextAction::AskHandVsRobotOnce);
    let f = derive(
        EngineConfig::default(),
        &s,
        &ResolvedRequest::default(),
        &d,
        &[],
        &[],
        &[],
        &OrderState::default(),
    );
    assert!(f.should_ask_type);
    assert_eq!(f.force_default_hand, None);
}

#[test]
fn lookup_intents_never_ask_hand_vs_robot() {
    // Even with zero matches the lookup reply speaks for itself.
    for intent in [Intent::ProductLookup, Intent::TypeSwitch, Intent::CodeLookup] {
        let s = slots("bec 0.9x50l");
        let d = decision(intent, NextAction::AskHandVsRobotOnce);
        let f = derive(
            EngineConfig::default(),
            &s,
            &ResolvedRequest::default(),
            &d,
            &[],
            &[],
            &[],
            &OrderState::default(),
        );
        assert!(!f.should_ask_type, "{intent:?} asked the type question");
    }
}

#[test]
fn rendered_items_answer_the_type_question_instead() {
    let s = slots("co ban bec khong");
    let d = decision(Intent::ProductLookup, NextAction::AskHandVsRobotOnce);
    let items = vec![by_code("004002")];
    let f = derive(
        EngineConfig::default(),
        &s,
        &ResolvedRequest::default(),
        &d,
        &items,
        &[],
        &[],
        &OrderState::default(),
    );
    assert!(!f.should_ask_type);
    assert!(!f.display_items.is_empty());
}

#[test]
fn unanswered_type_question_defaults_to_hand() {
    let history = vec![
        ChatMessage::assistant("Ban dung bec cho may han tay hay robot a?"),
        ChatMessage::user("gia sao"),
    ];
    assert!(history_asked_type(&history));

    let s = slots("gia bao nhieu");
    let d = decision(Intent::CodeLookup, NextAction::AnswerOnly);
    let f = derive(
        EngineConfig::default(),
        &s,
        &ResolvedRequest::default(),
        &d,
        &[],
        &[],
        &history,
        &OrderState::default(),
    );
    assert!(!f.should_ask_type);
    assert_eq!(f.force_default_hand, Some(TorchType::Hand));
}

// ── Contact form gating ────────────────────────────────────────────────────

#[test]
fn order_with_quantity_and_no_contact_shows_the_form() {
    let s = slots("lay 30 cai");
    let mut d = decision(Intent::QuantityFollowup, NextAction::RequestContactForm);
    d.buy_intent = true;
    let state = OrderState {
        selected_sku: Some("004002".to_string()),
        quantity: Some(30),
        ..OrderState::default()
    };
    let f = derive(
        EngineConfig::default(),
        &s,
        &ResolvedRequest::default(),
        &d,
        &[],
        &[],
        &[],
        &state,
    );
    assert!(f.should_show_form);
}

#[test]
fn single_unit_order_is_not_worth_a_form() {
    let s = slots("lay 1 cai");
    let mut d = decision(Intent::QuantityFollowup, NextAction::RequestContactForm);
    d.buy_intent = true;
    let state = OrderState {
        selected_sku: Some("004002".to_string()),
        quantity: Some(1),
        ..OrderState::default()
    };
    let f = derive(
        EngineConfig::default(),
        &s,
        &ResolvedRequest::default(),
        &d,
        &[],
        &[],
        &[],
        &state,
    );
    assert!(!f.should_show_form);
}

#[test]
fn bundle_reply_after_ok_never_repeats_the_form() {
    // The form is already on screen; "ok" accepted the accessory offer.
    let history = vec![form_message(), ChatMessage::user("ok")];
    let s = slots("ok");
    let d = decision(Intent::AccessoryBundleLookup, NextAction::AnswerOnly);
    let state = OrderState {
        selected_sku: Some("004002".to_string()),
        quantity: Some(30),
        ..OrderState::default()
    };
    let f = derive(
        EngineConfig::default(),
        &s,
        &ResolvedRequest::default(),
        &d,
        &[],
        &[],
        &history,
        &state,
    );
    assert!(!f.should_show_form);
    assert!(!f.should_remind_contact);
}

#[test]
fn price_question_with_a_quantity_keeps_the_form_away() {
    let s = slots("gia 30 cai bec the nao");
    let mut d = decision(Intent::Other, NextAction::AnswerOnly);
    d.buy_intent = true;
    let state = OrderState {
        selected_sku: Some("004002".to_string()),
        quantity: Some(30),
        ..OrderState::default()
    };
    let f = derive(
        EngineConfig::default(),
        &s,
        &ResolvedRequest::default(),
        &d,
        &[],
        &[],
        &[],
        &state,
    );
    assert!(f.is_asking_price);
    assert!(!f.should_show_form);
}

#[test]
fn bare_quantity_reply_reopens_the_form() {
    // "30" carries no buy verb; the standing selection makes it an order.
    let s = slots("30");
    let d = decision(Intent::QuantityFollowup, NextAction::AnswerOnly);
    let state = OrderState {
        selected_sku: Some("004002".to_string()),
        ..OrderState::default()
    };
    let f = derive(
        EngineConfig::default(),
        &s,
        &ResolvedRequest::default(),
        &d,
        &[],
        &[],
        &[],
        &state,
    );
    assert!(f.should_show_form);
}

#[test]
fn contact_reminder_stops_at_the_limit() {
    let s = slots("chot don nhe");
    let mut d = decision(Intent::Other, NextAction::AnswerOnly);
    d.buy_intent = true;

    let waiting = vec![form_message(), ChatMessage::user("de minh xem da")];
    let f = derive(
        EngineConfig::default(),
        &s,
        &ResolvedRequest::default(),
        &d,
        &[],
        &[],
        &waiting,
        &OrderState::default(),
    );
    assert!(f.should_remind_contact);

    let reminded = vec![
        form_message(),
        ChatMessage::user("de minh xem da"),
        ChatMessage {
            role: Role::Assistant,
            content: "Ban cho minh xin lai so dien thoai nhe.".to_string(),
            meta: MessageMeta {
                reminded_contact: true,
                ..MessageMeta::default()
            },
        },
    ];
    assert_eq!(contact_state(&reminded).reminder_count, 1);
    let f = derive(
        EngineConfig::default(),
        &s,
        &ResolvedRequest::default(),
        &d,
        &[],
        &[],
        &reminded,
        &OrderState::default(),
    );
    assert!(!f.should_remind_contact);
}

#[test]
fn phone_reply_closes_the_collection_cycle() {
    let history = vec![form_message(), ChatMessage::user("0912345678 nhe")];
    let cstate = contact_state(&history);
    assert!(cstate.contact_received);
    assert!(!cstate.waiting_for_contact);
}

// ── Bulk quantity ──────────────────────────────────────────────────────────

#[test]
fn catalog_bulk_column_forces_contact_collection() {
    let s = slots("lay 50 cai");
    let mut d = decision(Intent::QuantityFollowup, NextAction::AnswerOnly);
    d.buy_intent = true;
    let state = OrderState {
        selected_sku: Some("004002".to_string()),
        ..OrderState::default()
    };
    let items = vec![by_code("004002")];
    let f = derive(
        EngineConfig::default(),
        &s,
        &ResolvedRequest::default(),
        &d,
        &items,
        &[],
        &[],
        &state,
    );
    assert!(f.should_show_form);
    assert_eq!(f.contact_reason.as_deref(), Some("bulk_quantity_order"));
}

#[test]
fn configured_threshold_wins_over_catalog_columns() {
    let s = slots("lay 12 cai");
    let mut d = decision(Intent::QuantityFollowup, NextAction::AnswerOnly);
    d.buy_intent = true;
    let state = OrderState {
        selected_sku: Some("004002".to_string()),
        ..OrderState::default()
    };
    let config = EngineConfig {
        bulk_qty_threshold: Some(10),
        ..EngineConfig::default()
    };
    let f = derive(
        config,
        &s,
        &ResolvedRequest::default(),
        &d,
        &[],
        &[],
        &[],
        &state,
    );
    assert_eq!(f.contact_reason.as_deref(), Some("bulk_quantity_order"));
}

// ── Related expansion ──────────────────────────────────────────────────────

#[test]
fn related_expansion_sticks_to_the_anchor_line() {
    let s = slots("phu kien di kem cho 004002");
    let d = decision(Intent::AccessoryLookup, NextAction::AnswerOnly);
    let resolved = ResolvedRequest {
        line_amp: Some("350A".to_string()),
        ..ResolvedRequest::default()
    };
    let items = vec![by_code("004002")];
    let pool = catalog();
    let f = derive(
        EngineConfig::default(),
        &s,
        &resolved,
        &d,
        &items,
        &pool,
        &[],
        &OrderState::default(),
    );
    let codes: Vec<&str> = f.related_items.iter().map(|i| i.code.as_str()).collect();
    assert_eq!(codes, vec!["U4167R0", "P300401", "300500", "300501"]);
    // The 500A tip body and insulator stay out.
    assert!(!codes.contains(&"U5167R0"));
    assert!(!codes.contains(&"P300402"));
}

#[test]
fn bundle_lookup_never_appends_related_items() {
    // The "ok" turn: the bundle retrieval already holds the companions,
    // and the amp slot is empty on an agreement message.
    let s = slots("ok");
    let d = decision(Intent::AccessoryBundleLookup, NextAction::AnswerOnly);
    let items = vec![
        by_code("U4167R0"),
        by_code("P300401"),
        by_code("300500"),
        by_code("300501"),
    ];
    let pool = catalog();
    let f = derive(
        EngineConfig::default(),
        &s,
        &ResolvedRequest::default(),
        &d,
        &items,
        &pool,
        &[],
        &OrderState::default(),
    );
    assert!(f.related_items.is_empty());
    let codes: Vec<&str> = f.display_items.iter().map(|i| i.code.as_str()).collect();
    assert!(!codes.contains(&"U5167R0"));
    assert!(!codes.contains(&"P300402"));
}

#[test]
fn expansion_falls_back_to_the_remembered_amp_line() {
    let s = slots("phu kien di kem");
    let d = decision(Intent::AccessoryLookup, NextAction::AnswerOnly);
    // A row that never prints its amp rating.
    let main = CatalogItem {
        code: "004099".to_string(),
        name: "Bec han Tokin 1.2x45L".to_string(),
        description: String::new(),
        category: "TIP".to_string(),
        link: String::new(),
        raw: Default::default(),
    };
    let state = OrderState {
        last_constraints: Constraints {
            amp: Some("350A".to_string()),
            ..Constraints::default()
        },
        ..OrderState::default()
    };
    let pool = catalog();
    let f = derive(
        EngineConfig::default(),
        &s,
        &ResolvedRequest::default(),
        &d,
        &[main],
        &pool,
        &[],
        &state,
    );
    let codes: Vec<&str> = f.related_items.iter().map(|i| i.code.as_str()).collect();
    assert_eq!(codes, vec!["U4167R0", "P300401", "300500", "300501"]);
}

#[test]
fn related_expansion_respects_the_cap() {
    let s = slots("phu kien di kem cho 004002");
    let d = decision(Intent::AccessoryLookup, NextAction::AnswerOnly);
    let resolved = ResolvedRequest {
        line_amp: Some("350A".to_string()),
        ..ResolvedRequest::default()
    };
    let items = vec![by_code("004002")];
    let pool = catalog();
    let config = EngineConfig {
        max_related_items: 2,
        ..EngineConfig::default()
    };
    let f = derive(config, &s, &resolved, &d, &items, &pool, &[], &OrderState::default());
    assert_eq!(f.related_items.len(), 2);
}

// ── Display list ───────────────────────────────────────────────────────────

#[test]
fn previously_shown_codes_are_pruned_unless_asked_again() {
    let s = slots("ma 004002 va 004003");
    let d = decision(Intent::CodeLookup, NextAction::AnswerOnly);
    let items = vec![by_code("004002"), by_code("004003")];
    let state = OrderState {
        last_context_codes: vec!["004002".to_string()],
        ..OrderState::default()
    };
    let f = derive(
        EngineConfig::default(),
        &s,
        &ResolvedRequest::default(),
        &d,
        &items,
        &[],
        &[],
        &state,
    );
    let codes: Vec<&str> = f.display_items.iter().map(|i| i.code.as_str()).collect();
    assert_eq!(codes, vec!["004003"]);

    let s = slots("gui lai ma 004002 va 004003");
    let f = derive(
        EngineConfig::default(),
        &s,
        &ResolvedRequest::default(),
        &d,
        &items,
        &[],
        &[],
        &state,
    );
    assert_eq!(f.display_items.len(), 2);
}

#[test]
fn availability_without_stock_renders_nothing() {
    let s = slots("co hang khong");
    let d = decision(Intent::ProductAvailability, NextAction::AnswerOnly);
    let f = derive(
        EngineConfig::default(),
        &s,
        &ResolvedRequest::default(),
        &d,
        &[],
        &[],
        &[],
        &OrderState::default(),
    );
    assert!(!f.should_render_products);
    assert!(f.display_items.is_empty());
    assert!(!f.should_ask_type);
}
