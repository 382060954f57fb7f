//! Deterministic passes around the generator guess. Order is contractual:
//! overrides, then missing-slot derivation, then the hard next-action
//! ladder. The ladder always has the last word.

use torchtalk_core::dialogue::{Intent, MissingSlot, NextAction, Topic};
use torchtalk_core::models::{IntentDecision, OrderState, ParsedSlots, ResolvedRequest};

/// Keyword topic ladder, most specific first.
pub fn detect_topic(slots: &ParsedSlots) -> Topic {
    if slots.info_only {
        Topic::Origin
    } else if slots.compatibility {
        Topic::Compatibility
    } else if slots.listing {
        Topic::List
    } else if slots.buy_intent || slots.close_intent || slots.price_talk {
        Topic::Commercial
    } else {
        Topic::Product
    }
}

/// Regex-confirmed signals beat whatever the generator guessed.
pub fn deterministic_overrides(
    decision: &mut IntentDecision,
    slots: &ParsedSlots,
    resolved: &ResolvedRequest,
) {
    if slots.availability {
        decision.intent = Intent::ProductAvailability;
    } else if amp_only_shape(slots) {
        decision.intent = Intent::SlotFillAmp;
    } else if slots.bundle_query {
        decision.intent = Intent::AccessoryBundleLookup;
    } else if slots.has_codes() && (slots.related_query || slots.bundle_hint) {
        decision.intent = Intent::AccessoryLookup;
    } else if slots.has_codes() {
        decision.intent = Intent::CodeLookup;
    } else if slots.listing {
        decision.intent = Intent::List;
    } else if resolved.dialogue_act == torchtalk_core::dialogue::DialogueAct::SlotFillQuantity
        && !slots.has_codes()
        && slots.group.is_none()
    {
        decision.intent = Intent::QuantityFollowup;
    }

    // Origin-only questions never route product flows the other way round.
    if matches!(
        decision.intent,
        Intent::ProductLookup
            | Intent::CodeLookup
            | Intent::AccessoryLookup
            | Intent::AccessoryBundleLookup
            | Intent::List
            | Intent::SlotFillAmp
            | Intent::QuantityFollowup
            | Intent::TypeSwitch
    ) || slots.listing
        || slots.has_codes()
        || slots.related_query
        || slots.quantity.is_some()
    {
        decision.info_only = false;
    }
}

fn amp_only_shape(slots: &ParsedSlots) -> bool {
    slots.constraints.amp.is_some()
        && slots.codes.is_empty()
        && slots.group.is_none()
        && slots.quantity.is_none()
        && !slots.listing
        && !slots.price_talk
        && !slots.availability
}

/// What still blocks an order, given the decision and durable state.
pub fn derive_missing(
    decision: &mut IntentDecision,
    resolved: &ResolvedRequest,
    state: &OrderState,
) {
    decision.missing.clear();

    let commercial = decision.buy_intent || decision.topic == Topic::Commercial;
    let quantity_known = decision
        .entities
        .quantity
        .or(resolved.quantity)
        .or(state.quantity)
        .is_some();
    if commercial && !quantity_known {
        decision.add_missing(MissingSlot::Quantity);
    }

    let sku_known = !decision.entities.skus.is_empty()
        || resolved.anchor_sku.is_some()
        || state.selected_sku.is_some();
    if !sku_known {
        decision.add_missing(MissingSlot::Sku);
    }

    if (decision.buy_intent || decision.collect_contact) && state.contact.is_none() {
        decision.add_missing(MissingSlot::Contact);
    }

    let type_known = state.type_answered_by_user() || resolved.is_robot.is_some();
    if !type_known {
        decision.add_missing(MissingSlot::TayRobot);
    }

    // Listing and bundle flows render both lines; amp fills target one
    // intent already. None of them blocks on hand-vs-robot.
    if matches!(
        decision.intent,
        Intent::List | Intent::AccessoryBundleLookup | Intent::SlotFillAmp
    ) {
        decision.drop_missing(MissingSlot::TayRobot);
    }
    // A code lookup carries its own SKU by definition.
    if decision.intent == Intent::CodeLookup {
        decision.drop_missing(MissingSlot::Sku);
    }
}

/// The hard next-action ladder. Runs last and overrides the generator's
/// suggestion unconditionally; first matching rule wins.
pub fn apply_hard_rules(decision: &mut IntentDecision, slots: &ParsedSlots, state: &OrderState) {
    // Quantity follow-ups with a standing selection are a buy in progress.
    if decision.intent == Intent::QuantityFollowup && state.selected_sku.is_some() {
        decision.buy_intent = true;
        decision.drop_missing(MissingSlot::Sku);
        decision.drop_missing(MissingSlot::Quantity);
        if state.contact.is_none() {
            decision.collect_contact = true;
        }
    }

    decision.next_action = if decision.info_only {
        NextAction::AnswerOnly
    } else {
        match decision.intent {
            // The scope reply is a fixed rotation; nothing to ask.
            Intent::AskSellingScope => NextAction::AnswerOnly,
            Intent::List => NextAction::AnswerOnly,
            Intent::AccessoryLookup | Intent::AccessoryBundleLookup => NextAction::AnswerOnly,
            Intent::SlotFillAmp => NextAction::AnswerOnly,
            Intent::QuantityFollowup => {
                if decision.collect_contact && state.contact.is_none() {
                    NextAction::RequestContactForm
                } else {
                    NextAction::AnswerOnly
                }
            }
            Intent::ProductAvailability => NextAction::AnswerOnly,
            Intent::CodeLookup if !decision.buy_intent => NextAction::AnswerOnly,
            _ => {
                if decision.buy_intent && decision.is_missing(MissingSlot::Sku) {
                    NextAction::AskForSkuOrGroup
                } else if decision.buy_intent
                    && decision.is_missing(MissingSlot::Contact)
                    && decision.topic != Topic::Commercial
                {
                    NextAction::RequestContactForm
                } else if decision.topic == Topic::Commercial && slots.price_talk {
                    NextAction::CommercialNeutralReply
                } else if decision.is_missing(MissingSlot::TayRobot) && !state.asked_hand_robot {
                    NextAction::AskHandVsRobotOnce
                } else if decision.collect_contact && state.contact.is_none() {
                    NextAction::RequestContactForm
                } else {
                    NextAction::AnswerOnly
                }
            }
        }
    };
}
