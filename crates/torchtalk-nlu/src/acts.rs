use tracing::debug;

use torchtalk_core::config::Vocabulary;
use torchtalk_core::constants::{
    AFFIRM_MAX_WORDS, AMP_FOLLOWUP_MAX_WORDS, AMP_ONLY_MAX_WORDS, QUANTITY_FOLLOWUP_MAX_WORDS,
    TYPE_ONLY_MAX_WORDS,
};
use torchtalk_core::dialogue::DialogueAct;
use torchtalk_core::models::ParsedSlots;

use crate::normalize::any_term;

/// Ordered short-message classifier. First matching shape wins; a message
/// that fits none of them is a new intent by definition.
pub struct DialogueActClassifier {
    vocab: Vocabulary,
}

impl DialogueActClassifier {
    pub fn new(vocab: Vocabulary) -> Self {
        Self { vocab }
    }

    pub fn classify(&self, slots: &ParsedSlots) -> DialogueAct {
        let act = if is_amp_only(slots) {
            DialogueAct::SlotFillAmp
        } else if is_type_only(slots) {
            DialogueAct::SlotFillType
        } else if slots.pure_quantity.is_some() || quantity_followup_shape(slots) {
            DialogueAct::SlotFillQuantity
        } else if self.is_affirmation(slots) {
            DialogueAct::Affirm
        } else if self.is_negation(slots) {
            DialogueAct::Negate
        } else {
            DialogueAct::NewIntent
        };
        debug!(?act, words = slots.word_count, "classified dialogue act");
        act
    }

    /// Bare agreement: short, carries no request signal of its own, and
    /// contains an agreement term.
    fn is_affirmation(&self, slots: &ParsedSlots) -> bool {
        short_and_bare(slots) && any_term(&slots.normalized, &self.vocab.affirm_terms)
    }

    fn is_negation(&self, slots: &ParsedSlots) -> bool {
        short_and_bare(slots) && any_term(&slots.normalized, &self.vocab.negate_terms)
    }
}

fn short_and_bare(slots: &ParsedSlots) -> bool {
    slots.word_count <= AFFIRM_MAX_WORDS
        && slots.codes.is_empty()
        && slots.quantity.is_none()
        && slots.constraints.amp.is_none()
        && slots.group.is_none()
        && !slots.price_talk
        && !slots.availability
        && !slots.listing
        && !slots.related_query
}

/// "350a" or "350a thi sao": an amp line and nothing else.
fn is_amp_only(slots: &ParsedSlots) -> bool {
    if slots.constraints.amp.is_none() {
        return false;
    }
    let bare = slots.quantity.is_none()
        && slots.group.is_none()
        && slots.codes.is_empty()
        && !slots.price_talk
        && !slots.availability
        && !slots.listing
        && !slots.related_query;
    if !bare {
        return false;
    }
    slots.word_count <= AMP_ONLY_MAX_WORDS
        || (slots.followup_cue && slots.word_count <= AMP_FOLLOWUP_MAX_WORDS)
}

/// "tay" / "robot" answering the type question.
fn is_type_only(slots: &ParsedSlots) -> bool {
    slots.is_robot.is_some()
        && slots.word_count <= TYPE_ONLY_MAX_WORDS
        && slots.codes.is_empty()
        && !slots.listing
        && !slots.price_talk
        && !slots.availability
}

/// A quantity with no other request signal, e.g. "lay 2 cai".
pub fn quantity_followup_shape(slots: &ParsedSlots) -> bool {
    slots.quantity.is_some()
        && slots.codes.is_empty()
        && !slots.listing
        && !slots.price_talk
        && !slots.availability
        && !slots.related_query
        && slots.group.is_none()
        && slots.word_count <= QUANTITY_FOLLOWUP_MAX_WORDS
}
