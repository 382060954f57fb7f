//! Tolerant parsing of generator output. The generator returns free text
//! that may contain one JSON object; everything about it is advisory and
//! any shape of garbage degrades to `None` fields.

use serde_json::Value;

use torchtalk_core::dialogue::{Intent, NextAction, Topic};

/// Advisory fields pulled from the generator, all optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneratorGuess {
    pub intent: Option<Intent>,
    pub topic: Option<Topic>,
    pub next_action: Option<NextAction>,
    pub buy_intent: Option<bool>,
    pub collect_contact: Option<bool>,
    pub info_only: Option<bool>,
    pub skus: Vec<String>,
    pub quantity: Option<u32>,
}

/// The substring from the first `{` to the last `}`, if both exist.
pub fn extract_json_block(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end > start {
        Some(&text[start..=end])
    } else {
        None
    }
}

pub fn parse_generator_output(text: &str) -> GeneratorGuess {
    let Some(block) = extract_json_block(text) else {
        return GeneratorGuess::default();
    };
    let Ok(value) = serde_json::from_str::<Value>(block) else {
        return GeneratorGuess::default();
    };

    let mut guess = GeneratorGuess::default();
    if let Some(raw) = value.get("intent").and_then(Value::as_str) {
        guess.intent = Intent::parse(raw);
    }
    if let Some(raw) = value.get("topic").and_then(Value::as_str) {
        guess.topic = Topic::parse(raw);
    }
    if let Some(raw) = value.get("next_action").and_then(Value::as_str) {
        guess.next_action = NextAction::parse(raw);
    }
    guess.buy_intent = value.get("buy_intent").and_then(Value::as_bool);
    guess.collect_contact = value.get("collect_contact").and_then(Value::as_bool);
    guess.info_only = value.get("info_only").and_then(Value::as_bool);
    if let Some(entities) = value.get("entities") {
        if let Some(skus) = entities.get("skus").and_then(Value::as_array) {
            guess.skus = skus
                .iter()
                .filter_map(Value::as_str)
                .map(|s| s.to_ascii_uppercase())
                .collect();
        }
        guess.quantity = entities
            .get("quantity")
            .and_then(Value::as_u64)
            .and_then(|q| u32::try_from(q).ok());
    }
    guess
}
