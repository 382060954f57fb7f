use regex::Regex;
use tracing::debug;

use torchtalk_core::config::Vocabulary;
use torchtalk_core::models::{ParsedSlots, ProductGroup};

use crate::normalize::{any_term, contains_term, normalize_key, normalize_text, word_count};
use crate::patterns::{
    get, RE_AMP, RE_BARE_QUANTITY, RE_CON_PREFIX, RE_D_CODE, RE_NUM_CODE, RE_P_CODE, RE_PHONE,
    RE_SO_LUONG, RE_THREAD, RE_TIP_SIZE_LEN, RE_TOKIN_CODE,
};

/// Deterministic slot extraction over one normalized message. Absence of a
/// signal is `None`/empty; the extractor itself cannot fail.
pub struct SlotExtractor {
    vocab: Vocabulary,
    re_quantity: Option<Regex>,
    re_pure_unit_quantity: Option<Regex>,
    re_single_unit: Option<Regex>,
    re_mot_quantity: Option<Regex>,
}

impl SlotExtractor {
    pub fn new(vocab: Vocabulary) -> Self {
        let units = vocab.quantity_units.join("|");
        let re_quantity = Regex::new(&format!(r"\b(\d{{1,6}})\s*(?:{units})\b")).ok();
        let re_pure_unit_quantity = Regex::new(&format!(r"^(\d{{1,6}})\s*(?:{units})$")).ok();
        let re_single_unit = Regex::new(&format!(r"\b(?:1|mot)\s*(?:{units})\b")).ok();
        let re_mot_quantity = Regex::new(&format!(r"^mot(?:\s+(?:{units}))?$")).ok();
        Self {
            vocab,
            re_quantity,
            re_pure_unit_quantity,
            re_single_unit,
            re_mot_quantity,
        }
    }

    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    pub fn extract(&self, raw: &str) -> ParsedSlots {
        let normalized = normalize_text(raw);
        let v = &self.vocab;

        let mut slots = ParsedSlots {
            raw: raw.to_string(),
            word_count: word_count(&normalized),
            ..ParsedSlots::default()
        };

        slots.codes = self.extract_codes(&normalized);
        slots.quantity = self.extract_quantity(&normalized);

        // Amp before pure-quantity: "350a" is a line, not an order size.
        if let Some(re) = get(&RE_AMP) {
            if let Some(c) = re.captures(&normalized) {
                slots.constraints.amp = Some(format!("{}A", &c[1]));
            }
        }

        slots.pure_quantity = self.extract_pure_quantity(&normalized, &slots);
        slots.single_unit = self
            .re_single_unit
            .as_ref()
            .is_some_and(|re| re.is_match(&normalized));

        if let Some(re) = get(&RE_TIP_SIZE_LEN) {
            if let Some(c) = re.captures(&normalized) {
                slots.constraints.size = Some(c[1].to_string());
                slots.constraints.length = Some(c[2].to_string());
            }
        }
        if let Some(re) = get(&RE_THREAD) {
            if let Some(c) = re.captures(&normalized) {
                slots.constraints.thread = Some(format!("M{}", c[1].to_ascii_uppercase()));
            }
        }
        if any_term(&normalized, &v.material_aluminum_terms) {
            slots.constraints.material = Some("ALUMINUM".to_string());
        }
        slots.constraints.system = extract_system_tag(&normalized);

        slots.is_robot = self.extract_torch_type(&normalized);
        slots.group = self.detect_group(&normalized);
        slots.requested_parts = self.detect_requested_parts(&normalized);

        slots.bundle_hint = any_term(&normalized, &v.bundle_hint_terms);
        slots.bundle_query = any_term(&normalized, &v.bundle_query_terms);
        slots.related_query = any_term(&normalized, &v.related_query_terms);
        slots.listing = any_term(&normalized, &v.listing_terms);
        slots.price_talk = any_term(&normalized, &v.price_terms);
        slots.availability = any_term(&normalized, &v.availability_terms);
        slots.info_query = any_term(&normalized, &v.info_query_terms);
        slots.info_only = any_term(&normalized, &v.info_only_terms);
        slots.close_intent = any_term(&normalized, &v.close_intent_terms);
        slots.buy_intent = any_term(&normalized, &v.buy_terms);
        slots.selling_verb = any_term(&normalized, &v.selling_verb_terms);
        slots.selling_scope = any_term(&normalized, &v.selling_scope_terms);
        slots.followup_cue = any_term(&normalized, &v.followup_cues);
        slots.compatibility = any_term(&normalized, &v.compatibility_terms);
        slots.product_info = any_term(&normalized, &v.product_info_terms);
        slots.repeat_request = any_term(&normalized, &v.repeat_request_terms);
        slots.lookup_hint = any_term(&normalized, &v.lookup_hint_terms);
        slots.contact_mention = any_term(&normalized, &v.contact_terms)
            || get(&RE_PHONE).is_some_and(|re| re.is_match(&normalized));

        slots.narrowing_reask = get(&RE_CON_PREFIX).is_some_and(|re| re.is_match(&normalized))
            && !slots.requested_parts.is_empty();

        slots.normalized = normalized;

        debug!(
            codes = slots.codes.len(),
            group = ?slots.group,
            quantity = ?slots.quantity,
            amp = ?slots.constraints.amp,
            "extracted slots"
        );
        slots
    }

    /// Codes in order of first appearance, normalized to comparison keys.
    fn extract_codes(&self, normalized: &str) -> Vec<String> {
        let mut found: Vec<(usize, String)> = Vec::new();

        if let Some(re) = get(&RE_D_CODE) {
            for m in re.find_iter(normalized) {
                found.push((m.start(), normalize_key(m.as_str())));
            }
        }
        if let Some(re) = get(&RE_P_CODE) {
            for m in re.find_iter(normalized) {
                found.push((m.start(), normalize_key(m.as_str())));
            }
        }
        if let Some(re) = get(&RE_TOKIN_CODE) {
            for c in re.captures_iter(normalized) {
                if let (Some(m), Some(digits)) = (c.get(0), c.get(1)) {
                    found.push((m.start(), format!("TOKIN{}", digits.as_str())));
                }
            }
        }
        if let Some(re) = get(&RE_NUM_CODE) {
            for m in re.find_iter(normalized) {
                found.push((m.start(), m.as_str().to_string()));
            }
        }

        found.sort_by_key(|(pos, _)| *pos);
        let mut codes = Vec::new();
        for (_, code) in found {
            if !codes.contains(&code) {
                codes.push(code);
            }
        }
        codes
    }

    fn extract_quantity(&self, normalized: &str) -> Option<u32> {
        if let Some(re) = get(&RE_SO_LUONG) {
            if let Some(c) = re.captures(normalized) {
                return c[1].parse().ok();
            }
        }
        if let Some(re) = &self.re_quantity {
            if let Some(c) = re.captures(normalized) {
                return c[1].parse().ok();
            }
        }
        None
    }

    /// The message is nothing but an order size. A bare number that already
    /// parsed as a product code does not count.
    fn extract_pure_quantity(&self, normalized: &str, slots: &ParsedSlots) -> Option<u32> {
        if !slots.codes.is_empty() {
            return None;
        }
        if get(&RE_BARE_QUANTITY).is_some_and(|re| re.is_match(normalized)) {
            return normalized.parse().ok();
        }
        if let Some(re) = &self.re_pure_unit_quantity {
            if let Some(c) = re.captures(normalized) {
                return c[1].parse().ok();
            }
        }
        if self
            .re_mot_quantity
            .as_ref()
            .is_some_and(|re| re.is_match(normalized))
        {
            return Some(1);
        }
        None
    }

    /// Hand wins when both are mentioned ("dung tay hay robot" answers "tay").
    fn extract_torch_type(&self, normalized: &str) -> Option<bool> {
        if any_term(normalized, &self.vocab.type_hand_terms) {
            Some(false)
        } else if any_term(normalized, &self.vocab.type_robot_terms) {
            Some(true)
        } else {
            None
        }
    }

    /// First configured group with a matching phrase; config order is the
    /// priority order (most specific family first).
    fn detect_group(&self, normalized: &str) -> Option<ProductGroup> {
        for (group, terms) in &self.vocab.group_synonyms {
            if terms.iter().any(|t| contains_term(normalized, t)) {
                return Some(*group);
            }
        }
        None
    }

    fn detect_requested_parts(&self, normalized: &str) -> Vec<ProductGroup> {
        let mut parts = Vec::new();
        for (group, terms) in &self.vocab.group_synonyms {
            if terms.iter().any(|t| contains_term(normalized, t)) && !parts.contains(group) {
                parts.push(*group);
            }
        }
        parts
    }

}

/// Loose tip diameter for lookup constraints: a lone decimal like "0.8".
/// Whole numbers are left alone, they collide with quantities.
pub fn loose_size(normalized: &str) -> Option<String> {
    static RE: std::sync::LazyLock<Option<Regex>> =
        std::sync::LazyLock::new(|| Regex::new(r"\b(\d\.\d)\b").ok());
    RE.as_ref()
        .and_then(|re| re.captures(normalized))
        .map(|c| c[1].to_string())
}

/// Gas system tag: a lone `n` or `d` token.
fn extract_system_tag(normalized: &str) -> Option<String> {
    for token in normalized.split_whitespace() {
        match token {
            "n" => return Some("N".to_string()),
            "d" => return Some("D".to_string()),
            _ => {}
        }
    }
    None
}
