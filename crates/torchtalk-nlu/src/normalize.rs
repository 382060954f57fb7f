//! Vietnamese text folding. Every detector operates on this form, so the
//! keyword lists in config never carry diacritics.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Fold a message to detector form: lowercase, diacritics stripped,
/// đ → d, punctuation collapsed to single spaces.
pub fn normalize_text(input: &str) -> String {
    let lowered: String = input
        .to_lowercase()
        .chars()
        .map(|c| if c == 'đ' { 'd' } else { c })
        .collect();

    let stripped: String = lowered.nfd().filter(|c| !is_combining_mark(*c)).collect();

    let mut out = String::with_capacity(stripped.len());
    let mut last_space = true;
    for c in stripped.chars() {
        let keep = c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '/' | '.');
        if keep {
            out.push(c);
            last_space = false;
        } else if !last_space {
            out.push(' ');
            last_space = true;
        }
    }
    while out.ends_with(' ') {
        out.pop();
    }
    out
}

/// Uppercase alphanumeric key for code comparison ("U 4167-R0" → "U4167R0").
pub fn normalize_key(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Digits only, for loose SKU comparison.
pub fn digits_of(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Whole-token phrase containment on normalized text. Pads both sides with
/// spaces so "kho" never matches inside "khong".
pub fn contains_term(normalized: &str, term: &str) -> bool {
    if term.is_empty() {
        return false;
    }
    let padded = format!(" {normalized} ");
    padded.contains(&format!(" {term} "))
}

/// First matching term from a configured list.
pub fn any_term(normalized: &str, terms: &[String]) -> bool {
    terms.iter().any(|t| contains_term(normalized, t))
}

pub fn word_count(normalized: &str) -> usize {
    normalized.split_whitespace().count()
}
