//! Catalog item classification. Rows come from loosely-keyed spreadsheets,
//! so everything here matches on folded text rather than exact fields.

use torchtalk_core::config::Vocabulary;
use torchtalk_core::models::{CatalogItem, ProductGroup, TorchType};
use torchtalk_nlu::normalize::{contains_term, digits_of, normalize_key, normalize_text};

/// Robot-line items always say so somewhere; everything else is hand-held.
pub fn detect_item_type(item: &CatalogItem) -> TorchType {
    if normalize_text(&item.haystack()).contains("robot") {
        TorchType::Robot
    } else {
        TorchType::Hand
    }
}

/// Amp line of an item, uppercase ("350A"), from the configured lines.
pub fn detect_amp_line(item: &CatalogItem, vocab: &Vocabulary) -> Option<String> {
    let hay = normalize_text(&item.haystack());
    vocab
        .amp_lines
        .iter()
        .find(|line| hay.contains(line.as_str()))
        .map(|line| line.to_ascii_uppercase())
}

/// Gas system tag from lone `n`/`d` tokens in the item name.
pub fn detect_system_tag(item: &CatalogItem) -> Option<String> {
    for token in normalize_text(&item.name).split_whitespace() {
        match token {
            "n" => return Some("N".to_string()),
            "d" => return Some("D".to_string()),
            _ => {}
        }
    }
    None
}

/// Product family of an item: category token first, keyword fallback after.
pub fn item_group(item: &CatalogItem, vocab: &Vocabulary) -> Option<ProductGroup> {
    let key = normalize_key(&item.category);
    if let Some(group) = vocab.category_aliases().get(key.as_str()) {
        return Some(*group);
    }
    let hay = normalize_text(&item.haystack());
    for (group, terms) in &vocab.group_synonyms {
        if terms.iter().any(|t| contains_term(&hay, t)) {
            return Some(*group);
        }
    }
    None
}

pub fn item_matches_group(item: &CatalogItem, group: ProductGroup, vocab: &Vocabulary) -> bool {
    item_group(item, vocab) == Some(group)
}

/// Dedupe key: same digits in the code and same category means the same
/// part listed under two code families.
pub fn dedupe_key(item: &CatalogItem) -> String {
    format!("{}|{}", digits_of(&item.code), normalize_key(&item.category))
}

pub fn dedupe_by_sku(items: &[CatalogItem]) -> Vec<CatalogItem> {
    let mut seen = Vec::new();
    let mut out = Vec::new();
    for item in items {
        let key = dedupe_key(item);
        if !seen.contains(&key) {
            seen.push(key);
            out.push(item.clone());
        }
    }
    out
}

/// Ordered union of code lists, uppercased.
pub fn merge_unique(lists: &[&[String]]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for list in lists {
        for code in *list {
            let upper = code.to_ascii_uppercase();
            if !out.contains(&upper) {
                out.push(upper);
            }
        }
    }
    out
}

/// Code digit groups whose rows carry more than one amp line. Such a code
/// cannot anchor a bundle until the amp constraint is known.
pub fn ambiguous_amp_skus(items: &[CatalogItem], vocab: &Vocabulary) -> Vec<String> {
    let mut seen: Vec<(String, String)> = Vec::new();
    let mut out = Vec::new();
    for item in items {
        let Some(amp) = detect_amp_line(item, vocab) else {
            continue;
        };
        let digits = digits_of(&item.code);
        if digits.is_empty() {
            continue;
        }
        if seen.iter().any(|(d, a)| *d == digits && *a != amp) && !out.contains(&digits) {
            out.push(digits.clone());
        }
        seen.push((digits, amp));
    }
    out
}

/// Fit score for picking the representative row of a bundle part. Amp match
/// outranks system match, which outranks torch type.
pub fn bundle_entry_score(
    item: &CatalogItem,
    amp: Option<&str>,
    system: Option<&str>,
    torch_type: Option<TorchType>,
    vocab: &Vocabulary,
) -> u32 {
    let mut score = 0;
    if amp.is_some() && detect_amp_line(item, vocab).as_deref() == amp {
        score += 3;
    }
    if system.is_some() && detect_system_tag(item).as_deref() == system {
        score += 2;
    }
    if torch_type.is_some() && torch_type == Some(detect_item_type(item)) {
        score += 1;
    }
    score
}

/// Smallest positive bulk-quantity column across items, if any row has one.
pub fn min_bulk_qty(items: &[CatalogItem], vocab: &Vocabulary) -> Option<u32> {
    let headers: Vec<&str> = vocab.bulk_qty_headers.iter().map(String::as_str).collect();
    items
        .iter()
        .filter_map(|item| item.raw_value(&headers))
        .filter_map(|v| digits_of(v).parse::<u32>().ok())
        .filter(|v| *v > 0)
        .min()
}
