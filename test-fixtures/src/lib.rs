//! Canned welding-torch catalog rows and mock collaborators shared by
//! integration tests across the workspace.

use std::collections::HashMap;
use std::sync::Mutex;

use torchtalk_core::errors::CoreResult;
use torchtalk_core::models::{CatalogItem, GenerationRequest, RetrievalRequest, TorchType};
use torchtalk_core::traits::{ICatalogRetriever, ITextGenerator};

fn item(code: &str, name: &str, category: &str, raw: &[(&str, &str)]) -> CatalogItem {
    CatalogItem {
        code: code.to_string(),
        name: name.to_string(),
        description: String::new(),
        category: category.to_string(),
        link: format!("https://catalog.example/{code}"),
        raw: raw
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>(),
    }
}

/// A small but representative slice of the accessory catalog: both amp
/// lines, hand and robot variants, and every accessory family.
pub fn catalog() -> Vec<CatalogItem> {
    vec![
        item(
            "004002",
            "Bec han Tokin 0.8x45L 350A",
            "TIP",
            &[("Min bulk qty", "50")],
        ),
        item(
            "004003",
            "Bec han Tokin 1.0x45L 350A",
            "TIP",
            &[("Min bulk qty", "50")],
        ),
        item(
            "004010",
            "Bec han robot Tokin 0.8x45L 500A",
            "TIP",
            &[("Min bulk qty", "50")],
        ),
        item("U4167R0", "Than giu bec 350A", "TIPBODY", &[]),
        item("U5167R0", "Than giu bec robot 500A", "TIPBODY", &[]),
        item("P300401", "Su cach dien 350A", "INSULATOR", &[]),
        item("P300402", "Su cach dien 500A", "INSULATOR", &[]),
        item("300500", "Chup khi 350A N", "NOZZLE", &[]),
        item("300501", "Su chia khi 350A", "ORIFICE", &[]),
    ]
}

fn fold(s: &str) -> String {
    s.to_lowercase()
}

fn key_of(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

fn digits_of(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// In-memory retriever over the canned catalog. Matching is intentionally
/// simple: exact codes first, then category/constraint filtering.
pub struct MockRetriever {
    items: Vec<CatalogItem>,
}

impl MockRetriever {
    pub fn new() -> Self {
        Self { items: catalog() }
    }

    pub fn with_items(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }

    fn code_matches(item: &CatalogItem, wanted: &str) -> bool {
        let item_key = key_of(&item.code);
        let want_key = key_of(wanted);
        if item_key == want_key {
            return true;
        }
        // Numeric shorthand matches the digits of any code family.
        let want_digits = digits_of(wanted);
        !want_digits.is_empty() && digits_of(&item.code) == want_digits
    }

    fn passes_filters(&self, item: &CatalogItem, req: &RetrievalRequest) -> bool {
        let hay = fold(&format!(
            "{} {} {}",
            item.code, item.name, item.category
        ));

        if let Some(group) = req.group {
            if key_of(&item.category) != group.category_key() {
                return false;
            }
        }
        if !req.parts.is_empty()
            && !req
                .parts
                .iter()
                .any(|p| key_of(&item.category) == p.category_key())
        {
            return false;
        }
        if let Some(amp) = &req.constraints.amp {
            if !hay.contains(&fold(amp)) {
                return false;
            }
        }
        if let (Some(size), Some(length)) = (&req.constraints.size, &req.constraints.length) {
            if !hay.contains(&format!("{size}x{length}")) {
                return false;
            }
        }
        if let Some(t) = req.torch_type {
            let robot = hay.contains("robot");
            if (t == TorchType::Robot) != robot {
                return false;
            }
        }
        true
    }
}

impl ICatalogRetriever for MockRetriever {
    fn retrieve(&self, req: &RetrievalRequest) -> CoreResult<Vec<CatalogItem>> {
        if !req.codes.is_empty() {
            return Ok(self
                .items
                .iter()
                .filter(|i| req.codes.iter().any(|c| Self::code_matches(i, c)))
                .cloned()
                .collect());
        }
        if req.group.is_none() && req.parts.is_empty() && req.constraints.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .items
            .iter()
            .filter(|i| self.passes_filters(i, req))
            .cloned()
            .collect())
    }
}

impl Default for MockRetriever {
    fn default() -> Self {
        Self::new()
    }
}

/// Scripted generator: pops queued responses, then repeats the fallback.
pub struct MockGenerator {
    queued: Mutex<Vec<String>>,
    fallback: String,
}

impl MockGenerator {
    /// Always returns text with no parseable JSON.
    pub fn silent() -> Self {
        Self {
            queued: Mutex::new(Vec::new()),
            fallback: String::new(),
        }
    }

    pub fn fixed(response: impl Into<String>) -> Self {
        Self {
            queued: Mutex::new(Vec::new()),
            fallback: response.into(),
        }
    }

    pub fn scripted(responses: Vec<String>) -> Self {
        let mut queued = responses;
        queued.reverse();
        Self {
            queued: Mutex::new(queued),
            fallback: String::new(),
        }
    }
}

impl ITextGenerator for MockGenerator {
    fn generate(&self, _request: &GenerationRequest) -> CoreResult<String> {
        let mut queued = self.queued.lock().expect("generator queue poisoned");
        Ok(queued.pop().unwrap_or_else(|| self.fallback.clone()))
    }
}
