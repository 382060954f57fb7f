use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One catalog row as delivered by the retrieval collaborator.
/// `raw` carries the source spreadsheet columns keyed by header name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogItem {
    pub code: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub link: String,
    pub raw: HashMap<String, String>,
}

impl CatalogItem {
    /// First non-empty raw column whose header contains any of `keys`
    /// (case-insensitive). Mirrors how loosely the source sheets are keyed.
    pub fn raw_value(&self, keys: &[&str]) -> Option<&str> {
        for key in keys {
            let needle = key.to_ascii_lowercase();
            for (header, value) in &self.raw {
                if header.to_ascii_lowercase().contains(&needle) && !value.trim().is_empty() {
                    return Some(value.trim());
                }
            }
        }
        None
    }

    /// Searchable haystack: code, name, description and category combined.
    pub fn haystack(&self) -> String {
        let mut s = String::with_capacity(
            self.code.len() + self.name.len() + self.description.len() + self.category.len() + 3,
        );
        s.push_str(&self.code);
        s.push(' ');
        s.push_str(&self.name);
        s.push(' ');
        s.push_str(&self.description);
        s.push(' ');
        s.push_str(&self.category);
        s
    }
}
