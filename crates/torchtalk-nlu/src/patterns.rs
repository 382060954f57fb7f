//! Structural shapes compiled once. Keyword phrasing lives in the injected
//! vocabulary; only genuinely positional patterns belong here.

use regex::Regex;
use std::sync::LazyLock;

macro_rules! shape {
    ($name:ident, $regex_str:expr) => {
        pub static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

// ── Product codes ──────────────────────────────────────────────────────────
shape!(RE_TOKIN_CODE, r"(?i)\btokin(?:arc)?\s*(\d+)\b");
shape!(RE_D_CODE, r"(?i)\bU[0-9A-Z]{4,}\b");
shape!(RE_P_CODE, r"(?i)\bP[0-9A-Z]{4,}\b");
shape!(RE_NUM_CODE, r"\b\d{5,6}\b");

// ── Technical values ───────────────────────────────────────────────────────
shape!(RE_AMP, r"\b(\d{3})\s*a\b");
shape!(RE_TIP_SIZE_LEN, r"\b(\d(?:\.\d)?)\s*x\s*(\d{2,3})(?:\s*l)?\b");
shape!(RE_SIZE, r"\b(\d(?:\.\d)?)\b");
shape!(RE_THREAD, r"(?i)\bm(\d+(?:x\d+)?)\b");

// ── Commercial values ──────────────────────────────────────────────────────
shape!(RE_SO_LUONG, r"\b(?:so luong|sl)\s*(\d{1,6})\b");
shape!(RE_BARE_QUANTITY, r"^\d{1,6}$");
shape!(RE_PHONE, r"\b\d{8,12}\b");

// ── Sentence shapes ────────────────────────────────────────────────────────
shape!(RE_CON_PREFIX, r"^con\b");

/// Access a shape, treating a failed compile as absent.
pub fn get(re: &'static LazyLock<Option<Regex>>) -> Option<&'static Regex> {
    re.as_ref()
}
