//! # torchtalk-nlu
//!
//! Deterministic language layer: normalization, structural patterns,
//! slot extraction, and the short-message dialogue act ladder.

pub mod acts;
pub mod extractor;
pub mod normalize;
pub mod patterns;

pub use acts::{quantity_followup_shape, DialogueActClassifier};
pub use extractor::SlotExtractor;
pub use normalize::{contains_term, digits_of, normalize_key, normalize_text};
