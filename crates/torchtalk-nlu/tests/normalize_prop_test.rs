use proptest::prelude::*;

use torchtalk_core::config::Vocabulary;
use torchtalk_nlu::{normalize_text, SlotExtractor};

proptest! {
    // Folding is a projection: applying it twice changes nothing.
    #[test]
    fn normalization_is_idempotent(input in ".{0,200}") {
        let once = normalize_text(&input);
        prop_assert_eq!(normalize_text(&once), once);
    }

    // Extraction is total and deterministic over arbitrary input.
    #[test]
    fn extraction_never_panics_and_is_deterministic(input in ".{0,200}") {
        let ex = SlotExtractor::new(Vocabulary::default());
        let a = ex.extract(&input);
        let b = ex.extract(&input);
        prop_assert_eq!(a, b);
    }
}
