use torchtalk_core::config::Vocabulary;
use torchtalk_core::models::ProductGroup;
use torchtalk_nlu::normalize_text;
use torchtalk_nlu::SlotExtractor;

fn extractor() -> SlotExtractor {
    SlotExtractor::new(Vocabulary::default())
}

// ── Normalization ──────────────────────────────────────────────────────────

#[test]
fn normalization_strips_diacritics_and_punctuation() {
    assert_eq!(
        normalize_text("Có bán Béc 0.8x45L không?"),
        "co ban bec 0.8x45l khong"
    );
    assert_eq!(normalize_text("Đặt hàng!"), "dat hang");
}

#[test]
fn normalization_collapses_whitespace() {
    assert_eq!(normalize_text("  bec   350a  "), "bec 350a");
}

// ── Codes ──────────────────────────────────────────────────────────────────

#[test]
fn extracts_code_families_in_order() {
    let slots = extractor().extract("ma U4167R0 va P300401 va 004002");
    assert_eq!(slots.codes, vec!["U4167R0", "P300401", "004002"]);
    assert_eq!(slots.primary_code(), Some("U4167R0"));
}

#[test]
fn extracts_tokin_shorthand() {
    let slots = extractor().extract("tokin 123 con khong");
    assert_eq!(slots.codes, vec!["TOKIN123"]);
}

#[test]
fn short_numbers_are_not_codes() {
    let slots = extractor().extract("lay 30 cai");
    assert!(slots.codes.is_empty());
    assert_eq!(slots.quantity, Some(30));
}

// ── Quantities ─────────────────────────────────────────────────────────────

#[test]
fn so_luong_wins_over_unit_quantity() {
    let slots = extractor().extract("so luong 100");
    assert_eq!(slots.quantity, Some(100));
}

#[test]
fn pure_quantity_shapes() {
    let ex = extractor();
    assert_eq!(ex.extract("30").pure_quantity, Some(30));
    assert_eq!(ex.extract("2 cai").pure_quantity, Some(2));
    assert_eq!(ex.extract("mot bo").pure_quantity, Some(1));
    assert_eq!(ex.extract("lay 2 cai nhe").pure_quantity, None);
}

#[test]
fn single_unit_detected() {
    let slots = extractor().extract("lay 1 cai thoi");
    assert!(slots.single_unit);
}

// ── Technical values ───────────────────────────────────────────────────────

#[test]
fn amp_size_length_thread() {
    let slots = extractor().extract("bec 0.8x45L 350a ren M6");
    assert_eq!(slots.constraints.amp.as_deref(), Some("350A"));
    assert_eq!(slots.constraints.size.as_deref(), Some("0.8"));
    assert_eq!(slots.constraints.length.as_deref(), Some("45"));
    assert_eq!(slots.constraints.thread.as_deref(), Some("M6"));
}

#[test]
fn aluminum_material() {
    let slots = extractor().extract("bec nhom 350a");
    assert_eq!(slots.constraints.material.as_deref(), Some("ALUMINUM"));
}

// ── Groups ─────────────────────────────────────────────────────────────────

#[test]
fn group_priority_most_specific_first() {
    let ex = extractor();
    // "than giu bec" mentions both, the body family wins.
    assert_eq!(
        ex.extract("than giu bec 350a").group,
        Some(ProductGroup::TipBody)
    );
    assert_eq!(
        ex.extract("su cach dien").group,
        Some(ProductGroup::Insulator)
    );
    assert_eq!(ex.extract("bec 0.8").group, Some(ProductGroup::Tip));
}

#[test]
fn requested_parts_collects_all_mentions() {
    let slots = extractor().extract("con cach dien va chup khi thi sao");
    assert!(slots.requested_parts.contains(&ProductGroup::Insulator));
    assert!(slots.requested_parts.contains(&ProductGroup::Nozzle));
    assert!(slots.narrowing_reask);
}

// ── Cues ───────────────────────────────────────────────────────────────────

#[test]
fn word_boundary_matching_avoids_substrings() {
    // "khong" must not trigger the availability term "kho".
    let slots = extractor().extract("khong can dau");
    assert!(!slots.availability);
}

#[test]
fn selling_verb_and_followup_cue() {
    let slots = extractor().extract("co ban bec 0.8x45l khong");
    assert!(slots.selling_verb);
    let slots = extractor().extract("350a thi sao");
    assert!(slots.followup_cue);
}

#[test]
fn torch_type_hand_wins_over_robot() {
    let ex = extractor();
    assert_eq!(ex.extract("dung cho robot").is_robot, Some(true));
    assert_eq!(ex.extract("dung tay hay robot").is_robot, Some(false));
    assert_eq!(ex.extract("bec 350a").is_robot, None);
}
