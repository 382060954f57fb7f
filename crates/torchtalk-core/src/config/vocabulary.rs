use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::ProductGroup;

fn words(xs: &[&str]) -> Vec<String> {
    xs.iter().map(|s| s.to_string()).collect()
}

/// Every keyword list the detectors match against, injected so deployments
/// can retune phrasing without touching detector code. All entries are
/// diacritic-folded lowercase; matching is whole-token containment on the
/// normalized message. Structural shapes (codes, amps, sizes) stay as
/// compiled regexes in the NLU crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    pub affirm_terms: Vec<String>,
    pub negate_terms: Vec<String>,
    pub followup_cues: Vec<String>,
    pub selling_verb_terms: Vec<String>,
    pub selling_scope_terms: Vec<String>,
    pub listing_terms: Vec<String>,
    pub price_terms: Vec<String>,
    pub availability_terms: Vec<String>,
    pub related_query_terms: Vec<String>,
    pub bundle_query_terms: Vec<String>,
    pub bundle_hint_terms: Vec<String>,
    pub accessory_invite_terms: Vec<String>,
    pub info_query_terms: Vec<String>,
    pub info_only_terms: Vec<String>,
    pub close_intent_terms: Vec<String>,
    pub buy_terms: Vec<String>,
    pub compatibility_terms: Vec<String>,
    pub product_info_terms: Vec<String>,
    pub repeat_request_terms: Vec<String>,
    pub lookup_hint_terms: Vec<String>,
    pub type_hand_terms: Vec<String>,
    pub type_robot_terms: Vec<String>,
    pub material_aluminum_terms: Vec<String>,
    pub contact_terms: Vec<String>,
    pub quantity_units: Vec<String>,

    /// Group detection phrases, most specific group first.
    pub group_synonyms: Vec<(ProductGroup, Vec<String>)>,
    /// Default accessory roles for a full-bundle expansion.
    pub default_bundle_parts: Vec<ProductGroup>,
    /// Catalog category tokens eligible for related-item expansion.
    pub related_categories: Vec<String>,
    /// Raw-column headers that may carry a minimum bulk quantity.
    pub bulk_qty_headers: Vec<String>,
    /// Amp lines the catalog distinguishes, e.g. 350a / 500a.
    pub amp_lines: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            affirm_terms: words(&[
                "muon", "ok", "oke", "okay", "dong y", "nhat tri", "chap nhan", "co", "duoc",
                "yes",
            ]),
            negate_terms: words(&[
                "khong", "khong can", "khong muon", "de sau", "thoi", "huy", "cancel", "ko", "k",
            ]),
            followup_cues: words(&["thi sao", "the sao", "sao"]),
            selling_verb_terms: words(&["co ban", "ban khong", "ban ko", "ban k"]),
            selling_scope_terms: words(&[
                "ban nhung gi",
                "ban gi",
                "co nhung gi",
                "ben minh ban gi",
                "shop ban gi",
                "co nhung san pham nao",
            ]),
            listing_terms: words(&[
                "liet ke", "danh sach", "list", "cac ma", "nhung ma", "ma nao",
            ]),
            price_terms: words(&["gia", "chiet khau", "bao gia", "giao", "vat"]),
            availability_terms: words(&[
                "ton kho", "kho", "co san", "con hang", "co hang", "het hang", "san kho",
                "con khong", "co khong",
            ]),
            related_query_terms: words(&[
                "di kem",
                "phu kien",
                "linh kien",
                "kem theo",
                "di cung",
                "chup",
                "chup khi",
                "than giu",
                "cach dien",
                "su",
                "orifice",
                "insulator",
                "body",
            ]),
            bundle_query_terms: words(&[
                "kem theo",
                "di kem",
                "phu kien di kem",
                "phu kien kem theo",
            ]),
            bundle_hint_terms: words(&[
                "dong bo",
                "tron bo",
                "full bo",
                "kem ca bo",
                "combo",
                "di kem du bo",
            ]),
            accessory_invite_terms: words(&[
                "linh kien di kem",
                "rap dong bo",
                "liet ke them",
                "di kem cung he",
            ]),
            info_query_terms: words(&[
                "xuat xu", "nguon goc", "vat lieu", "chat lieu", "ampe", "ampere", "amp",
            ]),
            info_only_terms: words(&[
                "hang trung quoc",
                "hang tq",
                "xuat xu",
                "nguon goc",
                "hang nhat",
                "nhat ban",
                "chinh hang",
                "tokinarc",
                "co phai tokinarc",
                "hang that",
            ]),
            close_intent_terms: words(&[
                "so luong",
                "dat hang",
                "don hang",
                "bao gia",
                "giao hang",
                "xuat hoa don",
                "xac nhan",
                "lay hang",
                "lay san pham",
                "combo",
            ]),
            buy_terms: words(&["mua", "chot", "chot don", "chot mua", "xac nhan mua"]),
            compatibility_terms: words(&[
                "tuong thich",
                "compatible",
                "equivalent",
                "thay the",
                "dung chung",
            ]),
            product_info_terms: words(&["thong tin", "thong so", "chi tiet", "mo ta"]),
            repeat_request_terms: words(&[
                "gui lai", "xem lai", "nhac lai", "hien lai", "show lai",
            ]),
            lookup_hint_terms: words(&["tim", "can", "cho xin", "xem", "loai nao", "co loai"]),
            type_hand_terms: words(&["tay", "hand"]),
            type_robot_terms: words(&["robot", "robotic"]),
            material_aluminum_terms: words(&["nhom", "aluminum", "al"]),
            contact_terms: words(&["zalo", "sdt", "so dien thoai", "lien he"]),
            quantity_units: words(&["cai", "chiec", "con", "bo", "cap", "set", "pcs", "sp"]),
            group_synonyms: vec![
                (
                    ProductGroup::TipBody,
                    words(&["than giu bec", "than giu", "tip body", "tipbody"]),
                ),
                (
                    ProductGroup::Insulator,
                    words(&["su cach dien", "cach dien", "insulator"]),
                ),
                (
                    ProductGroup::Orifice,
                    words(&["su chia khi", "su", "orifice", "diffuser"]),
                ),
                (
                    ProductGroup::Nozzle,
                    words(&["chup khi", "chup", "nozzle"]),
                ),
                (
                    ProductGroup::Tip,
                    words(&["bec han", "bec", "contact tip", "tip"]),
                ),
            ],
            default_bundle_parts: vec![
                ProductGroup::TipBody,
                ProductGroup::Insulator,
                ProductGroup::Nozzle,
                ProductGroup::Orifice,
            ],
            related_categories: words(&["TIPBODY", "INSULATOR", "ORIFICE", "NOZZLE"]),
            bulk_qty_headers: words(&["min bulk qty", "bulk qty", "so luong si", "mua si"]),
            amp_lines: words(&["350a", "500a"]),
        }
    }
}

impl Vocabulary {
    /// Phrases for one group, empty when the group is not configured.
    pub fn synonyms_for(&self, group: ProductGroup) -> &[String] {
        self.group_synonyms
            .iter()
            .find(|(g, _)| *g == group)
            .map(|(_, terms)| terms.as_slice())
            .unwrap_or(&[])
    }

    /// Reverse index: phrase → group, preserving the configured priority
    /// order (earlier groups win on overlapping phrases).
    pub fn group_phrase_index(&self) -> Vec<(&str, ProductGroup)> {
        let mut index = Vec::new();
        for (group, terms) in &self.group_synonyms {
            for term in terms {
                index.push((term.as_str(), *group));
            }
        }
        index
    }

    /// Synonym lookup for catalog categories that spell groups differently.
    pub fn category_aliases(&self) -> HashMap<&'static str, ProductGroup> {
        let mut m = HashMap::new();
        m.insert("TIP", ProductGroup::Tip);
        m.insert("CONTACTTIP", ProductGroup::Tip);
        m.insert("TIPBODY", ProductGroup::TipBody);
        m.insert("BODY", ProductGroup::TipBody);
        m.insert("NOZZLE", ProductGroup::Nozzle);
        m.insert("INSULATOR", ProductGroup::Insulator);
        m.insert("ORIFICE", ProductGroup::Orifice);
        m.insert("DIFFUSER", ProductGroup::Orifice);
        m
    }
}
