use serde::{Deserialize, Serialize};

/// Welding-torch accessory families the engine reasons about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductGroup {
    Tip,
    TipBody,
    Nozzle,
    Insulator,
    Orifice,
}

impl ProductGroup {
    pub fn as_str(self) -> &'static str {
        match self {
            ProductGroup::Tip => "TIP",
            ProductGroup::TipBody => "TIP_BODY",
            ProductGroup::Nozzle => "NOZZLE",
            ProductGroup::Insulator => "INSULATOR",
            ProductGroup::Orifice => "ORIFICE",
        }
    }

    /// Catalog category token for matching against item rows.
    pub fn category_key(self) -> &'static str {
        match self {
            ProductGroup::Tip => "TIP",
            ProductGroup::TipBody => "TIPBODY",
            ProductGroup::Nozzle => "NOZZLE",
            ProductGroup::Insulator => "INSULATOR",
            ProductGroup::Orifice => "ORIFICE",
        }
    }

    pub fn parse(raw: &str) -> Option<ProductGroup> {
        let key: String = raw
            .trim()
            .to_ascii_uppercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match key.as_str() {
            "TIP" | "CONTACTTIP" => Some(ProductGroup::Tip),
            "TIPBODY" | "BODY" => Some(ProductGroup::TipBody),
            "NOZZLE" => Some(ProductGroup::Nozzle),
            "INSULATOR" => Some(ProductGroup::Insulator),
            "ORIFICE" | "DIFFUSER" => Some(ProductGroup::Orifice),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProductGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hand-held vs robotic torch line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TorchType {
    Hand,
    Robot,
}

impl TorchType {
    pub fn is_robot(self) -> bool {
        matches!(self, TorchType::Robot)
    }
}

/// Where a slot value came from. An assumed default never shadows a later
/// explicit user statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    User,
    AssumedDefault,
}
