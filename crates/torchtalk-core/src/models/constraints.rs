use serde::{Deserialize, Serialize};

/// Technical constraints carried by a request or remembered across turns.
/// All values are normalized uppercase/decimal strings as extracted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Constraints {
    /// Amperage line, e.g. `350A`.
    pub amp: Option<String>,
    /// Tip diameter, e.g. `0.8`.
    pub size: Option<String>,
    /// Tip length in millimetres, e.g. `45`.
    pub length: Option<String>,
    /// Thread spec, e.g. `M6` or `M8X1`.
    pub thread: Option<String>,
    /// Material keyword, e.g. `ALUMINUM`.
    pub material: Option<String>,
    /// Gas system tag, `N` or `D`.
    pub system: Option<String>,
}

impl Constraints {
    pub fn is_empty(&self) -> bool {
        self.amp.is_none()
            && self.size.is_none()
            && self.length.is_none()
            && self.thread.is_none()
            && self.material.is_none()
            && self.system.is_none()
    }

    /// True when any constraint beyond the amp line is present.
    pub fn has_technical(&self) -> bool {
        self.size.is_some()
            || self.length.is_some()
            || self.thread.is_some()
            || self.material.is_some()
            || self.system.is_some()
    }

    /// Overlay: fields set in `other` win, unset fields keep `self`'s value.
    pub fn merged_with(&self, other: &Constraints) -> Constraints {
        Constraints {
            amp: other.amp.clone().or_else(|| self.amp.clone()),
            size: other.size.clone().or_else(|| self.size.clone()),
            length: other.length.clone().or_else(|| self.length.clone()),
            thread: other.thread.clone().or_else(|| self.thread.clone()),
            material: other.material.clone().or_else(|| self.material.clone()),
            system: other.system.clone().or_else(|| self.system.clone()),
        }
    }
}
