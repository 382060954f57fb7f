use serde::{Deserialize, Serialize};

/// Closed set of per-turn intents. The synthesizer never emits anything
/// outside this list; unknown generator output falls back to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    Other,
    AskSellingScope,
    ProductLookup,
    CodeLookup,
    AccessoryLookup,
    AccessoryBundleLookup,
    List,
    ProductAvailability,
    QuantityFollowup,
    SlotFillAmp,
    TypeSwitch,
}

impl Intent {
    /// Intents that can be replayed when a later slot-fill turn arrives.
    pub fn is_technical(self) -> bool {
        matches!(
            self,
            Intent::ProductLookup
                | Intent::AccessoryLookup
                | Intent::AccessoryBundleLookup
                | Intent::List
                | Intent::SlotFillAmp
        )
    }

    /// Wire name used in stored state and generator prompts.
    pub fn as_str(self) -> &'static str {
        match self {
            Intent::Other => "OTHER",
            Intent::AskSellingScope => "ASK_SELLING_SCOPE",
            Intent::ProductLookup => "PRODUCT_LOOKUP",
            Intent::CodeLookup => "CODE_LOOKUP",
            Intent::AccessoryLookup => "ACCESSORY_LOOKUP",
            Intent::AccessoryBundleLookup => "ACCESSORY_BUNDLE_LOOKUP",
            Intent::List => "LIST",
            Intent::ProductAvailability => "PRODUCT_AVAILABILITY",
            Intent::QuantityFollowup => "QUANTITY_FOLLOWUP",
            Intent::SlotFillAmp => "SLOT_FILL_AMP",
            Intent::TypeSwitch => "TYPE_SWITCH",
        }
    }

    /// Parse a wire name, tolerating unknown values as `None`.
    pub fn parse(raw: &str) -> Option<Intent> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "OTHER" => Some(Intent::Other),
            "ASK_SELLING_SCOPE" => Some(Intent::AskSellingScope),
            "PRODUCT_LOOKUP" => Some(Intent::ProductLookup),
            "CODE_LOOKUP" => Some(Intent::CodeLookup),
            "ACCESSORY_LOOKUP" => Some(Intent::AccessoryLookup),
            "ACCESSORY_BUNDLE_LOOKUP" => Some(Intent::AccessoryBundleLookup),
            "LIST" | "LIST_REQUEST" => Some(Intent::List),
            "PRODUCT_AVAILABILITY" => Some(Intent::ProductAvailability),
            "QUANTITY_FOLLOWUP" => Some(Intent::QuantityFollowup),
            "SLOT_FILL_AMP" => Some(Intent::SlotFillAmp),
            "TYPE_SWITCH" => Some(Intent::TypeSwitch),
            _ => None,
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Conversation topic, whitelisted; anything else collapses to `Product`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    Product,
    Origin,
    Compatibility,
    List,
    Commercial,
}

impl Topic {
    pub fn parse(raw: &str) -> Option<Topic> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "product" => Some(Topic::Product),
            "origin" => Some(Topic::Origin),
            "compatibility" => Some(Topic::Compatibility),
            "list" => Some(Topic::List),
            "commercial" => Some(Topic::Commercial),
            _ => None,
        }
    }
}

/// What the reply renderer is asked to do next. Fixed set; the hard-rule
/// pass maps anything invalid back to `AnswerOnly`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NextAction {
    AnswerOnly,
    AskForSkuOrGroup,
    AskHandVsRobotOnce,
    RequestContactForm,
    CommercialNeutralReply,
}

impl NextAction {
    pub fn parse(raw: &str) -> Option<NextAction> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "ANSWER_ONLY" => Some(NextAction::AnswerOnly),
            "ASK_FOR_SKU_OR_GROUP" => Some(NextAction::AskForSkuOrGroup),
            "ASK_HAND_VS_ROBOT_ONCE" => Some(NextAction::AskHandVsRobotOnce),
            "REQUEST_CONTACT_FORM" => Some(NextAction::RequestContactForm),
            "COMMERCIAL_NEUTRAL_REPLY" => Some(NextAction::CommercialNeutralReply),
            _ => None,
        }
    }
}

/// Per-turn dialogue act from the short-message classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DialogueAct {
    SlotFillAmp,
    SlotFillType,
    SlotFillQuantity,
    Affirm,
    Negate,
    NewIntent,
}

impl Default for DialogueAct {
    fn default() -> Self {
        DialogueAct::NewIntent
    }
}

impl DialogueAct {
    pub fn is_slot_fill(self) -> bool {
        matches!(
            self,
            DialogueAct::SlotFillAmp | DialogueAct::SlotFillType | DialogueAct::SlotFillQuantity
        )
    }
}

/// Slot still required before an order can proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingSlot {
    Sku,
    Quantity,
    Contact,
    TayRobot,
}
