use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::constraints::Constraints;
use super::product::{ProductGroup, Provenance, TorchType};
use super::short_memory::ShortMemory;
use crate::dialogue::Intent;

/// Durable per-session order state. Persisted whole via `ISessionStore`;
/// every turn reads one snapshot and writes one replacement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderState {
    pub selected_sku: Option<String>,
    pub selected_group: Option<ProductGroup>,
    pub quantity: Option<u32>,
    pub hand_or_robot: Option<TorchType>,
    pub hand_or_robot_source: Option<Provenance>,
    pub contact: Option<String>,

    pub last_intent: Option<Intent>,
    /// Codes from the most recent rendered turn, capped at 4.
    pub last_context_codes: Vec<String>,
    pub last_group: Option<ProductGroup>,
    pub last_constraints: Constraints,

    /// The hand-vs-robot question has been asked this conversation.
    pub asked_hand_robot: bool,
    /// The contact form has been shown this conversation.
    pub asked_contact_form: bool,
    /// Rotation index for the fixed selling-scope reply.
    pub selling_scope_variant: u32,

    pub short_memory: ShortMemory,
    /// Last write time of `short_memory`; absent or stale triggers a reset.
    pub short_memory_at: Option<DateTime<Utc>>,
}

impl OrderState {
    /// Hand/robot is answered only when stated by the user, not defaulted.
    pub fn type_answered_by_user(&self) -> bool {
        self.hand_or_robot.is_some() && self.hand_or_robot_source == Some(Provenance::User)
    }
}
