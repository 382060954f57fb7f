pub mod catalog_item;
pub mod chat_message;
pub mod constraints;
pub mod decision;
pub mod flags;
pub mod order_state;
pub mod product;
pub mod requests;
pub mod resolved;
pub mod short_memory;
pub mod slots;

pub use catalog_item::CatalogItem;
pub use chat_message::{ChatMessage, MessageMeta, Role};
pub use constraints::Constraints;
pub use decision::{DecisionEntities, IntentDecision};
pub use flags::ContextFlags;
pub use order_state::OrderState;
pub use product::{ProductGroup, Provenance, TorchType};
pub use requests::{GenerationRequest, RetrievalRequest};
pub use resolved::ResolvedRequest;
pub use short_memory::{
    Anchor, CommercialContext, PendingAction, PendingRequest, ShortMemory,
};
pub use slots::ParsedSlots;
