use serde::{Deserialize, Serialize};

/// Speaker role in the stored transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Per-message bookkeeping the guard reads when walking history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageMeta {
    /// Product codes rendered alongside this assistant turn.
    pub context_codes: Vec<String>,
    /// This assistant turn showed the contact form.
    pub asked_form: bool,
    /// This assistant turn reminded the user about pending contact info.
    pub reminded_contact: bool,
}

/// One transcript entry. `meta` is empty for user turns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    #[serde(default)]
    pub meta: MessageMeta,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            meta: MessageMeta::default(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            meta: MessageMeta::default(),
        }
    }
}
