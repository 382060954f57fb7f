use torchtalk_core::models::{ChatMessage, Role};
use torchtalk_nlu::patterns::{get, RE_PHONE};
use torchtalk_nlu::normalize_text;

/// Contact collection progress read off the transcript.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactState {
    /// The form has been shown at some point.
    pub asked_form: bool,
    /// Reminders sent since the form was last shown.
    pub reminder_count: u32,
    /// The user sent a phone number after the form.
    pub contact_received: bool,
    /// Form shown, reply still outstanding.
    pub waiting_for_contact: bool,
}

/// Walk the transcript in order; later events override earlier ones, so a
/// second form after a received contact starts a fresh collection cycle.
pub fn contact_state(history: &[ChatMessage]) -> ContactState {
    let mut s = ContactState::default();
    for msg in history {
        match msg.role {
            Role::Assistant => {
                if msg.meta.asked_form {
                    s.asked_form = true;
                    s.waiting_for_contact = true;
                    s.reminder_count = 0;
                }
                if msg.meta.reminded_contact {
                    s.reminder_count += 1;
                }
            }
            Role::User => {
                if s.waiting_for_contact && message_has_phone(&msg.content) {
                    s.contact_received = true;
                    s.waiting_for_contact = false;
                }
            }
        }
    }
    s
}

/// The assistant asked hand-vs-robot somewhere in the transcript.
pub fn history_asked_type(history: &[ChatMessage]) -> bool {
    history.iter().any(|msg| {
        if msg.role != Role::Assistant {
            return false;
        }
        let folded = normalize_text(&msg.content);
        folded.contains("tay")
            && folded.contains("robot")
            && (folded.contains("hay") || folded.contains("hoac"))
    })
}

fn message_has_phone(content: &str) -> bool {
    let folded = normalize_text(content);
    get(&RE_PHONE).is_some_and(|re| re.is_match(&folded))
}
