//! Message role classification.
//!
//! The exchange pattern of a message follows from the fields right after
//! the message id:
//!
//! ```text
//!            client_index            context
//!   Start ───────────────▶ SawClientIndex ───────▶ Request
//!     │                        │ (other)
//!     │ context                ▼
//!     ▼                      Event
//!   Reply          (anything else at [1]) ─▶ Other
//! ```

use binapi_core::{CLIENT_INDEX_FIELD, CONTEXT_FIELD, Field, Message};

/// Exchange pattern a message takes part in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    Request,
    Reply,
    Event,
    Other,
}

impl MessageRole {
    /// Classify a message by its fields.
    pub fn of(message: &Message) -> Self {
        Self::classify(&message.fields)
    }

    /// Classify a field sequence whose index 0 is the message id.
    pub fn classify(fields: &[Field]) -> Self {
        fields
            .iter()
            .skip(1)
            .take(2)
            .fold(ClassifierState::Start, |state, field| {
                state.step(&field.name)
            })
            .role()
    }

    /// `api.MessageType` constant of the role.
    pub fn api_constant(self) -> &'static str {
        match self {
            MessageRole::Request => "api.RequestMessage",
            MessageRole::Reply => "api.ReplyMessage",
            MessageRole::Event => "api.EventMessage",
            MessageRole::Other => "api.OtherMessage",
        }
    }
}

/// Classifier states; every state maps to a role once input ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierState {
    Start,
    SawClientIndex,
    Done(MessageRole),
}

impl ClassifierState {
    pub fn step(self, field_name: &str) -> Self {
        match (self, field_name) {
            (ClassifierState::Start, CLIENT_INDEX_FIELD) => ClassifierState::SawClientIndex,
            (ClassifierState::Start, CONTEXT_FIELD) => ClassifierState::Done(MessageRole::Reply),
            (ClassifierState::Start, _) => ClassifierState::Done(MessageRole::Other),
            (ClassifierState::SawClientIndex, CONTEXT_FIELD) => {
                ClassifierState::Done(MessageRole::Request)
            }
            (ClassifierState::SawClientIndex, _) => ClassifierState::Done(MessageRole::Event),
            (done @ ClassifierState::Done(_), _) => done,
        }
    }

    pub fn role(self) -> MessageRole {
        match self {
            ClassifierState::Start => MessageRole::Other,
            ClassifierState::SawClientIndex => MessageRole::Event,
            ClassifierState::Done(role) => role,
        }
    }
}

/// Whether a message field is left out of the generated struct.
///
/// The message id and crc never appear. The client index and context are
/// left out while no other member has been emitted yet.
pub fn is_skipped_member(field: &Field, emitted: usize) -> bool {
    if field.is_wire_metadata() {
        return true;
    }
    let lower = field.name.to_lowercase();
    emitted == 0 && (lower == CLIENT_INDEX_FIELD || lower == CONTEXT_FIELD)
}


#[cfg(test)]
#[path = "role/role_parameterized_tests.rs"]
mod role_parameterized_tests;
