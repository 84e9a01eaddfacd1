//! Core type definitions for Concierge.
//!
//! Wire-facing types use camelCase field names to match the chat widget's
//! existing JSON contract.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An inbound chat turn.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// Session identifier. Required and non-empty; older widget builds send
    /// it under `session`.
    #[serde(alias = "session")]
    pub session_id: String,
    /// Display name of the user.
    pub name: Option<String>,
    /// Contact email, if the widget collected one.
    pub email: Option<String>,
    /// Free-text utterance. Exactly one of `message`/`event` is expected.
    pub message: Option<String>,
    /// Named event (e.g. a welcome trigger) instead of free text.
    pub event: Option<String>,
}

impl ChatRequest {
    /// Name to show in downstream records, defaulting to "User".
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("User")
    }

    /// Build the resolver query for this turn.
    ///
    /// An `event` takes precedence; otherwise this is a text query. When
    /// neither field is present the query carries the empty string and the
    /// provider decides what that means.
    pub fn query(&self) -> ResolveQuery {
        match &self.event {
            Some(event) => ResolveQuery::Event {
                name: event.clone(),
            },
            None => ResolveQuery::Text {
                text: self.message.clone().unwrap_or_default(),
            },
        }
    }

    /// Raw message text for the fallback classifier.
    ///
    /// Event-triggered turns have no message, so a low-confidence event turn
    /// always classifies the empty string.
    pub fn message_text(&self) -> &str {
        self.message.as_deref().unwrap_or("")
    }
}

/// Query shape sent to the primary intent resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveQuery {
    /// Free-text utterance, resolved with a fixed language tag.
    Text { text: String },
    /// Named event input.
    Event { name: String },
}

/// One resolution result from the primary NLU provider.
///
/// Produced once per request, never persisted.
#[derive(Debug, Clone)]
pub struct ResolvedIntent {
    /// Intent display name.
    pub label: String,
    /// Detection confidence in `[0.0, 1.0]`.
    pub confidence: f32,
    /// Canned reply text for this intent.
    pub fulfillment_text: String,
    /// Structured webhook payload, possibly empty.
    pub payload: Map<String, Value>,
}

/// The router's sole output contract, constructed fresh per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    /// User-facing reply text.
    pub reply: String,
    /// Intent label, verbatim from whichever stage produced it.
    pub intent: String,
    /// Structured payload for the widget (modal triggers etc.).
    pub payload: Map<String, Value>,
    /// True when the fallback classifier produced this response.
    pub used_fallback: bool,
}

/// The closed set of intents the fallback classifier may return.
///
/// `Unrecognized` carries the normalized raw label so responses can echo it
/// verbatim. Classifier-internal failures collapse to `Irrelevant`, which
/// makes them indistinguishable from a genuine "not understood" outcome; that
/// ambiguity is part of the contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackIntent {
    SupportRequest,
    TicketStatus,
    ContactSales,
    SpeakToAgent,
    Irrelevant,
    Unrecognized(String),
}

impl FallbackIntent {
    /// Parse a classifier label. Normalizes to lowercase and trims
    /// whitespace and stray quotes before matching.
    pub fn from_label(raw: &str) -> Self {
        let label = raw
            .trim()
            .trim_matches(|c| c == '\'' || c == '"' || c == '.')
            .to_lowercase();
        match label.as_str() {
            "support_request" => Self::SupportRequest,
            "ticket_status" => Self::TicketStatus,
            "contact_sales" => Self::ContactSales,
            "speak_to_agent" => Self::SpeakToAgent,
            "irrelevant" => Self::Irrelevant,
            _ => Self::Unrecognized(label),
        }
    }

    /// The label string, verbatim for unrecognized values.
    pub fn as_label(&self) -> &str {
        match self {
            Self::SupportRequest => "support_request",
            Self::TicketStatus => "ticket_status",
            Self::ContactSales => "contact_sales",
            Self::SpeakToAgent => "speak_to_agent",
            Self::Irrelevant => "irrelevant",
            Self::Unrecognized(label) => label,
        }
    }
}

/// Loosely-typed body of a modal form submission.
///
/// The support modal sends `subject`, the sales modal sends `company`; both
/// may send `message`. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModalSubmission {
    pub action: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
    pub subject: Option<String>,
    pub company: Option<String>,
}

/// Normalized record appended to the submission log. Never mutated or read
/// back by this system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub action: String,
    pub name: String,
    pub email: String,
    pub message: String,
}

impl From<ModalSubmission> for SubmissionRecord {
    /// Textual body precedence: `message`, then `subject`, then `company`,
    /// then empty.
    fn from(submission: ModalSubmission) -> Self {
        let message = submission
            .message
            .or(submission.subject)
            .or(submission.company)
            .unwrap_or_default();

        Self {
            action: submission.action.unwrap_or_default(),
            name: submission.name.unwrap_or_default(),
            email: submission.email.unwrap_or_default(),
            message,
        }
    }
}
