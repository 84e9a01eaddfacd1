//! Intent router: the confidence-gated two-stage resolution pipeline.
//!
//! Every chat turn goes to the primary resolver first. Its answer is accepted
//! verbatim when the detection confidence clears a fixed threshold; below the
//! threshold the fallback classifier takes over and the primary's label,
//! fulfillment, and payload are discarded entirely. There is no blending of
//! the two signals, no hysteresis, and no per-intent threshold overrides.

use std::sync::Arc;

use serde_json::{Map, Value};

use concierge_core::{
    traits::{FallbackClassifier, IntentResolver},
    types::{ChatRequest, ChatResponse, FallbackIntent},
    Error, Result,
};

/// Reply text for the support-ticket modal trigger.
const REPLY_SUPPORT: &str = "Opening support ticket form...";
/// Reply text for the sales-inquiry modal trigger.
const REPLY_SALES: &str = "Opening sales inquiry form...";
/// Generic reply for every non-actionable fallback label.
const REPLY_GENERIC: &str = "Let me help with that—please choose an option below.";

/// The router. Holds the two long-lived provider clients and the threshold,
/// all fixed at process start.
pub struct IntentRouter {
    resolver: Arc<dyn IntentResolver>,
    classifier: Arc<dyn FallbackClassifier>,
    confidence_threshold: f32,
}

impl IntentRouter {
    pub fn new(
        resolver: Arc<dyn IntentResolver>,
        classifier: Arc<dyn FallbackClassifier>,
        confidence_threshold: f32,
    ) -> Self {
        Self {
            resolver,
            classifier,
            confidence_threshold,
        }
    }

    /// Resolve one chat turn into a response.
    ///
    /// Resolver errors propagate: an unavailable primary provider fails the
    /// whole call. The fallback path only exists for answers with low
    /// confidence, never for an absent answer.
    pub async fn resolve(&self, request: &ChatRequest) -> Result<ChatResponse> {
        if request.session_id.is_empty() {
            return Err(Error::invalid_request("sessionId must be non-empty"));
        }

        let resolved = self
            .resolver
            .resolve(&request.session_id, &request.query())
            .await?;

        if resolved.confidence >= self.confidence_threshold {
            tracing::debug!(
                session_id = %request.session_id,
                intent = %resolved.label,
                confidence = resolved.confidence,
                "Accepting primary resolution"
            );
            return Ok(ChatResponse {
                reply: resolved.fulfillment_text,
                intent: resolved.label,
                payload: resolved.payload,
                used_fallback: false,
            });
        }

        // Low confidence: classify the raw message text. Event-triggered
        // turns carry no message, so they classify the empty string.
        let fallback = self.classifier.classify(request.message_text()).await;
        tracing::info!(
            session_id = %request.session_id,
            confidence = resolved.confidence,
            fallback = %fallback.as_label(),
            "Low confidence, falling back to classifier"
        );

        Ok(Self::shape_fallback(fallback))
    }

    /// Map a fallback label to its user-facing response.
    ///
    /// The match is exhaustive over the intent set, so adding a label is a
    /// compile-time-checked edit. The `intent` field always echoes the label
    /// verbatim, including unrecognized ones.
    fn shape_fallback(intent: FallbackIntent) -> ChatResponse {
        let (reply, payload) = match &intent {
            FallbackIntent::SupportRequest => (REPLY_SUPPORT, modal_payload("support")),
            FallbackIntent::ContactSales => (REPLY_SALES, modal_payload("sales")),
            FallbackIntent::TicketStatus
            | FallbackIntent::SpeakToAgent
            | FallbackIntent::Irrelevant
            | FallbackIntent::Unrecognized(_) => (REPLY_GENERIC, Map::new()),
        };

        ChatResponse {
            reply: reply.to_string(),
            intent: intent.as_label().to_string(),
            payload,
            used_fallback: true,
        }
    }
}

fn modal_payload(form: &str) -> Map<String, Value> {
    let mut payload = Map::new();
    payload.insert("confirm_modal".to_string(), Value::String(form.to_string()));
    payload
}
