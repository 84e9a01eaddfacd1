//! Wire types for the detectIntent REST contract.
//!
//! Field names follow the provider's camelCase JSON. Only the fields this
//! system reads are modeled; everything else in the provider response is
//! ignored.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use concierge_core::types::ResolvedIntent;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectIntentRequest {
    pub query_input: QueryInput,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<TextInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<EventInput>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextInput {
    pub text: String,
    pub language_code: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInput {
    pub name: String,
    pub language_code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectIntentResponse {
    #[serde(default)]
    pub query_result: Option<QueryResult>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    #[serde(default)]
    pub intent: Option<IntentRef>,
    #[serde(default)]
    pub intent_detection_confidence: f32,
    #[serde(default)]
    pub fulfillment_text: String,
    #[serde(default)]
    pub webhook_payload: Option<Map<String, Value>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentRef {
    #[serde(default)]
    pub display_name: String,
}

impl DetectIntentResponse {
    /// Flatten the wire shape into the router's intent type. Missing fields
    /// collapse to empty defaults, which read as zero confidence and trigger
    /// the fallback gate downstream.
    pub fn into_resolved_intent(self) -> ResolvedIntent {
        let result = self.query_result.unwrap_or_default();
        ResolvedIntent {
            label: result.intent.unwrap_or_default().display_name,
            confidence: result.intent_detection_confidence,
            fulfillment_text: result.fulfillment_text,
            payload: result.webhook_payload.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_provider_response() {
        let json = r#"{
            "responseId": "abc-123",
            "queryResult": {
                "queryText": "hi",
                "intent": {
                    "name": "projects/p/agent/intents/42",
                    "displayName": "greeting"
                },
                "intentDetectionConfidence": 0.92,
                "fulfillmentText": "Hello! How can I help?",
                "webhookPayload": {"quick_replies": ["Support", "Sales"]}
            }
        }"#;

        let parsed: DetectIntentResponse = serde_json::from_str(json).unwrap();
        let intent = parsed.into_resolved_intent();

        assert_eq!(intent.label, "greeting");
        assert!((intent.confidence - 0.92).abs() < f32::EPSILON);
        assert_eq!(intent.fulfillment_text, "Hello! How can I help?");
        assert!(intent.payload.contains_key("quick_replies"));
    }

    #[test]
    fn missing_fields_collapse_to_defaults() {
        let parsed: DetectIntentResponse = serde_json::from_str("{}").unwrap();
        let intent = parsed.into_resolved_intent();

        assert_eq!(intent.label, "");
        assert_eq!(intent.confidence, 0.0);
        assert_eq!(intent.fulfillment_text, "");
        assert!(intent.payload.is_empty());
    }
}
