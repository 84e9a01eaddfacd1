#![deny(unused)]
//! Primary intent resolver client for Concierge.
//!
//! A thin reqwest client for a Dialogflow-v2-style `detectIntent` REST
//! endpoint. The provider is a black box: this crate only builds the query,
//! sends it, and maps the wire response into [`ResolvedIntent`]. Transport
//! and provider errors are returned as-is; the router never recovers them.

pub mod wire;

use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};

use concierge_core::{
    config::ResolverConfig,
    traits::IntentResolver,
    types::{ResolveQuery, ResolvedIntent},
    Error, Result,
};
use wire::{DetectIntentRequest, DetectIntentResponse, EventInput, QueryInput, TextInput};

/// Dialogflow-style NLU client.
///
/// Built once at process start and shared behind `Arc`; the underlying
/// `reqwest::Client` pools connections and is safe for concurrent use.
pub struct DialogflowResolver {
    http: reqwest::Client,
    endpoint: String,
    project_id: String,
    access_token: Option<Secret<String>>,
    language_code: String,
}

impl DialogflowResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            project_id: config.project_id,
            access_token: config.access_token,
            language_code: config.language_code,
        }
    }

    fn session_url(&self, session_id: &str) -> String {
        format!(
            "{}/v2/projects/{}/agent/sessions/{}:detectIntent",
            self.endpoint, self.project_id, session_id
        )
    }

    fn query_input(&self, query: &ResolveQuery) -> QueryInput {
        match query {
            ResolveQuery::Text { text } => QueryInput {
                text: Some(TextInput {
                    text: text.clone(),
                    language_code: self.language_code.clone(),
                }),
                event: None,
            },
            ResolveQuery::Event { name } => QueryInput {
                text: None,
                event: Some(EventInput {
                    name: name.clone(),
                    language_code: self.language_code.clone(),
                }),
            },
        }
    }
}

#[async_trait]
impl IntentResolver for DialogflowResolver {
    async fn resolve(&self, session_id: &str, query: &ResolveQuery) -> Result<ResolvedIntent> {
        let url = self.session_url(session_id);
        let body = DetectIntentRequest {
            query_input: self.query_input(query),
        };

        tracing::debug!(session_id = %session_id, url = %url, "Calling intent resolver");

        let mut request = self.http.post(&url).json(&body);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::resolver(format!("detectIntent request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(Error::resolver(format!(
                "detectIntent returned {}: {}",
                status, detail
            )));
        }

        let parsed: DetectIntentResponse = response
            .json()
            .await
            .map_err(|e| Error::resolver(format!("invalid detectIntent response: {}", e)))?;

        Ok(parsed.into_resolved_intent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> DialogflowResolver {
        DialogflowResolver::new(ResolverConfig {
            project_id: "proj-1".into(),
            endpoint: "https://dialogflow.googleapis.com/".into(),
            access_token: None,
            language_code: "en".into(),
        })
    }

    #[test]
    fn session_url_has_no_double_slash() {
        let url = resolver().session_url("s1");
        assert_eq!(
            url,
            "https://dialogflow.googleapis.com/v2/projects/proj-1/agent/sessions/s1:detectIntent"
        );
    }

    #[test]
    fn text_query_carries_language_tag() {
        let input = resolver().query_input(&ResolveQuery::Text {
            text: "hi".into(),
        });
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["text"]["text"], "hi");
        assert_eq!(json["text"]["languageCode"], "en");
        assert!(json.get("event").is_none());
    }

    #[test]
    fn event_query_serializes_event_input() {
        let input = resolver().query_input(&ResolveQuery::Event {
            name: "WELCOME".into(),
        });
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["event"]["name"], "WELCOME");
        assert!(json.get("text").is_none());
    }

    #[test]
    fn empty_text_query_is_still_a_text_query() {
        // Boundary case: neither message nor event on the request side ends
        // up here as an empty text query, sent as-is.
        let input = resolver().query_input(&ResolveQuery::Text {
            text: String::new(),
        });
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["text"]["text"], "");
    }
}
