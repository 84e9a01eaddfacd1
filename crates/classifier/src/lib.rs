#![deny(unused)]
//! Fallback intent classifier for Concierge.
//!
//! This crate provides:
//! - The Rig LLM client adapter
//! - The closed-set classification prompt and label parsing
//! - The error-as-sentinel boundary: any internal failure becomes `irrelevant`

pub mod rig_client;

pub use rig_client::{RigConfig, RigLlmClient, RigProvider};

use async_trait::async_trait;
use std::sync::Arc;

use concierge_core::{
    config::ClassifierConfig,
    traits::{FallbackClassifier, LlmClient},
    types::FallbackIntent,
};

/// LLM-backed classifier over the closed intent set.
///
/// One completion per call, temperature zero, single-label output. Errors
/// never cross this boundary: a provider failure is logged and mapped to
/// [`FallbackIntent::Irrelevant`], which is deliberately indistinguishable
/// from a genuine "message not understood" result.
pub struct LlmClassifier {
    llm: Arc<dyn LlmClient>,
}

impl LlmClassifier {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    /// Build a classifier with a Rig client from configuration.
    pub fn from_config(config: &ClassifierConfig) -> Self {
        let rig_config = match config.provider.to_lowercase().as_str() {
            "anthropic" => RigConfig::anthropic(&config.model),
            _ => RigConfig::openai(&config.model),
        }
        .with_temperature(config.temperature)
        .with_max_tokens(config.max_tokens);

        Self::new(Arc::new(RigLlmClient::new(rig_config)))
    }

    fn prompt(text: &str) -> String {
        format!(
            "Classify this message exactly as one of: support_request, \
             ticket_status, contact_sales, speak_to_agent, or irrelevant. \
             Message: '{}'",
            text
        )
    }
}

#[async_trait]
impl FallbackClassifier for LlmClassifier {
    async fn classify(&self, text: &str) -> FallbackIntent {
        match self.llm.complete(&Self::prompt(text)).await {
            Ok(response) => {
                let intent = FallbackIntent::from_label(&response.content);
                tracing::debug!(label = %intent.as_label(), "Fallback classification");
                intent
            }
            Err(e) => {
                tracing::error!(error = %e, "Fallback classification failed");
                FallbackIntent::Irrelevant
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use concierge_core::mocks::MockLlm;

    #[tokio::test]
    async fn classifies_known_label() {
        let classifier = LlmClassifier::new(Arc::new(MockLlm::constant("support_request")));
        let intent = classifier.classify("I need a refund").await;
        assert_eq!(intent, FallbackIntent::SupportRequest);
    }

    #[tokio::test]
    async fn normalizes_model_output() {
        // Models sometimes echo the label with casing or punctuation.
        let classifier = LlmClassifier::new(Arc::new(MockLlm::constant(" Contact_Sales.\n")));
        let intent = classifier.classify("pricing for 100 seats?").await;
        assert_eq!(intent, FallbackIntent::ContactSales);
    }

    #[tokio::test]
    async fn unknown_label_survives_verbatim() {
        let classifier = LlmClassifier::new(Arc::new(MockLlm::constant("refund_request")));
        let intent = classifier.classify("???").await;
        assert_eq!(
            intent,
            FallbackIntent::Unrecognized("refund_request".to_string())
        );
    }

    #[tokio::test]
    async fn provider_failure_collapses_to_irrelevant() {
        // The sentinel: a failing provider is indistinguishable from a
        // genuine irrelevant classification.
        let failing = LlmClassifier::new(Arc::new(MockLlm::failing()));
        let genuine = LlmClassifier::new(Arc::new(MockLlm::constant("irrelevant")));

        assert_eq!(failing.classify("anything").await, FallbackIntent::Irrelevant);
        assert_eq!(genuine.classify("anything").await, FallbackIntent::Irrelevant);
    }

    #[test]
    fn prompt_embeds_message_and_label_set() {
        let prompt = LlmClassifier::prompt("where is my order");
        assert!(prompt.contains("support_request"));
        assert!(prompt.contains("speak_to_agent"));
        assert!(prompt.contains("'where is my order'"));
    }
}
