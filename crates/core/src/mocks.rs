//! Mock implementations of core traits for testing.
//!
//! These are used across the workspace for unit and integration tests; no
//! real provider calls are made anywhere in the test suites.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::{
    traits::{FallbackClassifier, IntentResolver, LlmClient, LlmResponse, LlmUsage, SubmissionStore},
    types::{FallbackIntent, ResolveQuery, ResolvedIntent, SubmissionRecord},
    Error, Result,
};

// =============================================================================
// Mock Intent Resolver
// =============================================================================

/// Scripted resolver that returns a fixed result and records every query.
pub struct MockResolver {
    result: Option<ResolvedIntent>,
    queries: Mutex<Vec<(String, ResolveQuery)>>,
}

impl MockResolver {
    /// Resolver that always answers with the given intent.
    pub fn resolving(
        label: &str,
        confidence: f32,
        fulfillment_text: &str,
    ) -> Self {
        Self {
            result: Some(ResolvedIntent {
                label: label.to_string(),
                confidence,
                fulfillment_text: fulfillment_text.to_string(),
                payload: serde_json::Map::new(),
            }),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Resolver that always fails, simulating an unreachable provider.
    pub fn failing() -> Self {
        Self {
            result: None,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Attach a webhook payload to the scripted intent.
    pub fn with_payload(mut self, payload: serde_json::Map<String, serde_json::Value>) -> Self {
        if let Some(result) = &mut self.result {
            result.payload = payload;
        }
        self
    }

    /// Queries this mock has received, in order.
    pub fn queries(&self) -> Vec<(String, ResolveQuery)> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl IntentResolver for MockResolver {
    async fn resolve(&self, session_id: &str, query: &ResolveQuery) -> Result<ResolvedIntent> {
        self.queries
            .lock()
            .unwrap()
            .push((session_id.to_string(), query.clone()));

        match &self.result {
            Some(result) => Ok(result.clone()),
            None => Err(Error::resolver("mock resolver unavailable")),
        }
    }
}

// =============================================================================
// Mock Fallback Classifier
// =============================================================================

/// Classifier that returns a fixed label and records classified texts.
pub struct MockClassifier {
    intent: FallbackIntent,
    texts: Mutex<Vec<String>>,
}

impl MockClassifier {
    pub fn returning(intent: FallbackIntent) -> Self {
        Self {
            intent,
            texts: Mutex::new(Vec::new()),
        }
    }

    /// Texts this mock has been asked to classify, in order.
    pub fn texts(&self) -> Vec<String> {
        self.texts.lock().unwrap().clone()
    }

    /// Number of classification calls made.
    pub fn call_count(&self) -> usize {
        self.texts.lock().unwrap().len()
    }
}

#[async_trait]
impl FallbackClassifier for MockClassifier {
    async fn classify(&self, text: &str) -> FallbackIntent {
        self.texts.lock().unwrap().push(text.to_string());
        self.intent.clone()
    }
}

// =============================================================================
// Mock Submission Store
// =============================================================================

/// In-memory submission store, optionally failing every append.
pub struct MockSubmissionStore {
    records: Mutex<Vec<SubmissionRecord>>,
    should_fail: bool,
}

impl MockSubmissionStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            should_fail: false,
        }
    }

    /// Store whose every append fails, simulating an unwritable log.
    pub fn failing() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            should_fail: true,
        }
    }

    /// Records appended so far.
    pub fn records(&self) -> Vec<SubmissionRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl Default for MockSubmissionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SubmissionStore for MockSubmissionStore {
    async fn append(&self, record: &SubmissionRecord) -> Result<()> {
        if self.should_fail {
            return Err(Error::storage("mock store write failure"));
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

// =============================================================================
// Mock LLM Client
// =============================================================================

/// Mock LLM that returns a constant completion, or fails.
pub struct MockLlm {
    response: String,
    should_fail: bool,
}

impl MockLlm {
    /// Mock that always returns the same content.
    pub fn constant(response: &str) -> Self {
        Self {
            response: response.to_string(),
            should_fail: false,
        }
    }

    /// Mock whose every call fails.
    pub fn failing() -> Self {
        Self {
            response: String::new(),
            should_fail: true,
        }
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn complete(&self, prompt: &str) -> Result<LlmResponse> {
        if self.should_fail {
            return Err(Error::classifier("mock LLM failure"));
        }

        Ok(LlmResponse {
            content: self.response.clone(),
            finish_reason: "stop".to_string(),
            usage: LlmUsage {
                prompt_tokens: prompt.len() as u64 / 4,
                completion_tokens: self.response.len() as u64 / 4,
                total_tokens: (prompt.len() + self.response.len()) as u64 / 4,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_resolver_records_queries() {
        let resolver = MockResolver::resolving("greeting", 0.9, "Hi there!");
        let query = ResolveQuery::Text {
            text: "hi".to_string(),
        };

        let resolved = resolver.resolve("s1", &query).await.unwrap();
        assert_eq!(resolved.label, "greeting");
        assert_eq!(resolver.queries(), vec![("s1".to_string(), query)]);
    }

    #[tokio::test]
    async fn failing_store_reports_error() {
        let store = MockSubmissionStore::failing();
        let record = SubmissionRecord {
            action: "support".into(),
            name: "User".into(),
            email: String::new(),
            message: String::new(),
        };

        assert!(store.append(&record).await.is_err());
        assert!(store.records().is_empty());
    }
}
