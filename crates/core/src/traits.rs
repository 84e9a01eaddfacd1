//! Core traits for Concierge.
//!
//! These traits define the contracts between the gateway's routing logic and
//! its external collaborators. All concrete clients are constructed once at
//! process start and shared behind `Arc`, so fakes can be substituted in
//! tests.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{FallbackIntent, ResolveQuery, ResolvedIntent, SubmissionRecord};

// =============================================================================
// Primary Resolution
// =============================================================================

/// Primary NLU provider: resolves a session-scoped query into an intent.
///
/// Errors are deliberately NOT recovered by callers. A resolver failure fails
/// the chat turn; the fallback path only exists for low-confidence answers,
/// not for an unavailable provider.
#[async_trait]
pub trait IntentResolver: Send + Sync {
    /// Resolve one query within the given session.
    async fn resolve(&self, session_id: &str, query: &ResolveQuery) -> Result<ResolvedIntent>;
}

// =============================================================================
// Fallback Classification
// =============================================================================

/// Secondary classifier consulted when the resolver's confidence is low.
///
/// Infallible at this boundary by construction: implementations must swallow
/// their own errors and return [`FallbackIntent::Irrelevant`] instead.
#[async_trait]
pub trait FallbackClassifier: Send + Sync {
    /// Classify free text into the closed intent set.
    async fn classify(&self, text: &str) -> FallbackIntent;
}

// =============================================================================
// Submission Recording
// =============================================================================

/// Durable append-only store for modal form submissions.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Append one record. At-most-once, fire-and-forget; callers log and
    /// swallow failures.
    async fn append(&self, record: &SubmissionRecord) -> Result<()>;
}

// =============================================================================
// LLM Client
// =============================================================================

/// LLM client interface used by the fallback classifier.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Generate a completion for a single prompt.
    async fn complete(&self, prompt: &str) -> Result<LlmResponse>;
}

/// Response from an LLM.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    /// Generated content.
    pub content: String,
    /// Finish reason.
    pub finish_reason: String,
    /// Token usage.
    pub usage: LlmUsage,
}

/// Token usage from an LLM call.
#[derive(Debug, Clone, Default)]
pub struct LlmUsage {
    /// Prompt tokens.
    pub prompt_tokens: u64,
    /// Completion tokens.
    pub completion_tokens: u64,
    /// Total tokens.
    pub total_tokens: u64,
}
