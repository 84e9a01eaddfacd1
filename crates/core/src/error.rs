//! Error types for Concierge.

use thiserror::Error;

/// Result type alias using Concierge's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for Concierge.
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Gateway Errors
    // =========================================================================
    #[error("Gateway error: {0}")]
    Gateway(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // =========================================================================
    // Resolver Errors
    // =========================================================================
    /// The primary NLU provider failed or was unreachable. Never recovered
    /// locally: a failing resolver fails the whole chat turn.
    #[error("Resolver error: {0}")]
    Resolver(String),

    // =========================================================================
    // Classifier Errors
    // =========================================================================
    /// The fallback LLM failed. Always swallowed at the classifier boundary
    /// and collapsed into the `irrelevant` label.
    #[error("Classifier error: {0}")]
    Classifier(String),

    // =========================================================================
    // Store Errors
    // =========================================================================
    #[error("Storage error: {0}")]
    Storage(String),

    // =========================================================================
    // Generic Errors
    // =========================================================================
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Create a gateway error.
    pub fn gateway(msg: impl Into<String>) -> Self {
        Self::Gateway(msg.into())
    }

    /// Create an invalid request error.
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Create a resolver error.
    pub fn resolver(msg: impl Into<String>) -> Self {
        Self::Resolver(msg.into())
    }

    /// Create a classifier error.
    pub fn classifier(msg: impl Into<String>) -> Self {
        Self::Classifier(msg.into())
    }

    /// Create a storage error.
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create an internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
