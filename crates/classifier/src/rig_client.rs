//! Rig LLM client adapter.
//!
//! Wraps Rig's Agent for integration with our LlmClient trait.

use async_trait::async_trait;

use concierge_core::{
    traits::{LlmClient, LlmResponse, LlmUsage},
    Error, Result,
};

// Import required Rig traits
use rig::client::{CompletionClient, ProviderClient};
use rig::completion::Prompt;

/// Provider type for Rig clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RigProvider {
    OpenAI,
    Anthropic,
}

/// Configuration for Rig client.
#[derive(Debug, Clone)]
pub struct RigConfig {
    /// Provider to use.
    pub provider: RigProvider,
    /// Model name.
    pub model: String,
    /// System prompt.
    pub system_prompt: Option<String>,
    /// Temperature (0.0 - 1.0).
    pub temperature: Option<f64>,
    /// Max tokens.
    pub max_tokens: Option<u64>,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            provider: RigProvider::OpenAI,
            model: "gpt-4o".to_string(),
            system_prompt: None,
            temperature: Some(0.0),
            max_tokens: Some(10),
        }
    }
}

impl RigConfig {
    /// Create config for OpenAI.
    pub fn openai(model: impl Into<String>) -> Self {
        Self {
            provider: RigProvider::OpenAI,
            model: model.into(),
            ..Default::default()
        }
    }

    /// Create config for Anthropic.
    pub fn anthropic(model: impl Into<String>) -> Self {
        Self {
            provider: RigProvider::Anthropic,
            model: model.into(),
            ..Default::default()
        }
    }

    /// Set system prompt.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Set temperature.
    pub fn with_temperature(mut self, temp: f64) -> Self {
        self.temperature = Some(temp);
        self
    }

    /// Set the output token cap.
    pub fn with_max_tokens(mut self, max_tokens: u64) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Rig-based LLM client.
///
/// Wraps Rig's provider clients to implement our LlmClient trait. The
/// classifier only ever needs single-turn completions with a tiny output
/// cap, so this stays deliberately minimal.
pub struct RigLlmClient {
    config: RigConfig,
}

impl RigLlmClient {
    /// Create a new Rig client with the given configuration.
    pub fn new(config: RigConfig) -> Self {
        Self { config }
    }

    /// Call OpenAI via Rig.
    async fn call_openai(&self, prompt: &str) -> Result<LlmResponse> {
        use rig::providers::openai;

        // Check env var first to avoid panic
        if std::env::var("OPENAI_API_KEY").is_err() {
            return Err(Error::classifier("OPENAI_API_KEY not set"));
        }

        let client = openai::Client::from_env();

        let mut agent_builder = client.agent(&self.config.model);

        if let Some(ref system) = self.config.system_prompt {
            agent_builder = agent_builder.preamble(system);
        }
        if let Some(temperature) = self.config.temperature {
            agent_builder = agent_builder.temperature(temperature);
        }
        if let Some(max_tokens) = self.config.max_tokens {
            agent_builder = agent_builder.max_tokens(max_tokens);
        }

        let agent = agent_builder.build();

        let response: String = agent
            .prompt(prompt)
            .await
            .map_err(|e| Error::classifier(format!("OpenAI error: {}", e)))?;

        Ok(self.wrap_response(prompt, response))
    }

    /// Call Anthropic via Rig.
    async fn call_anthropic(&self, prompt: &str) -> Result<LlmResponse> {
        use rig::providers::anthropic;

        // Check env var first to avoid panic
        if std::env::var("ANTHROPIC_API_KEY").is_err() {
            return Err(Error::classifier("ANTHROPIC_API_KEY not set"));
        }

        let client = anthropic::Client::from_env();

        let mut agent_builder = client.agent(&self.config.model);

        if let Some(ref system) = self.config.system_prompt {
            agent_builder = agent_builder.preamble(system);
        }
        if let Some(temperature) = self.config.temperature {
            agent_builder = agent_builder.temperature(temperature);
        }
        if let Some(max_tokens) = self.config.max_tokens {
            agent_builder = agent_builder.max_tokens(max_tokens);
        }

        let agent = agent_builder.build();

        let response: String = agent
            .prompt(prompt)
            .await
            .map_err(|e| Error::classifier(format!("Anthropic error: {}", e)))?;

        Ok(self.wrap_response(prompt, response))
    }

    fn wrap_response(&self, prompt: &str, content: String) -> LlmResponse {
        LlmResponse {
            usage: LlmUsage {
                prompt_tokens: (prompt.len() / 4) as u64,
                completion_tokens: (content.len() / 4) as u64,
                total_tokens: ((prompt.len() + content.len()) / 4) as u64,
            },
            finish_reason: "stop".to_string(),
            content,
        }
    }
}

#[async_trait]
impl LlmClient for RigLlmClient {
    async fn complete(&self, prompt: &str) -> Result<LlmResponse> {
        tracing::debug!(
            provider = ?self.config.provider,
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Calling LLM"
        );

        match self.config.provider {
            RigProvider::OpenAI => self.call_openai(prompt).await,
            RigProvider::Anthropic => self.call_anthropic(prompt).await,
        }
    }
}
