use config::{Config, ConfigError, Environment, File};
use secrecy::Secret;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub router: RouterConfig,
    pub resolver: ResolverConfig,
    pub classifier: ClassifierConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub enable_cors: bool,
    pub enable_tracing: bool,
    /// Directory with the chat widget's static assets, served at `/`.
    pub static_dir: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RouterConfig {
    /// Hard confidence threshold for the fallback gate. Fixed for the
    /// process lifetime.
    pub confidence_threshold: f32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ResolverConfig {
    /// NLU project/tenant identifier.
    pub project_id: String,
    /// Base URL of the detectIntent REST endpoint.
    pub endpoint: String,
    /// Bearer token for the NLU API.
    pub access_token: Option<Secret<String>>,
    /// Language tag attached to every text query.
    pub language_code: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClassifierConfig {
    /// Provider name: "openai" or "anthropic".
    pub provider: String,
    /// Model identifier.
    pub model: String,
    /// Sampling temperature. Zero for deterministic single-label output.
    pub temperature: f64,
    /// Output token cap; the output is a single label.
    pub max_tokens: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    /// Append-only submission log. Single named destination, no rotation.
    pub submissions_path: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("CONCIERGE_ENV").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            .add_source(File::with_name("config/default"))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(File::with_name("config/local").required(false))
            // Map APP__SERVER__PORT=3000 to app.server.port
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 3000,
                enable_cors: true,
                enable_tracing: true,
                static_dir: Some("static".into()),
            },
            router: RouterConfig {
                confidence_threshold: 0.75,
            },
            resolver: ResolverConfig {
                project_id: "cx-assistant".into(),
                endpoint: "https://dialogflow.googleapis.com".into(),
                access_token: None,
                language_code: "en".into(),
            },
            classifier: ClassifierConfig {
                provider: "openai".into(),
                model: "gpt-4o".into(),
                temperature: 0.0,
                max_tokens: 10,
            },
            store: StoreConfig {
                submissions_path: "conversations.json".into(),
            },
        }
    }
}
