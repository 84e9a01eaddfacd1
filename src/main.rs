#![deny(unused)]
//! Concierge - customer-experience chat gateway
//!
//! Routes inbound chat turns through a two-stage intent pipeline: a primary
//! NLU resolver gated by a confidence threshold, with an LLM classifier as
//! the low-confidence fallback. Modal form submissions are appended to a
//! durable JSONL log.

use std::sync::Arc;

use concierge_classifier::LlmClassifier;
use concierge_core::config::AppConfig;
use concierge_gateway::{GatewayConfig, GatewayServer, IntentRouter};
use concierge_nlu::DialogflowResolver;
use concierge_store::FileSubmissionStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    concierge_gateway::configure_tracing();

    tracing::info!("Starting Concierge v{}", env!("CARGO_PKG_VERSION"));

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load config files, using defaults");
            AppConfig::default()
        }
    };

    // =========================================================================
    // Provider clients: constructed once, shared for the process lifetime
    // =========================================================================
    let resolver = Arc::new(DialogflowResolver::new(config.resolver.clone()));
    tracing::info!(
        project_id = %config.resolver.project_id,
        "Primary intent resolver initialized"
    );

    let classifier = Arc::new(LlmClassifier::from_config(&config.classifier));
    tracing::info!(
        provider = %config.classifier.provider,
        model = %config.classifier.model,
        "Fallback classifier initialized"
    );

    let store = Arc::new(FileSubmissionStore::new(&config.store.submissions_path));
    tracing::info!(
        path = %config.store.submissions_path,
        "Submission log initialized"
    );

    // =========================================================================
    // Router and gateway
    // =========================================================================
    let router = IntentRouter::new(resolver, classifier, config.router.confidence_threshold);
    tracing::info!(
        confidence_threshold = config.router.confidence_threshold,
        "Intent router initialized"
    );

    let gateway_config = GatewayConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        enable_cors: config.server.enable_cors,
        enable_tracing: config.server.enable_tracing,
        static_dir: config.server.static_dir.clone(),
    };

    let metrics_handle = concierge_gateway::setup_metrics_recorder()?;

    GatewayServer::new(gateway_config, router, store)
        .with_metrics(metrics_handle)
        .run()
        .await?;

    Ok(())
}
