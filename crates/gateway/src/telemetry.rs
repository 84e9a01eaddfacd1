//! Logging and metrics bootstrap.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use concierge_core::{Error, Result};

/// Configure stdout tracing with an env-filter.
///
/// `RUST_LOG` overrides the default level.
pub fn configure_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info,concierge=debug".into()),
    );

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

/// Initialize Prometheus recorder and return the handle.
pub fn setup_metrics_recorder() -> Result<PrometheusHandle> {
    let builder = PrometheusBuilder::new();

    let handle = builder
        .install_recorder()
        .map_err(|e| Error::internal(format!("Failed to install Prometheus recorder: {}", e)))?;

    tracing::info!("Prometheus metrics recorder initialized");
    Ok(handle)
}
