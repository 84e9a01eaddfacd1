#![deny(unused)]
//! HTTP gateway and intent router for Concierge.
//!
//! This crate provides the HTTP entry point for the system and the
//! confidence-gated two-stage routing logic at its core.

pub mod router;
pub mod server;
pub mod telemetry;

pub use router::IntentRouter;
pub use server::{GatewayConfig, GatewayServer};
pub use telemetry::{configure_tracing, setup_metrics_recorder};
