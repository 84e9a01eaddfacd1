#![deny(unused)]
//! Core types, traits, and error definitions for Concierge.
//!
//! This crate provides the foundational building blocks shared across the
//! resolver, classifier, store, and gateway layers.

pub mod config;
pub mod error;
pub mod mocks;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use traits::*;
pub use types::*;
