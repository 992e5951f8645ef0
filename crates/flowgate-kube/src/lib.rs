#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod client;
mod config;
mod error;
mod http;
mod url;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::{DefaultKubeClient, KubeClient};

// Configuration
pub use config::KubeConfig;

// Errors
pub use error::{KubeError, KubeResult};

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;
