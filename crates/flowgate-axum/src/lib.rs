#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod bootstrap;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod sse;
pub mod state;

pub use bootstrap::{CorsConfig, GatewayContext, ServerConfig, bootstrap, start_server};
pub use error::HttpError;
pub use routes::{create_router, create_spa_router};
pub use state::AppState;

// Silence unused dev-dependency warnings (integration tests in tests/)
#[cfg(test)]
use async_trait as _;
#[cfg(test)]
use http_body_util as _;
#[cfg(test)]
use serde_json as _;
#[cfg(test)]
use tokio_test as _;
#[cfg(test)]
use tower as _;
