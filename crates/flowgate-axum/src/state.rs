//! Shared application state type.

use std::sync::Arc;

use crate::bootstrap::GatewayContext;

/// Application state shared across all handlers: an Arc-wrapped
/// [`GatewayContext`] holding the core services.
pub type AppState = Arc<GatewayContext>;
