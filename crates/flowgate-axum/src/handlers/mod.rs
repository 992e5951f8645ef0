//! HTTP request handlers.
//!
//! One module per resource. Handlers translate between HTTP and the
//! core services held in [`AppState`](crate::state::AppState); nothing
//! here talks to infrastructure directly.

pub mod artifacts;
pub mod logs;
pub mod workflows;
