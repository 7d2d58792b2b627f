//! Core types shared across the crate.
//!
//! - **IDs**: `SessionId` for frontend connections
//! - **Errors**: application error type with thiserror derives
//! - **Config**: server, observability and RPC transport settings

mod config;
mod errors;
mod ids;

pub use config::{Config, ObservabilityConfig, RpcConfig, ServerConfig, CONFIG_PATH_ENV};
pub use errors::{Error, Result};
pub use ids::SessionId;
