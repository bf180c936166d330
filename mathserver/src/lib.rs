//! Math history server
//!
//! A small JSON API that evaluates binary arithmetic operations, appends every
//! successful calculation to a history store and serves that history back.

pub mod config;
pub mod core;
pub mod error;
pub mod services;
pub mod traits;
pub mod web;
pub mod webserver_impl;

/// Service name attached to structured log events
pub const SERVICE_NAME: &str = "mathserver";

// Re-export main types
pub use config::{ServerConfig, StoreKind};
pub use error::{ApiError, StoreError, StoreResult, WebServerError, WebServerResult};
pub use webserver_impl::{AppState, WebServer};

// Re-export trait definitions
pub use traits::{DEFAULT_HISTORY_LIMIT, HistoryStore, MAX_HISTORY_LIMIT};

// Re-export service implementations
pub use services::{FileHistoryStore, InMemoryHistoryStore};
