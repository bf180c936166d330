//! Shared types for the math history service
//!
//! Holds the persisted calculation record model, the shared error type and
//! the tracing bootstrap used by the server binary.

pub mod errors;
pub mod logging;
pub mod types;

pub use errors::*;
pub use types::*;
