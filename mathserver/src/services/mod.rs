//! Service implementations
//!
//! History store backends for production use

pub mod file_history_store;
pub mod history_store;

// Re-export service implementations
pub use file_history_store::FileHistoryStore;
pub use history_store::{HistoryIndex, InMemoryHistoryStore};

#[cfg(test)]
mod tests;
