//! Core business logic modules
//!
//! Pure calculation logic with no I/O dependencies

pub mod formatter;
pub mod operations;
pub mod record;
pub mod validation;

// Re-export commonly used types
pub use operations::{OperationDescriptor, Resolution, resolve};
pub use record::build_record;
pub use validation::{MathRequest, ValidatedInput, parse_limit, validate};
