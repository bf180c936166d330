//! Shared error types for the math history service

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Invalid configuration: {field} = {value}")]
    InvalidConfig { field: String, value: String },

    #[error("Invalid log level: {level}")]
    InvalidLogLevel { level: String },
}

pub type SharedResult<T> = Result<T, SharedError>;
