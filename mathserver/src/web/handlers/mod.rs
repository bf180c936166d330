//! Request handlers

pub mod api;

pub use api::{api_info, calculate, get_calculation, health_check, history};
