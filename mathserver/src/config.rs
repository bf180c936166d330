//! Runtime configuration
//!
//! Every flag can also be supplied through the environment (and therefore a
//! `.env` file); the port honours `PORT` like most hosting platforms expect.

use clap::{Parser, ValueEnum};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use shared::logging::parse_log_level;
use shared::{SharedError, SharedResult};

/// History store backend
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreKind {
    /// Process-lifetime history
    Memory,
    /// JSON-lines journal on disk
    File,
}

/// Command line / environment configuration
#[derive(Parser, Debug, Clone)]
#[command(name = "mathserver")]
#[command(about = "Arithmetic HTTP API with persistent calculation history")]
pub struct ServerConfig {
    /// Port for the HTTP server
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Interface to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// History store backend
    #[arg(long, env = "MATH_STORE", value_enum, default_value_t = StoreKind::Memory)]
    pub store: StoreKind,

    /// Journal file used by the file store
    #[arg(long, env = "MATH_DATA_FILE", default_value = "./data/calculations.jsonl")]
    pub data_file: PathBuf,
}

impl ServerConfig {
    /// Normalize the log level and check store settings
    pub fn validate(mut self) -> SharedResult<Self> {
        self.log_level = parse_log_level(&self.log_level)?;

        if self.store == StoreKind::File && self.data_file.as_os_str().is_empty() {
            return Err(SharedError::InvalidConfig {
                field: "data_file".to_string(),
                value: String::new(),
            });
        }

        Ok(self)
    }

    pub fn bind_address(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
