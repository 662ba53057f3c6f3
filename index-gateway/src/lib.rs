//! # Index Gateway
//!
//! HTTP entry point for the index gateway: configuration, logging,
//! dependency wiring and the route handlers.

pub mod config;
pub mod http;
pub mod logging;

pub use config::{AppConfig, Dependencies, LoggingConfig};

use index_gateway_repository::IndexError;
use index_gateway_service::GatewayError;
use thiserror::Error;

/// Errors that can occur during startup or while serving.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Gateway error.
    #[error("Gateway error: {0}")]
    GatewayError(#[from] GatewayError),

    /// Index error.
    #[error("Index error: {0}")]
    IndexError(#[from] IndexError),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
