//! Core configuration for the Techwire trending-news service.
//!
//! Holds the application config loaded from environment variables. The
//! news and language-model API keys are optional: their absence disables
//! the corresponding feature rather than failing startup.

mod app_config;
mod config;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
