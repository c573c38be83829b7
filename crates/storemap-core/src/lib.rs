//! Shared domain types and configuration for storemap.
//!
//! Holds the geographic primitives, the viewport fitting logic, and the
//! environment-driven application configuration consumed by the CLI and by
//! library embedders.

pub mod app_config;
pub mod config;
pub mod geo;
pub mod viewport;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{GeoPoint, Region, Span};
pub use viewport::{fit, fit_with, FitConfig};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
