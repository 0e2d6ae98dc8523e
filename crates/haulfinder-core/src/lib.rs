//! Shared domain types and configuration for the haulfinder facility
//! directory.

mod app_config;
mod config;
mod facility;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use facility::{
    Address, DebrisAcceptance, Facility, HoursEntry, LatLng, LocationType, OpenHours,
};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid location type: {0}")]
    InvalidLocationType(String),
    #[error("invalid day of week: {0} (expected 0..=6)")]
    InvalidDayOfWeek(u8),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
