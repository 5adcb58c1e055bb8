//! Run configuration for brandlens: environment-driven settings, the YAML
//! targets file, and the URL denylist applied before fetching.

pub mod app_config;
pub mod config;
pub mod denylist;
pub mod targets;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use denylist::UrlDenylist;
pub use targets::{load_targets, parse_targets, TargetsFile};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read targets file {path}: {source}")]
    TargetsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse targets file: {0}")]
    TargetsFileParse(#[from] serde_yaml::Error),

    #[error("targets validation failed: {0}")]
    Validation(String),
}
