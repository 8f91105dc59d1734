use thiserror::Error;

mod app_config;
mod config;
pub mod report;
pub mod slug;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use report::{MigrationReport, RecordOutcome, RecordStatus};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
