//! Sightline runner support
//!
//! Configuration loading, logging and metrics initialisation, and the
//! frame replay loop used by the `sightline` binary.

mod runner;
mod settings;
mod telemetry;

pub use runner::{drive_detector, list_frames, replay_frames};
pub use settings::{load_config, AppConfig, LoggingConfig, RunnerConfig};
pub use telemetry::{init_logging, install_metrics};

use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("Metrics exporter failed: {0}")]
    Metrics(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
