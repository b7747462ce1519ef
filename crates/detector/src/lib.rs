//! Obstacle Detection Coordinator
//!
//! Routes camera frames through depth estimation, zone analysis, distance
//! smoothing, and feedback while detection is active.

mod config;
mod coordinator;
mod history;

pub use config::DetectorConfig;
pub use coordinator::{FrameOutcome, ObstacleDetector};
pub use history::DistanceHistory;

use thiserror::Error;

/// Detector error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DetectorError {
    #[error("Depth model not ready: {0}")]
    ModelNotReady(String),

    #[error("No tokio runtime available")]
    NoRuntime,
}
