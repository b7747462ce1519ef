//! Obstacle Zone Analysis
//!
//! Reduces a metric depth map to the single most relevant obstacle:
//! - Temporal smoothing against the previous frame
//! - 3x3 directional zoning with an excluded border margin
//! - Percentile-based per-zone minimum distance
//! - Priority-weighted danger ranking

pub mod analyzer;
pub mod config;
pub mod danger;
pub mod stats;
pub mod temporal;
pub mod zone;
pub mod zone_info;
pub mod zoning;

pub use analyzer::{find_most_dangerous_zone, ObstacleAnalyzer};
pub use config::AnalyzerConfig;
pub use danger::DangerLevel;
pub use temporal::TemporalFilter;
pub use zone::ObstacleZone;
pub use zone_info::ZoneInfo;
pub use zoning::{ZoneGrid, ZoneSamples};

use thiserror::Error;

/// Analyzer error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyzerError {
    #[error("Depth map is empty")]
    EmptyMap,

    #[error("Depth map {height}x{width} too small for a 3x3 zone grid")]
    TooSmall { height: usize, width: usize },

    #[error("No zone statistics produced")]
    NoZones,
}
