//! Detector configuration

use serde::{Deserialize, Serialize};

/// Coordinator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Frames skipped between processed frames (3 processes every 4th)
    pub frame_skip: u32,

    /// Number of selected-zone distances averaged
    pub history_size: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            frame_skip: 3,
            history_size: 3,
        }
    }
}
