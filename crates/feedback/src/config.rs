//! Feedback configuration

use serde::{Deserialize, Serialize};

use crate::synth::{DEFAULT_AMPLITUDE, SAMPLE_RATE};

/// Feedback engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    /// PCM sample rate (Hz)
    pub sample_rate: u32,
    /// Peak amplitude as a fraction of full scale
    pub amplitude: f32,
    /// Minimum distance change (meters) that restarts a playing loop
    pub hysteresis_meters: f32,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            amplitude: DEFAULT_AMPLITUDE,
            hysteresis_meters: 0.30,
        }
    }
}
