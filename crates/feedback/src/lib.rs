//! Obstacle Feedback
//!
//! Turns the selected obstacle zone into sound and vibration:
//! - Danger level to beep frequency, interval, and duration
//! - Procedural sine beep with linear stereo panning
//! - Per-level vibration waveforms
//! - A cancellable loop that repeats beep and vibration until superseded

pub mod config;
pub mod device;
pub mod engine;
pub mod params;
#[cfg(feature = "speaker")]
pub mod speaker;
pub mod synth;
pub mod vibration;

pub use config::FeedbackConfig;
pub use device::{AudioOutput, Haptics, NoHaptics, SilentOutput};
pub use engine::{FeedbackEngine, FeedbackUpdate};
pub use params::AudioParams;
#[cfg(feature = "speaker")]
pub use speaker::SpeakerOutput;
pub use synth::{pan_gains, synthesize_beep, StereoBuffer, SAMPLE_RATE};
pub use vibration::vibration_pattern;

use thiserror::Error;

/// Feedback error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeedbackError {
    #[error("Audio device error: {0}")]
    Audio(String),

    #[error("Haptic device error: {0}")]
    Haptics(String),

    #[error("No tokio runtime available")]
    NoRuntime,

    #[error("Feedback engine released")]
    Released,
}
