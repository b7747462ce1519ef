//! Output device seams

use crate::synth::StereoBuffer;
use crate::FeedbackError;

/// One-shot PCM playback device
pub trait AudioOutput: Send {
    /// Start playing `buffer`; returns without waiting for completion
    fn play(&mut self, buffer: &StereoBuffer) -> Result<(), FeedbackError>;

    /// Stop current playback and release its resources
    fn stop(&mut self) -> Result<(), FeedbackError>;
}

/// Vibration motor
pub trait Haptics: Send {
    fn has_vibrator(&self) -> bool;

    /// Play a pause/vibrate waveform once
    fn vibrate(&mut self, pattern: &[u64]) -> Result<(), FeedbackError>;

    fn cancel(&mut self) -> Result<(), FeedbackError>;
}

/// Audio output that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentOutput;

impl AudioOutput for SilentOutput {
    fn play(&mut self, _buffer: &StereoBuffer) -> Result<(), FeedbackError> {
        Ok(())
    }

    fn stop(&mut self) -> Result<(), FeedbackError> {
        Ok(())
    }
}

/// Device without a vibrator
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHaptics;

impl Haptics for NoHaptics {
    fn has_vibrator(&self) -> bool {
        false
    }

    fn vibrate(&mut self, _pattern: &[u64]) -> Result<(), FeedbackError> {
        Ok(())
    }

    fn cancel(&mut self) -> Result<(), FeedbackError> {
        Ok(())
    }
}
