//! Procedural stereo beep synthesis

use std::f64::consts::PI;

use crate::params::AudioParams;

/// Output sample rate (Hz)
pub const SAMPLE_RATE: u32 = 44_100;

/// Peak amplitude, kept below full scale to avoid clipping
pub const DEFAULT_AMPLITUDE: f32 = 0.6;

/// Interleaved 16-bit stereo PCM
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StereoBuffer {
    pub sample_rate: u32,
    /// `[L0, R0, L1, R1, ...]`
    pub samples: Vec<i16>,
}

impl StereoBuffer {
    /// Samples per channel
    pub fn frames(&self) -> usize {
        self.samples.len() / 2
    }

    pub fn duration_ms(&self) -> u64 {
        if self.sample_rate == 0 {
            return 0;
        }
        self.frames() as u64 * 1000 / u64::from(self.sample_rate)
    }

    pub fn left(&self) -> impl Iterator<Item = i16> + '_ {
        self.samples.iter().step_by(2).copied()
    }

    pub fn right(&self) -> impl Iterator<Item = i16> + '_ {
        self.samples.iter().skip(1).step_by(2).copied()
    }
}

/// Linear pan law: the near side stays at unit gain, the far side is attenuated
pub fn pan_gains(pan: f32) -> (f32, f32) {
    let pan = pan.clamp(-1.0, 1.0);
    let left = if pan <= 0.0 { 1.0 } else { 1.0 - pan };
    let right = if pan >= 0.0 { 1.0 } else { 1.0 + pan };
    (left, right)
}

/// Synthesize one sine beep for `params`
pub fn synthesize_beep(params: &AudioParams, sample_rate: u32, amplitude: f32) -> StereoBuffer {
    let frames = (u64::from(params.duration_ms) * u64::from(sample_rate) / 1000) as usize;
    let (left_gain, right_gain) = pan_gains(params.pan);
    let step = 2.0 * PI * f64::from(params.frequency_hz) / f64::from(sample_rate.max(1));
    let peak = f64::from(i16::MAX) * f64::from(amplitude.clamp(0.0, 1.0));

    let mut samples = Vec::with_capacity(frames * 2);
    for i in 0..frames {
        let sample = ((i as f64 * step).sin() * peak) as i16;
        samples.push((f32::from(sample) * left_gain) as i16);
        samples.push((f32::from(sample) * right_gain) as i16);
    }

    StereoBuffer {
        sample_rate,
        samples,
    }
}
