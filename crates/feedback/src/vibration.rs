//! Vibration waveforms
//!
//! Patterns alternate pause and vibrate durations in milliseconds,
//! starting with the initial pause.

use obstacle_analyzer::DangerLevel;

pub const PATTERN_WARNING: [u64; 3] = [0, 100, 600];
pub const PATTERN_CAUTION: [u64; 3] = [0, 150, 450];
pub const PATTERN_DANGER: [u64; 3] = [0, 200, 100];

/// Waveform for a danger level; safe has none
pub fn vibration_pattern(level: DangerLevel) -> Option<&'static [u64]> {
    match level {
        DangerLevel::Safe => None,
        DangerLevel::Warning => Some(&PATTERN_WARNING),
        DangerLevel::Caution => Some(&PATTERN_CAUTION),
        DangerLevel::Danger => Some(&PATTERN_DANGER),
    }
}
