//! Danger level to audio parameters

use obstacle_analyzer::{DangerLevel, ZoneInfo};
use serde::{Deserialize, Serialize};

/// One feedback instruction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioParams {
    pub should_play: bool,
    pub frequency_hz: u32,
    /// Time between beep starts (ms)
    pub interval_ms: u64,
    /// Stereo pan in `[-1.0, 1.0]`
    pub pan: f32,
    pub duration_ms: u32,
}

impl AudioParams {
    pub fn for_zone(info: &ZoneInfo) -> Self {
        Self::for_level(info.danger_level, info.zone.audio_pan())
    }

    pub fn for_level(level: DangerLevel, pan: f32) -> Self {
        let (should_play, frequency_hz, interval_ms, duration_ms) = match level {
            DangerLevel::Safe => (false, 400, 3000, 100),
            DangerLevel::Warning => (true, 500, 800, 100),
            DangerLevel::Caution => (true, 700, 400, 120),
            DangerLevel::Danger => (true, 1000, 150, 180),
        };

        Self {
            should_play,
            frequency_hz,
            interval_ms,
            pan,
            duration_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use obstacle_analyzer::ObstacleZone;

    #[test]
    fn test_table() {
        let warning = AudioParams::for_level(DangerLevel::Warning, 0.0);
        assert_eq!(
            (warning.frequency_hz, warning.interval_ms, warning.duration_ms),
            (500, 800, 100)
        );
        let caution = AudioParams::for_level(DangerLevel::Caution, 0.0);
        assert_eq!(
            (caution.frequency_hz, caution.interval_ms, caution.duration_ms),
            (700, 400, 120)
        );
        let danger = AudioParams::for_level(DangerLevel::Danger, 0.0);
        assert_eq!((danger.frequency_hz, danger.interval_ms, danger.duration_ms), (1000, 150, 180));
        assert!(danger.should_play);
    }

    #[test]
    fn test_safe_is_silent() {
        let safe = AudioParams::for_level(DangerLevel::Safe, 0.0);
        assert!(!safe.should_play);
        assert_eq!(safe.frequency_hz, 400);
    }

    #[test]
    fn test_pan_from_zone() {
        let info = ZoneInfo::new(ObstacleZone::BottomLeft, 1.0, 0.4, 100);
        let params = AudioParams::for_zone(&info);
        assert_eq!(params.pan, -1.0);
        assert_eq!(params.frequency_hz, 1000);
    }
}
