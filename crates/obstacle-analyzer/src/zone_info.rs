//! Per-zone analysis result

use serde::{Deserialize, Serialize};

use crate::danger::DangerLevel;
use crate::zone::ObstacleZone;

/// Statistics for one zone of one depth map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneInfo {
    pub zone: ObstacleZone,
    /// Mean of the valid samples (meters)
    pub avg_distance: f32,
    /// Percentile-derived minimum (meters)
    pub min_distance: f32,
    /// Number of valid samples
    pub pixel_count: usize,
    pub danger_level: DangerLevel,
}

impl ZoneInfo {
    pub fn new(
        zone: ObstacleZone,
        avg_distance: f32,
        min_distance: f32,
        pixel_count: usize,
    ) -> Self {
        Self {
            zone,
            avg_distance,
            min_distance,
            pixel_count,
            danger_level: Self::calculate_danger_level(min_distance),
        }
    }

    /// Result for a zone without enough evidence; reports no pixels so the
    /// zone cannot be mistaken for a measured one
    pub fn insufficient(zone: ObstacleZone) -> Self {
        Self {
            zone,
            avg_distance: f32::MAX,
            min_distance: f32::MAX,
            pixel_count: 0,
            danger_level: DangerLevel::Safe,
        }
    }

    pub fn calculate_danger_level(min_distance: f32) -> DangerLevel {
        DangerLevel::from_distance(min_distance)
    }

    /// `min_distance * priority`; lower is riskier
    pub fn risk_score(&self) -> f32 {
        self.min_distance * f32::from(self.zone.priority())
    }

    pub fn requires_attention(&self) -> bool {
        self.danger_level != DangerLevel::Safe
    }

    /// Same zone with a replaced minimum distance and re-derived danger level
    pub fn with_min_distance(&self, min_distance: f32) -> Self {
        Self {
            min_distance,
            danger_level: Self::calculate_danger_level(min_distance),
            ..*self
        }
    }

    /// One-line status, e.g. `DANGER - Center: 0.30m`
    pub fn summary(&self) -> String {
        if self.requires_attention() {
            format!(
                "{} - {}: {:.2}m",
                self.danger_level.label(),
                self.zone.label(),
                self.min_distance
            )
        } else {
            "Path clear".to_string()
        }
    }
}
