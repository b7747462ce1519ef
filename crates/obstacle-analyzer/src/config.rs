//! Analyzer configuration

use serde::{Deserialize, Serialize};

use crate::zone::ObstacleZone;

/// Zone analysis configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Weight of the current frame in the temporal blend
    pub temporal_weight: f32,

    /// Fraction of each dimension excluded at every border
    pub margin_ratio: f32,

    /// Zones with fewer valid samples are reported as safe
    pub min_zone_samples: usize,

    /// Percentile used as the zone minimum, indexed by `ObstacleZone::index()`
    pub percentiles: [f32; 9],

    /// Ranking multiplier, indexed by `ObstacleZone::index()`
    pub priority_penalties: [f32; 9],
}

impl AnalyzerConfig {
    pub fn percentile(&self, zone: ObstacleZone) -> f32 {
        self.percentiles[zone.index()]
    }

    pub fn priority_penalty(&self, zone: ObstacleZone) -> f32 {
        self.priority_penalties[zone.index()]
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            temporal_weight: 0.7,
            margin_ratio: 0.03,
            min_zone_samples: 50,
            //            TL     TC     TR     ML     MC     MR     BL     BC     BR
            percentiles: [0.03, 0.03, 0.03, 0.02, 0.01, 0.02, 0.03, 0.015, 0.03],
            priority_penalties: [1.2, 0.85, 1.2, 0.9, 0.7, 0.9, 1.3, 0.75, 1.3],
        }
    }
}
