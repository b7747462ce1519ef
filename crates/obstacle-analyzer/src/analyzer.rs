//! Obstacle analyzer: depth map in, most relevant zone out

use depth_engine::DepthMap;
use tracing::debug;

use crate::config::AnalyzerConfig;
use crate::stats::zone_statistics;
use crate::temporal::TemporalFilter;
use crate::zone::ObstacleZone;
use crate::zone_info::ZoneInfo;
use crate::zoning::ZoneGrid;
use crate::AnalyzerError;

/// Stateful zone analyzer; owns the previous stabilized frame
pub struct ObstacleAnalyzer {
    config: AnalyzerConfig,
    filter: TemporalFilter,
}

impl ObstacleAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        let filter = TemporalFilter::new(config.temporal_weight);
        Self { config, filter }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Most relevant zone of `map`, or `None` if the map cannot be analyzed
    pub fn analyze_depth_map(&mut self, map: &DepthMap) -> Option<ZoneInfo> {
        match self.try_analyze(map) {
            Ok(info) => Some(info),
            Err(e) => {
                debug!("Zone analysis skipped: {}", e);
                None
            }
        }
    }

    pub fn try_analyze(&mut self, map: &DepthMap) -> Result<ZoneInfo, AnalyzerError> {
        let zones = self.analyze_zones(map)?;
        let best = find_most_dangerous_zone(&zones, &self.config).ok_or(AnalyzerError::NoZones)?;
        debug!(
            "Selected zone {:?}: min {:.2}m, {:?}",
            best.zone, best.min_distance, best.danger_level
        );
        Ok(best)
    }

    /// Temporal filtering followed by statistics for all nine zones
    pub fn analyze_zones(&mut self, map: &DepthMap) -> Result<Vec<ZoneInfo>, AnalyzerError> {
        if map.is_empty() {
            return Err(AnalyzerError::EmptyMap);
        }
        let grid = ZoneGrid::new(map.height(), map.width(), self.config.margin_ratio)?;

        let stabilized = self.filter.apply(map);
        let mut samples = grid.collect_samples(&stabilized);

        Ok(ObstacleZone::ALL
            .iter()
            .map(|&zone| zone_statistics(zone, samples.get_mut(zone), &self.config))
            .collect())
    }

    /// Forget the previous frame
    pub fn reset(&mut self) {
        self.filter.reset();
    }
}

impl Default for ObstacleAnalyzer {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}

/// Pick the zone needing attention with the lowest penalized risk score.
///
/// Falls back to the middle-center zone, then to the first zone, when no
/// zone requires attention.
pub fn find_most_dangerous_zone(zones: &[ZoneInfo], config: &AnalyzerConfig) -> Option<ZoneInfo> {
    let ranked = zones
        .iter()
        .filter(|z| z.requires_attention())
        .min_by(|a, b| {
            let a_score = a.risk_score() * config.priority_penalty(a.zone);
            let b_score = b.risk_score() * config.priority_penalty(b.zone);
            a_score.total_cmp(&b_score)
        });

    ranked
        .or_else(|| zones.iter().find(|z| z.zone == ObstacleZone::MiddleCenter))
        .or_else(|| zones.first())
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::danger::DangerLevel;

    fn center_obstacle_map(size: usize, near: f32, far: f32) -> DepthMap {
        let grid = ZoneGrid::new(size, size, 0.03).unwrap();
        DepthMap::from_fn(size, size, |r, c| match grid.zone_for_pixel(r, c) {
            Some(ObstacleZone::MiddleCenter) => near,
            _ => far,
        })
    }

    #[test]
    fn test_center_obstacle_end_to_end() {
        let mut analyzer = ObstacleAnalyzer::default();
        let info = analyzer.analyze_depth_map(&center_obstacle_map(120, 0.3, 5.0)).unwrap();
        assert_eq!(info.zone, ObstacleZone::MiddleCenter);
        assert_eq!(info.danger_level, DangerLevel::Danger);
        assert!((info.min_distance - 0.3).abs() < 1e-3);
    }

    #[test]
    fn test_clear_scene_defaults_to_center() {
        let mut analyzer = ObstacleAnalyzer::default();
        let info = analyzer.analyze_depth_map(&DepthMap::filled(60, 60, 4.0)).unwrap();
        assert_eq!(info.zone, ObstacleZone::MiddleCenter);
        assert_eq!(info.danger_level, DangerLevel::Safe);
    }

    #[test]
    fn test_sparse_zones_are_safe() {
        // 6x6 cells hold fewer than 50 samples each
        let mut analyzer = ObstacleAnalyzer::default();
        let zones = analyzer.analyze_zones(&DepthMap::filled(18, 18, 0.3)).unwrap();
        assert!(zones.iter().all(|z| z.danger_level == DangerLevel::Safe));
    }

    #[test]
    fn test_center_beats_corner_at_equal_distance() {
        let config = AnalyzerConfig::default();
        let zones = [
            ZoneInfo::new(ObstacleZone::BottomLeft, 0.5, 0.4, 100),
            ZoneInfo::new(ObstacleZone::MiddleCenter, 0.5, 0.4, 100),
        ];
        let best = find_most_dangerous_zone(&zones, &config).unwrap();
        assert_eq!(best.zone, ObstacleZone::MiddleCenter);
    }

    #[test]
    fn test_no_attention_falls_back_to_first() {
        let config = AnalyzerConfig::default();
        let zones = [ZoneInfo::insufficient(ObstacleZone::TopRight)];
        assert_eq!(find_most_dangerous_zone(&zones, &config).unwrap().zone, ObstacleZone::TopRight);
        assert!(find_most_dangerous_zone(&[], &config).is_none());
    }

    #[test]
    fn test_empty_and_tiny_maps() {
        let mut analyzer = ObstacleAnalyzer::default();
        assert!(analyzer.analyze_depth_map(&DepthMap::filled(0, 0, 1.0)).is_none());
        assert_eq!(
            analyzer.try_analyze(&DepthMap::filled(2, 2, 1.0)),
            Err(AnalyzerError::TooSmall { height: 2, width: 2 })
        );
    }

    #[test]
    fn test_temporal_state_carries_between_frames() {
        let mut analyzer = ObstacleAnalyzer::default();
        analyzer.analyze_depth_map(&DepthMap::filled(60, 60, 2.0));
        // 0.7 * 0.4 + 0.3 * 2.0 = 0.88
        let info = analyzer.analyze_depth_map(&DepthMap::filled(60, 60, 0.4)).unwrap();
        assert!((info.min_distance - 0.88).abs() < 1e-4);
        assert_eq!(info.danger_level, DangerLevel::Warning);

        analyzer.reset();
        let info = analyzer.analyze_depth_map(&DepthMap::filled(60, 60, 0.4)).unwrap();
        assert_eq!(info.danger_level, DangerLevel::Danger);
    }
}
