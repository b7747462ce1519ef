//! Percentile-based zone statistics

use crate::config::AnalyzerConfig;
use crate::zone::ObstacleZone;
use crate::zone_info::ZoneInfo;

/// Compute a zone's statistics from its valid samples.
///
/// The minimum distance is the sample at the zone's configured low
/// percentile so isolated noisy pixels do not dominate. `samples` is
/// reordered in place.
pub fn zone_statistics(
    zone: ObstacleZone,
    samples: &mut [f32],
    config: &AnalyzerConfig,
) -> ZoneInfo {
    let count = samples.len();
    if count < config.min_zone_samples.max(1) {
        return ZoneInfo::insufficient(zone);
    }

    let index = percentile_index(count, config.percentile(zone));
    let (_, min_distance, _) = samples.select_nth_unstable_by(index, f32::total_cmp);
    let min_distance = *min_distance;

    let sum: f64 = samples.iter().map(|&v| f64::from(v)).sum();
    let avg_distance = (sum / count as f64) as f32;

    ZoneInfo::new(zone, avg_distance, min_distance, count)
}

/// Rank of the `percentile` sample in `count` sorted samples
fn percentile_index(count: usize, percentile: f32) -> usize {
    ((count as f32 * percentile) as usize).min(count.saturating_sub(1))
}
