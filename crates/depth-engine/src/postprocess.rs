//! Raw network output to metric depth

use tracing::debug;

use crate::map::{DepthMap, DEPTH_MAX_METERS, DEPTH_MIN_METERS};
use crate::DepthError;

/// Minimum raw dynamic range below which a frame is considered flat
pub const RANGE_EPSILON: f32 = 1e-4;

/// Depth reported everywhere for a flat frame (meters)
pub const FALLBACK_DEPTH_METERS: f32 = 0.3;

/// Rescale raw relative depth linearly from `[min, max]` of its finite
/// values into `[DEPTH_MIN_METERS, DEPTH_MAX_METERS]`, clamped.
///
/// A frame whose finite range is below `RANGE_EPSILON` (or that has no
/// finite value at all) yields `FALLBACK_DEPTH_METERS` everywhere.
/// Non-finite raw values become NaN.
pub fn normalize_raw_depth(
    raw: &[f32],
    height: usize,
    width: usize,
) -> Result<DepthMap, DepthError> {
    let expected = height * width;
    if raw.len() != expected {
        return Err(DepthError::InvalidLength {
            expected,
            actual: raw.len(),
        });
    }

    let (min_raw, max_raw) = raw
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));

    let range = max_raw - min_raw;
    if range < RANGE_EPSILON {
        debug!("Raw depth range {} below epsilon, using fallback depth", range);
        return Ok(DepthMap::filled(height, width, FALLBACK_DEPTH_METERS));
    }

    let span = DEPTH_MAX_METERS - DEPTH_MIN_METERS;
    let values = raw
        .iter()
        .map(|&v| {
            if v.is_finite() {
                let normalized = (v - min_raw) / range;
                (DEPTH_MIN_METERS + normalized * span).clamp(DEPTH_MIN_METERS, DEPTH_MAX_METERS)
            } else {
                f32::NAN
            }
        })
        .collect();

    DepthMap::from_vec(height, width, values)
}
