//! Single-frame temporal smoothing

use depth_engine::{is_valid_depth, DepthMap};
use ndarray::Zip;

/// Exponential blend of each frame with the previously stabilized one
#[derive(Debug, Clone)]
pub struct TemporalFilter {
    weight: f32,
    previous: Option<DepthMap>,
}

impl TemporalFilter {
    /// `weight` is the share given to the current frame
    pub fn new(weight: f32) -> Self {
        Self {
            weight,
            previous: None,
        }
    }

    /// Stabilize `current` and remember the result for the next call.
    ///
    /// Pixels are blended only when both the current and previous value lie
    /// in the valid band. The first frame, and any frame whose dimensions
    /// differ from the previous one, passes through unchanged.
    pub fn apply(&mut self, current: &DepthMap) -> DepthMap {
        let stabilized = match &self.previous {
            Some(previous) if previous.dims() == current.dims() => {
                let weight = self.weight;
                let values = Zip::from(current.values())
                    .and(previous.values())
                    .map_collect(|&cur, &prev| {
                        if is_valid_depth(cur) && is_valid_depth(prev) {
                            weight * cur + (1.0 - weight) * prev
                        } else {
                            cur
                        }
                    });
                DepthMap::new(values)
            }
            _ => current.clone(),
        };

        self.previous = Some(stabilized.clone());
        stabilized
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    pub fn reset(&mut self) {
        self.previous = None;
    }
}
