//! 3x3 zone partition of a depth map interior

use depth_engine::{is_valid_depth, DepthMap};

use crate::zone::ObstacleZone;
use crate::AnalyzerError;

/// Pixel-to-zone mapping for one map size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneGrid {
    height: usize,
    width: usize,
    margin_rows: usize,
    margin_cols: usize,
    cell_height: usize,
    cell_width: usize,
}

impl ZoneGrid {
    /// Grid for a `height` x `width` map with `margin_ratio` of each
    /// dimension excluded at every edge
    pub fn new(height: usize, width: usize, margin_ratio: f32) -> Result<Self, AnalyzerError> {
        if height == 0 || width == 0 {
            return Err(AnalyzerError::EmptyMap);
        }

        let margin_rows = (height as f32 * margin_ratio) as usize;
        let margin_cols = (width as f32 * margin_ratio) as usize;
        let valid_height = height.saturating_sub(2 * margin_rows);
        let valid_width = width.saturating_sub(2 * margin_cols);
        let cell_height = valid_height / 3;
        let cell_width = valid_width / 3;

        if cell_height == 0 || cell_width == 0 {
            return Err(AnalyzerError::TooSmall { height, width });
        }

        Ok(Self {
            height,
            width,
            margin_rows,
            margin_cols,
            cell_height,
            cell_width,
        })
    }

    pub fn margins(&self) -> (usize, usize) {
        (self.margin_rows, self.margin_cols)
    }

    /// Zone owning pixel `(row, col)`, `None` inside the margin or out of bounds.
    /// The last row and column of cells absorb the division remainder.
    pub fn zone_for_pixel(&self, row: usize, col: usize) -> Option<ObstacleZone> {
        if row < self.margin_rows
            || col < self.margin_cols
            || row >= self.height - self.margin_rows
            || col >= self.width - self.margin_cols
        {
            return None;
        }

        let zone_row = ((row - self.margin_rows) / self.cell_height).min(2);
        let zone_col = ((col - self.margin_cols) / self.cell_width).min(2);
        ObstacleZone::from_grid(zone_row, zone_col)
    }

    /// Valid depth samples of `map` grouped by zone
    pub fn collect_samples(&self, map: &DepthMap) -> ZoneSamples {
        let mut samples = ZoneSamples::default();
        for ((row, col), &value) in map.values().indexed_iter() {
            if !is_valid_depth(value) {
                continue;
            }
            if let Some(zone) = self.zone_for_pixel(row, col) {
                samples.0[zone.index()].push(value);
            }
        }
        samples
    }
}

/// Valid samples per zone, indexed by `ObstacleZone::index()`
#[derive(Debug, Clone, Default)]
pub struct ZoneSamples(pub [Vec<f32>; 9]);

impl ZoneSamples {
    pub fn get(&self, zone: ObstacleZone) -> &[f32] {
        &self.0[zone.index()]
    }

    pub fn get_mut(&mut self, zone: ObstacleZone) -> &mut Vec<f32> {
        &mut self.0[zone.index()]
    }
}
