//! Metric depth map

use ndarray::Array2;

use crate::DepthError;

/// Nearest distance the pipeline reports (meters)
pub const DEPTH_MIN_METERS: f32 = 0.2;

/// Farthest distance the pipeline reports (meters)
pub const DEPTH_MAX_METERS: f32 = 6.0;

/// Whether a value lies inside the metric band. NaN is never valid.
#[inline]
pub fn is_valid_depth(value: f32) -> bool {
    (DEPTH_MIN_METERS..=DEPTH_MAX_METERS).contains(&value)
}

/// Per-pixel distance to camera in meters, indexed `[row, col]`
#[derive(Debug, Clone, PartialEq)]
pub struct DepthMap {
    values: Array2<f32>,
}

impl DepthMap {
    /// Wrap an existing array
    pub fn new(values: Array2<f32>) -> Self {
        Self { values }
    }

    /// Build from row-major values
    pub fn from_vec(height: usize, width: usize, values: Vec<f32>) -> Result<Self, DepthError> {
        let actual = values.len();
        Array2::from_shape_vec((height, width), values)
            .map(Self::new)
            .map_err(|_| DepthError::InvalidLength {
                expected: height * width,
                actual,
            })
    }

    /// A map holding the same value everywhere
    pub fn filled(height: usize, width: usize, value: f32) -> Self {
        Self::new(Array2::from_elem((height, width), value))
    }

    /// Build a map from a `(row, col) -> depth` function
    pub fn from_fn(height: usize, width: usize, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        Self::new(Array2::from_shape_fn((height, width), |(row, col)| f(row, col)))
    }

    pub fn height(&self) -> usize {
        self.values.nrows()
    }

    pub fn width(&self) -> usize {
        self.values.ncols()
    }

    /// `(height, width)`
    pub fn dims(&self) -> (usize, usize) {
        self.values.dim()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Depth at `(row, col)`, if inside the map
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        self.values.get((row, col)).copied()
    }

    pub fn values(&self) -> &Array2<f32> {
        &self.values
    }

    /// Iterate values in row-major order
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.values.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_depth_band() {
        assert!(is_valid_depth(DEPTH_MIN_METERS));
        assert!(is_valid_depth(DEPTH_MAX_METERS));
        assert!(is_valid_depth(1.0));
        assert!(!is_valid_depth(0.1));
        assert!(!is_valid_depth(6.5));
        assert!(!is_valid_depth(f32::NAN));
    }

    #[test]
    fn test_from_vec_checks_length() {
        assert!(DepthMap::from_vec(2, 2, vec![1.0; 4]).is_ok());
        let err = DepthMap::from_vec(2, 3, vec![1.0; 4]).unwrap_err();
        assert!(matches!(err, DepthError::InvalidLength { expected: 6, actual: 4 }));
    }

    #[test]
    fn test_from_fn_indexing() {
        let map = DepthMap::from_fn(3, 4, |row, col| (row * 10 + col) as f32);
        assert_eq!(map.dims(), (3, 4));
        assert_eq!(map.get(2, 3), Some(23.0));
        assert_eq!(map.get(3, 0), None);
    }
}
