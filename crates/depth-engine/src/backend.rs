//! Inference backend abstraction

use ndarray::Array4;

use crate::DepthError;

/// Raw single-channel model output
#[derive(Debug, Clone)]
pub struct RawDepth {
    /// Output tensor shape as reported by the runtime
    pub shape: Vec<usize>,
    /// Row-major output values
    pub values: Vec<f32>,
}

impl RawDepth {
    /// Spatial `(height, width)` of the output.
    ///
    /// Accepts `[1, 1, H, W]` and `[1, H, W]`.
    pub fn dims(&self) -> Result<(usize, usize), DepthError> {
        match self.shape.as_slice() {
            [_, _, h, w] | [_, h, w] => Ok((*h, *w)),
            _ => Err(DepthError::OutputShape(self.shape.clone())),
        }
    }
}

/// A loaded depth network that maps an NCHW tensor to a raw depth output
pub trait InferenceBackend: Send {
    /// Short runtime name for logs
    fn name(&self) -> &'static str;

    /// Run one forward pass
    fn infer(&mut self, input: Array4<f32>) -> Result<RawDepth, DepthError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dims_from_4d_and_3d() {
        let four = RawDepth { shape: vec![1, 1, 8, 6], values: vec![] };
        let three = RawDepth { shape: vec![1, 8, 6], values: vec![] };
        assert_eq!(four.dims().unwrap(), (8, 6));
        assert_eq!(three.dims().unwrap(), (8, 6));
    }

    #[test]
    fn test_dims_rejects_other_ranks() {
        let flat = RawDepth { shape: vec![48], values: vec![] };
        assert!(matches!(flat.dims(), Err(DepthError::OutputShape(_))));
    }
}
