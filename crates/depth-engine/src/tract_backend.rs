//! tract backend (pure Rust)

use ndarray::Array4;
use tract_onnx::prelude::*;
use tracing::info;

use crate::backend::{InferenceBackend, RawDepth};
use crate::DepthError;

/// Depth network executed by tract
pub struct TractBackend {
    model: TypedRunnableModel<TypedModel>,
}

impl TractBackend {
    /// Parse, type and optimize a model for a fixed square input
    pub fn from_bytes(model: &[u8], input_size: u32) -> Result<Self, DepthError> {
        info!(
            "Creating tract model: {} KB, input {}x{}",
            model.len() / 1024,
            input_size,
            input_size
        );

        let side = input_size as usize;
        let model = tract_onnx::onnx()
            .model_for_read(&mut std::io::Cursor::new(model))
            .and_then(|m| m.with_input_fact(0, f32::fact([1, 3, side, side]).into()))
            .and_then(|m| m.into_optimized())
            .and_then(|m| m.into_runnable())
            .map_err(|e| DepthError::ModelLoad(e.to_string()))?;

        Ok(Self { model })
    }
}

impl InferenceBackend for TractBackend {
    fn name(&self) -> &'static str {
        "tract"
    }

    fn infer(&mut self, input: Array4<f32>) -> Result<RawDepth, DepthError> {
        let (n, c, h, w) = input.dim();
        let data: Vec<f32> = input.iter().copied().collect();

        let tensor = Tensor::from_shape(&[n, c, h, w], &data)
            .map_err(|e| DepthError::InferenceFailed(e.to_string()))?;

        let outputs = self
            .model
            .run(tvec!(tensor.into()))
            .map_err(|e| DepthError::InferenceFailed(e.to_string()))?;

        let output = &outputs[0];
        let values = output
            .as_slice::<f32>()
            .map_err(|e| DepthError::InferenceFailed(e.to_string()))?
            .to_vec();

        Ok(RawDepth {
            shape: output.shape().to_vec(),
            values,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_model_fails_to_load() {
        let result = TractBackend::from_bytes(b"definitely not an onnx graph", 32);
        assert!(matches!(result, Err(DepthError::ModelLoad(_))));
    }
}
