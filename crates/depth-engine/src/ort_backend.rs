//! ONNX Runtime backend

use ndarray::Array4;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Tensor;
use tracing::{debug, info};

use crate::backend::{InferenceBackend, RawDepth};
use crate::config::DepthEngineConfig;
use crate::DepthError;

/// Depth network executed by ONNX Runtime on the CPU
pub struct OrtBackend {
    session: Session,
}

impl OrtBackend {
    /// Build a session from serialized model bytes.
    ///
    /// Thread pools are fixed here for the lifetime of the session.
    pub fn from_bytes(model: &[u8], config: &DepthEngineConfig) -> Result<Self, DepthError> {
        info!(
            "Creating ONNX Runtime session: {} KB, intra={} inter={}",
            model.len() / 1024,
            config.intra_threads,
            config.inter_threads
        );

        let session = Session::builder()
            .map_err(|e| DepthError::ModelLoad(e.to_string()))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| DepthError::ModelLoad(e.to_string()))?
            .with_intra_threads(config.intra_threads)
            .map_err(|e| DepthError::ModelLoad(e.to_string()))?
            .with_inter_threads(config.inter_threads)
            .map_err(|e| DepthError::ModelLoad(e.to_string()))?
            .with_parallel_execution(true)
            .map_err(|e| DepthError::ModelLoad(e.to_string()))?
            .commit_from_memory(model)
            .map_err(|e| DepthError::ModelLoad(e.to_string()))?;

        for input in &session.inputs {
            debug!("Model input: {}", input.name);
        }

        Ok(Self { session })
    }
}

impl InferenceBackend for OrtBackend {
    fn name(&self) -> &'static str {
        "onnxruntime"
    }

    fn infer(&mut self, input: Array4<f32>) -> Result<RawDepth, DepthError> {
        let tensor =
            Tensor::from_array(input).map_err(|e| DepthError::InferenceFailed(e.to_string()))?;

        let outputs = self
            .session
            .run(ort::inputs![tensor])
            .map_err(|e| DepthError::InferenceFailed(e.to_string()))?;

        let (shape, data) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| DepthError::InferenceFailed(e.to_string()))?;

        Ok(RawDepth {
            shape: shape.iter().map(|&d| d as usize).collect(),
            values: data.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_model_fails_to_load() {
        let config = DepthEngineConfig::default();
        let result = OrtBackend::from_bytes(b"definitely not an onnx graph", &config);
        assert!(matches!(result, Err(DepthError::ModelLoad(_))));
    }

    #[test]
    fn test_empty_model_fails_to_load() {
        let result = OrtBackend::from_bytes(&[], &DepthEngineConfig::default());
        assert!(matches!(result, Err(DepthError::ModelLoad(_))));
    }
}
