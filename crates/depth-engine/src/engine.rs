//! Depth Engine Implementation

use std::time::Instant;

use camera_capture::VideoFrame;
use tracing::{debug, error, info};

use crate::backend::InferenceBackend;
use crate::config::{BackendKind, DepthEngineConfig};
use crate::map::DepthMap;
use crate::ort_backend::OrtBackend;
use crate::postprocess::normalize_raw_depth;
use crate::preprocess::preprocess;
use crate::tract_backend::TractBackend;
use crate::DepthError;

/// Anything that can turn a camera frame into a metric depth map.
///
/// Implementations never fail across this boundary: a frame that cannot
/// be processed yields `None`.
pub trait DepthEstimator: Send {
    /// Whether the model loaded and can serve requests
    fn is_ready(&self) -> bool;

    /// Estimate depth for one frame
    fn estimate_depth(&mut self, frame: &VideoFrame) -> Option<DepthMap>;

    /// Why the model failed to load, if it did
    fn load_error(&self) -> Option<&str> {
        None
    }

    /// Release the model
    fn shutdown(&mut self) {}
}

/// Monocular depth engine: preprocessing, inference, postprocessing
pub struct DepthEngine {
    /// Loaded network, absent when loading failed or after shutdown
    backend: Option<Box<dyn InferenceBackend>>,
    /// Square model input size
    input_size: u32,
    /// Reason the model never became ready
    load_error: Option<String>,
}

impl DepthEngine {
    /// Load a model from serialized bytes.
    ///
    /// Failure is terminal: the engine is returned not-ready and the
    /// reason is kept in `load_error`.
    pub fn load_from_bytes(model: &[u8], config: &DepthEngineConfig) -> Self {
        let backend: Result<Box<dyn InferenceBackend>, DepthError> = match config.backend {
            BackendKind::Ort => OrtBackend::from_bytes(model, config).map(|b| Box::new(b) as _),
            BackendKind::Tract => {
                TractBackend::from_bytes(model, config.input_size).map(|b| Box::new(b) as _)
            }
        };

        match backend {
            Ok(backend) => {
                info!("Depth model loaded ({}), input {}px", backend.name(), config.input_size);
                Self::with_backend(backend, config.input_size)
            }
            Err(e) => {
                error!("Failed to load depth model: {}", e);
                Self::unavailable(e.to_string(), config.input_size)
            }
        }
    }

    /// Load the model file named by `config.model_path`
    pub fn load_from_file(config: &DepthEngineConfig) -> Self {
        let Some(path) = config.model_path.as_deref() else {
            error!("No depth model path configured");
            return Self::unavailable("no model path configured".into(), config.input_size);
        };

        match std::fs::read(path) {
            Ok(bytes) => Self::load_from_bytes(&bytes, config),
            Err(e) => {
                error!("Failed to read depth model {}: {}", path.display(), e);
                Self::unavailable(e.to_string(), config.input_size)
            }
        }
    }

    /// Wrap an already-loaded backend
    pub fn with_backend(backend: Box<dyn InferenceBackend>, input_size: u32) -> Self {
        Self {
            backend: Some(backend),
            input_size,
            load_error: None,
        }
    }

    /// An engine that never became ready
    pub fn unavailable(reason: String, input_size: u32) -> Self {
        Self {
            backend: None,
            input_size,
            load_error: Some(reason),
        }
    }

    pub fn input_size(&self) -> u32 {
        self.input_size
    }

    /// Run the full pipeline, reporting why a frame failed
    pub fn try_estimate_depth(&mut self, frame: &VideoFrame) -> Result<DepthMap, DepthError> {
        let backend = self.backend.as_mut().ok_or(DepthError::NotReady)?;
        let start = Instant::now();

        let input = preprocess(frame, self.input_size)?;
        let raw = backend.infer(input)?;
        let (height, width) = raw.dims()?;
        let map = normalize_raw_depth(&raw.values, height, width)?;

        debug!(
            "Depth frame {} -> {}x{} in {}ms",
            frame.sequence,
            height,
            width,
            start.elapsed().as_millis()
        );
        Ok(map)
    }
}

impl DepthEstimator for DepthEngine {
    fn is_ready(&self) -> bool {
        self.backend.is_some()
    }

    fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    fn estimate_depth(&mut self, frame: &VideoFrame) -> Option<DepthMap> {
        match self.try_estimate_depth(frame) {
            Ok(map) => Some(map),
            Err(e) => {
                debug!("Depth estimation skipped for frame {}: {}", frame.sequence, e);
                None
            }
        }
    }

    fn shutdown(&mut self) {
        if self.backend.take().is_some() {
            info!("Depth engine shut down");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::RawDepth;
    use crate::map::{DEPTH_MAX_METERS, DEPTH_MIN_METERS};
    use crate::postprocess::FALLBACK_DEPTH_METERS;
    use ndarray::Array4;

    /// Backend whose output is a horizontal gradient of the input size
    struct GradientBackend;

    impl InferenceBackend for GradientBackend {
        fn name(&self) -> &'static str {
            "gradient"
        }

        fn infer(&mut self, input: Array4<f32>) -> Result<RawDepth, DepthError> {
            let (_, _, h, w) = input.dim();
            let values = (0..h).flat_map(|_| (0..w).map(|x| x as f32)).collect();
            Ok(RawDepth { shape: vec![1, 1, h, w], values })
        }
    }

    struct FailingBackend;

    impl InferenceBackend for FailingBackend {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn infer(&mut self, _input: Array4<f32>) -> Result<RawDepth, DepthError> {
            Err(DepthError::InferenceFailed("boom".into()))
        }
    }

    struct FlatBackend;

    impl InferenceBackend for FlatBackend {
        fn name(&self) -> &'static str {
            "flat"
        }

        fn infer(&mut self, input: Array4<f32>) -> Result<RawDepth, DepthError> {
            let (_, _, h, w) = input.dim();
            Ok(RawDepth { shape: vec![1, h, w], values: vec![0.5; h * w] })
        }
    }

    #[test]
    fn test_estimate_produces_model_resolution() {
        let mut engine = DepthEngine::with_backend(Box::new(GradientBackend), 16);
        let frame = VideoFrame::solid(40, 30, [120, 120, 120]);

        let map = engine.estimate_depth(&frame).unwrap();
        assert_eq!(map.dims(), (16, 16));
        assert_eq!(map.get(0, 0), Some(DEPTH_MIN_METERS));
        assert_eq!(map.get(5, 15), Some(DEPTH_MAX_METERS));
    }

    #[test]
    fn test_flat_output_falls_back() {
        let mut engine = DepthEngine::with_backend(Box::new(FlatBackend), 8);
        let map = engine.estimate_depth(&VideoFrame::solid(8, 8, [0, 0, 0])).unwrap();
        assert!(map.iter().all(|v| v == FALLBACK_DEPTH_METERS));
    }

    #[test]
    fn test_inference_error_yields_none() {
        let mut engine = DepthEngine::with_backend(Box::new(FailingBackend), 8);
        assert!(engine.is_ready());
        assert!(engine.estimate_depth(&VideoFrame::solid(8, 8, [0, 0, 0])).is_none());
    }

    #[test]
    fn test_unloadable_model_is_terminal() {
        let config = DepthEngineConfig {
            backend: BackendKind::Tract,
            input_size: 16,
            ..Default::default()
        };
        let mut engine = DepthEngine::load_from_bytes(b"not a model", &config);

        assert!(!engine.is_ready());
        assert!(engine.load_error().is_some());
        assert!(matches!(
            engine.try_estimate_depth(&VideoFrame::solid(4, 4, [0, 0, 0])),
            Err(DepthError::NotReady)
        ));
    }

    #[test]
    fn test_missing_model_file() {
        let config = DepthEngineConfig {
            model_path: Some("/nonexistent/depth.onnx".into()),
            ..Default::default()
        };
        let engine = DepthEngine::load_from_file(&config);
        assert!(!engine.is_ready());
    }

    #[test]
    fn test_shutdown_makes_engine_not_ready() {
        let mut engine = DepthEngine::with_backend(Box::new(GradientBackend), 8);
        engine.shutdown();
        assert!(!engine.is_ready());
        assert!(engine.estimate_depth(&VideoFrame::solid(8, 8, [0, 0, 0])).is_none());
    }
}
