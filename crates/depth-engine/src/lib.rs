//! Monocular Depth Estimation
//!
//! Turns an RGB camera frame into a metric depth map:
//! - Preprocessing: bilinear resize and ImageNet normalization (NCHW)
//! - Inference: ONNX Runtime or tract, loaded once
//! - Postprocessing: min-max rescale into the metric band with a
//!   fixed fallback for degenerate (flat) outputs

pub mod backend;
pub mod config;
pub mod engine;
pub mod map;
pub mod ort_backend;
pub mod postprocess;
pub mod preprocess;
pub mod tract_backend;

pub use backend::{InferenceBackend, RawDepth};
pub use config::{BackendKind, DepthEngineConfig};
pub use engine::{DepthEngine, DepthEstimator};
pub use map::{is_valid_depth, DepthMap, DEPTH_MAX_METERS, DEPTH_MIN_METERS};
pub use postprocess::{normalize_raw_depth, FALLBACK_DEPTH_METERS, RANGE_EPSILON};

use thiserror::Error;

/// Errors during depth estimation
#[derive(Debug, Error)]
pub enum DepthError {
    #[error("Model load failed: {0}")]
    ModelLoad(String),
    #[error("Model not loaded")]
    NotReady,
    #[error("Preprocessing failed: {0}")]
    Preprocess(String),
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
    #[error("Unexpected output shape: {0:?}")]
    OutputShape(Vec<usize>),
    #[error("Invalid depth map: expected {expected} values, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}
