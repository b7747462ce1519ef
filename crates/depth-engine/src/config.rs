//! Depth engine configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Side of the square model input (pixels)
pub const DEPTH_INPUT_SIZE: u32 = 252;

/// Inference runtime used to execute the model
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// ONNX Runtime on CPU
    #[default]
    Ort,
    /// Pure-Rust tract runtime
    Tract,
}

/// Depth engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DepthEngineConfig {
    /// Path of the serialized ONNX depth model
    pub model_path: Option<PathBuf>,

    /// Square input resolution expected by the model
    pub input_size: u32,

    /// Threads used inside a single operator
    pub intra_threads: usize,

    /// Threads used to run independent operators in parallel
    pub inter_threads: usize,

    /// Inference runtime
    pub backend: BackendKind,
}

impl Default for DepthEngineConfig {
    fn default() -> Self {
        Self {
            model_path: Some(PathBuf::from("models/depth_anything_v2_vits_indoor_int8.onnx")),
            input_size: DEPTH_INPUT_SIZE,
            intra_threads: 4,
            inter_threads: 2,
            backend: BackendKind::Ort,
        }
    }
}
