//! Layered application configuration

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use depth_engine::DepthEngineConfig;
use detector::DetectorConfig;
use feedback::FeedbackConfig;
use obstacle_analyzer::AnalyzerConfig;
use serde::{Deserialize, Serialize};

use crate::AppError;

/// Environment variable prefix, e.g. `SIGHTLINE_DETECTOR__FRAME_SKIP`
const ENV_PREFIX: &str = "SIGHTLINE";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Maximum level: trace, debug, info, warn, error
    pub level: String,
    /// Emit JSON lines instead of human-readable text
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Frame replay settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Directory of image files replayed as camera frames
    pub frames_dir: PathBuf,
    /// Delay between frames (ms)
    pub frame_interval_ms: u64,
    /// Prometheus listen address; no exporter when unset
    pub metrics_addr: Option<SocketAddr>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            frames_dir: PathBuf::from("frames"),
            frame_interval_ms: 33, // ~30 fps
            metrics_addr: None,
        }
    }
}

/// Whole-application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub depth: DepthEngineConfig,
    pub analyzer: AnalyzerConfig,
    pub feedback: FeedbackConfig,
    pub detector: DetectorConfig,
    pub logging: LoggingConfig,
    pub runner: RunnerConfig,
}

/// Load defaults, then `path` if given, then `SIGHTLINE_*` environment variables
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, AppError> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(File::from(path).required(true));
    }
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    Ok(builder.build()?.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, MutexGuard, PoisonError};

    // Environment variables are process-wide; tests that load config take this lock
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_config(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("sightline-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("sightline.toml");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_defaults_without_sources() {
        let _guard = env_lock();
        let config = load_config(None).unwrap();
        assert_eq!(config.detector.frame_skip, 3);
        assert_eq!(config.detector.history_size, 3);
        assert_eq!(config.analyzer.min_zone_samples, 50);
        assert_eq!(config.feedback.sample_rate, 44_100);
        assert_eq!(config.depth.input_size, 252);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_file_overrides() {
        let _guard = env_lock();
        let path = write_config(
            "file",
            r#"
[detector]
frame_skip = 1

[depth]
backend = "tract"
input_size = 126

[runner]
frames_dir = "/data/frames"
metrics_addr = "127.0.0.1:9000"
"#,
        );

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.detector.frame_skip, 1);
        assert_eq!(config.detector.history_size, 3);
        assert_eq!(config.depth.backend, depth_engine::BackendKind::Tract);
        assert_eq!(config.depth.input_size, 126);
        assert_eq!(config.runner.frames_dir, PathBuf::from("/data/frames"));
        assert_eq!(config.runner.metrics_addr, Some("127.0.0.1:9000".parse().unwrap()));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_environment_overrides_file_and_defaults() {
        let _guard = env_lock();
        let path = write_config("env", "[detector]\nframe_skip = 1\n");

        std::env::set_var("SIGHTLINE_DETECTOR__FRAME_SKIP", "5");
        std::env::set_var("SIGHTLINE_DEPTH__BACKEND", "tract");
        std::env::set_var("SIGHTLINE_ANALYZER__TEMPORAL_WEIGHT", "0.5");
        let result = load_config(Some(&path));
        std::env::remove_var("SIGHTLINE_DETECTOR__FRAME_SKIP");
        std::env::remove_var("SIGHTLINE_DEPTH__BACKEND");
        std::env::remove_var("SIGHTLINE_ANALYZER__TEMPORAL_WEIGHT");
        std::fs::remove_file(&path).ok();

        let config = result.unwrap();
        assert_eq!(config.detector.frame_skip, 5);
        assert_eq!(config.detector.history_size, 3);
        assert_eq!(config.depth.backend, depth_engine::BackendKind::Tract);
        assert!((config.analyzer.temporal_weight - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_malformed_environment_value_is_config_error() {
        let _guard = env_lock();
        std::env::set_var("SIGHTLINE_DETECTOR__FRAME_SKIP", "often");
        let result = load_config(None);
        std::env::remove_var("SIGHTLINE_DETECTOR__FRAME_SKIP");

        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_missing_file_is_error() {
        let _guard = env_lock();
        let result = load_config(Some(Path::new("/nonexistent/sightline.toml")));
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
