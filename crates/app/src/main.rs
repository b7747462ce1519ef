//! Sightline - obstacle detection runner

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use app::{drive_detector, init_logging, install_metrics, list_frames, load_config, replay_frames};
use camera_capture::frame_channel;
use clap::Parser;
use depth_engine::DepthEngine;
use detector::ObstacleDetector;
use feedback::{AudioOutput, FeedbackEngine, Haptics, NoHaptics, SilentOutput};
use obstacle_analyzer::ObstacleAnalyzer;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "sightline")]
#[command(about = "Replay camera frames through the obstacle detection pipeline")]
struct Args {
    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory of frames to replay
    #[arg(short, long)]
    frames: Option<PathBuf>,

    /// ONNX depth model
    #[arg(short, long)]
    model: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = load_config(args.config.as_deref()).context("loading configuration")?;
    if let Some(frames) = args.frames {
        config.runner.frames_dir = frames;
    }
    if let Some(model) = args.model {
        config.depth.model_path = Some(model);
    }

    init_logging(&config.logging)?;
    info!("=== Sightline v{} ===", env!("CARGO_PKG_VERSION"));

    if let Some(addr) = config.runner.metrics_addr {
        install_metrics(addr)?;
    }

    let engine = DepthEngine::load_from_file(&config.depth);
    let feedback = FeedbackEngine::new(config.feedback.clone(), audio_output(), haptics())?;
    let detector = ObstacleDetector::new(
        config.detector.clone(),
        Box::new(engine),
        ObstacleAnalyzer::new(config.analyzer.clone()),
        feedback,
    )?;

    if let Err(e) = detector.start_detection() {
        error!("Obstacle detection unavailable: {}", e);
        detector.shutdown();
        return Err(e.into());
    }

    let mut zones = detector.subscribe_zone();
    let zone_logger = tokio::spawn(async move {
        while zones.changed().await.is_ok() {
            if let Some(zone) = *zones.borrow_and_update() {
                info!("{}", zone.summary());
            }
        }
    });

    let paths = list_frames(&config.runner.frames_dir)
        .with_context(|| format!("listing {}", config.runner.frames_dir.display()))?;
    info!("Replaying {} frames from {}", paths.len(), config.runner.frames_dir.display());

    let (sender, receiver) = frame_channel();
    let interval = Duration::from_millis(config.runner.frame_interval_ms);
    let replay = tokio::spawn(replay_frames(paths, interval, sender));

    tokio::select! {
        offered = drive_detector(&detector, receiver) => {
            info!("Frame source finished after {} frames", offered);
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, shutting down");
        }
    }

    replay.abort();
    detector.shutdown();
    zone_logger.abort();
    Ok(())
}

#[cfg(feature = "speaker")]
fn audio_output() -> Box<dyn AudioOutput> {
    match feedback::SpeakerOutput::open() {
        Ok(speaker) => Box::new(speaker),
        Err(e) => {
            tracing::warn!("No audio output, continuing silently: {}", e);
            Box::new(SilentOutput)
        }
    }
}

#[cfg(not(feature = "speaker"))]
fn audio_output() -> Box<dyn AudioOutput> {
    Box::new(SilentOutput)
}

fn haptics() -> Box<dyn Haptics> {
    Box::new(NoHaptics)
}
