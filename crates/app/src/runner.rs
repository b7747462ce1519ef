//! Replay image files through the detector as camera frames

use std::path::{Path, PathBuf};
use std::time::Duration;

use camera_capture::{FrameReceiver, FrameSender, VideoFrame};
use detector::{FrameOutcome, ObstacleDetector};
use tracing::{debug, info, warn};

use crate::AppError;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

/// Image files in `dir`, sorted by name
pub fn list_frames(dir: &Path) -> Result<Vec<PathBuf>, AppError> {
    let mut frames = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_image = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
            .unwrap_or(false);
        if is_image {
            frames.push(path);
        }
    }
    frames.sort();
    Ok(frames)
}

/// Decode and publish each file, one every `interval`.
///
/// Stops early once every receiver is gone. Returns the number of frames
/// published.
pub async fn replay_frames(paths: Vec<PathBuf>, interval: Duration, sender: FrameSender) -> usize {
    let mut published = 0;

    for (sequence, path) in paths.iter().enumerate() {
        let frame = match VideoFrame::load(path, sequence as u32) {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };

        if sender.publish(frame).is_err() {
            debug!("Frame receiver closed, stopping replay");
            break;
        }
        published += 1;
        tokio::time::sleep(interval).await;
    }

    info!("Replayed {} of {} frames", published, paths.len());
    published
}

/// Feed every delivered frame to the detector until the source closes.
///
/// Waits for the last dispatched analysis before returning the number of
/// frames offered.
pub async fn drive_detector(detector: &ObstacleDetector, mut frames: FrameReceiver) -> u64 {
    let mut offered = 0;
    let mut in_flight = None;

    while let Some(frame) = frames.next().await {
        offered += 1;
        if let FrameOutcome::Dispatched(handle) = detector.process_frame(frame) {
            in_flight = Some(handle);
        }
    }

    if let Some(handle) = in_flight {
        if let Err(e) = handle.await {
            warn!("Last frame analysis failed: {}", e);
        }
    }
    offered
}
