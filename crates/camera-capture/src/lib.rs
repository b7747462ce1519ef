//! Camera Capture Library for the Obstacle Pipeline
//!
//! Provides the decoded RGB frame type consumed by depth estimation and a
//! frame channel that keeps only the most recent undelivered frame:
//! - `VideoFrame`: 8-bit RGB raster with bilinear resize
//! - `frame_channel`: latest-frame-only delivery (older frames are dropped)

pub mod channel;
pub mod frame;

pub use channel::{frame_channel, FrameReceiver, FrameSender};
pub use frame::VideoFrame;

use thiserror::Error;

/// Camera error types
#[derive(Error, Debug)]
pub enum CameraError {
    #[error("Invalid format: {0}")]
    Format(String),

    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Frame source closed")]
    Closed,
}
