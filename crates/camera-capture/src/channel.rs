//! Latest-frame-only delivery
//!
//! Frames published faster than they are consumed overwrite each other:
//! the receiver always observes the newest frame and never a backlog.

use tokio::sync::watch;
use tracing::debug;

use crate::{CameraError, VideoFrame};

/// Producer side, held by the capture thread
#[derive(Debug)]
pub struct FrameSender {
    tx: watch::Sender<Option<VideoFrame>>,
}

/// Consumer side, held by the analysis loop
#[derive(Debug)]
pub struct FrameReceiver {
    rx: watch::Receiver<Option<VideoFrame>>,
}

/// Create a connected sender/receiver pair
pub fn frame_channel() -> (FrameSender, FrameReceiver) {
    let (tx, rx) = watch::channel(None);
    (FrameSender { tx }, FrameReceiver { rx })
}

impl FrameSender {
    /// Publish a frame, replacing any frame not yet consumed.
    ///
    /// Never blocks. Fails only when the receiver is gone.
    pub fn publish(&self, frame: VideoFrame) -> Result<(), CameraError> {
        let sequence = frame.sequence;
        self.tx.send(Some(frame)).map_err(|_| CameraError::Closed)?;
        debug!("Published frame {}", sequence);
        Ok(())
    }

    /// Whether the receiver has been dropped
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl FrameReceiver {
    /// Wait for the next unseen frame.
    ///
    /// Returns `None` once the sender is dropped and no unseen frame remains.
    pub async fn next(&mut self) -> Option<VideoFrame> {
        loop {
            if self.rx.changed().await.is_err() {
                return None;
            }
            if let Some(frame) = self.rx.borrow_and_update().clone() {
                return Some(frame);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(sequence: u32) -> VideoFrame {
        let mut frame = VideoFrame::solid(2, 2, [0, 0, 0]);
        frame.sequence = sequence;
        frame
    }

    #[tokio::test]
    async fn test_receiver_sees_only_latest() {
        let (tx, mut rx) = frame_channel();

        tx.publish(frame(1)).unwrap();
        tx.publish(frame(2)).unwrap();
        tx.publish(frame(3)).unwrap();

        let received = rx.next().await.unwrap();
        assert_eq!(received.sequence, 3);
    }

    #[tokio::test]
    async fn test_receiver_ends_when_sender_dropped() {
        let (tx, mut rx) = frame_channel();
        tx.publish(frame(1)).unwrap();
        drop(tx);

        // The unseen frame is still delivered before the stream ends
        assert_eq!(rx.next().await.map(|f| f.sequence), Some(1));
        assert!(rx.next().await.is_none());
    }

    #[tokio::test]
    async fn test_publish_fails_after_receiver_dropped() {
        let (tx, rx) = frame_channel();
        drop(rx);
        assert!(tx.is_closed());
        assert!(matches!(tx.publish(frame(1)), Err(CameraError::Closed)));
    }
}
