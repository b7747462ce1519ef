//! Pipeline coordinator

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use camera_capture::VideoFrame;
use depth_engine::{DepthEstimator, DepthMap};
use feedback::FeedbackEngine;
use metrics::{counter, histogram};
use obstacle_analyzer::{ObstacleAnalyzer, ZoneInfo};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::config::DetectorConfig;
use crate::history::DistanceHistory;
use crate::DetectorError;

/// What `process_frame` did with a frame
#[derive(Debug)]
pub enum FrameOutcome {
    /// Not a processing slot under the frame-skip policy
    Skipped,
    /// Detection is not active
    Inactive,
    /// Another frame is still being analyzed
    Busy,
    /// Analysis is running; the handle resolves when the frame is done
    Dispatched(JoinHandle<()>),
}

impl FrameOutcome {
    pub fn is_dispatched(&self) -> bool {
        matches!(self, FrameOutcome::Dispatched(_))
    }
}

/// Sequential stages, touched by one analysis at a time
struct Stages {
    estimator: Box<dyn DepthEstimator>,
    analyzer: ObstacleAnalyzer,
    history: DistanceHistory,
}

struct Inner {
    config: DetectorConfig,
    stages: Mutex<Stages>,
    feedback: Mutex<FeedbackEngine>,
    /// `None` while the depth model can serve requests
    model_error: Mutex<Option<String>>,
    busy: AtomicBool,
    frame_counter: AtomicU64,
    reset_pending: AtomicBool,
    /// Bumped on every idle to active transition
    session: AtomicU64,
    active_tx: watch::Sender<bool>,
    zone_tx: watch::Sender<Option<ZoneInfo>>,
    depth_tx: watch::Sender<Option<Arc<DepthMap>>>,
    error_tx: watch::Sender<Option<String>>,
    runtime: Handle,
}

/// Obstacle detector.
///
/// Two states, idle and active. While active, every `frame_skip + 1`-th
/// frame is analyzed on the blocking pool unless an analysis is already
/// in flight, in which case the frame is dropped. Results reach the
/// observables and the feedback engine only if detection is still active
/// when the analysis finishes.
#[derive(Clone)]
pub struct ObstacleDetector {
    inner: Arc<Inner>,
}

impl ObstacleDetector {
    /// Create a detector bound to the current tokio runtime
    pub fn new(
        config: DetectorConfig,
        estimator: Box<dyn DepthEstimator>,
        analyzer: ObstacleAnalyzer,
        feedback: FeedbackEngine,
    ) -> Result<Self, DetectorError> {
        let runtime = Handle::try_current().map_err(|_| DetectorError::NoRuntime)?;
        Ok(Self::with_runtime(config, estimator, analyzer, feedback, runtime))
    }

    pub fn with_runtime(
        config: DetectorConfig,
        estimator: Box<dyn DepthEstimator>,
        analyzer: ObstacleAnalyzer,
        feedback: FeedbackEngine,
        runtime: Handle,
    ) -> Self {
        info!("Creating obstacle detector with config: {:?}", config);

        let model_error = if estimator.is_ready() {
            None
        } else {
            let reason = estimator.load_error().unwrap_or("unknown error").to_string();
            error!("Depth model not ready: {}", reason);
            Some(reason)
        };
        let initial_error = model_error
            .as_ref()
            .map(|reason| format!("Depth model failed to load: {}", reason));

        let inner = Inner {
            stages: Mutex::new(Stages {
                estimator,
                analyzer,
                history: DistanceHistory::new(config.history_size),
            }),
            config,
            feedback: Mutex::new(feedback),
            model_error: Mutex::new(model_error),
            busy: AtomicBool::new(false),
            frame_counter: AtomicU64::new(0),
            reset_pending: AtomicBool::new(false),
            session: AtomicU64::new(0),
            active_tx: watch::channel(false).0,
            zone_tx: watch::channel(None).0,
            depth_tx: watch::channel(None).0,
            error_tx: watch::channel(initial_error).0,
            runtime,
        };

        Self {
            inner: Arc::new(inner),
        }
    }

    /// Offer a camera frame; never blocks on analysis
    pub fn process_frame(&self, frame: VideoFrame) -> FrameOutcome {
        let inner = &self.inner;
        let count = inner.frame_counter.fetch_add(1, Ordering::Relaxed) + 1;
        counter!("detector_frames_received_total").increment(1);

        if count % (u64::from(inner.config.frame_skip) + 1) != 0 {
            counter!("detector_frames_skipped_total").increment(1);
            return FrameOutcome::Skipped;
        }

        if !self.is_detecting() {
            counter!("detector_frames_dropped_total", "reason" => "inactive").increment(1);
            return FrameOutcome::Inactive;
        }

        if inner
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Dropping frame {}: analysis in flight", frame.sequence);
            counter!("detector_frames_dropped_total", "reason" => "busy").increment(1);
            return FrameOutcome::Busy;
        }

        let session = inner.session.load(Ordering::Acquire);
        let task_inner = Arc::clone(inner);
        let handle = inner.runtime.spawn_blocking(move || {
            let _busy = BusyGuard(&task_inner.busy);
            task_inner.run_pipeline(&frame, session);
        });
        FrameOutcome::Dispatched(handle)
    }

    /// Idle to active; fails while the depth model is not ready
    pub fn start_detection(&self) -> Result<(), DetectorError> {
        let _feedback = lock(&self.inner.feedback);
        if self.is_detecting() {
            return Ok(());
        }

        if let Some(reason) = lock(&self.inner.model_error).clone() {
            warn!("Cannot start detection: {}", reason);
            self.inner
                .error_tx
                .send_replace(Some(format!("Depth model not loaded: {}", reason)));
            return Err(DetectorError::ModelNotReady(reason));
        }

        self.inner.reset_pending.store(true, Ordering::Release);
        self.inner.session.fetch_add(1, Ordering::AcqRel);
        self.inner.active_tx.send_replace(true);
        info!("Obstacle detection started");
        Ok(())
    }

    /// Active to idle: silences feedback and clears the current zone
    pub fn stop_detection(&self) {
        let mut feedback = lock(&self.inner.feedback);
        let stopped = self
            .inner
            .active_tx
            .send_if_modified(|active| std::mem::replace(active, false));
        if !stopped {
            return;
        }

        feedback.stop_feedback();
        self.inner.zone_tx.send_replace(None);
        info!("Obstacle detection stopped");
    }

    /// Stop, release the depth model and the feedback engine
    pub fn shutdown(&self) {
        self.stop_detection();

        lock(&self.inner.stages).estimator.shutdown();
        *lock(&self.inner.model_error) = Some("depth engine shut down".to_string());
        lock(&self.inner.feedback).release();
        info!("Obstacle detector shut down");
    }

    pub fn is_detecting(&self) -> bool {
        *self.inner.active_tx.borrow()
    }

    pub fn is_processing(&self) -> bool {
        self.inner.busy.load(Ordering::Acquire)
    }

    pub fn current_zone(&self) -> Option<ZoneInfo> {
        *self.inner.zone_tx.borrow()
    }

    pub fn subscribe_zone(&self) -> watch::Receiver<Option<ZoneInfo>> {
        self.inner.zone_tx.subscribe()
    }

    pub fn subscribe_active(&self) -> watch::Receiver<bool> {
        self.inner.active_tx.subscribe()
    }

    /// Latest depth map, for heatmap rendering
    pub fn subscribe_depth_map(&self) -> watch::Receiver<Option<Arc<DepthMap>>> {
        self.inner.depth_tx.subscribe()
    }

    pub fn subscribe_errors(&self) -> watch::Receiver<Option<String>> {
        self.inner.error_tx.subscribe()
    }

    pub fn frames_seen(&self) -> u64 {
        self.inner.frame_counter.load(Ordering::Relaxed)
    }
}

impl Inner {
    /// Analyze `frame`; results are published only within the detection
    /// session that dispatched it.
    fn run_pipeline(&self, frame: &VideoFrame, session: u64) {
        let start = Instant::now();

        let (map, zone) = {
            let mut guard = lock(&self.stages);
            let stages = &mut *guard;

            if self.reset_pending.swap(false, Ordering::AcqRel) {
                stages.analyzer.reset();
                stages.history.clear();
                debug!("Temporal state reset");
            }

            let Some(map) = stages.estimator.estimate_depth(frame) else {
                counter!("detector_frames_failed_total").increment(1);
                return;
            };

            let zone = stages.analyzer.analyze_depth_map(&map).map(|info| {
                let smoothed = stages.history.smooth(info.min_distance);
                info.with_min_distance(smoothed)
            });
            (map, zone)
        };

        counter!("detector_frames_analyzed_total").increment(1);
        histogram!("detector_pipeline_seconds").record(start.elapsed().as_secs_f64());

        self.depth_tx.send_replace(Some(Arc::new(map)));

        let Some(zone) = zone else {
            return;
        };

        let mut feedback = lock(&self.feedback);
        if !*self.active_tx.borrow() {
            debug!("Discarding frame {} result: detection stopped", frame.sequence);
            return;
        }
        if self.session.load(Ordering::Acquire) != session {
            debug!("Discarding frame {} result: detection restarted", frame.sequence);
            // the stale frame went through the reset meant for the new session
            self.reset_pending.store(true, Ordering::Release);
            return;
        }

        debug!(
            "Frame {}: {:?} at {:.2}m ({:?})",
            frame.sequence, zone.zone, zone.min_distance, zone.danger_level
        );
        self.zone_tx.send_replace(Some(zone));
        feedback.update_feedback(&zone);
    }
}

struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
