//! Looping feedback engine

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use obstacle_analyzer::ZoneInfo;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::FeedbackConfig;
use crate::device::{AudioOutput, Haptics};
use crate::params::AudioParams;
use crate::synth::{synthesize_beep, StereoBuffer};
use crate::vibration::vibration_pattern;
use crate::FeedbackError;

type SharedAudio = Arc<Mutex<Box<dyn AudioOutput>>>;
type SharedHaptics = Arc<Mutex<Box<dyn Haptics>>>;

/// What an update did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackUpdate {
    /// Distance change below hysteresis while playing
    Unchanged,
    /// A new loop replaced any previous one
    Started,
    /// Safe zone, feedback stopped
    Stopped,
}

struct FeedbackLoop {
    stop_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

/// Feedback engine.
///
/// Owns the audio and haptic devices and at most one running loop. Each
/// loop cycle stops the previous beep, plays a new one, triggers the
/// vibration waveform, then waits for the beep interval.
pub struct FeedbackEngine {
    config: FeedbackConfig,
    audio: SharedAudio,
    haptics: SharedHaptics,
    runtime: Handle,
    last_distance: f32,
    playing: bool,
    current: Option<FeedbackLoop>,
    current_params: Option<AudioParams>,
    generation: u64,
    released: bool,
}

impl FeedbackEngine {
    /// Create an engine whose loops run on the current tokio runtime
    pub fn new(
        config: FeedbackConfig,
        audio: Box<dyn AudioOutput>,
        haptics: Box<dyn Haptics>,
    ) -> Result<Self, FeedbackError> {
        let runtime = Handle::try_current().map_err(|_| FeedbackError::NoRuntime)?;
        Ok(Self::with_runtime(config, audio, haptics, runtime))
    }

    pub fn with_runtime(
        config: FeedbackConfig,
        audio: Box<dyn AudioOutput>,
        haptics: Box<dyn Haptics>,
        runtime: Handle,
    ) -> Self {
        info!("Creating feedback engine with config: {:?}", config);
        Self {
            config,
            audio: Arc::new(Mutex::new(audio)),
            haptics: Arc::new(Mutex::new(haptics)),
            runtime,
            last_distance: f32::MAX,
            playing: false,
            current: None,
            current_params: None,
            generation: 0,
            released: false,
        }
    }

    /// Apply a new zone, swallowing errors
    pub fn update_feedback(&mut self, zone: &ZoneInfo) {
        if let Err(e) = self.try_update_feedback(zone) {
            warn!("Feedback update ignored: {}", e);
        }
    }

    pub fn try_update_feedback(
        &mut self,
        zone: &ZoneInfo,
    ) -> Result<FeedbackUpdate, FeedbackError> {
        if self.released {
            return Err(FeedbackError::Released);
        }

        let delta = (zone.min_distance - self.last_distance).abs();
        if self.playing && delta < self.config.hysteresis_meters {
            return Ok(FeedbackUpdate::Unchanged);
        }
        self.last_distance = zone.min_distance;

        let params = AudioParams::for_zone(zone);
        if !params.should_play {
            self.stop_feedback();
            return Ok(FeedbackUpdate::Stopped);
        }

        self.start_loop(params, zone);
        Ok(FeedbackUpdate::Started)
    }

    fn start_loop(&mut self, params: AudioParams, zone: &ZoneInfo) {
        self.cancel_loop();
        stop_audio(&self.audio);

        let buffer = synthesize_beep(&params, self.config.sample_rate, self.config.amplitude);
        let pattern = vibration_pattern(zone.danger_level);
        let (stop_tx, stop_rx) = watch::channel(false);

        let handle = self.runtime.spawn(run_loop(
            params,
            buffer,
            pattern,
            self.audio.clone(),
            self.haptics.clone(),
            stop_rx,
        ));

        self.playing = true;
        self.generation += 1;
        self.current_params = Some(params);
        self.current = Some(FeedbackLoop { stop_tx, handle });

        debug!(
            "Feedback loop {} started: {:?} {} Hz every {} ms, pan {}",
            self.generation, zone.danger_level, params.frequency_hz, params.interval_ms, params.pan
        );
    }

    fn cancel_loop(&mut self) {
        if let Some(feedback_loop) = self.current.take() {
            // ignore: the loop may already have exited
            let _ = feedback_loop.stop_tx.send(true);
            feedback_loop.handle.abort();
        }
    }

    /// Halt the loop, silence both devices, and forget the last distance
    pub fn stop_feedback(&mut self) {
        let was_playing = self.playing;
        self.playing = false;
        self.cancel_loop();
        self.current_params = None;
        stop_audio(&self.audio);

        {
            let mut haptics = lock(&self.haptics);
            if haptics.has_vibrator() {
                if let Err(e) = haptics.cancel() {
                    warn!("Failed to cancel vibration: {}", e);
                }
            }
        }

        self.last_distance = f32::MAX;
        if was_playing {
            debug!("Feedback stopped");
        }
    }

    /// Stop and refuse all further updates
    pub fn release(&mut self) {
        self.stop_feedback();
        self.released = true;
        info!("Feedback engine released");
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Number of loops started so far
    pub fn loop_generation(&self) -> u64 {
        self.generation
    }

    pub fn current_params(&self) -> Option<AudioParams> {
        self.current_params
    }
}

impl Drop for FeedbackEngine {
    fn drop(&mut self) {
        self.cancel_loop();
    }
}

async fn run_loop(
    params: AudioParams,
    buffer: StereoBuffer,
    pattern: Option<&'static [u64]>,
    audio: SharedAudio,
    haptics: SharedHaptics,
    mut stop_rx: watch::Receiver<bool>,
) {
    let interval = Duration::from_millis(params.interval_ms);

    loop {
        {
            // stop is checked under the device lock so no beep starts after stop_feedback
            let mut audio = lock(&audio);
            if *stop_rx.borrow() {
                break;
            }
            if let Err(e) = audio.stop().and_then(|_| audio.play(&buffer)) {
                warn!("Beep playback failed: {}", e);
            }
        }

        if let Some(pattern) = pattern {
            let mut haptics = lock(&haptics);
            // stop_feedback may have cancelled vibration since the beep
            if *stop_rx.borrow() {
                break;
            }
            if haptics.has_vibrator() {
                if let Err(e) = haptics.vibrate(pattern) {
                    warn!("Vibration failed: {}", e);
                }
            }
        }

        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = stop_rx.changed() => break,
        }
    }
}

fn stop_audio(audio: &SharedAudio) {
    if let Err(e) = lock(audio).stop() {
        warn!("Failed to stop audio: {}", e);
    }
}

fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
