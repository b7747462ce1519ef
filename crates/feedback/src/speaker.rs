//! Speaker output through rodio
//!
//! The rodio output stream is not `Send`, so it lives on a dedicated
//! thread that receives commands over a channel.

use std::sync::mpsc;
use std::thread;

use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, Sink};
use tracing::{debug, info, warn};

use crate::device::AudioOutput;
use crate::synth::StereoBuffer;
use crate::FeedbackError;

enum SpeakerCommand {
    Play(StereoBuffer),
    Stop,
}

/// Default system audio device
pub struct SpeakerOutput {
    commands: mpsc::Sender<SpeakerCommand>,
}

impl SpeakerOutput {
    /// Open the default output device
    pub fn open() -> Result<Self, FeedbackError> {
        let (commands, command_rx) = mpsc::channel();
        let (ready_tx, ready_rx) = mpsc::sync_channel(1);

        thread::Builder::new()
            .name("speaker-output".into())
            .spawn(move || speaker_thread(command_rx, ready_tx))
            .map_err(|e| FeedbackError::Audio(e.to_string()))?;

        match ready_rx.recv() {
            Ok(Ok(())) => {
                info!("Audio output stream initialized");
                Ok(Self { commands })
            }
            Ok(Err(e)) => Err(e),
            Err(_) => Err(FeedbackError::Audio("speaker thread exited".into())),
        }
    }

    fn send(&self, command: SpeakerCommand) -> Result<(), FeedbackError> {
        self.commands
            .send(command)
            .map_err(|_| FeedbackError::Audio("speaker thread exited".into()))
    }
}

impl AudioOutput for SpeakerOutput {
    fn play(&mut self, buffer: &StereoBuffer) -> Result<(), FeedbackError> {
        self.send(SpeakerCommand::Play(buffer.clone()))
    }

    fn stop(&mut self) -> Result<(), FeedbackError> {
        self.send(SpeakerCommand::Stop)
    }
}

fn speaker_thread(
    commands: mpsc::Receiver<SpeakerCommand>,
    ready: mpsc::SyncSender<Result<(), FeedbackError>>,
) {
    let (_stream, handle) = match OutputStream::try_default() {
        Ok(output) => output,
        Err(e) => {
            let _ = ready.send(Err(FeedbackError::Audio(e.to_string())));
            return;
        }
    };
    let _ = ready.send(Ok(()));

    let mut sink: Option<Sink> = None;
    // Runs until the SpeakerOutput is dropped
    while let Ok(command) = commands.recv() {
        match command {
            SpeakerCommand::Play(buffer) => {
                if let Some(previous) = sink.take() {
                    previous.stop();
                }
                match Sink::try_new(&handle) {
                    Ok(new_sink) => {
                        new_sink.append(SamplesBuffer::new(2, buffer.sample_rate, buffer.samples));
                        sink = Some(new_sink);
                    }
                    Err(e) => warn!("Failed to create audio sink: {}", e),
                }
            }
            SpeakerCommand::Stop => {
                if let Some(previous) = sink.take() {
                    previous.stop();
                }
            }
        }
    }

    debug!("Speaker thread exiting");
}
