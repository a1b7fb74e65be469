//! Tone sink implementation using rodio.
//!
//! The rodio output stream is not `Send`, so it lives on a dedicated audio
//! thread. `RodioToneSink` only holds the command channel to that thread,
//! which makes it safe to share with the scheduler's timer task.

use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, Sender};
use rodio::source::{SineWave, Source};
use rodio::{OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, warn};

use super::error::SoundError;
use super::tone::Tone;
use super::CueSink;

enum AudioCommand {
    Play(Tone),
    Shutdown,
}

/// A cue sink that synthesizes sine tones on the default output device.
///
/// Playback is non-blocking: `play_tone` only queues the tone for the audio
/// thread. Dropping the sink stops the thread and any tone still sounding.
pub struct RodioToneSink {
    commands: Sender<AudioCommand>,
    thread: Option<JoinHandle<()>>,
}

impl RodioToneSink {
    /// Opens the default audio output on a new audio thread.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::SinkUnavailable` if no output device can be
    /// opened or the audio thread cannot be spawned.
    pub fn new() -> Result<Self, SoundError> {
        let (commands, receiver) = crossbeam_channel::unbounded();
        let (ready_tx, ready_rx) = crossbeam_channel::bounded(1);

        let thread = std::thread::Builder::new()
            .name("hiit-cues-audio".to_string())
            .spawn(move || audio_thread(receiver, ready_tx))
            .map_err(|e| SoundError::SinkUnavailable(format!("audio thread: {e}")))?;

        match ready_rx.recv() {
            Ok(Ok(())) => {
                debug!("Audio output stream initialized");
                Ok(Self {
                    commands,
                    thread: Some(thread),
                })
            }
            Ok(Err(e)) => {
                let _ = thread.join();
                Err(e)
            }
            Err(_) => {
                let _ = thread.join();
                Err(SoundError::SinkUnavailable(
                    "audio thread exited during startup".to_string(),
                ))
            }
        }
    }
}

impl CueSink for RodioToneSink {
    fn play_tone(&self, tone: &Tone) -> Result<(), SoundError> {
        self.commands
            .send(AudioCommand::Play(*tone))
            .map_err(|_| SoundError::Released)
    }
}

impl Drop for RodioToneSink {
    fn drop(&mut self) {
        let _ = self.commands.send(AudioCommand::Shutdown);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("Audio thread panicked during shutdown");
            }
        }
        debug!("Audio output stream released");
    }
}

impl std::fmt::Debug for RodioToneSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioToneSink")
            .field("running", &self.thread.is_some())
            .finish_non_exhaustive()
    }
}

fn audio_thread(
    commands: Receiver<AudioCommand>,
    ready: Sender<Result<(), SoundError>>,
) {
    let (_stream, handle) = match OutputStream::try_default() {
        Ok(pair) => pair,
        Err(e) => {
            let _ = ready.send(Err(SoundError::SinkUnavailable(e.to_string())));
            return;
        }
    };
    let _ = ready.send(Ok(()));

    for command in commands.iter() {
        match command {
            AudioCommand::Play(tone) => {
                if let Err(e) = play_sine(&handle, &tone) {
                    warn!("Failed to play tone at {} Hz: {}", tone.frequency_hz, e);
                }
            }
            AudioCommand::Shutdown => break,
        }
    }
}

fn play_sine(handle: &OutputStreamHandle, tone: &Tone) -> Result<(), SoundError> {
    let sink = Sink::try_new(handle).map_err(|e| SoundError::PlaybackError(e.to_string()))?;

    let source = SineWave::new(tone.frequency_hz)
        .take_duration(tone.duration())
        .amplify(tone.volume);
    sink.append(source);
    sink.detach(); // Non-blocking: tone continues after this returns

    debug!(
        "Tone started: {} Hz for {} ms",
        tone.frequency_hz, tone.duration_ms
    );
    Ok(())
}
