//! Sound system error types.
//!
//! None of these reach the caller of the cue scheduler: sink errors are
//! logged and the cue is dropped. Only tone table loading surfaces them.

use thiserror::Error;

/// Errors that can occur in the sound layer.
#[derive(Debug, Error)]
pub enum SoundError {
    /// The audio output could not be initialized (e.g., no device).
    #[error("audio sink unavailable: {0}")]
    SinkUnavailable(String),

    /// The sink was already released.
    #[error("audio sink has been released")]
    Released,

    /// The sink accepted the tone but failed to play it.
    #[error("tone playback failed: {0}")]
    PlaybackError(String),

    /// A tone table violates its constraints.
    #[error("invalid tone table: {0}")]
    InvalidToneTable(String),

    /// A tone table file could not be read or parsed.
    #[error("failed to load tone table: {0}")]
    ConfigIo(String),
}

impl SoundError {
    /// Returns true if this error is about the audio device itself.
    #[must_use]
    pub fn is_device_error(&self) -> bool {
        matches!(self, Self::SinkUnavailable(_) | Self::Released)
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::SinkUnavailable(_) => "check that an audio output device is connected",
            Self::Released => "create a new cue scheduler",
            Self::PlaybackError(_) => "check the system audio settings",
            Self::InvalidToneTable(_) => "fix the tone table values and try again",
            Self::ConfigIo(_) => "check the tone table path and JSON syntax",
        }
    }
}
