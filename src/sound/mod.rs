//! Sound output for workout cues.
//!
//! This module provides:
//!
//! - The [`CueSink`] capability the scheduler plays tones through
//! - A rodio-backed sink that synthesizes sine tones
//! - The cue-to-tone lookup table
//! - A recording mock for tests
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │   CueScheduler   │ ← picks a Cue
//! └────────┬─────────┘
//!          │ ToneTable lookup
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │     CueSink      │────▶│  RodioToneSink   │──▶ audio thread
//! │                  │     ├──────────────────┤
//! │                  │────▶│   MockCueSink    │
//! └──────────────────┘     └──────────────────┘
//! ```

mod error;
mod player;
mod tone;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

pub use error::SoundError;
pub use player::RodioToneSink;
pub use tone::{CueSound, Melody, MelodyStep, Tone, ToneTable};

/// Platform audio output capable of playing one tone.
pub trait CueSink: Send + 'static {
    /// Plays a tone.
    ///
    /// Must not block: the tone plays in the background.
    ///
    /// # Errors
    ///
    /// Returns an error if the tone could not be handed to the device.
    fn play_tone(&self, tone: &Tone) -> Result<(), SoundError>;
}

/// Mock sink for testing.
///
/// Clones share the same call log, so a test can keep one handle while
/// the scheduler owns another.
#[derive(Debug, Clone, Default)]
pub struct MockCueSink {
    inner: Arc<MockInner>,
}

#[derive(Debug, Default)]
struct MockInner {
    played: Mutex<Vec<Tone>>,
    should_fail: AtomicBool,
}

impl MockCueSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.inner.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn play_count(&self) -> usize {
        self.played().len()
    }

    #[must_use]
    pub fn played(&self) -> Vec<Tone> {
        self.inner
            .played
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear(&self) {
        self.inner
            .played
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl CueSink for MockCueSink {
    fn play_tone(&self, tone: &Tone) -> Result<(), SoundError> {
        if self.inner.should_fail.load(Ordering::SeqCst) {
            return Err(SoundError::PlaybackError("Mock failure".to_string()));
        }
        self.inner
            .played
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(*tone);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_records_tones() {
        let sink = MockCueSink::new();
        let tone = Tone::new(440.0, 100, 0.5);
        sink.play_tone(&tone).unwrap();
        assert_eq!(sink.played(), vec![tone]);
    }

    #[test]
    fn test_mock_clones_share_log() {
        let sink = MockCueSink::new();
        let handle = sink.clone();
        sink.play_tone(&Tone::new(440.0, 100, 0.5)).unwrap();
        assert_eq!(handle.play_count(), 1);

        handle.clear();
        assert_eq!(sink.play_count(), 0);
    }

    #[test]
    fn test_mock_failure() {
        let sink = MockCueSink::new();
        sink.set_should_fail(true);
        assert!(sink.play_tone(&Tone::new(440.0, 100, 0.5)).is_err());
        assert_eq!(sink.play_count(), 0);
    }
}
