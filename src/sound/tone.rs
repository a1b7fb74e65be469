//! Tone definitions and the cue-to-tone lookup table.
//!
//! The concrete frequencies carry no meaning beyond being distinguishable;
//! any table that passes [`ToneTable::validate`] can replace the default.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::SoundError;
use crate::types::Cue;

const MIN_FREQUENCY_HZ: f32 = 20.0;
const MAX_FREQUENCY_HZ: f32 = 20_000.0;
const MAX_DURATION_MS: u64 = 5_000;
const MAX_OFFSET_MS: u64 = 10_000;

/// A single sine tone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tone {
    /// Pitch in Hz.
    pub frequency_hz: f32,
    /// How long the tone plays.
    pub duration_ms: u64,
    /// Amplitude scale, 0.0 to 1.0.
    #[serde(default = "default_volume")]
    pub volume: f32,
}

fn default_volume() -> f32 {
    0.5
}

impl Tone {
    #[must_use]
    pub const fn new(frequency_hz: f32, duration_ms: u64, volume: f32) -> Self {
        Self {
            frequency_hz,
            duration_ms,
            volume,
        }
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    fn validate(&self, label: &str) -> Result<(), SoundError> {
        if !(MIN_FREQUENCY_HZ..=MAX_FREQUENCY_HZ).contains(&self.frequency_hz) {
            return Err(SoundError::InvalidToneTable(format!(
                "{label}: frequency {} Hz is outside {MIN_FREQUENCY_HZ}-{MAX_FREQUENCY_HZ} Hz",
                self.frequency_hz
            )));
        }
        if self.duration_ms == 0 || self.duration_ms > MAX_DURATION_MS {
            return Err(SoundError::InvalidToneTable(format!(
                "{label}: duration {} ms is outside 1-{MAX_DURATION_MS} ms",
                self.duration_ms
            )));
        }
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(SoundError::InvalidToneTable(format!(
                "{label}: volume {} is outside 0.0-1.0",
                self.volume
            )));
        }
        Ok(())
    }
}

/// One step of a melody, played `offset_ms` after the first step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MelodyStep {
    pub offset_ms: u64,
    pub tone: Tone,
}

impl MelodyStep {
    #[must_use]
    pub const fn new(offset_ms: u64, tone: Tone) -> Self {
        Self { offset_ms, tone }
    }

    #[must_use]
    pub fn offset(&self) -> Duration {
        Duration::from_millis(self.offset_ms)
    }
}

/// An ordered sequence of tones with fixed offsets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Melody {
    pub steps: Vec<MelodyStep>,
}

impl Melody {
    /// Checks that steps start at 0 and never overlap.
    ///
    /// Each step must start no earlier than the previous step's offset plus
    /// its duration.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::InvalidToneTable` describing the first violation.
    pub fn validate(&self) -> Result<(), SoundError> {
        let Some(first) = self.steps.first() else {
            return Err(SoundError::InvalidToneTable(
                "melody must have at least one step".to_string(),
            ));
        };
        if first.offset_ms != 0 {
            return Err(SoundError::InvalidToneTable(format!(
                "melody must start at offset 0, not {} ms",
                first.offset_ms
            )));
        }

        for (i, step) in self.steps.iter().enumerate() {
            step.tone.validate(&format!("melody step {}", i + 1))?;
            if step.offset_ms > MAX_OFFSET_MS {
                return Err(SoundError::InvalidToneTable(format!(
                    "melody step {}: offset {} ms is beyond {MAX_OFFSET_MS} ms",
                    i + 1,
                    step.offset_ms
                )));
            }
        }

        for (i, pair) in self.steps.windows(2).enumerate() {
            let (prev, next) = (&pair[0], &pair[1]);
            let prev_end = prev.offset_ms.saturating_add(prev.tone.duration_ms);
            if next.offset_ms < prev_end {
                return Err(SoundError::InvalidToneTable(format!(
                    "melody step {} starts at {} ms but step {} plays until {} ms",
                    i + 2,
                    next.offset_ms,
                    i + 1,
                    prev_end
                )));
            }
        }
        Ok(())
    }

    /// Time from the first step until the last tone stops.
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        self.steps
            .iter()
            .map(|step| step.offset_ms.saturating_add(step.tone.duration_ms))
            .max()
            .map_or(Duration::ZERO, Duration::from_millis)
    }
}

/// What a cue sounds like.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CueSound<'a> {
    Tone(&'a Tone),
    Melody(&'a Melody),
}

/// Lookup table from every [`Cue`] to its sound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToneTable {
    pub beep_low: Tone,
    pub beep_medium: Tone,
    pub beep_high: Tone,
    pub go: Tone,
    pub rest: Tone,
    pub phase: Tone,
    pub complete: Melody,
}

impl Default for ToneTable {
    fn default() -> Self {
        Self {
            beep_low: Tone::new(440.0, 150, 0.5),
            beep_medium: Tone::new(660.0, 150, 0.5),
            beep_high: Tone::new(880.0, 150, 0.5),
            go: Tone::new(1046.5, 400, 0.6),
            rest: Tone::new(523.25, 400, 0.6),
            phase: Tone::new(784.0, 200, 0.5),
            complete: Melody {
                steps: vec![
                    MelodyStep::new(0, Tone::new(523.25, 200, 0.6)),
                    MelodyStep::new(250, Tone::new(659.25, 200, 0.6)),
                    MelodyStep::new(500, Tone::new(783.99, 400, 0.6)),
                ],
            },
        }
    }
}

impl ToneTable {
    /// Returns the sound for a cue.
    #[must_use]
    pub fn sound(&self, cue: Cue) -> CueSound<'_> {
        match cue {
            Cue::BeepLow => CueSound::Tone(&self.beep_low),
            Cue::BeepMedium => CueSound::Tone(&self.beep_medium),
            Cue::BeepHigh => CueSound::Tone(&self.beep_high),
            Cue::GoTone => CueSound::Tone(&self.go),
            Cue::RestTone => CueSound::Tone(&self.rest),
            Cue::PhaseTone => CueSound::Tone(&self.phase),
            Cue::CompleteMelody => CueSound::Melody(&self.complete),
        }
    }

    /// Returns the single tone for a cue, or `None` for the melody.
    #[must_use]
    pub fn tone(&self, cue: Cue) -> Option<&Tone> {
        match self.sound(cue) {
            CueSound::Tone(tone) => Some(tone),
            CueSound::Melody(_) => None,
        }
    }

    /// How long a cue takes to play out.
    #[must_use]
    pub fn playback_duration(&self, cue: Cue) -> Duration {
        match self.sound(cue) {
            CueSound::Tone(tone) => tone.duration(),
            CueSound::Melody(melody) => melody.total_duration(),
        }
    }

    /// Validates every entry of the table.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::InvalidToneTable` for the first bad entry.
    pub fn validate(&self) -> Result<(), SoundError> {
        for cue in Cue::ALL {
            match self.sound(cue) {
                CueSound::Tone(tone) => tone.validate(cue.as_str())?,
                CueSound::Melody(melody) => melody.validate()?,
            }
        }
        Ok(())
    }
}
