//! HIIT Cues Library
//!
//! Audio cues for interval (HIIT) workouts. It includes:
//! - The cue scheduler: countdown beeps, phase tones and the completion
//!   melody, with mute and release handling
//! - Sound output through a rodio tone sink, behind the `CueSink` trait
//! - An interval engine that drives the scheduler once per second
//! - CLI command parsing and display utilities
//! - Type definitions for phases, cues and workout configuration

pub mod cli;
pub mod cue;
pub mod sound;
pub mod types;
pub mod workout;

// Re-export commonly used types for convenience
pub use types::{Cue, Phase, PhaseSpan, WorkoutConfig, WorkoutState, WorkoutStatus};

// Re-export cue scheduling types
pub use cue::{cue_for_tick, CueConfig, CueScheduler, PendingSteps, SinkStatus};

// Re-export sound types
pub use sound::{
    CueSink, Melody, MelodyStep, MockCueSink, RodioToneSink, SoundError, Tone, ToneTable,
};

// Re-export workout types
pub use workout::{run_workout, CueDriver, WorkoutEngine, WorkoutEvent};
