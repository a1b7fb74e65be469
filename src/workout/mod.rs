//! Workout module.
//!
//! - `engine`: the per-second interval engine and its events
//! - `driver`: wiring from engine events to the cue scheduler

pub mod driver;
pub mod engine;

pub use driver::CueDriver;
pub use engine::{run_workout, WorkoutEngine, WorkoutEvent};
