//! Audio cue scheduling for interval workouts.
//!
//! - `schedule`: the pure tick-to-cue policy
//! - `scheduler`: [`CueScheduler`], which plays cues through a sink with
//!   mute and release handling
//! - `timeline`: cancelable delayed steps used by the completion melody
//! - `config`: [`CueConfig`], loadable from JSON
//!
//! # Usage
//!
//! ```rust
//! use hiit_cues::cue::{CueConfig, CueScheduler};
//! use hiit_cues::sound::MockCueSink;
//! use hiit_cues::types::Cue;
//!
//! let sink = MockCueSink::new();
//! let scheduler = CueScheduler::with_sink(CueConfig::default(), sink.clone());
//!
//! let cues: Vec<_> = [(3, false), (2, false), (1, false), (0, false)]
//!     .into_iter()
//!     .filter_map(|(remaining, is_work)| scheduler.on_tick(remaining, is_work))
//!     .collect();
//!
//! assert_eq!(cues, vec![Cue::BeepLow, Cue::BeepMedium, Cue::BeepHigh, Cue::GoTone]);
//! assert_eq!(sink.play_count(), 4);
//! ```

mod config;
mod schedule;
mod scheduler;
mod timeline;

pub use config::CueConfig;
pub use schedule::cue_for_tick;
pub use scheduler::{CueScheduler, SinkFactory, SinkStatus};
pub use timeline::PendingSteps;
