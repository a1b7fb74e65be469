//! Feeds workout events to the cue scheduler.

use std::sync::Arc;

use crate::cue::CueScheduler;
use crate::sound::CueSink;
use crate::types::Cue;

use super::engine::WorkoutEvent;

/// Translates [`WorkoutEvent`]s into cue scheduler calls.
///
/// The opening phase gets a go (work) or phase (warm-up) tone, the
/// zero-second tick of the final phase gets the completion melody instead
/// of a transition tone, and every other tick goes through
/// [`CueScheduler::on_tick`].
pub struct CueDriver<S: CueSink> {
    scheduler: Arc<CueScheduler<S>>,
}

impl<S: CueSink> CueDriver<S> {
    pub fn new(scheduler: Arc<CueScheduler<S>>) -> Self {
        Self { scheduler }
    }

    /// Reacts to one event. Returns the cue that started playing, if any.
    pub fn handle(&self, event: &WorkoutEvent) -> Option<Cue> {
        match event {
            WorkoutEvent::PhaseStarted {
                phase,
                is_first: true,
                ..
            } => {
                let cue = if phase.is_work() {
                    Cue::GoTone
                } else {
                    Cue::PhaseTone
                };
                self.scheduler.play(cue).then_some(cue)
            }
            WorkoutEvent::Tick {
                remaining_seconds: 0,
                is_final_phase: true,
                ..
            } => self
                .scheduler
                .play_complete_tone()
                .then_some(Cue::CompleteMelody),
            WorkoutEvent::Tick {
                phase,
                remaining_seconds,
                ..
            } => self.scheduler.on_tick(*remaining_seconds, phase.is_work()),
            WorkoutEvent::Paused | WorkoutEvent::Stopped => {
                self.scheduler.cancel_pending();
                None
            }
            WorkoutEvent::PhaseStarted { .. }
            | WorkoutEvent::Resumed
            | WorkoutEvent::Completed { .. } => None,
        }
    }

    pub fn scheduler(&self) -> &Arc<CueScheduler<S>> {
        &self.scheduler
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cue::CueConfig;
    use crate::sound::{MockCueSink, Tone, ToneTable};
    use crate::types::Phase;

    fn driver() -> (CueDriver<MockCueSink>, MockCueSink) {
        let sink = MockCueSink::new();
        let scheduler = CueScheduler::with_sink(CueConfig::default(), sink.clone());
        (CueDriver::new(Arc::new(scheduler)), sink)
    }

    fn started(phase: Phase, is_first: bool) -> WorkoutEvent {
        WorkoutEvent::PhaseStarted {
            phase,
            round: 1,
            total_rounds: 8,
            seconds: 20,
            is_first,
        }
    }

    fn first_melody_tone() -> Tone {
        ToneTable::default().complete.steps[0].tone
    }

    fn tick(phase: Phase, remaining_seconds: u32, is_final_phase: bool) -> WorkoutEvent {
        WorkoutEvent::Tick {
            phase,
            remaining_seconds,
            is_final_phase,
        }
    }

    #[test]
    fn test_opening_phase_cue() {
        let (driver, _sink) = driver();
        assert_eq!(driver.handle(&started(Phase::Work, true)), Some(Cue::GoTone));
        assert_eq!(driver.handle(&started(Phase::Warmup, true)), Some(Cue::PhaseTone));
        assert_eq!(driver.handle(&started(Phase::Rest, false)), None);
    }

    #[test]
    fn test_ticks_follow_countdown_policy() {
        let (driver, _sink) = driver();
        assert_eq!(driver.handle(&tick(Phase::Work, 10, false)), None);
        assert_eq!(driver.handle(&tick(Phase::Work, 3, false)), Some(Cue::BeepLow));
        assert_eq!(driver.handle(&tick(Phase::Work, 0, false)), Some(Cue::RestTone));
        assert_eq!(driver.handle(&tick(Phase::Warmup, 0, false)), Some(Cue::GoTone));
    }

    #[test]
    fn test_final_tick_plays_melody() {
        let (driver, sink) = driver();
        assert_eq!(
            driver.handle(&tick(Phase::Work, 0, true)),
            Some(Cue::CompleteMelody)
        );
        assert_eq!(sink.played(), vec![first_melody_tone()]);
    }

    #[test]
    fn test_countdown_in_final_phase_still_beeps() {
        let (driver, _sink) = driver();
        assert_eq!(driver.handle(&tick(Phase::Cooldown, 1, true)), Some(Cue::BeepHigh));
    }

    #[test]
    fn test_other_events_are_silent() {
        let (driver, sink) = driver();
        assert_eq!(driver.handle(&WorkoutEvent::Paused), None);
        assert_eq!(driver.handle(&WorkoutEvent::Resumed), None);
        assert_eq!(driver.handle(&WorkoutEvent::Stopped), None);
        assert_eq!(driver.handle(&WorkoutEvent::Completed { rounds: 8 }), None);
        assert_eq!(sink.play_count(), 0);
    }
}
