//! Core data types for HIIT cues.
//!
//! This module defines the data structures used for:
//! - Workout phases and the audio cues they trigger
//! - Workout configuration with validation
//! - Countdown state for a running workout

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ============================================================================
// Phase
// ============================================================================

/// A segment of an interval workout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Warm-up before the first round
    Warmup,
    /// Work interval
    Work,
    /// Rest interval between rounds
    Rest,
    /// Cool-down after the last round
    Cooldown,
}

impl Phase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Warmup => "warmup",
            Phase::Work => "work",
            Phase::Rest => "rest",
            Phase::Cooldown => "cooldown",
        }
    }

    /// Returns true for work intervals.
    ///
    /// Warm-up and cool-down count as non-work phases for cue purposes.
    pub fn is_work(&self) -> bool {
        matches!(self, Phase::Work)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Cue
// ============================================================================

/// A discrete audio signal for one workout event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    /// Countdown beep at 3 seconds remaining
    BeepLow,
    /// Countdown beep at 2 seconds remaining
    BeepMedium,
    /// Countdown beep at 1 second remaining
    BeepHigh,
    /// A work interval begins
    GoTone,
    /// A rest interval begins
    RestTone,
    /// The workout is finished
    CompleteMelody,
    /// Any other phase change (warm-up, cool-down)
    PhaseTone,
}

impl Cue {
    /// Every cue, in table order.
    pub const ALL: [Cue; 7] = [
        Cue::BeepLow,
        Cue::BeepMedium,
        Cue::BeepHigh,
        Cue::GoTone,
        Cue::RestTone,
        Cue::CompleteMelody,
        Cue::PhaseTone,
    ];

    /// Returns the kebab-case name used on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Cue::BeepLow => "beep-low",
            Cue::BeepMedium => "beep-medium",
            Cue::BeepHigh => "beep-high",
            Cue::GoTone => "go",
            Cue::RestTone => "rest",
            Cue::CompleteMelody => "complete",
            Cue::PhaseTone => "phase",
        }
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cue {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Cue::ALL
            .into_iter()
            .find(|cue| cue.as_str() == normalized)
            .ok_or_else(|| {
                let names: Vec<&str> = Cue::ALL.iter().map(Cue::as_str).collect();
                format!("unknown cue '{}' (expected one of: {})", s, names.join(", "))
            })
    }
}

// ============================================================================
// WorkoutConfig
// ============================================================================

/// Configuration for an interval workout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutConfig {
    /// Work interval in seconds (5-3600)
    pub work_seconds: u32,
    /// Rest interval in seconds (0-3600, 0 disables rests)
    pub rest_seconds: u32,
    /// Number of work rounds (1-100)
    pub rounds: u32,
    /// Warm-up in seconds (0-1800)
    pub warmup_seconds: u32,
    /// Cool-down in seconds (0-1800)
    pub cooldown_seconds: u32,
}

impl Default for WorkoutConfig {
    fn default() -> Self {
        Self {
            work_seconds: 20,
            rest_seconds: 10,
            rounds: 8,
            warmup_seconds: 0,
            cooldown_seconds: 0,
        }
    }
}

impl WorkoutConfig {
    pub fn with_work_seconds(mut self, seconds: u32) -> Self {
        self.work_seconds = seconds;
        self
    }

    pub fn with_rest_seconds(mut self, seconds: u32) -> Self {
        self.rest_seconds = seconds;
        self
    }

    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    pub fn with_warmup_seconds(mut self, seconds: u32) -> Self {
        self.warmup_seconds = seconds;
        self
    }

    pub fn with_cooldown_seconds(mut self, seconds: u32) -> Self {
        self.cooldown_seconds = seconds;
        self
    }

    /// Validates the configuration.
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if !(5..=3600).contains(&self.work_seconds) {
            return Err("work interval must be between 5 and 3600 seconds".to_string());
        }
        if self.rest_seconds > 3600 {
            return Err("rest interval must be between 0 and 3600 seconds".to_string());
        }
        if !(1..=100).contains(&self.rounds) {
            return Err("rounds must be between 1 and 100".to_string());
        }
        if self.warmup_seconds > 1800 {
            return Err("warm-up must be between 0 and 1800 seconds".to_string());
        }
        if self.cooldown_seconds > 1800 {
            return Err("cool-down must be between 0 and 1800 seconds".to_string());
        }
        Ok(())
    }

    /// Builds the ordered list of phases for this workout.
    ///
    /// Zero-length phases are left out, as is the rest after the final round.
    pub fn plan(&self) -> Vec<PhaseSpan> {
        let mut spans = Vec::with_capacity(self.rounds as usize * 2 + 2);

        if self.warmup_seconds > 0 {
            spans.push(PhaseSpan::new(Phase::Warmup, 0, self.warmup_seconds));
        }

        for round in 1..=self.rounds {
            spans.push(PhaseSpan::new(Phase::Work, round, self.work_seconds));
            if round < self.rounds && self.rest_seconds > 0 {
                spans.push(PhaseSpan::new(Phase::Rest, round, self.rest_seconds));
            }
        }

        if self.cooldown_seconds > 0 {
            spans.push(PhaseSpan::new(Phase::Cooldown, 0, self.cooldown_seconds));
        }

        spans
    }

    /// Total length of the workout in seconds.
    pub fn total_seconds(&self) -> u32 {
        self.plan().iter().map(|span| span.seconds).sum()
    }
}

// ============================================================================
// PhaseSpan
// ============================================================================

/// One entry of a workout plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseSpan {
    /// Which phase this is
    pub phase: Phase,
    /// Round number (1-based), 0 for warm-up and cool-down
    pub round: u32,
    /// Length in seconds
    pub seconds: u32,
}

impl PhaseSpan {
    pub fn new(phase: Phase, round: u32, seconds: u32) -> Self {
        Self {
            phase,
            round,
            seconds,
        }
    }
}

// ============================================================================
// WorkoutState
// ============================================================================

/// Lifecycle status of a workout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutStatus {
    /// Not started, or stopped
    #[default]
    Idle,
    /// Counting down
    Running,
    /// Paused mid-phase
    Paused,
    /// All phases completed
    Finished,
}

/// Countdown state of a workout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutState {
    /// Workout configuration
    pub config: WorkoutConfig,
    /// Current lifecycle status
    pub status: WorkoutStatus,
    /// Remaining seconds in the current phase
    pub remaining_seconds: u32,
    plan: Vec<PhaseSpan>,
    index: usize,
}

impl WorkoutState {
    /// Creates an idle state for the given configuration.
    pub fn new(config: WorkoutConfig) -> Self {
        let plan = config.plan();
        Self {
            config,
            status: WorkoutStatus::Idle,
            remaining_seconds: 0,
            plan,
            index: 0,
        }
    }

    /// Starts the workout from its first phase.
    pub fn start(&mut self) {
        self.index = 0;
        self.remaining_seconds = self.plan.first().map_or(0, |span| span.seconds);
        self.status = WorkoutStatus::Running;
    }

    /// Pauses a running workout.
    pub fn pause(&mut self) {
        if self.status == WorkoutStatus::Running {
            self.status = WorkoutStatus::Paused;
        }
    }

    /// Resumes a paused workout.
    pub fn resume(&mut self) {
        if self.status == WorkoutStatus::Paused {
            self.status = WorkoutStatus::Running;
        }
    }

    /// Stops the workout and resets the countdown.
    pub fn stop(&mut self) {
        self.status = WorkoutStatus::Idle;
        self.remaining_seconds = 0;
        self.index = 0;
    }

    /// Decrements the countdown by one second.
    ///
    /// Returns true if the current phase has reached 0.
    pub fn tick(&mut self) -> bool {
        if self.remaining_seconds > 0 {
            self.remaining_seconds -= 1;
        }
        self.remaining_seconds == 0
    }

    /// Moves on to the next phase.
    ///
    /// Returns false (and marks the workout finished) when there is none.
    pub fn advance(&mut self) -> bool {
        if self.index + 1 < self.plan.len() {
            self.index += 1;
            self.remaining_seconds = self.plan[self.index].seconds;
            true
        } else {
            self.status = WorkoutStatus::Finished;
            self.remaining_seconds = 0;
            false
        }
    }

    /// Returns the phase currently counting down.
    pub fn current_span(&self) -> Option<&PhaseSpan> {
        self.plan.get(self.index)
    }

    /// Returns true if the current phase is the last one in the plan.
    pub fn is_final_phase(&self) -> bool {
        self.index + 1 >= self.plan.len()
    }

    /// Returns the full phase plan.
    pub fn plan(&self) -> &[PhaseSpan] {
        &self.plan
    }

    pub fn is_running(&self) -> bool {
        self.status == WorkoutStatus::Running
    }

    pub fn is_paused(&self) -> bool {
        self.status == WorkoutStatus::Paused
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod phase_tests {
        use super::*;

        #[test]
        fn test_only_work_is_work() {
            assert!(Phase::Work.is_work());
            assert!(!Phase::Rest.is_work());
            assert!(!Phase::Warmup.is_work());
            assert!(!Phase::Cooldown.is_work());
        }

        #[test]
        fn test_phase_serialization() {
            let json = serde_json::to_string(&Phase::Cooldown).unwrap();
            assert_eq!(json, "\"cooldown\"");
        }

        #[test]
        fn test_phase_display() {
            assert_eq!(Phase::Warmup.to_string(), "warmup");
        }
    }

    mod cue_tests {
        use super::*;

        #[test]
        fn test_parse_every_cue_name() {
            for cue in Cue::ALL {
                assert_eq!(cue.as_str().parse::<Cue>().unwrap(), cue);
            }
        }

        #[test]
        fn test_parse_is_lenient_about_case_and_underscores() {
            assert_eq!("BEEP_LOW".parse::<Cue>().unwrap(), Cue::BeepLow);
            assert_eq!(" Complete ".parse::<Cue>().unwrap(), Cue::CompleteMelody);
        }

        #[test]
        fn test_parse_unknown_lists_choices() {
            let err = "whistle".parse::<Cue>().unwrap_err();
            assert!(err.contains("whistle"));
            assert!(err.contains("beep-medium"));
        }
    }

    mod workout_config_tests {
        use super::*;

        #[test]
        fn test_default_is_tabata() {
            let config = WorkoutConfig::default();
            assert_eq!(config.work_seconds, 20);
            assert_eq!(config.rest_seconds, 10);
            assert_eq!(config.rounds, 8);
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_validate_ranges() {
            assert!(WorkoutConfig::default().with_work_seconds(4).validate().is_err());
            assert!(WorkoutConfig::default().with_work_seconds(3601).validate().is_err());
            assert!(WorkoutConfig::default().with_rest_seconds(0).validate().is_ok());
            assert!(WorkoutConfig::default().with_rest_seconds(3601).validate().is_err());
            assert!(WorkoutConfig::default().with_rounds(0).validate().is_err());
            assert!(WorkoutConfig::default().with_rounds(101).validate().is_err());
            assert!(WorkoutConfig::default().with_warmup_seconds(1801).validate().is_err());
            assert!(WorkoutConfig::default().with_cooldown_seconds(1801).validate().is_err());
        }

        #[test]
        fn test_plan_skips_final_rest() {
            let plan = WorkoutConfig::default().with_rounds(2).plan();
            assert_eq!(
                plan,
                vec![
                    PhaseSpan::new(Phase::Work, 1, 20),
                    PhaseSpan::new(Phase::Rest, 1, 10),
                    PhaseSpan::new(Phase::Work, 2, 20),
                ]
            );
        }

        #[test]
        fn test_plan_with_warmup_and_cooldown() {
            let plan = WorkoutConfig::default()
                .with_rounds(1)
                .with_warmup_seconds(60)
                .with_cooldown_seconds(30)
                .plan();
            let phases: Vec<Phase> = plan.iter().map(|s| s.phase).collect();
            assert_eq!(phases, vec![Phase::Warmup, Phase::Work, Phase::Cooldown]);
        }

        #[test]
        fn test_plan_without_rest() {
            let plan = WorkoutConfig::default()
                .with_rounds(3)
                .with_rest_seconds(0)
                .plan();
            assert!(plan.iter().all(|s| s.phase == Phase::Work));
            assert_eq!(plan.len(), 3);
        }

        #[test]
        fn test_total_seconds() {
            // 8 x 20s work + 7 x 10s rest
            assert_eq!(WorkoutConfig::default().total_seconds(), 230);
        }
    }

    mod workout_state_tests {
        use super::*;

        fn short_config() -> WorkoutConfig {
            WorkoutConfig::default()
                .with_work_seconds(5)
                .with_rest_seconds(3)
                .with_rounds(2)
        }

        #[test]
        fn test_new_state_is_idle() {
            let state = WorkoutState::new(short_config());
            assert_eq!(state.status, WorkoutStatus::Idle);
            assert_eq!(state.remaining_seconds, 0);
        }

        #[test]
        fn test_start_loads_first_phase() {
            let mut state = WorkoutState::new(short_config());
            state.start();
            assert!(state.is_running());
            assert_eq!(state.remaining_seconds, 5);
            assert_eq!(state.current_span().unwrap().phase, Phase::Work);
        }

        #[test]
        fn test_tick_reports_phase_end() {
            let mut state = WorkoutState::new(short_config());
            state.start();
            for _ in 0..4 {
                assert!(!state.tick());
            }
            assert!(state.tick());
            assert!(state.tick(), "tick saturates at zero");
        }

        #[test]
        fn test_advance_through_plan() {
            let mut state = WorkoutState::new(short_config());
            state.start();
            assert!(!state.is_final_phase());

            assert!(state.advance());
            assert_eq!(state.current_span().unwrap().phase, Phase::Rest);
            assert_eq!(state.remaining_seconds, 3);

            assert!(state.advance());
            assert!(state.is_final_phase());

            assert!(!state.advance());
            assert_eq!(state.status, WorkoutStatus::Finished);
        }

        #[test]
        fn test_pause_and_resume() {
            let mut state = WorkoutState::new(short_config());
            state.pause();
            assert_eq!(state.status, WorkoutStatus::Idle, "idle cannot pause");

            state.start();
            state.pause();
            assert!(state.is_paused());
            state.resume();
            assert!(state.is_running());
        }

        #[test]
        fn test_stop_resets() {
            let mut state = WorkoutState::new(short_config());
            state.start();
            state.advance();
            state.stop();
            assert_eq!(state.status, WorkoutStatus::Idle);
            assert_eq!(state.remaining_seconds, 0);
            assert_eq!(state.current_span().unwrap().phase, Phase::Work);
        }
    }
}
