//! Interval engine for workouts.
//!
//! This module provides the per-second driver for a workout:
//! - Phase transitions (warm-up → work/rest rounds → cool-down)
//! - Countdown with tokio::time::interval
//! - Event firing for cues and display

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::{mpsc, Mutex};
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::debug;

use crate::types::{Phase, WorkoutConfig, WorkoutState, WorkoutStatus};

// ============================================================================
// WorkoutEvent
// ============================================================================

/// Events published by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkoutEvent {
    /// A phase began counting down
    PhaseStarted {
        /// The phase
        phase: Phase,
        /// Round number, 0 for warm-up and cool-down
        round: u32,
        /// Rounds in the workout
        total_rounds: u32,
        /// Length of the phase in seconds
        seconds: u32,
        /// True for the opening phase of the workout
        is_first: bool,
    },
    /// One second elapsed
    Tick {
        /// Phase the second elapsed in
        phase: Phase,
        /// Seconds left in that phase
        remaining_seconds: u32,
        /// True if no phase follows this one
        is_final_phase: bool,
    },
    /// Workout paused
    Paused,
    /// Workout resumed
    Resumed,
    /// Workout stopped before the end
    Stopped,
    /// Every phase completed
    Completed {
        /// Rounds completed
        rounds: u32,
    },
}

// ============================================================================
// WorkoutEngine
// ============================================================================

/// Engine that owns the workout countdown and publishes its events.
pub struct WorkoutEngine {
    state: WorkoutState,
    event_tx: mpsc::UnboundedSender<WorkoutEvent>,
}

impl WorkoutEngine {
    /// Creates an idle engine for the given workout.
    pub fn new(config: WorkoutConfig, event_tx: mpsc::UnboundedSender<WorkoutEvent>) -> Self {
        Self {
            state: WorkoutState::new(config),
            event_tx,
        }
    }

    /// Starts the workout from the first phase.
    ///
    /// # Errors
    ///
    /// Returns an error if the workout is already in progress or the
    /// configuration is invalid.
    pub fn start(&mut self) -> Result<()> {
        if self.state.is_running() || self.state.is_paused() {
            anyhow::bail!("workout is already in progress");
        }
        self.state.config.validate().map_err(anyhow::Error::msg)?;

        self.state.start();
        self.send_phase_started(true)
    }

    /// Pauses the workout.
    ///
    /// # Errors
    ///
    /// Returns an error if the workout is not running.
    pub fn pause(&mut self) -> Result<()> {
        if !self.state.is_running() {
            anyhow::bail!("workout is not running");
        }

        self.state.pause();
        self.send(WorkoutEvent::Paused)
    }

    /// Resumes a paused workout.
    ///
    /// # Errors
    ///
    /// Returns an error if the workout is not paused.
    pub fn resume(&mut self) -> Result<()> {
        if !self.state.is_paused() {
            anyhow::bail!("workout is not paused");
        }

        self.state.resume();
        self.send(WorkoutEvent::Resumed)
    }

    /// Stops the workout.
    ///
    /// # Errors
    ///
    /// Returns an error if the workout is neither running nor paused.
    pub fn stop(&mut self) -> Result<()> {
        if !self.state.is_running() && !self.state.is_paused() {
            anyhow::bail!("workout is not running");
        }

        self.state.stop();
        self.send(WorkoutEvent::Stopped)
    }

    /// Advances the countdown by one second.
    ///
    /// Does nothing unless running. Returns true once the final phase
    /// has completed.
    ///
    /// # Errors
    ///
    /// Returns an error if the event receiver has been dropped.
    pub fn tick(&mut self) -> Result<bool> {
        if !self.state.is_running() {
            return Ok(false);
        }
        let Some(span) = self.state.current_span().copied() else {
            return Ok(false);
        };
        let is_final_phase = self.state.is_final_phase();

        let phase_done = self.state.tick();
        self.send(WorkoutEvent::Tick {
            phase: span.phase,
            remaining_seconds: self.state.remaining_seconds,
            is_final_phase,
        })?;

        if !phase_done {
            return Ok(false);
        }

        if self.state.advance() {
            self.send_phase_started(false)?;
            Ok(false)
        } else {
            debug!("Workout complete");
            self.send(WorkoutEvent::Completed {
                rounds: self.state.config.rounds,
            })?;
            Ok(true)
        }
    }

    /// Returns a reference to the workout state.
    pub fn state(&self) -> &WorkoutState {
        &self.state
    }

    fn send_phase_started(&self, is_first: bool) -> Result<()> {
        let Some(span) = self.state.current_span().copied() else {
            return Ok(());
        };
        debug!("Phase started: {} (round {})", span.phase, span.round);
        self.send(WorkoutEvent::PhaseStarted {
            phase: span.phase,
            round: span.round,
            total_rounds: self.state.config.rounds,
            seconds: span.seconds,
            is_first,
        })
    }

    fn send(&self, event: WorkoutEvent) -> Result<()> {
        self.event_tx
            .send(event)
            .context("Failed to send workout event")
    }
}

/// Drives the engine once per second until the workout ends.
///
/// Call after [`WorkoutEngine::start`]. Returns when the workout
/// completes or is stopped; pauses keep the loop waiting.
///
/// # Errors
///
/// Returns an error if the event receiver has been dropped.
pub async fn run_workout(engine: Arc<Mutex<WorkoutEngine>>) -> Result<()> {
    let mut ticker = interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The first tick completes immediately
    ticker.tick().await;

    loop {
        ticker.tick().await;

        let mut engine = engine.lock().await;
        match engine.state().status {
            WorkoutStatus::Running => {
                if engine.tick()? {
                    return Ok(());
                }
            }
            WorkoutStatus::Paused => continue,
            WorkoutStatus::Idle | WorkoutStatus::Finished => return Ok(()),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
