//! Local command execution for the CLI.
//!
//! `run` wires a [`WorkoutEngine`] to a [`CueScheduler`] through a
//! [`CueDriver`] and renders events to the terminal. Keyboard commands
//! arrive as stdin lines from a dedicated reader thread.

use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, warn};

use crate::cue::{CueConfig, CueScheduler};
use crate::sound::RodioToneSink;
use crate::types::Cue;
use crate::workout::{run_workout, CueDriver, WorkoutEngine, WorkoutEvent};

use super::commands::{PreviewArgs, RunArgs, TonesArgs};
use super::display::Display;

// ============================================================================
// Session Commands
// ============================================================================

/// A keyboard command entered while a workout runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    ToggleMute,
    TogglePause,
    Quit,
}

impl SessionCommand {
    /// Parses one input line; unknown input yields `None`.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "m" | "mute" => Some(Self::ToggleMute),
            "p" | "pause" => Some(Self::TogglePause),
            "q" | "quit" | "stop" => Some(Self::Quit),
            _ => None,
        }
    }
}

// ============================================================================
// Commands
// ============================================================================

/// Loads the cue configuration, from `path` if given.
///
/// # Errors
///
/// Returns an error if the file cannot be read or holds an invalid table.
pub fn load_cue_config(path: Option<&Path>) -> Result<CueConfig> {
    match path {
        Some(path) => CueConfig::load(path)
            .with_context(|| format!("Failed to load tone table from {}", path.display())),
        None => Ok(CueConfig::default()),
    }
}

/// Runs a workout in the terminal until it completes or is stopped.
///
/// # Errors
///
/// Returns an error for an invalid configuration or tone table, or if the
/// workout task fails.
pub async fn run(args: &RunArgs) -> Result<()> {
    let config = args.workout_config();
    config.validate().map_err(anyhow::Error::msg)?;

    let mut cue_config = load_cue_config(args.tones.as_deref())?;
    if args.mute {
        cue_config.start_muted = true;
    }

    let scheduler = Arc::new(CueScheduler::new(cue_config));
    if !scheduler.is_muted() && !scheduler.prepare() {
        warn!("Audio output unavailable, running without cues");
    }
    let driver = CueDriver::new(Arc::clone(&scheduler));

    let (event_tx, mut events) = mpsc::unbounded_channel();
    let engine = Arc::new(Mutex::new(WorkoutEngine::new(config.clone(), event_tx)));
    engine.lock().await.start()?;

    Display::show_workout_plan(&config);
    let runner = tokio::spawn(run_workout(Arc::clone(&engine)));
    let mut input = spawn_input_reader();
    let mut input_open = true;

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else { break };
                driver.handle(&event);
                show_event(&event);

                match event {
                    WorkoutEvent::Completed { .. } => {
                        if !scheduler.is_muted() {
                            let tail = scheduler.tones().playback_duration(Cue::CompleteMelody);
                            tokio::time::sleep(tail).await;
                        }
                        break;
                    }
                    WorkoutEvent::Stopped => break,
                    _ => {}
                }
            }
            line = input.recv(), if input_open => {
                match line.as_deref().map(SessionCommand::parse) {
                    Some(Some(command)) => apply_command(command, &engine, &scheduler).await,
                    Some(None) => debug!("Ignoring unknown input"),
                    None => input_open = false,
                }
            }
            _ = tokio::signal::ctrl_c() => {
                if engine.lock().await.stop().is_err() {
                    break;
                }
            }
        }
    }

    runner.await.context("Workout task panicked")??;
    scheduler.release();
    Ok(())
}

/// Plays one cue and waits for it to finish.
///
/// # Errors
///
/// Returns an error if the tone table cannot be loaded.
pub async fn preview(args: &PreviewArgs) -> Result<()> {
    let mut cue_config = load_cue_config(args.tones.as_deref())?;
    if args.mute {
        cue_config.start_muted = true;
    }

    let scheduler = CueScheduler::new(cue_config);
    Display::show_preview(args.cue, scheduler.is_muted());

    if scheduler.play(args.cue) {
        let duration = scheduler.tones().playback_duration(args.cue);
        tokio::time::sleep(duration).await;
    }
    scheduler.release();
    Ok(())
}

/// Prints the tone table.
///
/// With `--json` the whole cue configuration is printed, in the same shape
/// `--tones` accepts.
///
/// # Errors
///
/// Returns an error if the tone table cannot be loaded or serialized.
pub fn tones(args: &TonesArgs) -> Result<()> {
    let cue_config = load_cue_config(args.tones.as_deref())?;
    if args.json {
        println!("{}", cue_config.to_json_pretty()?);
    } else {
        Display::show_tone_table(&cue_config.tones);
    }
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

async fn apply_command(
    command: SessionCommand,
    engine: &Mutex<WorkoutEngine>,
    scheduler: &CueScheduler<RodioToneSink>,
) {
    match command {
        SessionCommand::ToggleMute => {
            let muted = !scheduler.is_muted();
            scheduler.set_muted(muted);
            Display::show_muted(muted);
        }
        SessionCommand::TogglePause => {
            let mut engine = engine.lock().await;
            let result = if engine.state().is_paused() {
                engine.resume()
            } else {
                engine.pause()
            };
            if let Err(e) = result {
                debug!("Pause toggle ignored: {}", e);
            }
        }
        SessionCommand::Quit => {
            if let Err(e) = engine.lock().await.stop() {
                debug!("Stop ignored: {}", e);
            }
        }
    }
}

fn show_event(event: &WorkoutEvent) {
    match event {
        WorkoutEvent::PhaseStarted {
            phase,
            round,
            total_rounds,
            seconds,
            ..
        } => Display::show_phase_started(*phase, *round, *total_rounds, *seconds),
        WorkoutEvent::Tick {
            phase,
            remaining_seconds,
            ..
        } => Display::show_tick(*phase, *remaining_seconds),
        WorkoutEvent::Paused => Display::show_paused(),
        WorkoutEvent::Resumed => Display::show_resumed(),
        WorkoutEvent::Stopped => Display::show_stopped(),
        WorkoutEvent::Completed { rounds } => Display::show_completed(*rounds),
    }
}

/// Reads stdin lines on a plain thread.
///
/// A blocked stdin read would otherwise hold up runtime shutdown.
fn spawn_input_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    let spawned = std::thread::Builder::new()
        .name("hiit-cues-input".to_string())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });
    if let Err(e) = spawned {
        warn!("Keyboard controls unavailable: {}", e);
    }
    rx
}

// ============================================================================
// Tests
// ============================================================================
