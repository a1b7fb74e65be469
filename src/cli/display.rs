//! Display utilities for the HIIT cues CLI.
//!
//! This module provides formatted output for:
//! - Workout plan and progress
//! - Pause, mute and completion messages
//! - The tone table
//! - Error messages

use std::io::Write;

use crate::sound::{CueSound, ToneTable};
use crate::types::{Cue, Phase, WorkoutConfig};

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Shows the workout about to run.
    pub fn show_workout_plan(config: &WorkoutConfig) {
        println!("HIIT workout");
        println!("─────────────────────────────");
        if config.warmup_seconds > 0 {
            println!("Warm-up:  {}", Self::format_clock(config.warmup_seconds));
        }
        println!(
            "Rounds:   {} x {} work / {} rest",
            config.rounds,
            Self::format_clock(config.work_seconds),
            Self::format_clock(config.rest_seconds)
        );
        if config.cooldown_seconds > 0 {
            println!("Cool-down: {}", Self::format_clock(config.cooldown_seconds));
        }
        println!("Total:    {}", Self::format_clock(config.total_seconds()));
        println!("Controls: m+Enter mute, p+Enter pause, q+Enter quit");
        println!();
    }

    /// Shows the start of a phase.
    pub fn show_phase_started(phase: Phase, round: u32, total_rounds: u32, seconds: u32) {
        println!();
        match phase {
            Phase::Work | Phase::Rest => println!(
                "> {} (round {}/{}) {}",
                Self::phase_label(phase),
                round,
                total_rounds,
                Self::format_clock(seconds)
            ),
            Phase::Warmup | Phase::Cooldown => println!(
                "> {} {}",
                Self::phase_label(phase),
                Self::format_clock(seconds)
            ),
        }
    }

    /// Overwrites the countdown line.
    pub fn show_tick(phase: Phase, remaining_seconds: u32) {
        print!(
            "\r  {:<9} {}  ",
            Self::phase_label(phase),
            Self::format_clock(remaining_seconds)
        );
        let _ = std::io::stdout().flush();
    }

    pub fn show_paused() {
        println!("\n|| Paused (p+Enter to resume)");
    }

    pub fn show_resumed() {
        println!("> Resumed");
    }

    pub fn show_stopped() {
        println!("\n[] Workout stopped");
    }

    pub fn show_completed(rounds: u32) {
        println!("\n* Workout complete: {} rounds", rounds);
    }

    pub fn show_muted(muted: bool) {
        if muted {
            println!("\n  Cues muted");
        } else {
            println!("\n  Cues unmuted");
        }
    }

    /// Shows the cue being previewed.
    pub fn show_preview(cue: Cue, muted: bool) {
        if muted {
            println!("{} (muted)", cue);
        } else {
            println!("Playing {}", cue);
        }
    }

    /// Shows every entry of the tone table.
    pub fn show_tone_table(table: &ToneTable) {
        println!("{:<12} {:>10} {:>8} {:>6}", "CUE", "FREQ", "LENGTH", "VOL");
        for cue in Cue::ALL {
            for row in Self::tone_rows(table, cue) {
                println!("{}", row);
            }
        }
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("error: {}", message);
    }

    /// Shows a follow-up hint under an error.
    pub fn show_hint(hint: &str) {
        eprintln!("hint: {}", hint);
    }

    /// Formats the tone table lines for one cue.
    fn tone_rows(table: &ToneTable, cue: Cue) -> Vec<String> {
        match table.sound(cue) {
            CueSound::Tone(tone) => vec![format!(
                "{:<12} {:>7.1} Hz {:>5} ms {:>6.2}",
                cue.as_str(),
                tone.frequency_hz,
                tone.duration_ms,
                tone.volume
            )],
            CueSound::Melody(melody) => melody
                .steps
                .iter()
                .map(|step| {
                    format!(
                        "{:<12} {:>7.1} Hz {:>5} ms {:>6.2}  @{} ms",
                        cue.as_str(),
                        step.tone.frequency_hz,
                        step.tone.duration_ms,
                        step.tone.volume,
                        step.offset_ms
                    )
                })
                .collect(),
        }
    }

    fn phase_label(phase: Phase) -> &'static str {
        match phase {
            Phase::Warmup => "WARM-UP",
            Phase::Work => "WORK",
            Phase::Rest => "REST",
            Phase::Cooldown => "COOL-DOWN",
        }
    }

    /// Formats seconds as `m:ss`.
    fn format_clock(total_seconds: u32) -> String {
        let (minutes, seconds) = Self::format_time(total_seconds);
        format!("{}:{:02}", minutes, seconds)
    }

    /// Formats seconds as (minutes, seconds).
    fn format_time(total_seconds: u32) -> (u32, u32) {
        (total_seconds / 60, total_seconds % 60)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod format_tests {
        use super::*;

        #[test]
        fn test_format_time() {
            assert_eq!(Display::format_time(0), (0, 0));
            assert_eq!(Display::format_time(45), (0, 45));
            assert_eq!(Display::format_time(90), (1, 30));
            assert_eq!(Display::format_time(3600), (60, 0));
        }

        #[test]
        fn test_format_clock_pads_seconds() {
            assert_eq!(Display::format_clock(5), "0:05");
            assert_eq!(Display::format_clock(230), "3:50");
        }

        #[test]
        fn test_phase_labels() {
            assert_eq!(Display::phase_label(Phase::Work), "WORK");
            assert_eq!(Display::phase_label(Phase::Cooldown), "COOL-DOWN");
        }

        #[test]
        fn test_tone_rows_single_tone() {
            let rows = Display::tone_rows(&ToneTable::default(), Cue::BeepLow);
            assert_eq!(rows.len(), 1);
            assert!(rows[0].starts_with("beep-low"));
            assert!(rows[0].contains("440.0 Hz"));
            assert!(rows[0].contains("150 ms"));
        }

        #[test]
        fn test_tone_rows_melody() {
            let rows = Display::tone_rows(&ToneTable::default(), Cue::CompleteMelody);
            assert_eq!(rows.len(), 3);
            assert!(rows[1].ends_with("@250 ms"));
            assert!(rows[2].ends_with("@500 ms"));
        }
    }

    mod display_tests {
        use super::*;

        #[test]
        fn test_show_functions_no_panic() {
            Display::show_workout_plan(&WorkoutConfig::default().with_warmup_seconds(60));
            Display::show_phase_started(Phase::Work, 1, 8, 20);
            Display::show_phase_started(Phase::Warmup, 0, 8, 60);
            Display::show_tick(Phase::Rest, 7);
            Display::show_paused();
            Display::show_resumed();
            Display::show_stopped();
            Display::show_completed(8);
            Display::show_muted(true);
            Display::show_preview(Cue::GoTone, false);
            Display::show_tone_table(&ToneTable::default());
            Display::show_error("Test error message");
            Display::show_hint("check the tone table path");
        }
    }
}
