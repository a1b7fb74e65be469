//! Command definitions for the HIIT cues CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::types::{Cue, WorkoutConfig};

// ============================================================================
// CLI Structure
// ============================================================================

/// HIIT Cues - audio cues for interval workouts
#[derive(Parser, Debug)]
#[command(
    name = "hiit-cues",
    version,
    about = "Interval workout timer with audio cues",
    long_about = "Runs HIIT interval workouts in the terminal.\n\
                  Countdown beeps sound in the last three seconds of every phase,\n\
                  followed by a go or rest tone and a melody at the end.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run an interval workout with audio cues
    Run(RunArgs),

    /// Play a single cue
    Preview(PreviewArgs),

    /// Show the tone table
    Tones(TonesArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Run Command Arguments
// ============================================================================

/// Arguments for the run command
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Work interval in seconds (5-3600)
    #[arg(
        short,
        long,
        default_value = "20",
        value_parser = clap::value_parser!(u32).range(5..=3600)
    )]
    pub work: u32,

    /// Rest interval in seconds (0-3600)
    #[arg(
        short,
        long,
        default_value = "10",
        value_parser = clap::value_parser!(u32).range(0..=3600)
    )]
    pub rest: u32,

    /// Number of rounds (1-100)
    #[arg(
        short = 'n',
        long,
        default_value = "8",
        value_parser = clap::value_parser!(u32).range(1..=100)
    )]
    pub rounds: u32,

    /// Warm-up in seconds (0-1800)
    #[arg(
        long,
        default_value = "0",
        value_parser = clap::value_parser!(u32).range(0..=1800)
    )]
    pub warmup: u32,

    /// Cool-down in seconds (0-1800)
    #[arg(
        long,
        default_value = "0",
        value_parser = clap::value_parser!(u32).range(0..=1800)
    )]
    pub cooldown: u32,

    /// Start with cues muted (toggle with `m` while running)
    #[arg(short, long)]
    pub mute: bool,

    /// JSON file overriding the tone table
    #[arg(short, long, value_name = "FILE")]
    pub tones: Option<PathBuf>,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            work: 20,
            rest: 10,
            rounds: 8,
            warmup: 0,
            cooldown: 0,
            mute: false,
            tones: None,
        }
    }
}

impl RunArgs {
    /// Builds the workout configuration from the arguments.
    pub fn workout_config(&self) -> WorkoutConfig {
        WorkoutConfig::default()
            .with_work_seconds(self.work)
            .with_rest_seconds(self.rest)
            .with_rounds(self.rounds)
            .with_warmup_seconds(self.warmup)
            .with_cooldown_seconds(self.cooldown)
    }
}

// ============================================================================
// Preview / Tones Arguments
// ============================================================================

/// Arguments for the preview command
#[derive(Args, Debug, Clone)]
pub struct PreviewArgs {
    /// Cue to play (beep-low, beep-medium, beep-high, go, rest, complete, phase)
    #[arg(value_parser = parse_cue)]
    pub cue: Cue,

    /// Go through the motions without sound
    #[arg(short, long)]
    pub mute: bool,

    /// JSON file overriding the tone table
    #[arg(short, long, value_name = "FILE")]
    pub tones: Option<PathBuf>,
}

/// Arguments for the tones command
#[derive(Args, Debug, Clone, Default)]
pub struct TonesArgs {
    /// JSON file overriding the tone table
    #[arg(short, long, value_name = "FILE")]
    pub tones: Option<PathBuf>,

    /// Print the table as JSON
    #[arg(long)]
    pub json: bool,
}

fn parse_cue(s: &str) -> Result<Cue, String> {
    s.parse()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod cli_tests {
        use super::*;

        #[test]
        fn test_parse_no_args() {
            let cli = Cli::parse_from(["hiit-cues"]);
            assert!(cli.command.is_none());
            assert!(!cli.verbose);
        }

        #[test]
        fn test_parse_verbose_flag() {
            let cli = Cli::parse_from(["hiit-cues", "--verbose"]);
            assert!(cli.verbose);

            let cli = Cli::parse_from(["hiit-cues", "tones", "-v"]);
            assert!(cli.verbose);
        }

        #[test]
        fn test_parse_completions_bash() {
            let cli = Cli::parse_from(["hiit-cues", "completions", "bash"]);
            match cli.command {
                Some(Commands::Completions { shell }) => {
                    assert_eq!(shell, clap_complete::Shell::Bash);
                }
                _ => panic!("Expected Completions command"),
            }
        }
    }

    mod run_args_tests {
        use super::*;

        fn parse_run(args: &[&str]) -> RunArgs {
            let mut argv = vec!["hiit-cues", "run"];
            argv.extend_from_slice(args);
            match Cli::parse_from(argv).command {
                Some(Commands::Run(args)) => args,
                _ => panic!("Expected Run command"),
            }
        }

        #[test]
        fn test_parse_run_defaults() {
            let args = parse_run(&[]);
            assert_eq!(args.work, 20);
            assert_eq!(args.rest, 10);
            assert_eq!(args.rounds, 8);
            assert_eq!(args.warmup, 0);
            assert_eq!(args.cooldown, 0);
            assert!(!args.mute);
            assert!(args.tones.is_none());
        }

        #[test]
        fn test_parse_run_all_options() {
            let args = parse_run(&[
                "-w", "40", "-r", "20", "-n", "5", "--warmup", "60", "--cooldown", "90", "--mute",
                "--tones", "tones.json",
            ]);
            assert_eq!(args.work, 40);
            assert_eq!(args.rest, 20);
            assert_eq!(args.rounds, 5);
            assert_eq!(args.warmup, 60);
            assert_eq!(args.cooldown, 90);
            assert!(args.mute);
            assert_eq!(args.tones, Some(PathBuf::from("tones.json")));
        }

        #[test]
        fn test_run_rejects_out_of_range() {
            assert!(Cli::try_parse_from(["hiit-cues", "run", "--work", "4"]).is_err());
            assert!(Cli::try_parse_from(["hiit-cues", "run", "--rounds", "0"]).is_err());
            assert!(Cli::try_parse_from(["hiit-cues", "run", "--rest", "3601"]).is_err());
            assert!(Cli::try_parse_from(["hiit-cues", "run", "--warmup", "1801"]).is_err());
        }

        #[test]
        fn test_workout_config_from_args() {
            let config = parse_run(&["-w", "30", "-n", "3", "--cooldown", "60"]).workout_config();
            assert_eq!(config.work_seconds, 30);
            assert_eq!(config.rounds, 3);
            assert_eq!(config.cooldown_seconds, 60);
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_default_args_match_default_config() {
            assert_eq!(RunArgs::default().workout_config(), WorkoutConfig::default());
        }
    }

    mod preview_tests {
        use super::*;

        #[test]
        fn test_parse_preview_cue() {
            let cli = Cli::parse_from(["hiit-cues", "preview", "complete", "--mute"]);
            match cli.command {
                Some(Commands::Preview(args)) => {
                    assert_eq!(args.cue, Cue::CompleteMelody);
                    assert!(args.mute);
                }
                _ => panic!("Expected Preview command"),
            }
        }

        #[test]
        fn test_parse_preview_unknown_cue() {
            let err = Cli::try_parse_from(["hiit-cues", "preview", "whistle"]).unwrap_err();
            assert!(err.to_string().contains("unknown cue"));
        }

        #[test]
        fn test_parse_tones_json() {
            let cli = Cli::parse_from(["hiit-cues", "tones", "--json"]);
            match cli.command {
                Some(Commands::Tones(args)) => assert!(args.json),
                _ => panic!("Expected Tones command"),
            }
        }
    }
}
