//! CLI module for HIIT cues.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `session`: Local execution of workouts, previews and the tone table
//! - `display`: Output formatting and display logic

pub mod commands;
pub mod display;
pub mod session;

pub use commands::{Cli, Commands, PreviewArgs, RunArgs, TonesArgs};
pub use display::Display;
pub use session::SessionCommand;
