//! The countdown cue policy.

use crate::types::Cue;

/// Maps one timer tick to the cue it should sound, if any.
///
/// The last three seconds of a phase get rising beeps. At zero the tone
/// names the phase being entered: leaving work means rest, leaving any
/// other phase means go.
#[must_use]
pub fn cue_for_tick(remaining_seconds: u32, is_work_phase: bool) -> Option<Cue> {
    match remaining_seconds {
        3 => Some(Cue::BeepLow),
        2 => Some(Cue::BeepMedium),
        1 => Some(Cue::BeepHigh),
        0 if is_work_phase => Some(Cue::RestTone),
        0 => Some(Cue::GoTone),
        _ => None,
    }
}
