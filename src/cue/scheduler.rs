//! The cue scheduler.
//!
//! Turns timer ticks and explicit requests into tones on a [`CueSink`].
//! Sink failures never reach the caller: a cue that cannot play is logged
//! and dropped, and the workout carries on silently.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::{debug, info, warn};

use super::config::CueConfig;
use super::schedule::cue_for_tick;
use super::timeline::PendingSteps;
use crate::sound::{CueSink, CueSound, RodioToneSink, SoundError, Tone, ToneTable};
use crate::types::Cue;

/// Creates the sink on first use.
pub type SinkFactory<S> = Box<dyn Fn() -> Result<S, SoundError> + Send + Sync>;

/// Lifecycle of the underlying sink, as seen from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkStatus {
    /// Not opened yet, or the last attempt failed
    Uninitialized,
    /// Open and accepting tones
    Ready,
    /// Released; every further cue is dropped
    Released,
}

enum SinkState<S> {
    Uninitialized,
    Ready(S),
    Released,
}

struct SinkSlot<S> {
    state: SinkState<S>,
    factory: Option<SinkFactory<S>>,
}

impl<S: CueSink> SinkSlot<S> {
    fn initialize(&mut self) {
        let Some(factory) = &self.factory else {
            warn!("No audio sink factory configured, cue dropped");
            return;
        };
        match factory() {
            Ok(sink) => {
                debug!("Audio sink initialized");
                self.state = SinkState::Ready(sink);
            }
            Err(e) => warn!("Audio sink unavailable, cue dropped: {}", e),
        }
    }
}

/// State shared with the task that plays delayed melody steps.
struct Shared<S> {
    muted: AtomicBool,
    slot: Mutex<SinkSlot<S>>,
}

impl<S: CueSink> Shared<S> {
    fn lock_slot(&self) -> MutexGuard<'_, SinkSlot<S>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Plays one tone unless muted or released. Returns true if the sink
    /// accepted it.
    fn emit(&self, tone: &Tone, cue: Cue) -> bool {
        if self.muted.load(Ordering::SeqCst) {
            debug!("Muted, skipping {}", cue);
            return false;
        }

        let mut slot = self.lock_slot();
        if matches!(slot.state, SinkState::Uninitialized) {
            slot.initialize();
        }

        match &slot.state {
            SinkState::Ready(sink) => match sink.play_tone(tone) {
                Ok(()) => {
                    debug!("Played {} ({} Hz)", cue, tone.frequency_hz);
                    true
                }
                Err(e) => {
                    warn!("Failed to play {}: {}", cue, e);
                    false
                }
            },
            SinkState::Uninitialized => false,
            SinkState::Released => {
                debug!("Sink released, skipping {}", cue);
                false
            }
        }
    }
}

/// Plays workout cues through a sink.
///
/// Construct one per workout session and share it by `Arc` with whatever
/// drives the ticks. All methods take `&self`.
pub struct CueScheduler<S: CueSink> {
    shared: Arc<Shared<S>>,
    tones: ToneTable,
    pending: Mutex<Option<PendingSteps>>,
}

impl CueScheduler<RodioToneSink> {
    /// Creates a scheduler that opens the default audio device on first use.
    #[must_use]
    pub fn new(config: CueConfig) -> Self {
        Self::with_factory(config, RodioToneSink::new)
    }
}

impl<S: CueSink> CueScheduler<S> {
    /// Creates a scheduler that builds its sink lazily with `factory`.
    ///
    /// A failed build is retried on the next cue.
    pub fn with_factory<F>(config: CueConfig, factory: F) -> Self
    where
        F: Fn() -> Result<S, SoundError> + Send + Sync + 'static,
    {
        Self::build(config, SinkState::Uninitialized, Some(Box::new(factory)))
    }

    /// Creates a scheduler around an already opened sink.
    pub fn with_sink(config: CueConfig, sink: S) -> Self {
        Self::build(config, SinkState::Ready(sink), None)
    }

    fn build(config: CueConfig, state: SinkState<S>, factory: Option<SinkFactory<S>>) -> Self {
        Self {
            shared: Arc::new(Shared {
                muted: AtomicBool::new(config.start_muted),
                slot: Mutex::new(SinkSlot { state, factory }),
            }),
            tones: config.tones,
            pending: Mutex::new(None),
        }
    }

    /// Handles one per-second tick of the workout timer.
    ///
    /// Returns the cue handed to the sink, or `None` if nothing played.
    pub fn on_tick(&self, remaining_seconds: u32, is_work_phase: bool) -> Option<Cue> {
        let cue = cue_for_tick(remaining_seconds, is_work_phase)?;
        self.play(cue).then_some(cue)
    }

    /// Plays any cue by identity. Returns true if it started playing.
    pub fn play(&self, cue: Cue) -> bool {
        match self.tones.sound(cue) {
            CueSound::Tone(tone) => self.shared.emit(tone, cue),
            CueSound::Melody(_) => self.play_complete_tone(),
        }
    }

    pub fn play_go_tone(&self) -> bool {
        self.play(Cue::GoTone)
    }

    pub fn play_rest_tone(&self) -> bool {
        self.play(Cue::RestTone)
    }

    pub fn play_phase_tone(&self) -> bool {
        self.play(Cue::PhaseTone)
    }

    /// Plays the completion melody.
    ///
    /// The first step plays now; later steps are scheduled on the tokio
    /// runtime and are dropped by [`cancel_pending`](Self::cancel_pending),
    /// muting, or [`release`](Self::release). Any melody still pending from
    /// an earlier call is cancelled first.
    pub fn play_complete_tone(&self) -> bool {
        self.cancel_pending();

        let Some((first, rest)) = self.tones.complete.steps.split_first() else {
            return false;
        };
        if !self.shared.emit(&first.tone, Cue::CompleteMelody) {
            return false;
        }
        if rest.is_empty() {
            return true;
        }

        let steps: Vec<(Duration, Tone)> = rest
            .iter()
            .map(|step| (step.offset(), step.tone))
            .collect();
        let shared = Arc::clone(&self.shared);
        let pending = PendingSteps::spawn(steps, move |tone| {
            shared.emit(&tone, Cue::CompleteMelody);
        });
        *self.lock_pending() = pending;
        true
    }

    /// Drops any melody steps that have not played yet.
    pub fn cancel_pending(&self) {
        if let Some(pending) = self.lock_pending().take() {
            pending.cancel();
        }
    }

    /// Returns true while melody steps are still waiting to play.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.lock_pending()
            .as_ref()
            .is_some_and(|pending| !pending.is_finished())
    }

    /// Mutes or unmutes all cues.
    ///
    /// Takes effect on the next cue; a tone already playing is not cut
    /// short. Muting also drops pending melody steps.
    pub fn set_muted(&self, muted: bool) {
        self.shared.muted.store(muted, Ordering::SeqCst);
        if muted {
            self.cancel_pending();
        }
        info!("Cues {}", if muted { "muted" } else { "unmuted" });
    }

    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.shared.muted.load(Ordering::SeqCst)
    }

    /// Opens the sink now instead of on the first cue.
    ///
    /// Returns true if the sink is ready.
    pub fn prepare(&self) -> bool {
        let mut slot = self.shared.lock_slot();
        if matches!(slot.state, SinkState::Uninitialized) {
            slot.initialize();
        }
        matches!(slot.state, SinkState::Ready(_))
    }

    #[must_use]
    pub fn sink_status(&self) -> SinkStatus {
        match self.shared.lock_slot().state {
            SinkState::Uninitialized => SinkStatus::Uninitialized,
            SinkState::Ready(_) => SinkStatus::Ready,
            SinkState::Released => SinkStatus::Released,
        }
    }

    /// Returns the tone table in use.
    #[must_use]
    pub fn tones(&self) -> &ToneTable {
        &self.tones
    }

    /// Releases the sink and cancels pending melody steps.
    ///
    /// Safe to call more than once. Every later cue is a silent no-op.
    pub fn release(&self) {
        self.cancel_pending();

        let previous = {
            let mut slot = self.shared.lock_slot();
            slot.factory = None;
            std::mem::replace(&mut slot.state, SinkState::Released)
        };

        match previous {
            SinkState::Ready(sink) => {
                // Dropped outside the lock; the rodio sink joins its thread.
                drop(sink);
                info!("Audio sink released");
            }
            SinkState::Uninitialized => debug!("Released scheduler before any cue played"),
            SinkState::Released => debug!("Scheduler already released"),
        }
    }

    fn lock_pending(&self) -> MutexGuard<'_, Option<PendingSteps>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: CueSink> std::fmt::Debug for CueScheduler<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CueScheduler")
            .field("muted", &self.is_muted())
            .field("sink", &self.sink_status())
            .finish_non_exhaustive()
    }
}
