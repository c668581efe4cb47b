//! Note matching: drag each note bubble onto its rainbow arc.
//!
//! Order does not matter; the board is complete once every arc holds its
//! note. A drop only counts when the bubble's note equals the arc's note.

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::core::{Alphabet, GameRng, MoveId, Result};
use crate::effects::{Effect, EffectBatch, Music, Overlay, Presenter, Screen};
use crate::input::Gesture;
use crate::schedule::PlaybackScheduler;

/// Note letters, bottom arc first.
pub const NOTES: [&str; 7] = ["C", "D", "E", "F", "G", "A", "B"];

/// Solfège labels shown on the bubbles.
pub const SOLFEGE: [&str; 7] = ["Dó", "Ré", "Mi", "Fá", "Sol", "Lá", "Si"];

/// Oscillator frequency (Hz) for each note.
pub const NOTE_HZ: [f32; 7] = [261.63, 293.66, 329.63, 349.23, 392.00, 440.00, 493.88];

const FINALE_DELAY_MS: u64 = 500;
const SCALE_STEP_MS: u64 = 150;
const CONFETTI: u32 = 100;

/// Result of a drop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    /// Wrong arc, unknown note, or arc already filled.
    Ignored,
    /// Arc filled; `remaining` arcs still empty.
    Filled { remaining: usize },
    /// Last arc filled.
    Completed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RainbowTask {
    Finale,
    ScaleStep(MoveId),
}

/// The rainbow board.
#[derive(Clone, Debug)]
pub struct RainbowGame {
    notes: Alphabet,
    rng: GameRng,
    palette: Vec<MoveId>,
    filled: FxHashSet<MoveId>,
    muted: bool,
    scheduler: PlaybackScheduler<RainbowTask>,
    effects: EffectBatch,
}

impl RainbowGame {
    /// Create the board on the menu.
    pub fn new(seed: u64) -> Result<Self> {
        Ok(Self {
            notes: Alphabet::new(NOTES)?,
            rng: GameRng::new(seed).for_context("palette"),
            palette: Vec::new(),
            filled: FxHashSet::default(),
            muted: false,
            scheduler: PlaybackScheduler::new(),
            effects: EffectBatch::new(),
        })
    }

    /// Note alphabet.
    #[must_use]
    pub fn notes(&self) -> &Alphabet {
        &self.notes
    }

    /// Current bubble order.
    #[must_use]
    pub fn palette(&self) -> &[MoveId] {
        &self.palette
    }

    /// Check if an arc holds its note.
    #[must_use]
    pub fn is_filled(&self, note: MoveId) -> bool {
        self.filled.contains(&note)
    }

    /// Check if every arc is filled.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.filled.len() == self.notes.len()
    }

    /// Check if the music is muted.
    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Leave the menu and lay out a fresh board.
    pub fn start(&mut self) {
        self.effects.push(Effect::ShowScreen(Screen::Game));
        self.effects.push(Effect::Music(Music::Resume));
        self.reset_board();
    }

    /// Start over from the victory overlay.
    pub fn play_again(&mut self) {
        self.effects.push(Effect::HideOverlay(Overlay::Victory));
        self.effects.push(Effect::ClearConfetti);
        self.effects.push(Effect::Music(Music::Resume));
        self.reset_board();
    }

    /// Leave to the menu.
    pub fn exit(&mut self) {
        self.scheduler.cancel_all();
        self.effects.push(Effect::ShowScreen(Screen::Menu));
        self.effects.push(Effect::ClearConfetti);
        self.effects.push(Effect::Music(Music::Pause));
    }

    /// Flip the music mute switch. Returns the new state.
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.effects.push(Effect::Music(Music::Mute(self.muted)));
        self.muted
    }

    /// Drop the bubble for `payload` onto the arc for `target`.
    pub fn drop_note(&mut self, payload: &str, target: &str) -> DropOutcome {
        let (Some(note), Some(arc)) = (self.notes.parse(payload), self.notes.parse(target)) else {
            return DropOutcome::Ignored;
        };
        if note != arc || self.filled.contains(&arc) {
            return DropOutcome::Ignored;
        }

        self.filled.insert(note);
        self.effects.push(Effect::PlaySound(note));
        self.effects.push(Effect::FillTarget(note));
        self.effects.push(Effect::HideBubble(note));

        let remaining = self.notes.len() - self.filled.len();
        if remaining > 0 {
            return DropOutcome::Filled { remaining };
        }
        debug!("rainbow complete");
        self.effects.push(Effect::Music(Music::Pause));
        self.scheduler
            .schedule_after(FINALE_DELAY_MS, RainbowTask::Finale);
        DropOutcome::Completed
    }

    /// Handle a drag-and-drop. Other gestures do nothing here.
    pub fn handle(&mut self, gesture: &Gesture) -> DropOutcome {
        match gesture {
            Gesture::Drop { payload, target } => self.drop_note(payload, target),
            _ => DropOutcome::Ignored,
        }
    }

    /// Advance the virtual clock.
    pub fn advance(&mut self, elapsed_ms: u64) {
        let horizon = self.scheduler.now().saturating_add(elapsed_ms);
        while let Some(entry) = self.scheduler.pop_due(horizon) {
            match entry.task {
                RainbowTask::Finale => {
                    let scale: Vec<MoveId> = self.notes.ids().collect();
                    for (i, note) in scale.into_iter().enumerate() {
                        self.scheduler
                            .schedule_after(i as u64 * SCALE_STEP_MS, RainbowTask::ScaleStep(note));
                    }
                    self.effects.push(Effect::ShowOverlay(Overlay::Victory));
                    self.effects.push(Effect::Confetti { count: CONFETTI });
                }
                RainbowTask::ScaleStep(note) => self.effects.push(Effect::PlaySound(note)),
            }
        }
        self.scheduler.settle(horizon);
    }

    /// Take every pending effect.
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        self.effects.drain()
    }

    /// Hand every pending effect to a presenter.
    pub fn flush_to<P: Presenter + ?Sized>(&mut self, presenter: &mut P) {
        self.effects.flush_to(presenter);
    }

    fn reset_board(&mut self) {
        self.scheduler.cancel_all();
        self.filled.clear();
        self.palette = self.notes.ids().collect();
        self.rng.shuffle(&mut self.palette);
        self.effects.push(Effect::ClearTargets);
        self.effects.push(Effect::Palette(self.palette.clone()));
    }
}
