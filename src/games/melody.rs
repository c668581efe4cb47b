//! Animal melodies: give each syllable of an animal's name a note.
//!
//! Free composition: any palette note may go into any empty syllable slot.
//! The palette grows with progress (3, then 5, then 7 notes) and the game
//! ends after the tenth animal.

use tracing::debug;

use crate::core::{Alphabet, GameRng, MoveId, Result};
use crate::effects::{Effect, EffectBatch, Feedback, Music, Overlay, Presenter, Screen};
use crate::input::Gesture;
use crate::schedule::PlaybackScheduler;

/// Note letters in palette order.
pub const NOTES: [&str; 7] = ["C", "D", "E", "F", "G", "A", "B"];

/// Animals and their syllables.
pub const ANIMALS: [(&str, &[&str]); 10] = [
    ("Leão", &["LE", "ÃO"]),
    ("Gato", &["GA", "TO"]),
    ("Cavalo", &["CA", "VA", "LO"]),
    ("Pomba", &["POM", "BA"]),
    ("Cachorro", &["CA", "CHO", "RRO"]),
    ("Macaco", &["MA", "CA", "CO"]),
    ("Girafa", &["GI", "RA", "FA"]),
    ("Capivara", &["CA", "PI", "VA", "RA"]),
    ("Elefante", &["E", "LE", "FAN", "TE"]),
    ("Hipopótamo", &["HI", "PO", "PÓ", "TA", "MO"]),
];

const MELODY_STEP_MS: u64 = 500;

/// Palette sizes of tiers 1, 2 and 3.
const TIER_SIZES: [usize; 3] = [3, 5, 7];

/// Difficulty tier and palette size for the animal at `index`.
#[must_use]
pub fn tier(index: usize) -> (u32, usize) {
    let level = match index {
        0..=2 => 1,
        3..=5 => 2,
        _ => 3,
    };
    (level, TIER_SIZES[level as usize - 1])
}

/// The melody board.
#[derive(Clone, Debug)]
pub struct MelodyGame {
    notes: Alphabet,
    /// Playable notes per tier.
    palettes: Vec<Alphabet>,
    rng: GameRng,

    /// Animal indices in play order.
    order: Vec<usize>,
    /// Position in `order`.
    current: usize,
    level: u32,
    finished: bool,

    slots: Vec<Option<MoveId>>,
    /// Slot indices in placement order, for undo.
    history: Vec<usize>,

    scheduler: PlaybackScheduler<MoveId>,
    effects: EffectBatch,
}

impl MelodyGame {
    /// Create the game on the menu.
    pub fn new(seed: u64) -> Result<Self> {
        let notes = Alphabet::new(NOTES)?;
        let palettes = TIER_SIZES
            .iter()
            .map(|&size| notes.prefix(size))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            notes,
            palettes,
            rng: GameRng::new(seed).for_context("animals"),
            order: (0..ANIMALS.len()).collect(),
            current: 0,
            level: 1,
            finished: false,
            slots: Vec::new(),
            history: Vec::new(),
            scheduler: PlaybackScheduler::new(),
            effects: EffectBatch::new(),
        })
    }

    /// Note alphabet.
    #[must_use]
    pub fn notes(&self) -> &Alphabet {
        &self.notes
    }

    /// Current difficulty tier (1-3).
    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Number of notes on the palette.
    #[must_use]
    pub fn palette_size(&self) -> usize {
        self.palette().len()
    }

    fn palette(&self) -> &Alphabet {
        let index = (self.level as usize).saturating_sub(1);
        &self.palettes[index.min(self.palettes.len() - 1)]
    }

    /// Name and syllables of the current animal.
    #[must_use]
    pub fn animal(&self) -> (&'static str, &'static [&'static str]) {
        let index = self.order.get(self.current).copied().unwrap_or(0);
        ANIMALS[index]
    }

    /// How many animals have been completed.
    #[must_use]
    pub fn progress(&self) -> usize {
        self.current
    }

    /// Check if the last animal was passed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Notes placed in each slot.
    #[must_use]
    pub fn slots(&self) -> &[Option<MoveId>] {
        &self.slots
    }

    /// Check if every slot holds a note.
    #[must_use]
    pub fn is_melody_ready(&self) -> bool {
        !self.slots.is_empty() && self.slots.iter().all(Option::is_some)
    }

    /// Leave the menu and start with a shuffled animal order.
    pub fn start(&mut self) {
        self.effects.push(Effect::ShowScreen(Screen::Game));
        self.effects.push(Effect::Music(Music::Pause));
        self.new_game();
    }

    /// Start over from the final victory overlay.
    pub fn play_again(&mut self) {
        self.effects.push(Effect::HideOverlay(Overlay::Victory));
        self.new_game();
    }

    /// Close the level-up overlays.
    pub fn dismiss_level_up(&mut self) {
        self.effects.push(Effect::HideOverlay(Overlay::LevelUp(2)));
        self.effects.push(Effect::HideOverlay(Overlay::LevelUp(3)));
    }

    /// Leave to the menu.
    pub fn exit(&mut self) {
        self.scheduler.cancel_all();
        self.effects.push(Effect::ShowScreen(Screen::Menu));
        self.effects.push(Effect::Music(Music::Resume));
    }

    /// Place a palette note in an empty slot. Returns whether it was placed.
    pub fn drop_note(&mut self, payload: &str, slot: usize) -> bool {
        if self.finished {
            return false;
        }
        // Palette ids share the full alphabet's indices.
        let Some(note) = self.palette().parse(payload) else {
            return false;
        };
        match self.slots.get_mut(slot) {
            Some(cell @ None) => *cell = Some(note),
            _ => return false,
        }

        self.history.push(slot);
        self.effects.push(Effect::PlaceNote { slot, note });
        self.effects.push(Effect::PlaySound(note));
        self.publish_play_state();
        true
    }

    /// Undo the most recent placement. Returns the emptied slot.
    pub fn clear_last(&mut self) -> Option<usize> {
        let slot = self.history.pop()?;
        self.slots[slot] = None;
        self.effects.push(Effect::RemoveNote { slot });
        self.publish_play_state();
        Some(slot)
    }

    /// Play the composed melody, one note every 500 ms.
    pub fn play_melody(&mut self) -> bool {
        if !self.is_melody_ready() {
            return false;
        }
        self.effects.push(Effect::Toast(Feedback::GreatMelody));
        let notes: Vec<MoveId> = self.slots.iter().flatten().copied().collect();
        for (i, note) in notes.into_iter().enumerate() {
            self.scheduler
                .schedule_after(i as u64 * MELODY_STEP_MS, note);
        }
        true
    }

    /// Move on to the next animal, or finish the game.
    pub fn next_animal(&mut self) {
        if self.finished {
            return;
        }
        self.current += 1;
        if self.current >= self.order.len() {
            debug!("all animals done");
            self.finished = true;
            self.effects.push(Effect::ShowOverlay(Overlay::Victory));
            return;
        }
        self.update_level();
        self.setup_animal();
    }

    /// Handle a drop onto `slot-N` (or plain `N`).
    pub fn handle(&mut self, gesture: &Gesture) -> bool {
        let Gesture::Drop { payload, target } = gesture else {
            return false;
        };
        match target.trim_start_matches("slot-").parse::<usize>() {
            Ok(slot) => self.drop_note(payload, slot),
            Err(_) => false,
        }
    }

    /// Advance the virtual clock.
    pub fn advance(&mut self, elapsed_ms: u64) {
        let horizon = self.scheduler.now().saturating_add(elapsed_ms);
        while let Some(entry) = self.scheduler.pop_due(horizon) {
            self.effects.push(Effect::PlaySound(entry.task));
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

    fn new_game(&mut self) {
        self.scheduler.cancel_all();
        self.rng.shuffle(&mut self.order);
        self.current = 0;
        self.level = 1;
        self.finished = false;
        self.update_level();
        self.setup_animal();
    }

    fn update_level(&mut self) {
        let (level, _) = tier(self.current);
        if level > self.level {
            self.effects.push(Effect::ShowOverlay(Overlay::LevelUp(level)));
        }
        self.level = level;
        self.effects.push(Effect::Level(level));
        let palette = self.palette().ids().collect();
        self.effects.push(Effect::Palette(palette));
    }

    fn setup_animal(&mut self) {
        let (name, syllables) = self.animal();
        self.slots = vec![None; syllables.len()];
        self.history.clear();
        self.effects.push(Effect::ShowAnimal {
            name: name.to_string(),
            syllables: syllables.iter().map(|s| s.to_string()).collect(),
        });
        self.publish_play_state();
    }

    fn publish_play_state(&mut self) {
        self.effects.push(Effect::PlayEnabled(self.is_melody_ready()));
    }
}
