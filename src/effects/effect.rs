//! Effect definitions.
//!
//! Effects are requests from a game to its UI collaborator. They never
//! feed back into game state: a game is fully determined by its inputs and
//! the elapsed time, and effects only describe what should be seen or heard.

use serde::{Deserialize, Serialize};

use crate::core::MoveId;

/// Full-screen views.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    /// Start screen with play/instructions buttons.
    Menu,
    /// Gameplay area.
    Game,
}

/// Overlays shown on top of the game area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Overlay {
    /// Player made a mistake.
    GameOver,
    /// Player completed the game.
    Victory,
    /// A new difficulty tier was unlocked.
    LevelUp(u32),
}

/// Short non-move sounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cue {
    Correct,
    Wrong,
    Hit,
}

/// Background music control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Music {
    /// Stop and rewind (entering gameplay).
    Pause,
    /// Rewind and play (back on the menu).
    Resume,
    /// Mute or unmute without stopping.
    Mute(bool),
}

/// Feedback line shown under the game area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feedback {
    /// Blank the line.
    Clear,
    /// The sequence is about to play.
    Watch,
    /// Playing on request.
    Listening,
    /// Waiting for the player to ask for playback.
    ListenPrompt,
    /// Input is open.
    YourTurn,
    /// The round was completed.
    Correct,
    /// A wrong move emptied the buffer.
    TryAgain,
    /// The final round was completed.
    Victory,
    /// A new level was reached.
    LevelUp(u32),
    /// A composed melody was played.
    GreatMelody,
}

/// A UI request emitted by a game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    // === Sound & Highlight ===

    /// Play the sound of a move.
    PlaySound(MoveId),

    /// Light up the element for a move, then unlight it after `duration_ms`.
    Highlight { target: MoveId, duration_ms: u64 },

    /// Play a short cue.
    Cue(Cue),

    /// Control the background music.
    Music(Music),

    // === Screens ===

    /// Switch the full-screen view.
    ShowScreen(Screen),

    /// Show an overlay.
    ShowOverlay(Overlay),

    /// Hide an overlay.
    HideOverlay(Overlay),

    // === Readouts ===

    /// Level/round readout.
    Level(u32),

    /// Score readout (never negative).
    Score(i64),

    /// "round / total" progress readout.
    Progress { round: u32, total: u32 },

    /// Feedback line.
    Feedback(Feedback),

    /// Short-lived message bubble.
    Toast(Feedback),

    /// Enable or disable move input.
    InputEnabled(bool),

    /// Final result of a lost game.
    GameOver { score: u32, round: u32 },

    // === Flourishes ===

    /// Character celebration animation.
    Celebrate,

    /// Shake the play area.
    Shake,

    /// Burst of particles at the hit zone.
    Particles { count: u32 },

    /// Confetti rain over the whole page.
    Confetti { count: u32 },

    /// Remove all confetti.
    ClearConfetti,

    // === Ark ===

    /// Show the first `n` ark pieces, hide the rest.
    RevealPieces(u32),

    // === Dove ===

    /// Move the dove to a cloud, or back home with `None`.
    DoveAt(Option<MoveId>),

    /// The dove flies off screen.
    DoveFlyAway,

    // === Boards (rainbow, melody) ===

    /// Lay out the draggable palette in this order.
    Palette(Vec<MoveId>),

    /// Mark a drop target as filled.
    FillTarget(MoveId),

    /// Hide the palette bubble for a move.
    HideBubble(MoveId),

    /// Unfill every drop target.
    ClearTargets,

    /// Show an animal and its syllable slots.
    ShowAnimal { name: String, syllables: Vec<String> },

    /// Put a note into a syllable slot.
    PlaceNote { slot: usize, note: MoveId },

    /// Empty a syllable slot.
    RemoveNote { slot: usize },

    /// Enable or disable the "play melody" button.
    PlayEnabled(bool),

    // === Rain ===

    /// Spawn a falling drop in a lane (`0.0..1.0` across the area).
    SpawnDrop { id: u32, lane: f32, fall_ms: u64 },

    /// Remove a drop.
    RemoveDrop(u32),

    /// Remove every drop.
    ClearDrops,

    /// Fill level of the water gauge (`0.0..=1.0`).
    WaterLevel(f32),
}

/// An ordered batch of effects.
///
/// Games push effects as they happen; the host drains them in emission order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectBatch {
    effects: Vec<Effect>,
}

impl EffectBatch {
    /// Create an empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an effect.
    pub fn push(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    /// Number of pending effects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Check if the batch is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Iterate over pending effects.
    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.effects.iter()
    }

    /// Take every pending effect, leaving the batch empty.
    pub fn drain(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }
}

impl Extend<Effect> for EffectBatch {
    fn extend<I: IntoIterator<Item = Effect>>(&mut self, iter: I) {
        self.effects.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_drain_preserves_order() {
        let mut batch = EffectBatch::new();
        batch.push(Effect::PlaySound(MoveId::new(1)));
        batch.push(Effect::Highlight {
            target: MoveId::new(1),
            duration_ms: 500,
        });
        batch.extend([Effect::Cue(Cue::Correct)]);

        assert_eq!(batch.len(), 3);
        let drained = batch.drain();
        assert!(batch.is_empty());
        assert_eq!(drained[0], Effect::PlaySound(MoveId::new(1)));
        assert_eq!(drained[2], Effect::Cue(Cue::Correct));
    }

    #[test]
    fn test_effect_serde() {
        let effect = Effect::GameOver { score: 4, round: 5 };
        let json = serde_json::to_string(&effect).unwrap();
        let back: Effect = serde_json::from_str(&json).unwrap();
        assert_eq!(effect, back);
    }
}
