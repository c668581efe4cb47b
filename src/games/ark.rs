//! Sound memory: rebuild Noah's ark by repeating tool sounds.
//!
//! Classic append-and-replay over three tools. Every two levels another
//! piece of the ark appears; finishing level 10 completes it.

use crate::core::{Alphabet, EngineConfig, MoveId, Result, Timing};
use crate::effects::Effect;
use crate::input::{Gesture, InputAdapter, MoveTarget};
use crate::rules::{SequenceEngine, SubmitOutcome};

/// Tool names, in palette order.
pub const TOOLS: [&str; 3] = ["hammer", "sander", "saw"];

/// Levels needed to finish the ark.
pub const TOTAL_LEVELS: u32 = 10;

/// Engine preset for the ark game.
pub fn config() -> Result<EngineConfig> {
    let config = EngineConfig::new(Alphabet::new(TOOLS)?)
        .with_timing(Timing {
            start_delay_ms: 500,
            step_interval_ms: 1000,
            highlight_ms: 500,
            round_pause_ms: 1500,
            victory_delay_ms: 1500,
        })
        .with_max_rounds(TOTAL_LEVELS);
    Ok(config)
}

/// Ark pieces shown while playing `level`.
#[must_use]
pub fn visible_pieces(level: u32) -> u32 {
    ((level + 1) / 2).saturating_sub(1)
}

/// The ark game.
#[derive(Clone, Debug)]
pub struct ArkGame {
    engine: SequenceEngine,
    input: InputAdapter,
}

impl ArkGame {
    /// Create the game on the menu.
    pub fn new(seed: u64) -> Result<Self> {
        let config = config()?;
        let input = InputAdapter::new(config.alphabet.clone());
        Ok(Self {
            engine: SequenceEngine::new(config, seed)?,
            input,
        })
    }

    /// The underlying engine.
    #[must_use]
    pub fn engine(&self) -> &SequenceEngine {
        &self.engine
    }

    /// Start (or restart after game over / victory) from level 1.
    pub fn start(&mut self) {
        self.engine.start_game();
        self.engine.emit(Effect::RevealPieces(visible_pieces(1)));
    }

    /// Leave to the menu.
    pub fn exit(&mut self) {
        self.engine.reset_to_menu();
    }

    /// Handle a click on a tool.
    pub fn handle(&mut self, gesture: &Gesture) -> Option<SubmitOutcome> {
        let mv = self.input.resolve(gesture)?;
        Some(self.submit_move(mv))
    }

    /// Advance the virtual clock.
    pub fn advance(&mut self, elapsed_ms: u64) {
        self.engine.advance(elapsed_ms);
    }

    /// Take every pending effect.
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        self.engine.drain_effects()
    }
}

impl MoveTarget for ArkGame {
    type Outcome = SubmitOutcome;

    fn submit_move(&mut self, mv: MoveId) -> SubmitOutcome {
        let outcome = self.engine.submit_move(mv);
        match outcome {
            SubmitOutcome::RoundComplete { next_round } => {
                self.engine.emit(Effect::RevealPieces(visible_pieces(next_round)));
            }
            SubmitOutcome::Victory => {
                let pieces = visible_pieces(self.engine.round());
                self.engine.emit(Effect::RevealPieces(pieces));
            }
            _ => {}
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RoundState;

    #[test]
    fn test_visible_pieces() {
        let pieces: Vec<u32> = (1..=11).map(visible_pieces).collect();
        assert_eq!(pieces, vec![0, 0, 1, 1, 2, 2, 3, 3, 4, 4, 5]);
    }

    #[test]
    fn test_preset() {
        let config = config().unwrap();
        assert_eq!(config.max_rounds, Some(TOTAL_LEVELS));
        assert_eq!(config.timing.step_interval_ms, 1000);
        assert_eq!(config.alphabet.parse("saw"), Some(MoveId::new(2)));
    }

    #[test]
    fn test_start_reveals_no_pieces() {
        let mut game = ArkGame::new(3).unwrap();
        game.start();
        let effects = game.drain_effects();
        assert!(effects.contains(&Effect::RevealPieces(0)));
        assert_eq!(game.engine().state(), RoundState::Presenting);
        assert!(game.engine().sequence().is_empty());

        game.advance(500);
        assert_eq!(game.engine().sequence().len(), 1);
    }

    #[test]
    fn test_click_unknown_tool() {
        let mut game = ArkGame::new(3).unwrap();
        assert_eq!(game.handle(&Gesture::click("drill")), None);
    }
}
