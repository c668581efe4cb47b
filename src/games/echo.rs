//! Rhythm echo: repeat Noah's clap, stomp and snap.
//!
//! Append-and-replay without a level cap; the game lasts until the first
//! mistake and the score is the number of echoed rounds. Moves come from
//! mouse clicks or the keyboard.

use crate::core::{Alphabet, EngineConfig, MoveId, Result, Timing};
use crate::effects::Effect;
use crate::input::{Gesture, InputAdapter, KeyMap, MoveTarget};
use crate::rules::{SequenceEngine, SubmitOutcome};

/// Sound names: clap, stomp, snap.
pub const SOUNDS: [&str; 3] = ["palma", "pe", "estalo"];

/// Keyboard bindings.
pub const KEYS: [(&str, &str); 3] = [("A", "palma"), ("S", "pe"), ("D", "estalo")];

/// Engine preset for the echo game.
pub fn config() -> Result<EngineConfig> {
    let config = EngineConfig::new(Alphabet::new(SOUNDS)?)
        .with_timing(Timing {
            start_delay_ms: 1000,
            step_interval_ms: 800,
            highlight_ms: 400,
            round_pause_ms: 1500,
            victory_delay_ms: 0,
        })
        .unbounded();
    Ok(config)
}

/// The echo game.
#[derive(Clone, Debug)]
pub struct EchoGame {
    engine: SequenceEngine,
    input: InputAdapter,
}

impl EchoGame {
    /// Create the game on the menu.
    pub fn new(seed: u64) -> Result<Self> {
        let config = config()?;
        let keys = KeyMap::from_pairs(&config.alphabet, KEYS)?;
        let input = InputAdapter::new(config.alphabet.clone()).with_keys(keys);
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

    /// Start (or restart after game over) with a score of zero.
    pub fn start(&mut self) {
        self.engine.start_game();
    }

    /// Leave to the menu.
    pub fn exit(&mut self) {
        self.engine.reset_to_menu();
    }

    /// Handle a click or key press.
    pub fn handle(&mut self, gesture: &Gesture) -> Option<SubmitOutcome> {
        self.input.dispatch(gesture, &mut self.engine)
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

impl MoveTarget for EchoGame {
    type Outcome = SubmitOutcome;

    fn submit_move(&mut self, mv: MoveId) -> SubmitOutcome {
        self.engine.submit_move(mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RoundState;

    fn ready(seed: u64) -> EchoGame {
        let mut game = EchoGame::new(seed).unwrap();
        game.start();
        game.advance(1000 + 800);
        assert_eq!(game.engine().state(), RoundState::AwaitingInput);
        game
    }

    #[test]
    fn test_keyboard_and_mouse_reach_same_move() {
        let mut game = ready(9);
        let expected = game.engine().sequence()[0];
        let name = game.engine().alphabet().name(expected).unwrap().to_string();
        let key = KEYS.iter().find(|(_, n)| *n == name).unwrap().0;

        assert_eq!(
            game.handle(&Gesture::key(key.to_lowercase())),
            Some(SubmitOutcome::RoundComplete { next_round: 2 })
        );

        game.advance(1500 + 2 * 800);
        let second = game.engine().sequence()[0];
        let name = game.engine().alphabet().name(second).unwrap().to_string();
        assert_eq!(
            game.handle(&Gesture::click(name)),
            Some(SubmitOutcome::Accepted { remaining: 1 })
        );
    }

    #[test]
    fn test_unbound_key_is_dropped() {
        let mut game = ready(9);
        assert_eq!(game.handle(&Gesture::key("Q")), None);
        assert!(game.engine().buffer().is_empty());
    }

    #[test]
    fn test_game_over_reports_score() {
        let mut game = ready(9);
        let expected = game.engine().sequence()[0];
        let wrong = game
            .engine()
            .alphabet()
            .ids()
            .find(|&m| m != expected)
            .unwrap();

        assert_eq!(
            game.submit_move(wrong),
            SubmitOutcome::GameOver { score: 0, round: 1 }
        );
        assert!(game
            .drain_effects()
            .contains(&Effect::GameOver { score: 0, round: 1 }));
    }
}
