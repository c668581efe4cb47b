//! Pitch ordering: guide the dove across the clouds in melody order.
//!
//! Every round shuffles the three pitches. The player asks to hear them,
//! then clicks the clouds in the same order; a wrong cloud sends the dove
//! home and the player starts the melody over. Training mode never ends,
//! challenge mode is ten rounds.

use serde::{Deserialize, Serialize};

use crate::core::{
    Alphabet, EngineConfig, GrowthPolicy, MismatchPolicy, MoveId, Result, RoundState, Timing,
};
use crate::effects::Effect;
use crate::input::{Gesture, InputAdapter, MoveTarget};
use crate::rules::{SequenceEngine, SubmitOutcome};

/// Pitch names, lowest first.
pub const PITCHES: [&str; 3] = ["low", "mid", "high"];

/// Oscillator frequency (Hz) for each pitch.
pub const PITCH_HZ: [f32; 3] = [261.63, 329.63, 392.00];

/// Rounds in challenge mode.
pub const CHALLENGE_ROUNDS: u32 = 10;

/// Game mode chosen on the start screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Endless practice.
    Training,
    /// Ten rounds, then a completion overlay.
    Challenge,
}

/// Engine preset for the dove game.
pub fn config(mode: Mode) -> Result<EngineConfig> {
    let round_pause_ms = match mode {
        Mode::Training => 2500,
        Mode::Challenge => 1500,
    };
    let config = EngineConfig::new(Alphabet::new(PITCHES)?)
        .with_growth(GrowthPolicy::Regenerate)
        .with_mismatch(MismatchPolicy::ResetBuffer)
        .with_timing(Timing {
            start_delay_ms: 0,
            step_interval_ms: 600,
            highlight_ms: 500,
            round_pause_ms,
            victory_delay_ms: 1500,
        })
        .manual_presentation();

    Ok(match mode {
        Mode::Training => config.unbounded(),
        Mode::Challenge => config.with_max_rounds(CHALLENGE_ROUNDS),
    })
}

/// Frequency of a pitch move.
#[must_use]
pub fn frequency(pitch: MoveId) -> Option<f32> {
    PITCH_HZ.get(pitch.index()).copied()
}

/// The dove game.
#[derive(Clone, Debug)]
pub struct DoveGame {
    engine: SequenceEngine,
    input: InputAdapter,
    mode: Mode,
}

impl DoveGame {
    /// Create the game on the menu.
    pub fn new(mode: Mode, seed: u64) -> Result<Self> {
        let config = config(mode)?;
        let input = InputAdapter::new(config.alphabet.clone());
        Ok(Self {
            engine: SequenceEngine::new(config, seed)?,
            input,
            mode,
        })
    }

    /// The underlying engine.
    #[must_use]
    pub fn engine(&self) -> &SequenceEngine {
        &self.engine
    }

    /// Selected mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Start the first round. The melody is ready but not yet played.
    pub fn start(&mut self) {
        self.engine.start_game();
        self.engine.emit(Effect::DoveAt(None));
        self.publish_progress();
    }

    /// Play the current melody ("listen" button).
    pub fn listen(&mut self) -> bool {
        self.engine.request_replay()
    }

    /// Leave to the menu.
    pub fn exit(&mut self) {
        self.engine.reset_to_menu();
    }

    /// Handle a click on a cloud.
    pub fn handle(&mut self, gesture: &Gesture) -> Option<SubmitOutcome> {
        let mv = self.input.resolve(gesture)?;
        Some(self.submit_move(mv))
    }

    /// Advance the virtual clock. A fresh round sends the dove home.
    pub fn advance(&mut self, elapsed_ms: u64) {
        let evaluating = self.engine.state() == RoundState::Evaluating;
        self.engine.advance(elapsed_ms);

        if evaluating && self.engine.state() == RoundState::AwaitingInput {
            self.engine.emit(Effect::DoveAt(None));
            self.publish_progress();
        }
    }

    /// Take every pending effect.
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        self.engine.drain_effects()
    }

    fn publish_progress(&mut self) {
        if self.mode == Mode::Challenge {
            self.engine.emit(Effect::Progress {
                round: self.engine.round(),
                total: CHALLENGE_ROUNDS,
            });
        }
    }
}

impl MoveTarget for DoveGame {
    type Outcome = SubmitOutcome;

    fn submit_move(&mut self, mv: MoveId) -> SubmitOutcome {
        let outcome = self.engine.submit_move(mv);
        match outcome {
            SubmitOutcome::Accepted { .. } | SubmitOutcome::Victory => {
                self.engine.emit(Effect::DoveAt(Some(mv)));
            }
            SubmitOutcome::RoundComplete { .. } => {
                self.engine.emit(Effect::DoveAt(Some(mv)));
                if self.mode == Mode::Training {
                    self.engine.emit(Effect::DoveFlyAway);
                }
            }
            SubmitOutcome::BufferReset => self.engine.emit(Effect::DoveAt(None)),
            SubmitOutcome::Ignored | SubmitOutcome::GameOver { .. } => {}
        }
        outcome
    }
}
