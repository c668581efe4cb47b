//! The sequence-replay engine.
//!
//! One `SequenceEngine` runs one game: it grows or regenerates the target
//! sequence, plays it back through scheduled highlight+sound steps, then
//! judges the player's moves one by one.
//!
//! ## Lifecycle
//!
//! ```text
//! Idle --start_game--> Presenting --(steps)--> AwaitingInput
//!   AwaitingInput --wrong move--> RoundLost            (EndRound)
//!   AwaitingInput --wrong move--> AwaitingInput        (ResetBuffer)
//!   AwaitingInput --last move--> Evaluating --pause--> Presenting
//!   AwaitingInput --last move of last round--> RoundWon
//! ```
//!
//! Time is virtual: the host calls `advance(elapsed_ms)` from its timer
//! loop, and every deferred step lives in one `PlaybackScheduler` that is
//! flushed whenever a round is reset.

use im::Vector;
use tracing::debug;

use crate::core::{
    Alphabet, EngineConfig, EngineSnapshot, GameRng, GrowthPolicy, MismatchPolicy, MoveId,
    PlayerBuffer, Result, RoundState,
};
use crate::effects::{Cue, Effect, EffectBatch, Feedback, Music, Overlay, Presenter, Screen};
use crate::input::MoveTarget;
use crate::schedule::PlaybackScheduler;

use super::outcome::SubmitOutcome;

/// Deferred engine steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EngineTask {
    BeginRound,
    PresentStep(usize),
    OpenInput,
    ShowVictory,
}

/// Turn-based sequence-replay and input-validation engine.
#[derive(Clone, Debug)]
pub struct SequenceEngine {
    config: EngineConfig,
    rng: GameRng,

    sequence: Vector<MoveId>,
    buffer: PlayerBuffer,
    state: RoundState,

    /// Round/level counter (starts at 1).
    round: u32,
    /// Completed rounds this game.
    score: u32,

    scheduler: PlaybackScheduler<EngineTask>,
    effects: EffectBatch,
}

impl SequenceEngine {
    /// Create an idle engine. The seed drives every random move pick.
    pub fn new(config: EngineConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng: GameRng::new(seed).for_context("moves"),
            sequence: Vector::new(),
            buffer: PlayerBuffer::new(),
            state: RoundState::Idle,
            round: 1,
            score: 0,
            scheduler: PlaybackScheduler::new(),
            effects: EffectBatch::new(),
        })
    }

    // === Accessors ===

    /// Engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The alphabet moves are drawn from.
    #[must_use]
    pub fn alphabet(&self) -> &Alphabet {
        &self.config.alphabet
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> RoundState {
        self.state
    }

    /// Round/level counter.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Completed rounds this game.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Target sequence.
    #[must_use]
    pub fn sequence(&self) -> &Vector<MoveId> {
        &self.sequence
    }

    /// Moves entered so far this round.
    #[must_use]
    pub fn buffer(&self) -> &[MoveId] {
        &self.buffer
    }

    /// Current virtual time (ms).
    #[must_use]
    pub fn now(&self) -> u64 {
        self.scheduler.now()
    }

    /// Number of scheduled steps not yet fired.
    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    /// Observable view of the engine.
    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            state: self.state,
            round: self.round,
            score: self.score,
            sequence: self.sequence.clone(),
            buffer: self.buffer.clone(),
        }
    }

    // === Effects ===

    /// Pending effects, oldest first.
    #[must_use]
    pub fn effects(&self) -> &EffectBatch {
        &self.effects
    }

    /// Take every pending effect.
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        self.effects.drain()
    }

    /// Hand every pending effect to a presenter.
    pub fn flush_to<P: Presenter + ?Sized>(&mut self, presenter: &mut P) {
        self.effects.flush_to(presenter);
    }

    /// Emit an effect on behalf of a wrapping game.
    pub(crate) fn emit(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    // === Operations ===

    /// Start a new game from round 1.
    pub fn start_game(&mut self) {
        self.scheduler.cancel_all();
        self.sequence.clear();
        self.buffer.clear();
        self.round = 1;
        self.score = 0;

        self.emit(Effect::HideOverlay(Overlay::GameOver));
        self.emit(Effect::HideOverlay(Overlay::Victory));
        self.emit(Effect::ShowScreen(Screen::Game));
        self.emit(Effect::Music(Music::Pause));
        self.emit(Effect::Level(self.round));
        self.emit(Effect::Score(0));
        self.emit(Effect::InputEnabled(false));
        self.emit(Effect::Feedback(Feedback::Watch));
        self.set_state(RoundState::Presenting);

        let delay = self.config.timing.start_delay_ms;
        if delay == 0 {
            self.begin_round();
        } else {
            self.scheduler.schedule_after(delay, EngineTask::BeginRound);
        }
    }

    /// Prepare the sequence for the current round and present it.
    pub fn begin_round(&mut self) {
        self.scheduler.cancel_all();
        self.buffer.clear();

        match self.config.growth {
            GrowthPolicy::Append => {
                let alphabet_len = self.config.alphabet.len();
                while self.sequence.len() < self.round as usize {
                    let pick = self.rng.gen_range_usize(0..alphabet_len);
                    self.sequence.push_back(MoveId::new(pick as u16));
                }
            }
            GrowthPolicy::Regenerate => {
                let mut moves: Vec<MoveId> = self.config.alphabet.ids().collect();
                self.rng.shuffle(&mut moves);
                self.sequence = moves.into_iter().collect();
            }
        }
        debug!(round = self.round, len = self.sequence.len(), "round begins");
        self.emit(Effect::Level(self.round));

        if self.config.auto_present {
            self.emit(Effect::Feedback(Feedback::Watch));
            self.present_sequence();
        } else {
            self.set_state(RoundState::AwaitingInput);
            self.emit(Effect::InputEnabled(true));
            self.emit(Effect::Feedback(Feedback::ListenPrompt));
        }
    }

    /// Schedule one highlight+sound step per move, then reopen input.
    pub fn present_sequence(&mut self) {
        if self.sequence.is_empty() {
            return;
        }
        self.scheduler.cancel_all();
        self.set_state(RoundState::Presenting);
        self.emit(Effect::InputEnabled(false));

        let interval = self.config.timing.step_interval_ms;
        let len = self.sequence.len();
        for index in 0..len {
            self.scheduler
                .schedule_after(index as u64 * interval, EngineTask::PresentStep(index));
        }
        self.scheduler
            .schedule_after(len as u64 * interval, EngineTask::OpenInput);
    }

    /// Play the current sequence again on request, keeping the buffer.
    ///
    /// Only honoured while input is open. Returns whether playback started.
    pub fn request_replay(&mut self) -> bool {
        if !self.state.accepts_input() || self.sequence.is_empty() {
            return false;
        }
        self.emit(Effect::Feedback(Feedback::Listening));
        self.present_sequence();
        true
    }

    /// Judge one player move.
    pub fn submit_move(&mut self, mv: MoveId) -> SubmitOutcome {
        if !self.state.accepts_input() {
            debug!(%mv, state = %self.state, "input ignored");
            return SubmitOutcome::Ignored;
        }
        if !self.config.alphabet.contains(mv) {
            debug!(%mv, "move outside alphabet ignored");
            return SubmitOutcome::Ignored;
        }
        let Some(&expected) = self.sequence.get(self.buffer.len()) else {
            return SubmitOutcome::Ignored;
        };

        self.emit_move(mv);
        if mv != expected {
            return self.handle_mismatch(mv, expected);
        }

        self.buffer.push(mv);
        let remaining = self.sequence.len() - self.buffer.len();
        if remaining > 0 {
            return SubmitOutcome::Accepted { remaining };
        }
        self.complete_round()
    }

    /// Abandon the game and go back to the menu.
    pub fn reset_to_menu(&mut self) {
        self.scheduler.cancel_all();
        self.sequence.clear();
        self.buffer.clear();
        self.round = 1;
        self.score = 0;
        self.set_state(RoundState::Idle);

        self.emit(Effect::InputEnabled(false));
        self.emit(Effect::HideOverlay(Overlay::GameOver));
        self.emit(Effect::HideOverlay(Overlay::Victory));
        self.emit(Effect::ShowScreen(Screen::Menu));
        self.emit(Effect::Music(Music::Resume));
    }

    /// Move the virtual clock forward, firing every step that falls due.
    pub fn advance(&mut self, elapsed_ms: u64) {
        let horizon = self.scheduler.now().saturating_add(elapsed_ms);
        while let Some(entry) = self.scheduler.pop_due(horizon) {
            self.run_task(entry.task);
        }
        self.scheduler.settle(horizon);
    }

    // === Internals ===

    fn set_state(&mut self, next: RoundState) {
        if self.state != next {
            debug!(from = %self.state, to = %next, round = self.round, "state change");
            self.state = next;
        }
    }

    fn emit_move(&mut self, mv: MoveId) {
        self.emit(Effect::PlaySound(mv));
        self.emit(Effect::Highlight {
            target: mv,
            duration_ms: self.config.timing.highlight_ms,
        });
    }

    fn run_task(&mut self, task: EngineTask) {
        match task {
            EngineTask::BeginRound => self.begin_round(),
            EngineTask::PresentStep(index) => {
                if let Some(&mv) = self.sequence.get(index) {
                    self.emit_move(mv);
                }
            }
            EngineTask::OpenInput => {
                self.set_state(RoundState::AwaitingInput);
                self.emit(Effect::InputEnabled(true));
                self.emit(Effect::Feedback(Feedback::YourTurn));
            }
            EngineTask::ShowVictory => self.emit(Effect::ShowOverlay(Overlay::Victory)),
        }
    }

    fn handle_mismatch(&mut self, got: MoveId, expected: MoveId) -> SubmitOutcome {
        debug!(%got, %expected, position = self.buffer.len(), "mismatch");
        match self.config.mismatch {
            MismatchPolicy::EndRound => {
                self.scheduler.cancel_all();
                self.set_state(RoundState::RoundLost);
                self.emit(Effect::InputEnabled(false));
                self.emit(Effect::Cue(Cue::Wrong));
                self.emit(Effect::GameOver {
                    score: self.score,
                    round: self.round,
                });
                self.emit(Effect::ShowOverlay(Overlay::GameOver));
                SubmitOutcome::GameOver {
                    score: self.score,
                    round: self.round,
                }
            }
            MismatchPolicy::ResetBuffer => {
                self.buffer.clear();
                self.emit(Effect::Feedback(Feedback::TryAgain));
                self.emit(Effect::Shake);
                SubmitOutcome::BufferReset
            }
        }
    }

    fn complete_round(&mut self) -> SubmitOutcome {
        self.set_state(RoundState::Evaluating);
        self.score += 1;
        self.emit(Effect::InputEnabled(false));
        self.emit(Effect::Cue(Cue::Correct));
        self.emit(Effect::Score(i64::from(self.score)));

        if self.config.max_rounds.is_some_and(|max| self.round >= max) {
            self.set_state(RoundState::RoundWon);
            self.emit(Effect::Feedback(Feedback::Victory));
            self.scheduler
                .schedule_after(self.config.timing.victory_delay_ms, EngineTask::ShowVictory);
            return SubmitOutcome::Victory;
        }

        self.round += 1;
        self.emit(Effect::Feedback(Feedback::Correct));
        self.emit(Effect::Celebrate);
        self.scheduler
            .schedule_after(self.config.timing.round_pause_ms, EngineTask::BeginRound);
        SubmitOutcome::RoundComplete {
            next_round: self.round,
        }
    }
}

impl MoveTarget for SequenceEngine {
    type Outcome = SubmitOutcome;

    fn submit_move(&mut self, mv: MoveId) -> SubmitOutcome {
        SequenceEngine::submit_move(self, mv)
    }
}
