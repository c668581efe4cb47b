//! Round state and engine snapshots.
//!
//! ## RoundState
//!
//! The engine's lifecycle. Only engine transitions change it; UI handlers
//! read it through `SequenceEngine::state()` or a snapshot.
//!
//! ## EngineSnapshot
//!
//! Observable view of an engine: state, counters, the target sequence and
//! the player's buffer. The sequence is an `im::Vector`, so taking a
//! snapshot every frame is O(1).

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::moves::MoveId;

/// Engine lifecycle state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundState {
    /// On the menu, nothing running.
    #[default]
    Idle,
    /// Playing the sequence back; input is disabled.
    Presenting,
    /// Accepting player moves.
    AwaitingInput,
    /// The player completed the sequence; the next round is pending.
    Evaluating,
    /// The final round was completed.
    RoundWon,
    /// The player made a mistake and the game is over.
    RoundLost,
}

impl RoundState {
    /// Check if the game has ended (won or lost).
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, RoundState::RoundWon | RoundState::RoundLost)
    }

    /// Check if player moves are accepted.
    #[must_use]
    pub fn accepts_input(self) -> bool {
        self == RoundState::AwaitingInput
    }
}

impl std::fmt::Display for RoundState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RoundState::Idle => "idle",
            RoundState::Presenting => "presenting",
            RoundState::AwaitingInput => "awaiting input",
            RoundState::Evaluating => "evaluating",
            RoundState::RoundWon => "won",
            RoundState::RoundLost => "lost",
        };
        f.write_str(name)
    }
}

/// Player buffer storage. Rounds rarely exceed a dozen moves.
pub type PlayerBuffer = SmallVec<[MoveId; 16]>;

/// Observable engine state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    /// Lifecycle state.
    pub state: RoundState,

    /// Round/level counter (starts at 1).
    pub round: u32,

    /// Completed rounds this game.
    pub score: u32,

    /// Target sequence.
    pub sequence: Vector<MoveId>,

    /// Moves entered so far this round.
    pub buffer: PlayerBuffer,
}

impl EngineSnapshot {
    /// Number of moves still expected this round.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.sequence.len().saturating_sub(self.buffer.len())
    }
}
