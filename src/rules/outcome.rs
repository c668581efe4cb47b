use serde::{Deserialize, Serialize};

/// Result of submitting one player move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubmitOutcome {
    /// Not accepting input, or the move is not part of the alphabet.
    /// Nothing changed and no effect was emitted.
    Ignored,

    /// Correct move; `remaining` moves still expected this round.
    Accepted { remaining: usize },

    /// Wrong move under `MismatchPolicy::ResetBuffer`: start the round over.
    BufferReset,

    /// Sequence completed; `next_round` begins after the round pause.
    RoundComplete { next_round: u32 },

    /// Final round completed.
    Victory,

    /// Wrong move under `MismatchPolicy::EndRound`.
    GameOver { score: u32, round: u32 },
}

impl SubmitOutcome {
    /// Check if the move was taken into account.
    #[must_use]
    pub fn is_accepted(self) -> bool {
        !matches!(self, SubmitOutcome::Ignored)
    }

    /// Check if the move was a mismatch.
    #[must_use]
    pub fn is_mismatch(self) -> bool {
        matches!(
            self,
            SubmitOutcome::BufferReset | SubmitOutcome::GameOver { .. }
        )
    }
}
