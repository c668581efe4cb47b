//! Engine configuration.
//!
//! Games configure the sequence engine at startup by providing:
//! - an `Alphabet` of moves
//! - a `GrowthPolicy` (how the target sequence changes between rounds)
//! - a `MismatchPolicy` (what a wrong move does)
//! - `Timing` for presentation and pauses
//! - an optional round limit
//!
//! The engine never hardcodes a particular game; each variant in
//! `crate::games` is just a preset of this struct.

use serde::{Deserialize, Serialize};

use super::error::{EngineError, Result};
use super::moves::Alphabet;

/// How the target sequence evolves from round to round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrowthPolicy {
    /// Append one random move per round ("Simon" style).
    Append,
    /// Replace the sequence with a fresh shuffle of the whole alphabet.
    Regenerate,
}

/// What happens when the player enters a wrong move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MismatchPolicy {
    /// The round is lost and the game is over.
    EndRound,
    /// The player's buffer is emptied; the round continues.
    ResetBuffer,
}

/// Presentation and pacing, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    /// Delay between `start_game` and the first round.
    pub start_delay_ms: u64,

    /// Gap between consecutive presentation steps.
    pub step_interval_ms: u64,

    /// How long a highlighted move stays lit.
    pub highlight_ms: u64,

    /// Pause between a completed round and the next one.
    pub round_pause_ms: u64,

    /// Delay between the final success and the victory overlay.
    pub victory_delay_ms: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            start_delay_ms: 500,
            step_interval_ms: 800,
            highlight_ms: 400,
            round_pause_ms: 1500,
            victory_delay_ms: 1500,
        }
    }
}

/// Complete sequence engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Moves the sequence is drawn from.
    pub alphabet: Alphabet,

    /// Sequence evolution between rounds.
    #[serde(default = "default_growth")]
    pub growth: GrowthPolicy,

    /// Wrong-move handling.
    #[serde(default = "default_mismatch")]
    pub mismatch: MismatchPolicy,

    /// Presentation pacing.
    #[serde(default)]
    pub timing: Timing,

    /// Round limit. `None` plays until the first mistake.
    #[serde(default)]
    pub max_rounds: Option<u32>,

    /// Present the sequence automatically when a round begins.
    /// When false, input opens at once and the player asks for playback.
    #[serde(default = "default_auto_present")]
    pub auto_present: bool,
}

fn default_growth() -> GrowthPolicy {
    GrowthPolicy::Append
}

fn default_mismatch() -> MismatchPolicy {
    MismatchPolicy::EndRound
}

fn default_auto_present() -> bool {
    true
}

impl EngineConfig {
    /// Create a classic append-and-replay configuration.
    pub fn new(alphabet: Alphabet) -> Self {
        Self {
            alphabet,
            growth: default_growth(),
            mismatch: default_mismatch(),
            timing: Timing::default(),
            max_rounds: None,
            auto_present: default_auto_present(),
        }
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the engine relies on.
    pub fn validate(&self) -> Result<()> {
        if self.timing.step_interval_ms == 0 {
            return Err(EngineError::ZeroInterval);
        }
        if self.max_rounds == Some(0) {
            return Err(EngineError::ZeroRounds);
        }
        Ok(())
    }

    /// Set the growth policy.
    #[must_use]
    pub fn with_growth(mut self, growth: GrowthPolicy) -> Self {
        self.growth = growth;
        self
    }

    /// Set the mismatch policy.
    #[must_use]
    pub fn with_mismatch(mut self, mismatch: MismatchPolicy) -> Self {
        self.mismatch = mismatch;
        self
    }

    /// Set the timing.
    #[must_use]
    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    /// Limit the number of rounds.
    #[must_use]
    pub fn with_max_rounds(mut self, rounds: u32) -> Self {
        self.max_rounds = Some(rounds);
        self
    }

    /// Remove the round limit.
    #[must_use]
    pub fn unbounded(mut self) -> Self {
        self.max_rounds = None;
        self
    }

    /// Require the player to ask for playback.
    #[must_use]
    pub fn manual_presentation(mut self) -> Self {
        self.auto_present = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tools() -> Alphabet {
        Alphabet::new(["hammer", "sander", "saw"]).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = EngineConfig::new(tools());
        assert_eq!(config.growth, GrowthPolicy::Append);
        assert_eq!(config.mismatch, MismatchPolicy::EndRound);
        assert_eq!(config.max_rounds, None);
        assert!(config.auto_present);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = EngineConfig::new(tools())
            .with_growth(GrowthPolicy::Regenerate)
            .with_mismatch(MismatchPolicy::ResetBuffer)
            .with_max_rounds(10)
            .manual_presentation();

        assert_eq!(config.growth, GrowthPolicy::Regenerate);
        assert_eq!(config.mismatch, MismatchPolicy::ResetBuffer);
        assert_eq!(config.max_rounds, Some(10));
        assert!(!config.auto_present);
        assert_eq!(config.unbounded().max_rounds, None);
    }

    #[test]
    fn test_validate() {
        let zero_rounds = EngineConfig::new(tools()).with_max_rounds(0);
        assert!(matches!(zero_rounds.validate(), Err(EngineError::ZeroRounds)));

        let timing = Timing {
            step_interval_ms: 0,
            ..Timing::default()
        };
        let zero_step = EngineConfig::new(tools()).with_timing(timing);
        assert!(matches!(zero_step.validate(), Err(EngineError::ZeroInterval)));
    }

    #[test]
    fn test_from_json() {
        let config = EngineConfig::from_json(
            r#"{
                "alphabet": ["low", "mid", "high"],
                "growth": "Regenerate",
                "mismatch": "ResetBuffer",
                "timing": { "step_interval_ms": 600 },
                "max_rounds": 10
            }"#,
        )
        .unwrap();

        assert_eq!(config.alphabet.len(), 3);
        assert_eq!(config.growth, GrowthPolicy::Regenerate);
        assert_eq!(config.timing.step_interval_ms, 600);
        assert_eq!(config.timing.round_pause_ms, 1500);
        assert_eq!(config.max_rounds, Some(10));
        assert!(config.auto_present);
    }

    #[test]
    fn test_from_json_errors() {
        assert!(matches!(
            EngineConfig::from_json("{ not json"),
            Err(EngineError::InvalidConfig(_))
        ));
        assert!(matches!(
            EngineConfig::from_json(r#"{ "alphabet": ["a"], "max_rounds": 0 }"#),
            Err(EngineError::ZeroRounds)
        ));
        assert!(EngineConfig::from_json(r#"{ "alphabet": [] }"#).is_err());
    }

    #[test]
    fn test_serialization() {
        let config = EngineConfig::new(tools()).with_max_rounds(10);
        let json = serde_json::to_string(&config).unwrap();
        let back: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
