//! Game variants.
//!
//! Engine-backed memory games (presets of `SequenceEngine`):
//! - `ark`: append-and-replay over tool sounds, ten levels
//! - `echo`: append-and-replay rhythm echo until the first mistake
//! - `dove`: pitch ordering with on-demand playback
//!
//! Standalone boards sharing the scheduler and effect outbox:
//! - `rainbow`: drag each note onto its arc
//! - `melody`: compose a note per animal syllable
//! - `rain`: rhythm timing against falling drops

pub mod ark;
pub mod dove;
pub mod echo;
pub mod melody;
pub mod rain;
pub mod rainbow;

pub use ark::ArkGame;
pub use dove::{DoveGame, Mode as DoveMode};
pub use echo::EchoGame;
pub use melody::MelodyGame;
pub use rain::{HitOutcome, RainConfig, RainGame, RainLevel};
pub use rainbow::{DropOutcome, RainbowGame};
