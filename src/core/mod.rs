//! Core engine types: moves, alphabets, RNG, configuration, round state.
//!
//! This module contains the building blocks shared by every game.
//! Games configure these via `EngineConfig` rather than modifying the core.

pub mod moves;
pub mod rng;
pub mod config;
pub mod state;
pub mod error;

pub use moves::{Alphabet, MoveId};
pub use rng::GameRng;
pub use config::{EngineConfig, GrowthPolicy, MismatchPolicy, Timing};
pub use state::{EngineSnapshot, PlayerBuffer, RoundState};
pub use error::{EngineError, Result};
