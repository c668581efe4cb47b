//! # sequence-games
//!
//! A turn-based sequence-replay engine for small memory and rhythm games.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic Engine**: No hardcoded moves, timings or round counts.
//!    Every memory game is an `EngineConfig` preset.
//!
//! 2. **Virtual Time**: Nothing sleeps. Deferred steps live in a cancellable
//!    `PlaybackScheduler` and the host advances the clock, so games are
//!    deterministic for a given seed and input trace.
//!
//! 3. **Effects Out, Moves In**: Games never touch a UI. Input arrives as
//!    `Gesture`s resolved to moves; output leaves as `Effect`s.
//!
//! ## Modules
//!
//! - `core`: Moves, alphabets, RNG, configuration, round state, errors
//! - `schedule`: Virtual-clock task queue
//! - `effects`: Effect vocabulary and the `Presenter` seam
//! - `input`: Gestures, key maps and the `MoveTarget` entry point
//! - `rules`: The `SequenceEngine` state machine
//! - `games`: The six game variants

pub mod core;
pub mod effects;
pub mod games;
pub mod input;
pub mod rules;
pub mod schedule;

// Re-export commonly used types
pub use crate::core::{
    Alphabet, EngineConfig, EngineError, EngineSnapshot, GameRng, GrowthPolicy, MismatchPolicy,
    MoveId, PlayerBuffer, Result, RoundState, Timing,
};

pub use crate::effects::{Cue, Effect, EffectBatch, Feedback, Music, Overlay, Presenter, Screen};

pub use crate::input::{Gesture, InputAdapter, KeyMap, MoveTarget};

pub use crate::rules::{SequenceEngine, SubmitOutcome};

pub use crate::schedule::{PlaybackScheduler, ScheduledTask, TaskId};
