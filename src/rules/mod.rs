//! Sequence game rules.
//!
//! `SequenceEngine` is the shared loop behind every memory-style game:
//! - grow or regenerate the target sequence
//! - present it with timed highlight+sound steps
//! - judge player moves with first-mismatch-wins semantics
//!
//! Variants in `crate::games` only choose an alphabet, a growth policy
//! and a mismatch policy through `EngineConfig`.

pub mod engine;
mod outcome;

pub use engine::SequenceEngine;
pub use outcome::SubmitOutcome;
