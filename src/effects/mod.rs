//! Effect system for game output.
//!
//! Games never touch the UI directly. They emit effects:
//! - `Effect`: enumeration of everything a game can ask the UI to do
//! - `EffectBatch`: ordered outbox owned by each game
//! - `Presenter`: the UI collaborator that renders effects
//!
//! ## Design Philosophy
//!
//! Effects describe what should be seen or heard, never how: sound names,
//! CSS classes and element ids are resolved by the presenter from the
//! game's `Alphabet`.

mod effect;
mod presenter;

pub use effect::{Cue, Effect, EffectBatch, Feedback, Music, Overlay, Screen};
pub use presenter::Presenter;
