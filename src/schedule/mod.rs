//! Playback scheduling.
//!
//! Every deferred step a game needs (presentation beats, round pauses,
//! delayed overlays, raindrop landings) goes through one
//! `PlaybackScheduler` owned by the game instance. The scheduler runs on a
//! virtual clock advanced by the host, and a round reset flushes it
//! atomically, so no stale step can fire into the next round.

mod scheduler;

pub use scheduler::{PlaybackScheduler, ScheduledTask, TaskId};
