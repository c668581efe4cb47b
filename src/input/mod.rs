//! Input capability.
//!
//! UI adapters translate clicks, key presses and drag-and-drop into
//! `Gesture`s; an `InputAdapter` resolves them to moves and funnels them
//! into a `MoveTarget`. Games stay ignorant of input modality.

mod adapter;

pub use adapter::{Gesture, InputAdapter, KeyMap, MoveTarget};
