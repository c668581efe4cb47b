//! Gesture resolution.
//!
//! Clicks carry the move name of the clicked element (`data-tool`,
//! `data-sound`, `data-pitch`), drops carry it as the drag payload, and keys
//! go through a static `KeyMap`. Anything that does not name a move of the
//! game's alphabet resolves to `None` and is dropped.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{Alphabet, EngineError, MoveId, Result};

/// A raw input event from the UI.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gesture {
    /// Pointer click on a move element.
    Click { element: String },
    /// Key press.
    Key { key: String },
    /// Drag-and-drop: `payload` from the dragged element onto `target`.
    Drop { payload: String, target: String },
}

impl Gesture {
    /// Click on the element for `element`.
    pub fn click(element: impl Into<String>) -> Self {
        Gesture::Click {
            element: element.into(),
        }
    }

    /// Press `key`.
    pub fn key(key: impl Into<String>) -> Self {
        Gesture::Key { key: key.into() }
    }

    /// Drop `payload` onto `target`.
    pub fn drop(payload: impl Into<String>, target: impl Into<String>) -> Self {
        Gesture::Drop {
            payload: payload.into(),
            target: target.into(),
        }
    }
}

/// Static key → move table. Keys are matched case-insensitively.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyMap {
    keys: FxHashMap<String, MoveId>,
}

impl KeyMap {
    /// Create an empty key map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a key map from `(key, move name)` pairs.
    pub fn from_pairs<'a>(
        alphabet: &Alphabet,
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self> {
        let mut map = Self::new();
        for (key, name) in pairs {
            let id = alphabet
                .parse(name)
                .ok_or_else(|| EngineError::UnknownMove(name.to_string()))?;
            map.keys.insert(key.to_uppercase(), id);
        }
        Ok(map)
    }

    /// Look up a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<MoveId> {
        self.keys.get(&key.to_uppercase()).copied()
    }

    /// Number of bound keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if no key is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Anything that accepts moves through a single entry point.
pub trait MoveTarget {
    /// Result of a submission.
    type Outcome;

    /// Submit one player move.
    fn submit_move(&mut self, mv: MoveId) -> Self::Outcome;
}

/// Resolves every input modality to a move of one alphabet.
#[derive(Clone, Debug)]
pub struct InputAdapter {
    alphabet: Alphabet,
    keys: KeyMap,
}

impl InputAdapter {
    /// Create an adapter accepting clicks and drops only.
    pub fn new(alphabet: Alphabet) -> Self {
        Self {
            alphabet,
            keys: KeyMap::new(),
        }
    }

    /// Also accept keyboard input.
    #[must_use]
    pub fn with_keys(mut self, keys: KeyMap) -> Self {
        self.keys = keys;
        self
    }

    /// The alphabet moves resolve into.
    #[must_use]
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Resolve a gesture to a move.
    #[must_use]
    pub fn resolve(&self, gesture: &Gesture) -> Option<MoveId> {
        match gesture {
            Gesture::Click { element } => self.alphabet.parse(element),
            Gesture::Key { key } => self.keys.get(key),
            Gesture::Drop { payload, .. } => self.alphabet.parse(payload),
        }
    }

    /// Resolve a gesture and submit it. Unresolvable gestures are dropped.
    pub fn dispatch<T: MoveTarget + ?Sized>(
        &self,
        gesture: &Gesture,
        target: &mut T,
    ) -> Option<T::Outcome> {
        match self.resolve(gesture) {
            Some(mv) => Some(target.submit_move(mv)),
            None => {
                tracing::debug!(?gesture, "gesture does not name a move");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sounds() -> Alphabet {
        Alphabet::new(["palma", "pe", "estalo"]).unwrap()
    }

    struct Recorder(Vec<MoveId>);

    impl MoveTarget for Recorder {
        type Outcome = usize;

        fn submit_move(&mut self, mv: MoveId) -> usize {
            self.0.push(mv);
            self.0.len()
        }
    }

    #[test]
    fn test_key_map_case_insensitive() {
        let keys = KeyMap::from_pairs(&sounds(), [("a", "palma"), ("S", "pe")]).unwrap();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys.get("A"), Some(MoveId::new(0)));
        assert_eq!(keys.get("s"), Some(MoveId::new(1)));
        assert_eq!(keys.get("D"), None);
    }

    #[test]
    fn test_key_map_unknown_move() {
        let err = KeyMap::from_pairs(&sounds(), [("X", "tambor")]).unwrap_err();
        assert!(matches!(err, EngineError::UnknownMove(name) if name == "tambor"));
    }

    #[test]
    fn test_resolve_all_modalities() {
        let keys = KeyMap::from_pairs(&sounds(), [("D", "estalo")]).unwrap();
        let adapter = InputAdapter::new(sounds()).with_keys(keys);

        assert_eq!(adapter.resolve(&Gesture::click("pe")), Some(MoveId::new(1)));
        assert_eq!(adapter.resolve(&Gesture::key("d")), Some(MoveId::new(2)));
        assert_eq!(
            adapter.resolve(&Gesture::drop("palma", "slot-0")),
            Some(MoveId::new(0))
        );
        assert_eq!(adapter.resolve(&Gesture::click("tambor")), None);
        assert_eq!(adapter.resolve(&Gesture::key("Q")), None);
    }

    #[test]
    fn test_dispatch_funnels_into_target() {
        let adapter = InputAdapter::new(sounds());
        let mut recorder = Recorder(Vec::new());

        assert_eq!(adapter.dispatch(&Gesture::click("palma"), &mut recorder), Some(1));
        assert_eq!(adapter.dispatch(&Gesture::drop("pe", "x"), &mut recorder), Some(2));
        assert_eq!(adapter.dispatch(&Gesture::click("nope"), &mut recorder), None);
        assert_eq!(recorder.0, vec![MoveId::new(0), MoveId::new(1)]);
    }
}
