//! Move identifiers and the alphabets they are drawn from.
//!
//! ## MoveId
//!
//! A move is an opaque symbol: a tool, a percussive sound, a note letter or a
//! pitch. The engine only compares moves for identity, so a `MoveId` is just
//! an index into the game's `Alphabet`.
//!
//! ## Alphabet
//!
//! Ordered, duplicate-free list of move names. Games define their alphabet at
//! startup; UI adapters use it to translate element ids, drag payloads and
//! sound names to and from `MoveId`.

use serde::{Deserialize, Serialize};

use super::error::{EngineError, Result};

/// Move identifier. Index into the owning `Alphabet`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MoveId(pub u16);

impl MoveId {
    /// Create a new move ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for MoveId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Move({})", self.0)
    }
}

/// The fixed set of moves a game draws its sequences from.
///
/// ```
/// use sequence_games::core::{Alphabet, MoveId};
///
/// let tools = Alphabet::new(["hammer", "sander", "saw"]).unwrap();
/// assert_eq!(tools.len(), 3);
/// assert_eq!(tools.parse("saw"), Some(MoveId::new(2)));
/// assert_eq!(tools.parse("drill"), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Alphabet {
    names: Vec<String>,
}

impl Alphabet {
    /// Build an alphabet from move names.
    ///
    /// Fails on an empty list or a repeated name.
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(EngineError::EmptyAlphabet);
        }
        if names.len() > usize::from(u16::MAX) {
            return Err(EngineError::AlphabetTooLarge(names.len()));
        }
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(EngineError::DuplicateMove(name.clone()));
            }
        }
        Ok(Self { names })
    }

    /// Number of moves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false: alphabets are never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Look up a move by name.
    #[must_use]
    pub fn parse(&self, name: &str) -> Option<MoveId> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| MoveId(i as u16))
    }

    /// Name of a move, if it belongs to this alphabet.
    #[must_use]
    pub fn name(&self, id: MoveId) -> Option<&str> {
        self.names.get(id.index()).map(String::as_str)
    }

    /// Check that a move belongs to this alphabet.
    #[must_use]
    pub fn contains(&self, id: MoveId) -> bool {
        id.index() < self.names.len()
    }

    /// Iterate over all move IDs in alphabet order.
    pub fn ids(&self) -> impl Iterator<Item = MoveId> {
        (0..self.names.len() as u16).map(MoveId)
    }

    /// The first `count` moves as a new alphabet (palette tiers).
    pub fn prefix(&self, count: usize) -> Result<Self> {
        Self::new(self.names.iter().take(count).cloned())
    }
}

impl TryFrom<Vec<String>> for Alphabet {
    type Error = EngineError;

    fn try_from(names: Vec<String>) -> Result<Self> {
        Self::new(names)
    }
}

impl From<Alphabet> for Vec<String> {
    fn from(alphabet: Alphabet) -> Self {
        alphabet.names
    }
}
