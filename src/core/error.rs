use thiserror::Error;

/// Errors raised while building engines and games.
///
/// Gameplay never produces these: a wrong move is a `SubmitOutcome`,
/// and malformed input is dropped.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Alphabet must contain at least one move")]
    EmptyAlphabet,

    #[error("Alphabet has too many moves: {0}")]
    AlphabetTooLarge(usize),

    #[error("Move listed twice in alphabet: {0}")]
    DuplicateMove(String),

    #[error("Unknown move in key map: {0}")]
    UnknownMove(String),

    #[error("Step interval must be positive")]
    ZeroInterval,

    #[error("Round limit must be at least 1")]
    ZeroRounds,

    #[error("Rhythm game needs at least one level")]
    NoLevels,

    #[error("Rhythm pattern for level {0} is empty")]
    EmptyPattern(u32),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}

/// Convenience Result type for engine construction.
pub type Result<T> = std::result::Result<T, EngineError>;
