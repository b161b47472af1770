use thiserror::Error;

/// Errors returned by generator construction and code allocation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("alphabet must not be empty")]
    EmptyAlphabet,
    #[error("alphabet symbol {0:?} is not an ASCII letter or digit")]
    InvalidSymbol(char),
    #[error("alphabet symbol {0:?} appears more than once")]
    DuplicateSymbol(char),
    #[error("invalid allocator settings: {0}")]
    InvalidSettings(String),
    #[error("no free short code after {attempts} attempts")]
    Exhausted { attempts: u32 },
}
