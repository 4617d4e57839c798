use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LevelError {
    #[error("Author level {0} not found")]
    NotFound(String),

    #[error("Level number {0} is already taken")]
    DuplicateLevel(u32),

    #[error("Invalid author level: {0}")]
    Invalid(String),
}

pub type LevelResult<T> = Result<T, LevelError>;
