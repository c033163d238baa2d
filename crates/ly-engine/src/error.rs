//! Error types for the reading engine.

use ly_core::{CoreError, Kinship};
use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that abort a reading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The governing kinship is neither visible nor hidden.
    #[error("governing kinship {0} is neither visible nor hidden")]
    YongShenAbsent(Kinship),

    /// Unknown question category.
    #[error("invalid category: {0}")]
    InvalidCategory(String),

    /// Unknown gender.
    #[error("invalid gender: {0}")]
    InvalidGender(String),

    /// Table lookup or parse failure.
    #[error("{0}")]
    Core(#[from] CoreError),
}
