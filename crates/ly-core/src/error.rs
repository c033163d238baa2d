//! Error types for the core tables.

use thiserror::Error;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while parsing casts, hexagrams, or calendar values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A hexagram was not exactly six `0`/`1` digits.
    #[error("invalid hexagram \"{0}\": expected six digits of 0 or 1")]
    InvalidHexagram(String),

    /// A line cast was not exactly three `0`/`1` coin outcomes.
    #[error("invalid line cast \"{0}\": expected three digits of 0 or 1")]
    InvalidLineCast(String),

    /// Unknown heavenly stem.
    #[error("invalid stem: {0}")]
    InvalidStem(String),

    /// Unknown earthly branch.
    #[error("invalid branch: {0}")]
    InvalidBranch(String),

    /// A stem and branch that never pair in the sexagenary cycle.
    #[error("invalid stem-branch pair: {0}")]
    InvalidStemBranch(String),

    /// A hexagram name missing from the palace table.
    #[error("hexagram \"{0}\" has no palace")]
    UnresolvedPalace(String),
}
