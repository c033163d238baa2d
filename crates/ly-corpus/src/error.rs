//! Corpus loading errors.

use thiserror::Error;

/// Alias for `Result<T, CorpusError>`.
pub type CorpusResult<T> = Result<T, CorpusError>;

/// Errors raised while loading a commentary corpus.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// The corpus file could not be read.
    #[error("cannot read corpus: {0}")]
    Io(#[from] std::io::Error),

    /// No hexagram heading was recognised.
    #[error("corpus contains no hexagram headings")]
    Empty,

    /// A heading or property pattern failed to compile.
    #[error("invalid corpus pattern: {0}")]
    Pattern(#[from] regex::Error),
}
