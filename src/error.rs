//! All kinds of errors in this crate.

use std::io;
use thiserror::Error;

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// All kinds of errors in this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// The `x = …, y = …` line of an RLE pattern is malformed.
    #[error("Invalid RLE header: {0:?}")]
    InvalidHeader(String),
    /// The decoder met a byte that is not part of the format.
    #[error("Unexpected character {character:?} in line {line:?}")]
    UnexpectedCharacter {
        /// The offending character.
        character: char,
        /// The line it appeared in.
        line: String,
    },
    /// The rule string is not in a recognized B/S notation.
    #[error("Unsupported rule: {0:?}")]
    UnsupportedRule(String),
    /// The pattern format could not be inferred from the input.
    #[error("Unable to infer the pattern format")]
    InferFailed,
    /// An error from the underlying reader.
    #[error(transparent)]
    Read(#[from] io::Error),
}
