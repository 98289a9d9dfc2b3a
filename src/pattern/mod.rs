//! Decoders for the pattern files shared by the cellular-automaton
//! community.
//!
//! Two formats are understood: [Run Length Encoded] (`.rle`) and
//! [plaintext] (`.cells`), with auto-detection between them.
//!
//! [Run Length Encoded]: https://conwaylife.com/wiki/Run_Length_Encoded
//! [plaintext]: https://conwaylife.com/wiki/Plaintext

mod plaintext;
mod rle;

use crate::{
    error::{Error, Result},
    rule::Rule,
    universe::Universe,
};
use std::{io::BufRead, path::Path};

/// A pattern file format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    /// Detect the format from the content.
    #[default]
    Auto,
    /// Run Length Encoded, usually `.rle`.
    Rle,
    /// Plaintext, usually `.cells`.
    Plaintext,
}

impl Format {
    /// Guesses the format from a file extension: `.rle` or `.cells`.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        match path.as_ref().extension()?.to_str()? {
            "rle" => Some(Self::Rle),
            "cells" => Some(Self::Plaintext),
            _ => None,
        }
    }
}

/// A decoded pattern: a populated universe plus its metadata.
#[derive(Default)]
pub struct Pattern {
    /// The universe holding the pattern, with its reset snapshot
    /// taken.
    pub universe: Universe,
    /// The pattern name, from `#N` or `!Name:`.
    pub name: String,
    /// The author, from `#O` or `!Author:`.
    pub author: String,
    /// The remaining comment lines, joined with `\n`.
    pub comment: String,
    /// The rule named by the file, or Conway's Game of Life.
    pub rule: Rule,
}

impl Pattern {
    /// Decodes a pattern, detecting the format from the first
    /// non-blank line.
    ///
    /// A line starting with `#` or matching the RLE header is RLE; a
    /// line starting with `!`, `.` or `O` is plaintext. Anything else
    /// fails with [`Error::InferFailed`].
    pub fn decode<R: BufRead>(reader: R) -> Result<Self> {
        let lines = read_lines(reader)?;
        let first = lines.iter().map(|line| line.trim()).find(|line| !line.is_empty());
        match first {
            Some(line) if line.starts_with('#') || rle::is_header(line) => rle::parse(&lines),
            Some(line) if line.starts_with(&['!', '.', 'O'][..]) => plaintext::parse(&lines),
            _ => Err(Error::InferFailed),
        }
    }

    /// Decodes a Run Length Encoded pattern.
    pub fn decode_rle<R: BufRead>(reader: R) -> Result<Self> {
        rle::parse(&read_lines(reader)?)
    }

    /// Decodes a plaintext pattern.
    pub fn decode_plaintext<R: BufRead>(reader: R) -> Result<Self> {
        plaintext::parse(&read_lines(reader)?)
    }

    /// Encodes the pattern as RLE text.
    ///
    /// Cells are written relative to the filled bounds, the way RLE
    /// files are shared; the absolute position in the universe is not
    /// preserved.
    pub fn encode_rle(&self) -> String {
        rle::encode(self)
    }

    /// Encodes the pattern as plaintext, one `.`/`O` row per line.
    ///
    /// Like [`encode_rle`](Pattern::encode_rle), cells are written
    /// relative to the filled bounds. The rule is not representable
    /// in this format and is dropped.
    pub fn encode_plaintext(&self) -> String {
        plaintext::encode(self)
    }
}

fn read_lines<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let lines = reader.lines().collect::<std::io::Result<_>>()?;
    Ok(lines)
}
