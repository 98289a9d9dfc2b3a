//! Rules of Life-like cellular automata, in B/S notation.

use crate::error::Error;
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which side of the rule string a digit belongs to.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    Survive,
    Born,
}

/// An outer-totalistic rule for a two-state cellular automaton.
///
/// A rule is a pair of neighbor-count sets: a dead cell becomes alive
/// when its live-neighbor count is in the _born_ set, and a live cell
/// stays alive when the count is in the _survive_ set.
///
/// The canonical text form is `B<digits>/S<digits>`, e.g. `B3/S23`
/// for Conway's Game of Life. Parsing also accepts lowercase labels
/// and the label-free `23/3` form (survival counts first), as used by
/// older pattern collections:
///
/// ```
/// use hashlife::Rule;
///
/// let rule: Rule = "23/3".parse().unwrap();
/// assert_eq!(rule, Rule::GAME_OF_LIFE);
/// assert_eq!(rule.to_string(), "B3/S23");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(into = "String", try_from = "String")
)]
pub struct Rule {
    /// Neighbor counts that make a dead cell become alive.
    ///
    /// Bit `n` is set when a count of `n` gives birth.
    born: u16,
    /// Neighbor counts that keep a live cell alive.
    survive: u16,
}

impl Rule {
    /// Conway's Game of Life, `B3/S23`.
    pub const GAME_OF_LIFE: Self = Self {
        born: 1 << 3,
        survive: 1 << 2 | 1 << 3,
    };

    /// HighLife, `B36/S23`.
    pub const HIGH_LIFE: Self = Self {
        born: 1 << 3 | 1 << 6,
        survive: 1 << 2 | 1 << 3,
    };

    /// Whether a dead cell with `neighbors` live neighbors becomes alive.
    pub fn contains_born(self, neighbors: u32) -> bool {
        self.born & 1 << neighbors != 0
    }

    /// Whether a live cell with `neighbors` live neighbors stays alive.
    pub fn contains_survive(self, neighbors: u32) -> bool {
        self.survive & 1 << neighbors != 0
    }

    /// Whether both neighbor-count sets are empty.
    ///
    /// The zero rule is not a useful automaton; it stands for a rule
    /// that has not been set yet.
    pub fn is_uninitialised(self) -> bool {
        self.born == 0 && self.survive == 0
    }
}

impl FromStr for Rule {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("life") {
            return Ok(Self::GAME_OF_LIFE);
        }
        if !s.contains('/') {
            return Err(Error::UnsupportedRule(s.to_owned()));
        }

        let mut born = 0;
        let mut survive = 0;
        // Digits before any `B`/`S` label are survival counts.
        let mut section = Section::Survive;
        for c in s.chars() {
            match c.to_ascii_uppercase() {
                'B' => section = Section::Born,
                'S' => section = Section::Survive,
                '/' => {
                    if section == Section::Survive {
                        section = Section::Born;
                    }
                }
                d @ '0'..='8' => {
                    let bit = 1 << (d as u16 - '0' as u16);
                    match section {
                        Section::Born => born |= bit,
                        Section::Survive => survive |= bit,
                    }
                }
                _ => return Err(Error::UnsupportedRule(s.to_owned())),
            }
        }
        Ok(Self { born, survive })
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("B")?;
        for n in 0..=8 {
            if self.born & 1 << n != 0 {
                write!(f, "{n}")?;
            }
        }
        f.write_str("/S")?;
        for n in 0..=8 {
            if self.survive & 1 << n != 0 {
                write!(f, "{n}")?;
            }
        }
        Ok(())
    }
}

impl From<Rule> for String {
    fn from(rule: Rule) -> Self {
        rule.to_string()
    }
}

impl TryFrom<String> for Rule {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
