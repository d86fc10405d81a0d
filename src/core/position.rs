//! Facilities for representing a 1-based residue position.
//!
//! Positions index into a reference protein sequence the way biologists
//! count residues: the first residue is position `1`. There is no position
//! `0`, and any attempt to construct one (or a negative position) fails.

use std::num::ParseIntError;
use std::str::FromStr;

use serde::Serialize;

/// An error related to a [`Position`].
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// Attempted to create position zero.
    Zero,
    /// Attempted to create a negative position.
    Negative(i64),
    /// Could not parse a position from a string.
    Parse(ParseIntError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Zero => write!(f, "positions are 1-based, so zero is not a valid position"),
            Error::Negative(value) => write!(f, "negative position: {value}"),
            Error::Parse(err) => write!(f, "parse error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// The 1-based position of a residue within a reference sequence.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Position(usize);

impl Position {
    /// Attempts to create a new [`Position`].
    ///
    /// # Examples
    ///
    /// ```
    /// use prevalence::core::Position;
    ///
    /// let position = Position::try_new(10)?;
    /// assert_eq!(position.get(), 10);
    ///
    /// assert!(Position::try_new(0).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new(value: usize) -> Result<Self, Error> {
        match value {
            0 => Err(Error::Zero),
            value => Ok(Self(value)),
        }
    }

    /// Gets the inner value of the position.
    pub fn get(&self) -> usize {
        self.0
    }

    /// Gets the 0-based index corresponding to this position.
    ///
    /// # Examples
    ///
    /// ```
    /// use prevalence::core::Position;
    ///
    /// assert_eq!(Position::try_new(1)?.index(), 0);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn index(&self) -> usize {
        self.0 - 1
    }

    /// Gets the signed distance from `origin` to this position.
    ///
    /// The result is negative when this position precedes `origin`.
    pub fn offset_from(&self, origin: Position) -> i64 {
        self.0 as i64 - origin.0 as i64
    }
}

/// An item that sits at a single [`Position`].
pub trait Positioned {
    /// Gets the position of the item.
    fn position(&self) -> Position;
}

impl Positioned for Position {
    fn position(&self) -> Position {
        *self
    }
}

impl TryFrom<i64> for Position {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value < 0 {
            return Err(Error::Negative(value));
        }

        Position::try_new(value as usize)
    }
}

impl FromStr for Position {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().parse::<i64>().map_err(Error::Parse)?;
        Position::try_from(value)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
