//! A 1-based, fully-closed, labeled interval of residue positions.
//!
//! Intervals describe structural or functional domains on a protein. Both the
//! start and the end position are included in the interval.
//!
//! ```text
//! ============== capsid ===============
//!
//! | 1 | 2 | 3 | 4 | 5 | 6 | 7 | 8 | 9 |
//! -------------------------------------
//! |   |   | X | X | X | X | X |   |   |  <= 3-7:NTD
//! |   |   |   |   |   |   |   | X |   |  <= 8:loop
//! ```
//!
//! ## Parsing Intervals
//!
//! Intervals are parsed from strings of the form `<start>-<end>:<label>`
//! (e.g., `85-93:CypA`). A single residue can be written as
//! `<position>:<label>` (e.g., `8:loop`), which is parsed as an interval whose
//! start and end are the same position.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::core::position;
use crate::core::Position;

/// The pattern that an interval string must match.
static INTERVAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    // SAFETY: the pattern is a valid regular expression.
    Regex::new(r"^\s*(\d+)(?:\s*-\s*(\d+))?\s*:\s*(\S.*?)\s*$").unwrap()
});

/// An error related to an interval.
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// Attempted to create an interval with an invalid position.
    InvalidPosition(position::Error),
    /// The start position is greater than the end position.
    StartGreaterThanEnd(Position, Position),
    /// Could not parse an interval from the given value.
    ParseError(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidPosition(err) => write!(f, "invalid position: {err}"),
            Error::StartGreaterThanEnd(start, end) => write!(
                f,
                "start position ({start}) cannot be greater than the end position ({end})"
            ),
            Error::ParseError(value) => {
                write!(f, "could not parse interval from the value: {value}")
            }
        }
    }
}

impl std::error::Error for Error {}

/// A closed interval of residue positions carrying a label.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Interval {
    /// The first position within the interval.
    start: Position,
    /// The last position within the interval.
    end: Position,
    /// The label of the interval.
    label: String,
}

impl Interval {
    /// Attempts to create a new [`Interval`].
    ///
    /// # Examples
    ///
    /// ```
    /// use prevalence::core::Interval;
    /// use prevalence::core::Position;
    ///
    /// let start = Position::try_new(85)?;
    /// let end = Position::try_new(93)?;
    ///
    /// let interval = Interval::try_new(start, end, "CypA")?;
    /// assert_eq!(interval.label(), "CypA");
    ///
    /// assert!(Interval::try_new(end, start, "CypA").is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new(start: Position, end: Position, label: impl Into<String>) -> Result<Self, Error> {
        if start > end {
            return Err(Error::StartGreaterThanEnd(start, end));
        }

        Ok(Self {
            start,
            end,
            label: label.into(),
        })
    }

    /// Gets the start position of the interval.
    pub fn start(&self) -> Position {
        self.start
    }

    /// Gets the end position of the interval.
    pub fn end(&self) -> Position {
        self.end
    }

    /// Gets the label of the interval.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Gets the number of positions covered by the interval.
    ///
    /// # Examples
    ///
    /// ```
    /// use prevalence::core::Interval;
    ///
    /// let interval = "85-93:CypA".parse::<Interval>()?;
    /// assert_eq!(interval.len(), 9);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.end.get() - self.start.get() + 1
    }

    /// Indicates whether a position falls within the interval (inclusive on
    /// both ends).
    ///
    /// # Examples
    ///
    /// ```
    /// use prevalence::core::Interval;
    /// use prevalence::core::Position;
    ///
    /// let interval = "85-93:CypA".parse::<Interval>()?;
    ///
    /// assert!(interval.contains(Position::try_new(85)?));
    /// assert!(interval.contains(Position::try_new(93)?));
    /// assert!(!interval.contains(Position::try_new(94)?));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn contains(&self, position: Position) -> bool {
        self.start <= position && position <= self.end
    }

    /// Clips the interval to the closed range `[start, stop]`, returning the
    /// clipped start and end positions.
    ///
    /// This can, at most, shorten the interval. Note that no check is made
    /// that the interval actually overlaps the range: if it does not, the
    /// returned start will be greater than the returned end.
    pub fn clip(&self, start: Position, stop: Position) -> (Position, Position) {
        (self.start.max(start), self.end.min(stop))
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}:{}", self.start, self.end, self.label)
    }
}

impl FromStr for Interval {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = INTERVAL_REGEX
            .captures(s)
            .ok_or_else(|| Error::ParseError(s.to_string()))?;

        // SAFETY: groups one and three are not optional in the pattern.
        let start = captures.get(1).unwrap().as_str();
        let label = captures.get(3).unwrap().as_str();

        let start = start.parse::<Position>().map_err(Error::InvalidPosition)?;
        let end = match captures.get(2) {
            Some(end) => end
                .as_str()
                .parse::<Position>()
                .map_err(Error::InvalidPosition)?,
            None => start,
        };

        Interval::try_new(start, end, label)
    }
}
