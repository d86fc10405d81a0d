//! Alignment of domain annotations onto a row of positions.
//!
//! A row (a chunk of [`PositionGroup`](crate::group::PositionGroup)s) covers
//! the closed range `[start, stop]` of its smallest and largest position, and
//! each position is `1 / sites_per_row` of the row's width. Overlays are laid
//! out as a sequence of [`Segment`]s whose widths are percentages of that
//! width:
//!
//! ```text
//! positions  51 ............................ 85 ..... 93 ....... 100
//! segments   |          Gap (68%)           |CypA (18%)|
//! ```
//!
//! Two kinds of overlay are supported, and both reduce to the same layout
//! over an ordered list of clipped marks:
//!
//! - [`domain::map_domains()`] for labeled closed intervals.
//! - [`special::map_points()`] for categorized single positions.
//!
//! No trailing gap is emitted after the last mark; the remaining width is
//! implicitly blank.

use tracing::trace;

use crate::core::Position;
use crate::core::Positioned;

pub mod domain;
pub mod segment;
pub mod special;

pub use domain::map_domains;
pub use segment::Segment;
pub use special::map_points;
pub use special::Categories;
pub use special::Category;

/// An error related to laying out an overlay.
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// The number of sites per row was zero.
    ZeroSitesPerRow,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ZeroSitesPerRow => write!(f, "sites per row must be greater than zero"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// The closed range of positions covered by a row.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Span {
    /// The smallest position in the row.
    start: Position,
    /// The largest position in the row.
    stop: Position,
}

impl Span {
    /// Computes the span of a chunk, or [`None`] if the chunk is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use prevalence::core::Position;
    /// use prevalence::overlay::Span;
    ///
    /// let chunk = [7, 3, 12]
    ///     .into_iter()
    ///     .map(Position::try_new)
    ///     .collect::<Result<Vec<_>, _>>()?;
    ///
    /// let span = Span::of(&chunk).unwrap();
    /// assert_eq!(span.start().get(), 3);
    /// assert_eq!(span.stop().get(), 12);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn of<T: Positioned>(chunk: &[T]) -> Option<Self> {
        let start = chunk.iter().map(Positioned::position).min()?;
        let stop = chunk.iter().map(Positioned::position).max()?;
        Some(Self { start, stop })
    }

    /// Gets the smallest position in the row.
    pub fn start(&self) -> Position {
        self.start
    }

    /// Gets the largest position in the row.
    pub fn stop(&self) -> Position {
        self.stop
    }

    /// Whether a position falls within the span (inclusive on both ends).
    pub fn contains(&self, position: Position) -> bool {
        self.start <= position && position <= self.stop
    }
}

/// A mark that has already been clipped to a [`Span`].
#[derive(Clone, Debug)]
pub(crate) struct Mark<'a> {
    /// The first covered position.
    pub(crate) begin: Position,
    /// The last covered position.
    pub(crate) end: Position,
    /// The label.
    pub(crate) label: &'a str,
}

/// The state threaded through [`layout()`].
#[derive(Debug, Default)]
struct Accumulator {
    /// Positions already accounted for, relative to the span start.
    cursor: i64,
    /// The segments emitted so far.
    segments: Vec<Segment>,
}

/// Converts a number of positions into a percentage of the row width.
pub(crate) fn percent_of_row(positions: i64, sites_per_row: usize) -> f64 {
    positions as f64 / sites_per_row as f64 * 100.0
}

/// Ensures that the number of sites per row is usable as a divisor.
pub(crate) fn check_sites_per_row(sites_per_row: usize) -> Result<()> {
    match sites_per_row {
        0 => Err(Error::ZeroSitesPerRow),
        _ => Ok(()),
    }
}

/// Lays out marks, in the order given, as gap and label segments.
///
/// Marks are expected to be ordered and non-overlapping. That is not checked:
/// out of order or overlapping marks produce gaps with negative widths.
pub(crate) fn layout<'a, I>(span: Span, sites_per_row: usize, marks: I) -> Vec<Segment>
where
    I: IntoIterator<Item = Mark<'a>>,
{
    let Accumulator { segments, .. } =
        marks
            .into_iter()
            .fold(Accumulator::default(), |mut acc, mark| {
                let offset = mark.begin.offset_from(span.start);

                // NOTE: the widths here are derived from integers divided by a
                // non-zero integer, so they are never `NaN` and a plain
                // comparison against zero is sufficient.
                let gap = percent_of_row(offset - acc.cursor, sites_per_row);
                if gap != 0.0 {
                    acc.segments.push(Segment::Gap { width: gap });
                }

                let covered = mark.end.offset_from(mark.begin) + 1;
                acc.segments.push(Segment::Label {
                    width: percent_of_row(covered, sites_per_row),
                    label: mark.label.to_string(),
                });

                acc.cursor = offset + covered;
                acc
            });

    trace!(
        "laid out {} segments for {}-{}",
        segments.len(),
        span.start,
        span.stop
    );

    segments
}
