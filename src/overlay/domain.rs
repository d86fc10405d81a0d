//! Layout of labeled domain intervals onto a row.

use crate::core::Interval;
use crate::core::Positioned;
use crate::overlay::check_sites_per_row;
use crate::overlay::layout;
use crate::overlay::Mark;
use crate::overlay::Result;
use crate::overlay::Segment;
use crate::overlay::Span;

/// Lays out domain intervals onto a chunk.
///
/// An interval is drawn only if at least one position present in the chunk
/// falls within it. Drawn intervals are clipped to the chunk's span and laid
/// out **in the order they are given**: the caller is responsible for
/// supplying intervals sorted by start and non-overlapping. A malformed
/// configuration is not rejected, but produces malformed segments (for
/// example, gaps with negative widths).
///
/// An empty chunk, or a chunk that no interval touches, yields no segments.
///
/// # Examples
///
/// ```
/// use prevalence::core::Interval;
/// use prevalence::core::Position;
/// use prevalence::overlay::map_domains;
///
/// let chunk = (51..=100)
///     .map(Position::try_new)
///     .collect::<Result<Vec<_>, _>>()?;
/// let domains = vec!["85-93:CypA".parse::<Interval>()?];
///
/// let segments = map_domains(&chunk, 50, &domains)?;
///
/// assert_eq!(segments.len(), 2);
/// assert!((segments[0].width() - 68.0).abs() < 1e-9);
/// assert!((segments[1].width() - 18.0).abs() < 1e-9);
/// assert_eq!(segments[1].label(), Some("CypA"));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn map_domains<T: Positioned>(
    chunk: &[T],
    sites_per_row: usize,
    intervals: &[Interval],
) -> Result<Vec<Segment>> {
    check_sites_per_row(sites_per_row)?;

    let span = match Span::of(chunk) {
        Some(span) => span,
        None => return Ok(Vec::new()),
    };

    let marks = intervals
        .iter()
        .filter(|interval| chunk.iter().any(|item| interval.contains(item.position())))
        .map(|interval| {
            let (begin, end) = interval.clip(span.start(), span.stop());
            Mark {
                begin,
                end,
                label: interval.label(),
            }
        });

    Ok(layout(span, sites_per_row, marks))
}
