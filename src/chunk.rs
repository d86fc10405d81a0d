//! Splitting of an ordered sequence into fixed-size rows.
//!
//! Chunking never mutates or consumes the caller's data: [`Chunks`] walks a
//! borrowed slice and hands out consecutive sub-slices of it. Because the
//! iterator is [`Clone`], a row layout can be restarted from the beginning at
//! any time.

/// The default number of sites (positions) displayed in one row.
pub const DEFAULT_SITES_PER_ROW: usize = 50;

/// An error related to chunking.
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// The chunk size was zero.
    ZeroSize,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ZeroSize => write!(f, "chunk size must be greater than zero"),
        }
    }
}

impl std::error::Error for Error {}

/// An iterator over consecutive, non-overlapping, non-empty chunks of a
/// slice.
///
/// Every chunk has exactly `size` elements except (possibly) the last one,
/// which holds the remainder.
#[derive(Clone, Debug)]
pub struct Chunks<'a, T> {
    /// The elements not yet handed out.
    remaining: &'a [T],
    /// The maximum number of elements in a chunk.
    size: usize,
}

impl<'a, T> Chunks<'a, T> {
    /// Gets the maximum number of elements in a chunk.
    pub fn size(&self) -> usize {
        self.size
    }
}

impl<'a, T> Iterator for Chunks<'a, T> {
    type Item = &'a [T];

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining.is_empty() {
            return None;
        }

        let at = self.size.min(self.remaining.len());
        let (chunk, rest) = self.remaining.split_at(at);
        self.remaining = rest;

        Some(chunk)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining.len().div_ceil(self.size);
        (n, Some(n))
    }
}

impl<T> ExactSizeIterator for Chunks<'_, T> {}

/// Splits `items` into chunks of `size` elements.
///
/// # Examples
///
/// ```
/// use prevalence::chunk::chunk;
///
/// let items = [1, 2, 3, 4, 5, 6, 7];
/// let chunks = chunk(&items, 3)?.collect::<Vec<_>>();
///
/// assert_eq!(chunks, vec![&[1, 2, 3][..], &[4, 5, 6][..], &[7][..]]);
///
/// // A size of zero is rejected rather than looping forever.
/// assert!(chunk(&items, 0).is_err());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn chunk<T>(items: &[T], size: usize) -> Result<Chunks<'_, T>, Error> {
    if size == 0 {
        return Err(Error::ZeroSize);
    }

    Ok(Chunks {
        remaining: items,
        size,
    })
}
