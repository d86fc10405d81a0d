//! A normalized prevalence record.

use serde::Serialize;
use tracing::trace;

use crate::core::position;
use crate::core::Position;
use crate::record::RawRecord;

/// An error related to normalizing a [`RawRecord`].
///
/// Each variant carries the 0-based index of the offending row.
#[derive(Debug, PartialEq)]
pub enum Error {
    /// A required field was absent.
    MissingField {
        /// The index of the row.
        index: usize,
        /// The name of the missing field.
        field: &'static str,
    },
    /// The position was not a valid 1-based position.
    InvalidPosition {
        /// The index of the row.
        index: usize,
        /// The underlying position error.
        source: position::Error,
    },
    /// The percent was not a fraction between zero and one.
    PercentOutOfRange {
        /// The index of the row.
        index: usize,
        /// The percent found.
        percent: f64,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MissingField { index, field } => {
                write!(f, "row {index}: missing required field `{field}`")
            }
            Error::InvalidPosition { index, source } => {
                write!(f, "row {index}: invalid field `position`: {source}")
            }
            Error::PercentOutOfRange { index, percent } => write!(
                f,
                "row {index}: invalid field `percent`: expected a fraction between 0 and 1, found \
                 {percent}"
            ),
        }
    }
}

impl std::error::Error for Error {}

/// A prevalence record with all fields present and `percent` scaled to the
/// range `[0, 100]`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrevalenceRecord {
    /// The gene.
    gene: String,
    /// The subtype.
    subtype: String,
    /// The treatment stratum.
    rx_type: String,
    /// The position.
    position: Position,
    /// The amino acid.
    amino_acid: String,
    /// The number of sequences with coverage at the position.
    total: usize,
    /// The number of sequences carrying the amino acid.
    count: usize,
    /// The percentage of sequences carrying the amino acid.
    percent: f64,
}

/// Pulls a required field out of a raw row.
fn required<T>(value: Option<T>, index: usize, field: &'static str) -> Result<T, Error> {
    value.ok_or(Error::MissingField { index, field })
}

impl PrevalenceRecord {
    /// Attempts to normalize a [`RawRecord`] found at row `index`.
    ///
    /// # Examples
    ///
    /// ```
    /// use prevalence::record::PrevalenceRecord;
    /// use prevalence::record::RawRecord;
    ///
    /// let raw = RawRecord {
    ///     gene: Some(String::from("CA")),
    ///     subtype: Some(String::from("B")),
    ///     rx_type: Some(String::from("all")),
    ///     position: Some(1),
    ///     aa: Some(String::from("P")),
    ///     total: Some(100),
    ///     count: Some(25),
    ///     percent: Some(0.25),
    /// };
    ///
    /// let record = PrevalenceRecord::try_from_raw(raw, 0)?;
    /// assert_eq!(record.percent(), 25.0);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_from_raw(raw: RawRecord, index: usize) -> Result<Self, Error> {
        let position = required(raw.position, index, "position")?;
        let position = Position::try_from(position)
            .map_err(|source| Error::InvalidPosition { index, source })?;

        let percent = required(raw.percent, index, "percent")?;
        if !(0.0..=1.0).contains(&percent) {
            return Err(Error::PercentOutOfRange { index, percent });
        }

        Ok(Self {
            gene: required(raw.gene, index, "gene")?,
            subtype: required(raw.subtype, index, "subtype")?,
            rx_type: required(raw.rx_type, index, "rx_type")?,
            position,
            amino_acid: required(raw.aa, index, "aa")?,
            total: required(raw.total, index, "total")?,
            count: required(raw.count, index, "count")?,
            percent: percent * 100.0,
        })
    }

    /// Gets the gene.
    pub fn gene(&self) -> &str {
        &self.gene
    }

    /// Gets the subtype.
    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    /// Gets the treatment stratum.
    pub fn rx_type(&self) -> &str {
        &self.rx_type
    }

    /// Gets the position.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Gets the amino acid.
    pub fn amino_acid(&self) -> &str {
        &self.amino_acid
    }

    /// Gets the number of sequences with coverage at the position.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Gets the number of sequences carrying the amino acid.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Gets the percentage (`0` to `100`) of sequences carrying the amino
    /// acid.
    pub fn percent(&self) -> f64 {
        self.percent
    }
}

/// Normalizes every raw row, failing on the first malformed one.
pub fn normalize<I>(rows: I) -> Result<Vec<PrevalenceRecord>, Error>
where
    I: IntoIterator<Item = RawRecord>,
{
    let records = rows
        .into_iter()
        .enumerate()
        .map(|(index, raw)| PrevalenceRecord::try_from_raw(raw, index))
        .collect::<Result<Vec<_>, _>>()?;

    trace!("normalized {} records", records.len());
    Ok(records)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Builds a complete raw row for tests.
    pub(crate) fn raw(
        gene: &str,
        subtype: &str,
        position: i64,
        aa: &str,
        fraction: f64,
    ) -> RawRecord {
        RawRecord {
            gene: Some(gene.into()),
            subtype: Some(subtype.into()),
            rx_type: Some(String::from("all")),
            position: Some(position),
            aa: Some(aa.into()),
            total: Some(1000),
            count: Some((fraction * 1000.0) as usize),
            percent: Some(fraction),
        }
    }

    #[test]
    fn test_normalize_scales_percent() -> Result<(), Box<dyn std::error::Error>> {
        let records = normalize(vec![raw("X", "B", 10, "A", 0.5), raw("X", "B", 10, "C", 0.2)])?;

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].percent(), 50.0);
        assert_eq!(records[0].amino_acid(), "A");
        assert_eq!(records[0].rx_type(), "all");
        assert_eq!(records[1].position().get(), 10);
        assert!((records[1].percent() - 20.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_missing_field_is_named() {
        let mut row = raw("X", "B", 10, "A", 0.5);
        row.aa = None;

        let err = normalize(vec![raw("X", "B", 9, "A", 0.5), row]).unwrap_err();
        assert_eq!(
            err,
            Error::MissingField {
                index: 1,
                field: "aa"
            }
        );
        assert_eq!(err.to_string(), "row 1: missing required field `aa`");
    }

    #[test]
    fn test_invalid_position() {
        let err = normalize(vec![raw("X", "B", 0, "A", 0.5)]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "row 0: invalid field `position`: positions are 1-based, so zero is not a valid \
             position"
        );
    }

    #[test]
    fn test_already_scaled_percent_is_rejected() {
        let err = normalize(vec![raw("X", "B", 3, "A", 50.0)]).unwrap_err();
        assert_eq!(
            err,
            Error::PercentOutOfRange {
                index: 0,
                percent: 50.0
            }
        );
    }
}
