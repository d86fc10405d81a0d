//! Selection of the prevalence records belonging to one stratum.
//!
//! Two distinct passes are provided over the same stratum selection:
//!
//! - [`Filter::retain()`] keeps the records that are displayed in the grid.
//!   Records at or above the minimum percent are kept, except for unknown
//!   (`X`) and stop (`*`) codes.
//! - [`Filter::indels()`] collects the positions carrying an insertion (`_`)
//!   or a deletion (`-`) strictly above the minimum percent.

use std::collections::BTreeSet;

use tracing::debug;

use crate::core::Position;
use crate::record::PrevalenceRecord;

/// The default minimum percent for a record to be retained.
pub const DEFAULT_MIN_PERCENT: f64 = 0.1;

/// The default treatment stratum.
pub const DEFAULT_RX_TYPE: &str = "all";

/// Amino acid codes that are never displayed (unknown and stop).
pub const EXCLUDED_CODES: [&str; 2] = ["X", "*"];

/// Amino acid codes denoting an insertion or a deletion.
pub const INDEL_CODES: [&str; 2] = ["_", "-"];

/// A selection of records by gene, subtype, and treatment stratum plus a
/// minimum percent.
#[derive(Clone, Debug, PartialEq)]
pub struct Filter {
    /// The required gene.
    gene: String,
    /// The required subtype.
    subtype: String,
    /// The required treatment stratum.
    rx_type: String,
    /// The minimum percent.
    min_percent: f64,
}

impl Filter {
    /// Creates a new [`Filter`].
    ///
    /// # Examples
    ///
    /// ```
    /// use prevalence::Filter;
    ///
    /// let filter = Filter::new("CA", "B", "all", 0.1);
    /// assert_eq!(filter.gene(), "CA");
    /// ```
    pub fn new(
        gene: impl Into<String>,
        subtype: impl Into<String>,
        rx_type: impl Into<String>,
        min_percent: f64,
    ) -> Self {
        Self {
            gene: gene.into(),
            subtype: subtype.into(),
            rx_type: rx_type.into(),
            min_percent,
        }
    }

    /// Gets the required gene.
    pub fn gene(&self) -> &str {
        &self.gene
    }

    /// Gets the required subtype.
    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    /// Gets the required treatment stratum.
    pub fn rx_type(&self) -> &str {
        &self.rx_type
    }

    /// Gets the minimum percent.
    pub fn min_percent(&self) -> f64 {
        self.min_percent
    }

    /// Whether a record belongs to the selected stratum.
    fn selects(&self, record: &PrevalenceRecord) -> bool {
        record.gene() == self.gene
            && record.subtype() == self.subtype
            && record.rx_type() == self.rx_type
    }

    /// Keeps the records of the stratum at or above the minimum percent,
    /// excluding unknown and stop codes. Input order is preserved.
    pub fn retain<'a, I>(&self, records: I) -> Vec<&'a PrevalenceRecord>
    where
        I: IntoIterator<Item = &'a PrevalenceRecord>,
    {
        let retained = records
            .into_iter()
            .filter(|record| {
                self.selects(record)
                    && record.percent() >= self.min_percent
                    && !EXCLUDED_CODES.contains(&record.amino_acid())
            })
            .collect::<Vec<_>>();

        debug!(
            "retained {} records for {}/{}/{}",
            retained.len(),
            self.gene,
            self.subtype,
            self.rx_type
        );

        retained
    }

    /// Collects the distinct positions where an insertion or deletion of the
    /// stratum is strictly above the minimum percent.
    pub fn indels<'a, I>(&self, records: I) -> BTreeSet<Position>
    where
        I: IntoIterator<Item = &'a PrevalenceRecord>,
    {
        records
            .into_iter()
            .filter(|record| {
                self.selects(record)
                    && record.percent() > self.min_percent
                    && INDEL_CODES.contains(&record.amino_acid())
            })
            .map(|record| record.position())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::prevalence::normalize;
    use crate::record::prevalence::tests::raw;

    #[test]
    fn test_retain_matching_stratum() -> Result<(), Box<dyn std::error::Error>> {
        let mut other_rx = raw("X", "B", 10, "G", 0.3);
        other_rx.rx_type = Some(String::from("naive"));

        let records = normalize(vec![
            raw("X", "B", 10, "A", 0.5),
            raw("X", "C", 10, "A", 0.5),
            raw("Y", "B", 10, "A", 0.5),
            other_rx,
            raw("X", "B", 10, "C", 0.2),
        ])?;

        let filter = Filter::new("X", "B", DEFAULT_RX_TYPE, DEFAULT_MIN_PERCENT);
        let retained = filter.retain(&records);

        assert_eq!(retained.len(), 2);
        assert_eq!(retained[0].amino_acid(), "A");
        assert_eq!(retained[1].amino_acid(), "C");
        Ok(())
    }

    #[test]
    fn test_retain_threshold_is_inclusive() -> Result<(), Box<dyn std::error::Error>> {
        let records = normalize(vec![
            raw("X", "B", 1, "A", 0.001),
            raw("X", "B", 1, "C", 0.0009),
        ])?;

        let filter = Filter::new("X", "B", "all", records[0].percent());
        let retained = filter.retain(&records);

        assert_eq!(retained.len(), 1);
        assert_eq!(retained[0].amino_acid(), "A");
        Ok(())
    }

    #[test]
    fn test_retain_excludes_unknown_and_stop() -> Result<(), Box<dyn std::error::Error>> {
        let records = normalize(vec![
            raw("X", "B", 4, "X", 0.5),
            raw("X", "B", 4, "*", 0.5),
            raw("X", "B", 4, "_", 0.5),
            raw("X", "B", 4, "K", 0.5),
        ])?;

        let filter = Filter::new("X", "B", "all", 0.1);
        let codes = filter
            .retain(&records)
            .into_iter()
            .map(|record| record.amino_acid())
            .collect::<Vec<_>>();

        assert_eq!(codes, vec!["_", "K"]);
        Ok(())
    }

    #[test]
    fn test_indels() -> Result<(), Box<dyn std::error::Error>> {
        let records = normalize(vec![
            raw("X", "B", 30, "_", 0.2),
            raw("X", "B", 7, "-", 0.2),
            raw("X", "B", 7, "_", 0.5),
            raw("X", "B", 12, "-", 0.001),
            raw("X", "B", 15, "A", 0.9),
            raw("Y", "B", 16, "-", 0.9),
        ])?;

        // The indel pass is strictly greater than the threshold.
        let filter = Filter::new("X", "B", "all", records[3].percent());
        let positions = filter
            .indels(&records)
            .into_iter()
            .map(|position| position.get())
            .collect::<Vec<_>>();

        assert_eq!(positions, vec![7, 30]);
        Ok(())
    }
}
