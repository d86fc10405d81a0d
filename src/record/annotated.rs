//! A prevalence record annotated against the wild-type sequence.

use serde::Serialize;

use crate::core::Position;
use crate::record::PrevalenceRecord;
use crate::WildType;

/// The coarse prevalence bucket that a presentation layer keys its shading
/// on.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PercentLevel {
    /// At least 90%.
    Ninety,
    /// At least 10%.
    Ten,
    /// At least 1%.
    One,
    /// At least 0.1%.
    Tenth,
    /// Below 0.1%.
    Trace,
}

impl PercentLevel {
    /// Buckets a percentage.
    ///
    /// # Examples
    ///
    /// ```
    /// use prevalence::record::PercentLevel;
    ///
    /// assert_eq!(PercentLevel::from_percent(99.1), PercentLevel::Ninety);
    /// assert_eq!(PercentLevel::from_percent(10.0), PercentLevel::Ten);
    /// assert_eq!(PercentLevel::from_percent(0.05), PercentLevel::Trace);
    /// ```
    pub fn from_percent(percent: f64) -> Self {
        match percent {
            p if p >= 90.0 => PercentLevel::Ninety,
            p if p >= 10.0 => PercentLevel::Ten,
            p if p >= 1.0 => PercentLevel::One,
            p if p >= 0.1 => PercentLevel::Tenth,
            _ => PercentLevel::Trace,
        }
    }

    /// Gets the lower bound of the bucket.
    pub fn threshold(&self) -> f64 {
        match self {
            PercentLevel::Ninety => 90.0,
            PercentLevel::Ten => 10.0,
            PercentLevel::One => 1.0,
            PercentLevel::Tenth => 0.1,
            PercentLevel::Trace => 0.0,
        }
    }
}

/// Rounds a percentage for display: values above one are rounded to the
/// nearest integer, everything else to one decimal place.
///
/// # Examples
///
/// ```
/// use prevalence::record::annotated::round_percent;
///
/// assert_eq!(round_percent(42.6), 43.0);
/// assert_eq!(round_percent(0.46), 0.5);
/// assert_eq!(round_percent(1.0), 1.0);
/// ```
pub fn round_percent(percent: f64) -> f64 {
    if percent > 1.0 {
        percent.round()
    } else {
        (percent * 10.0).round() / 10.0
    }
}

/// A [`PrevalenceRecord`] along with whether its amino acid is the wild-type
/// residue at its position.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedRecord {
    /// The underlying record.
    #[serde(flatten)]
    record: PrevalenceRecord,
    /// Whether the amino acid is the wild-type residue.
    is_wild_type: bool,
}

impl AnnotatedRecord {
    /// Annotates a record against `wild_type`.
    ///
    /// A position beyond the end of the wild-type sequence is never flagged
    /// as wild type.
    pub fn new(record: PrevalenceRecord, wild_type: &WildType) -> Self {
        let is_wild_type = wild_type.matches(record.position(), record.amino_acid());

        Self {
            record,
            is_wild_type,
        }
    }

    /// Gets the underlying record.
    pub fn record(&self) -> &PrevalenceRecord {
        &self.record
    }

    /// Gets the position.
    pub fn position(&self) -> Position {
        self.record.position()
    }

    /// Gets the amino acid.
    pub fn amino_acid(&self) -> &str {
        self.record.amino_acid()
    }

    /// Gets the percentage of sequences carrying the amino acid.
    pub fn percent(&self) -> f64 {
        self.record.percent()
    }

    /// Gets the number of sequences with coverage at the position.
    pub fn total(&self) -> usize {
        self.record.total()
    }

    /// Whether the amino acid is the wild-type residue at the position.
    pub fn is_wild_type(&self) -> bool {
        self.is_wild_type
    }

    /// Gets the prevalence bucket of this record.
    pub fn level(&self) -> PercentLevel {
        PercentLevel::from_percent(self.percent())
    }

    /// Gets the percentage rounded for display.
    pub fn rounded_percent(&self) -> f64 {
        round_percent(self.percent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::prevalence::tests::raw;

    #[test]
    fn test_wild_type_flag() -> Result<(), Box<dyn std::error::Error>> {
        let wild_type = "MEPVDPRLEPWKHPGSQ".parse::<WildType>()?;

        let record = PrevalenceRecord::try_from_raw(raw("X", "B", 1, "M", 0.98), 0)?;
        let annotated = AnnotatedRecord::new(record, &wild_type);
        assert!(annotated.is_wild_type());
        assert_eq!(annotated.level(), PercentLevel::Ninety);
        assert_eq!(annotated.rounded_percent(), 98.0);

        let record = PrevalenceRecord::try_from_raw(raw("X", "B", 2, "A", 0.004), 1)?;
        let annotated = AnnotatedRecord::new(record, &wild_type);
        assert!(!annotated.is_wild_type());
        assert_eq!(annotated.level(), PercentLevel::Tenth);
        assert_eq!(annotated.rounded_percent(), 0.4);

        Ok(())
    }

    #[test]
    fn test_missing_wild_type() -> Result<(), Box<dyn std::error::Error>> {
        let record = PrevalenceRecord::try_from_raw(raw("X", "B", 1, "M", 0.98), 0)?;
        let annotated = AnnotatedRecord::new(record, &WildType::default());
        assert!(!annotated.is_wild_type());
        Ok(())
    }

    #[test]
    fn test_levels() {
        assert_eq!(PercentLevel::from_percent(90.0), PercentLevel::Ninety);
        assert_eq!(PercentLevel::from_percent(89.9), PercentLevel::Ten);
        assert_eq!(PercentLevel::from_percent(1.0), PercentLevel::One);
        assert_eq!(PercentLevel::from_percent(0.1), PercentLevel::Tenth);
        assert_eq!(PercentLevel::from_percent(0.0), PercentLevel::Trace);
        assert_eq!(PercentLevel::Tenth.threshold(), 0.1);
    }
}
