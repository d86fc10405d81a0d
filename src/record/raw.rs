//! A raw prevalence row as it appears in an uploaded data file.

use serde::Deserialize;

/// A raw prevalence row.
///
/// Every field is optional here so that an incomplete row can be reported
/// with the name of the missing field rather than as an opaque
/// deserialization failure. Note that `percent` is a fraction between `0`
/// and `1` at this stage.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct RawRecord {
    /// The gene.
    pub gene: Option<String>,
    /// The subtype.
    pub subtype: Option<String>,
    /// The treatment stratum.
    pub rx_type: Option<String>,
    /// The 1-based position.
    pub position: Option<i64>,
    /// The amino acid.
    pub aa: Option<String>,
    /// The number of sequences with coverage at the position.
    pub total: Option<usize>,
    /// The number of sequences carrying the amino acid.
    pub count: Option<usize>,
    /// The fraction of sequences carrying the amino acid.
    pub percent: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_complete_row() -> Result<(), Box<dyn std::error::Error>> {
        let row: RawRecord = serde_json::from_str(
            r#"{"gene": "CA", "subtype": "B", "rx_type": "all", "position": 10,
                "aa": "A", "total": 200, "count": 100, "percent": 0.5}"#,
        )?;

        assert_eq!(row.gene.as_deref(), Some("CA"));
        assert_eq!(row.rx_type.as_deref(), Some("all"));
        assert_eq!(row.position, Some(10));
        assert_eq!(row.aa.as_deref(), Some("A"));
        assert_eq!(row.percent, Some(0.5));
        Ok(())
    }

    #[test]
    fn test_deserialize_partial_row() -> Result<(), Box<dyn std::error::Error>> {
        let row: RawRecord = serde_json::from_str(r#"{"gene": "CA", "extra": true}"#)?;
        assert_eq!(row.gene.as_deref(), Some("CA"));
        assert!(row.position.is_none());
        assert!(row.percent.is_none());
        Ok(())
    }
}
