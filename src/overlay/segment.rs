//! A horizontal segment of an overlay track.

use serde::Serialize;

/// One piece of an overlay track, sized as a percentage of the row width.
///
/// A track is read left to right: [`Segment::Gap`]s are blank space and
/// [`Segment::Label`]s mark a domain (or a special position). The label
/// doubles as the key a presentation layer uses to pick a style.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Segment {
    /// Blank space.
    Gap {
        /// The width as a percentage of the row.
        width: f64,
    },
    /// A labeled mark.
    Label {
        /// The width as a percentage of the row.
        width: f64,
        /// The label.
        label: String,
    },
}

impl Segment {
    /// Gets the width of the segment as a percentage of the row.
    pub fn width(&self) -> f64 {
        match self {
            Segment::Gap { width } => *width,
            Segment::Label { width, .. } => *width,
        }
    }

    /// Gets the label of the segment, if it has one.
    pub fn label(&self) -> Option<&str> {
        match self {
            Segment::Gap { .. } => None,
            Segment::Label { label, .. } => Some(label),
        }
    }

    /// Whether the segment is blank space.
    pub fn is_gap(&self) -> bool {
        matches!(self, Segment::Gap { .. })
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Segment::Gap { width } => write!(f, "[{width:.1}%]"),
            Segment::Label { width, label } => write!(f, "{label} ({width:.1}%)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let gap = Segment::Gap { width: 68.0 };
        assert!(gap.is_gap());
        assert_eq!(gap.width(), 68.0);
        assert_eq!(gap.label(), None);

        let label = Segment::Label {
            width: 18.0,
            label: String::from("CypA"),
        };
        assert!(!label.is_gap());
        assert_eq!(label.label(), Some("CypA"));
        assert_eq!(label.to_string(), "CypA (18.0%)");
    }

    #[test]
    fn test_serialize() -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string(&Segment::Label {
            width: 2.0,
            label: String::from("hla_pos"),
        })?;
        assert_eq!(json, r#"{"kind":"label","width":2.0,"label":"hla_pos"}"#);
        Ok(())
    }
}
