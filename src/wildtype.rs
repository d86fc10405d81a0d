//! The wild-type (consensus) sequence used to flag mutations.

use std::convert::Infallible;
use std::str::FromStr;

use crate::core::Position;

/// The prefix of an optional FASTA-style header line.
pub const HEADER_PREFIX: char = '>';

/// A wild-type amino acid sequence.
///
/// Residues are stored in order, so the residue at [`Position`] `n` is found
/// at index `n - 1`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct WildType(Vec<char>);

impl WildType {
    /// Gets the residue at the given position, if the sequence is long
    /// enough.
    ///
    /// # Examples
    ///
    /// ```
    /// use prevalence::core::Position;
    /// use prevalence::WildType;
    ///
    /// let wild_type = ">consensus\nMEPVDPRLEP\nWKHPGSQ".parse::<WildType>()?;
    ///
    /// assert_eq!(wild_type.residue(Position::try_new(1)?), Some('M'));
    /// assert_eq!(wild_type.residue(Position::try_new(11)?), Some('W'));
    /// assert_eq!(wild_type.residue(Position::try_new(100)?), None);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn residue(&self, position: Position) -> Option<char> {
        self.0.get(position.index()).copied()
    }

    /// Indicates whether `amino_acid` is the wild-type residue at `position`.
    ///
    /// Amino acids that are not exactly one character long never match.
    pub fn matches(&self, position: Position, amino_acid: &str) -> bool {
        let mut chars = amino_acid.chars();

        match (chars.next(), chars.next()) {
            (Some(aa), None) => self.residue(position) == Some(aa),
            _ => false,
        }
    }

    /// Gets the number of residues in the sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Indicates whether the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for WildType {
    type Err = Infallible;

    /// Parses a wild-type sequence, dropping a leading header line (one that
    /// starts with `>`) and any whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim_start();

        let body = match s.strip_prefix(HEADER_PREFIX) {
            Some(rest) => rest.split_once('\n').map(|(_, body)| body).unwrap_or(""),
            None => s,
        };

        Ok(Self(body.chars().filter(|c| !c.is_whitespace()).collect()))
    }
}

impl std::fmt::Display for WildType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().collect::<String>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_sequence() -> Result<(), Box<dyn std::error::Error>> {
        let wild_type = "MEPVDPRLEPWKHPGSQ\n".parse::<WildType>()?;
        assert_eq!(wild_type.len(), 17);
        assert!(wild_type.matches(Position::try_new(1)?, "M"));
        assert!(!wild_type.matches(Position::try_new(1)?, "E"));
        Ok(())
    }

    #[test]
    fn test_header_is_stripped() -> Result<(), Box<dyn std::error::Error>> {
        let wild_type = ">HXB2 capsid\r\nPIVQN\r\nLQGQM\r\n".parse::<WildType>()?;
        assert_eq!(wild_type.to_string(), "PIVQNLQGQM");
        Ok(())
    }

    #[test]
    fn test_header_only() -> Result<(), Box<dyn std::error::Error>> {
        let wild_type = ">nothing here".parse::<WildType>()?;
        assert!(wild_type.is_empty());
        Ok(())
    }

    #[test]
    fn test_multi_character_codes_never_match() -> Result<(), Box<dyn std::error::Error>> {
        let wild_type = "MEPV".parse::<WildType>()?;
        assert!(!wild_type.matches(Position::try_new(1)?, "ME"));
        assert!(!wild_type.matches(Position::try_new(1)?, ""));
        assert!(!wild_type.matches(Position::try_new(9)?, "M"));
        Ok(())
    }
}
