//! Layout of categorized single positions onto a row.
//!
//! Special positions flag individual residues (for example, drug resistance
//! sites or binding pocket residues). Each category is a named set of
//! positions, and categories are kept in insertion order.
//!
//! A category is parsed from a string of the form
//! `<name>=<position>[,<position>...]` (e.g., `lena_resist=56,66,67`).

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::core::position;
use crate::core::Position;
use crate::core::Positioned;
use crate::overlay::check_sites_per_row;
use crate::overlay::layout;
use crate::overlay::Mark;
use crate::overlay::Result;
use crate::overlay::Segment;
use crate::overlay::Span;

/// The pattern that a category string must match.
static CATEGORY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    // SAFETY: the pattern is a valid regular expression.
    Regex::new(r"^\s*([^=\s]+)\s*=\s*(\d+(?:\s*,\s*\d+)*)?\s*$").unwrap()
});

/// An error related to parsing a [`Category`].
#[derive(Debug, Eq, PartialEq)]
pub enum ParseError {
    /// The value did not look like a category.
    Invalid(String),
    /// One of the positions was invalid.
    InvalidPosition(position::Error),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Invalid(value) => {
                write!(f, "could not parse category from the value: {value}")
            }
            ParseError::InvalidPosition(err) => write!(f, "invalid position: {err}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// A named set of special positions.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Category {
    /// The name of the category.
    name: String,
    /// The positions in the category.
    positions: Vec<Position>,
}

impl Category {
    /// Creates a new [`Category`].
    pub fn new(name: impl Into<String>, positions: Vec<Position>) -> Self {
        Self {
            name: name.into(),
            positions,
        }
    }

    /// Gets the name of the category.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the positions in the category.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }
}

impl FromStr for Category {
    type Err = ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let captures = CATEGORY_REGEX
            .captures(s)
            .ok_or_else(|| ParseError::Invalid(s.to_string()))?;

        // SAFETY: group one is not optional in the pattern.
        let name = captures.get(1).unwrap().as_str();

        let positions = match captures.get(2) {
            Some(list) => list
                .as_str()
                .split(',')
                .map(|value| value.parse::<Position>())
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(ParseError::InvalidPosition)?,
            None => Vec::new(),
        };

        Ok(Category::new(name, positions))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let positions = self
            .positions
            .iter()
            .map(|position| position.to_string())
            .collect::<Vec<_>>();

        write!(f, "{}={}", self.name, positions.join(","))
    }
}

/// Categories of special positions, in insertion order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Categories(Vec<Category>);

impl Categories {
    /// Adds a category. If a category with the same name already exists, the
    /// positions are appended to it.
    pub fn push(&mut self, category: Category) {
        match self.0.iter_mut().find(|c| c.name == category.name) {
            Some(existing) => existing.positions.extend(category.positions),
            None => self.0.push(category),
        }
    }

    /// Gets an iterator over the categories.
    pub fn iter(&self) -> std::slice::Iter<'_, Category> {
        self.0.iter()
    }

    /// Whether there are no categories.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Flattens the categories into `(position, category name)` pairs sorted
    /// by position.
    ///
    /// The sort is stable: pairs at the same position keep category insertion
    /// order. Positions shared between categories are left as they are.
    pub fn flatten(&self) -> Vec<(Position, &str)> {
        let mut points = self
            .0
            .iter()
            .flat_map(|category| {
                category
                    .positions
                    .iter()
                    .map(move |position| (*position, category.name()))
            })
            .collect::<Vec<_>>();

        points.sort_by_key(|(position, _)| *position);
        points
    }
}

impl FromIterator<Category> for Categories {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        let mut categories = Categories::default();

        for category in iter {
            categories.push(category);
        }

        categories
    }
}

/// Lays out special positions onto a chunk.
///
/// Every position within the chunk's span is drawn as a label one site wide,
/// carrying its category name, preceded by a gap when it does not directly
/// follow the previous mark. Positions outside the span are skipped.
///
/// # Examples
///
/// ```
/// use prevalence::core::Position;
/// use prevalence::overlay::map_points;
/// use prevalence::overlay::Categories;
/// use prevalence::overlay::Category;
///
/// let chunk = (51..=100)
///     .map(Position::try_new)
///     .collect::<Result<Vec<_>, _>>()?;
/// let categories = ["lena_resist=66,67", "hla_pos=120"]
///     .into_iter()
///     .map(|s| s.parse::<Category>())
///     .collect::<Result<Categories, _>>()?;
///
/// let segments = map_points(&chunk, 50, &categories)?;
///
/// let labels = segments.iter().filter_map(|s| s.label()).collect::<Vec<_>>();
/// assert_eq!(labels, vec!["lena_resist", "lena_resist"]);
/// assert_eq!(segments.len(), 3);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn map_points<T: Positioned>(
    chunk: &[T],
    sites_per_row: usize,
    categories: &Categories,
) -> Result<Vec<Segment>> {
    check_sites_per_row(sites_per_row)?;

    let span = match Span::of(chunk) {
        Some(span) => span,
        None => return Ok(Vec::new()),
    };

    let points = categories.flatten();
    let marks = points
        .iter()
        .filter(|(position, _)| span.contains(*position))
        .map(|(position, category)| Mark {
            begin: *position,
            end: *position,
            label: category,
        });

    Ok(layout(span, sites_per_row, marks))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::Error;

    fn positions(values: impl IntoIterator<Item = usize>) -> Vec<Position> {
        values
            .into_iter()
            .map(|value| Position::try_new(value).unwrap())
            .collect()
    }

    fn categories(specs: &[&str]) -> Categories {
        specs
            .iter()
            .map(|spec| spec.parse::<Category>().unwrap())
            .collect()
    }

    fn widths(segments: &[Segment]) -> Vec<f64> {
        segments
            .iter()
            .map(|segment| (segment.width() * 1e6).round() / 1e6)
            .collect()
    }

    #[test]
    fn test_parse_category() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let category = "lena_pocket = 56, 57,70".parse::<Category>()?;
        assert_eq!(category.name(), "lena_pocket");
        assert_eq!(
            category
                .positions()
                .iter()
                .map(|p| p.get())
                .collect::<Vec<_>>(),
            vec![56, 57, 70]
        );
        assert_eq!(category.to_string(), "lena_pocket=56,57,70");

        let empty = "hla_pos=".parse::<Category>()?;
        assert!(empty.positions().is_empty());

        assert!("56,57".parse::<Category>().is_err());
        assert_eq!(
            "hla_pos=0".parse::<Category>().unwrap_err(),
            ParseError::InvalidPosition(position::Error::Zero)
        );
        Ok(())
    }

    #[test]
    fn test_flatten_is_sorted_and_stable() {
        let categories = categories(&["lena_resist=70,56", "lena_pocket=56,60", "hla_pos=3"]);

        let flattened = categories
            .flatten()
            .into_iter()
            .map(|(position, name)| (position.get(), name))
            .collect::<Vec<_>>();

        assert_eq!(
            flattened,
            vec![
                (3, "hla_pos"),
                (56, "lena_resist"),
                (56, "lena_pocket"),
                (60, "lena_pocket"),
                (70, "lena_resist"),
            ]
        );
    }

    #[test]
    fn test_push_merges_same_name() {
        let categories = categories(&["a=1", "b=2", "a=3"]);
        let names = categories.iter().map(|c| c.name()).collect::<Vec<_>>();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(categories.iter().next().unwrap().positions().len(), 2);
    }

    #[test]
    fn test_points_within_row() -> Result<()> {
        let categories = categories(&["lena_resist=56,66,67", "hla_pos=52,110"]);

        let row = positions(51..=100);
        let segments = map_points(&row, 50, &categories)?;

        // 52: gap of one site, then the mark; 56: gap of three sites; 66, 67:
        // gap of nine sites, then two adjacent marks with no gap between them.
        assert_eq!(
            widths(&segments),
            vec![2.0, 2.0, 6.0, 2.0, 18.0, 2.0, 2.0]
        );

        let labels = segments.iter().filter_map(|s| s.label()).collect::<Vec<_>>();
        assert_eq!(
            labels,
            vec!["hla_pos", "lena_resist", "lena_resist", "lena_resist"]
        );
        Ok(())
    }

    #[test]
    fn test_points_outside_are_skipped() -> Result<()> {
        let categories = categories(&["a=1,50,51"]);

        let row = positions(1..=50);
        let segments = map_points(&row, 50, &categories)?;

        assert_eq!(widths(&segments), vec![2.0, 96.0, 2.0]);
        let total = segments.iter().map(Segment::width).sum::<f64>();
        assert!((total - 100.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_no_points() -> Result<()> {
        let row = positions(1..=50);
        assert!(map_points(&row, 50, &Categories::default())?.is_empty());

        let row: Vec<Position> = Vec::new();
        assert!(map_points(&row, 50, &categories(&["a=1"]))?.is_empty());
        Ok(())
    }

    #[test]
    fn test_zero_sites_per_row() {
        let row = positions(1..=5);
        let err = map_points(&row, 0, &categories(&["a=1"])).unwrap_err();
        assert_eq!(err, Error::ZeroSitesPerRow);
    }
}
