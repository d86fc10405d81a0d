//! The end-to-end transformation from raw prevalence rows to a render-ready
//! view.
//!
//! A [`Pipeline`] cannot be instantiated directly. Instead, you should use
//! [`Builder`] and the associated [`Builder::try_build()`] method, which
//! validates the configuration before any data is touched.
//!
//! Every run is a pure function of its inputs: nothing is cached between
//! runs, and running twice on the same inputs yields equal views. If any
//! stage fails, the whole run fails and no partial view is returned.

use serde::Serialize;
use tracing::debug;

use crate::chunk;
use crate::core::Interval;
use crate::core::Position;
use crate::group::group;
use crate::group::PositionGroup;
use crate::overlay;
use crate::overlay::map_domains;
use crate::overlay::map_points;
use crate::overlay::Categories;
use crate::overlay::Segment;
use crate::overlay::Span;
use crate::record::prevalence;
use crate::record::AnnotatedRecord;
use crate::record::PrevalenceRecord;
use crate::record::RawRecord;
use crate::Filter;
use crate::WildType;

pub mod builder;

pub use builder::Builder;

/// An error related to running a [`Pipeline`].
#[derive(Debug, PartialEq)]
pub enum Error {
    /// The configuration was invalid.
    InvalidConfiguration(builder::Error),
    /// A raw row was malformed.
    MalformedRecord(prevalence::Error),
    /// The groups could not be chunked into rows.
    Chunk(chunk::Error),
    /// An overlay could not be laid out.
    Overlay(overlay::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidConfiguration(err) => write!(f, "invalid configuration: {err}"),
            Error::MalformedRecord(err) => write!(f, "malformed record: {err}"),
            Error::Chunk(err) => write!(f, "chunk error: {err}"),
            Error::Overlay(err) => write!(f, "overlay error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<builder::Error> for Error {
    fn from(err: builder::Error) -> Self {
        Error::InvalidConfiguration(err)
    }
}

/// A [`Result`](std::result::Result) with an [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// One rendered row: a chunk of positions and its overlay tracks.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Row {
    /// The smallest position in the row.
    start: Position,
    /// The largest position in the row.
    stop: Position,
    /// The positions in the row.
    groups: Vec<PositionGroup>,
    /// The structural domain track.
    structural: Vec<Segment>,
    /// The functional domain track.
    functional: Vec<Segment>,
    /// The special position track.
    special: Vec<Segment>,
}

impl Row {
    /// Gets the smallest position in the row.
    pub fn start(&self) -> Position {
        self.start
    }

    /// Gets the largest position in the row.
    pub fn stop(&self) -> Position {
        self.stop
    }

    /// Gets the positions in the row.
    pub fn groups(&self) -> &[PositionGroup] {
        &self.groups
    }

    /// Gets the structural domain track.
    pub fn structural(&self) -> &[Segment] {
        &self.structural
    }

    /// Gets the functional domain track.
    pub fn functional(&self) -> &[Segment] {
        &self.functional
    }

    /// Gets the special position track.
    pub fn special(&self) -> &[Segment] {
        &self.special
    }
}

/// The render-ready result of a [`Pipeline`] run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct View {
    /// The number of sites per row.
    sites_per_row: usize,
    /// Positions carrying an insertion or deletion above threshold.
    indels: Vec<Position>,
    /// The rows, in ascending position order.
    rows: Vec<Row>,
}

impl View {
    /// Gets the number of sites per row.
    pub fn sites_per_row(&self) -> usize {
        self.sites_per_row
    }

    /// Gets the positions carrying an insertion or deletion above threshold.
    pub fn indels(&self) -> &[Position] {
        &self.indels
    }

    /// Gets the rows.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
}

/// A configured transformation from prevalence rows to a [`View`].
#[derive(Clone, Debug)]
pub struct Pipeline {
    /// The number of sites per row.
    sites_per_row: usize,
    /// The stratum selection.
    filter: Filter,
    /// The structural domains.
    structural: Vec<Interval>,
    /// The functional domains.
    functional: Vec<Interval>,
    /// The special position categories.
    special: Categories,
}

impl Pipeline {
    /// Gets the number of sites per row.
    pub fn sites_per_row(&self) -> usize {
        self.sites_per_row
    }

    /// Gets the stratum selection.
    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Normalizes raw rows and transforms them into a [`View`].
    ///
    /// # Examples
    ///
    /// ```
    /// use prevalence::pipeline::Builder;
    /// use prevalence::record::RawRecord;
    /// use prevalence::WildType;
    ///
    /// let rows: Vec<RawRecord> = serde_json::from_str(
    ///     r#"[
    ///         {"gene": "X", "subtype": "B", "rx_type": "all", "position": 10,
    ///          "aa": "C", "total": 10, "count": 2, "percent": 0.2},
    ///         {"gene": "X", "subtype": "B", "rx_type": "all", "position": 10,
    ///          "aa": "A", "total": 10, "count": 5, "percent": 0.5}
    ///     ]"#,
    /// )?;
    ///
    /// let pipeline = Builder::default().gene("X").subtype("B").try_build()?;
    /// let view = pipeline.run(rows, &WildType::default())?;
    ///
    /// assert_eq!(view.rows().len(), 1);
    /// let group = &view.rows()[0].groups()[0];
    /// assert_eq!(group.position().get(), 10);
    /// assert_eq!(group.first().amino_acid(), "A");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn run<I>(&self, rows: I, wild_type: &WildType) -> Result<View>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let records = prevalence::normalize(rows).map_err(Error::MalformedRecord)?;
        self.transform(&records, wild_type)
    }

    /// Transforms already normalized records into a [`View`].
    pub fn transform(&self, records: &[PrevalenceRecord], wild_type: &WildType) -> Result<View> {
        let indels = self.filter.indels(records).into_iter().collect::<Vec<_>>();

        let annotated = self
            .filter
            .retain(records)
            .into_iter()
            .cloned()
            .map(|record| AnnotatedRecord::new(record, wild_type));
        let groups = group(annotated);

        let mut rows = Vec::new();

        for chunk in chunk::chunk(&groups, self.sites_per_row).map_err(Error::Chunk)? {
            let Some(span) = Span::of(chunk) else {
                continue;
            };

            rows.push(Row {
                start: span.start(),
                stop: span.stop(),
                groups: chunk.to_vec(),
                structural: map_domains(chunk, self.sites_per_row, &self.structural)
                    .map_err(Error::Overlay)?,
                functional: map_domains(chunk, self.sites_per_row, &self.functional)
                    .map_err(Error::Overlay)?,
                special: map_points(chunk, self.sites_per_row, &self.special)
                    .map_err(Error::Overlay)?,
            });
        }

        debug!(
            "built {} rows from {} positions ({} indel positions)",
            rows.len(),
            groups.len(),
            indels.len()
        );

        Ok(View {
            sites_per_row: self.sites_per_row,
            indels,
            rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::prevalence::tests::raw;

    fn capsid_pipeline() -> Pipeline {
        let structural = ["85-93:CypA", "146-150:IDR", "153-172:MHR"]
            .iter()
            .map(|spec| spec.parse::<Interval>().unwrap())
            .collect();
        let special = ["lena_resist=56,66", "hla_pos=120"]
            .iter()
            .map(|spec| spec.parse::<overlay::Category>().unwrap())
            .collect();

        Builder::default()
            .gene("CA")
            .subtype("B")
            .structural(structural)
            .special(special)
            .try_build()
            .unwrap()
    }

    fn rows(positions: impl IntoIterator<Item = i64>) -> Vec<RawRecord> {
        positions
            .into_iter()
            .flat_map(|position| {
                vec![
                    raw("CA", "B", position, "P", 0.95),
                    raw("CA", "B", position, "L", 0.04),
                    raw("CA", "C", position, "Q", 0.5),
                ]
            })
            .collect()
    }

    #[test]
    fn test_rows_partition_positions() -> Result<()> {
        let view = capsid_pipeline().run(rows(1..=120), &WildType::default())?;

        assert_eq!(view.sites_per_row(), 50);
        assert_eq!(view.rows().len(), 3);

        let lengths = view
            .rows()
            .iter()
            .map(|row| row.groups().len())
            .collect::<Vec<_>>();
        assert_eq!(lengths, vec![50, 50, 20]);

        let positions = view
            .rows()
            .iter()
            .flat_map(|row| row.groups().iter().map(|g| g.position().get()))
            .collect::<Vec<_>>();
        assert_eq!(positions, (1..=120).collect::<Vec<_>>());

        let last = &view.rows()[2];
        assert_eq!((last.start().get(), last.stop().get()), (101, 120));
        Ok(())
    }

    #[test]
    fn test_tracks() -> Result<()> {
        let view = capsid_pipeline().run(rows(1..=120), &WildType::default())?;

        let second = &view.rows()[1];
        let labels = second
            .structural()
            .iter()
            .filter_map(|s| s.label())
            .collect::<Vec<_>>();
        assert_eq!(labels, vec!["CypA"]);
        assert!(second.functional().is_empty());

        let special = second
            .special()
            .iter()
            .filter_map(|s| s.label())
            .collect::<Vec<_>>();
        assert_eq!(special, vec!["lena_resist", "lena_resist"]);

        // The special position at 120 lands in the short last row.
        let last = &view.rows()[2];
        assert_eq!(last.special().len(), 2);
        assert!((last.special()[0].width() - 38.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_wild_type_and_order() -> Result<()> {
        let wild_type = "MPL".parse::<WildType>().unwrap();
        let view = capsid_pipeline().run(rows(1..=3), &wild_type)?;

        let groups = view.rows()[0].groups();
        let flags = groups
            .iter()
            .map(|g| {
                g.records()
                    .iter()
                    .map(|r| (r.amino_acid().to_string(), r.is_wild_type()))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();

        assert_eq!(
            flags,
            vec![
                vec![("P".to_string(), false), ("L".to_string(), false)],
                vec![("P".to_string(), true), ("L".to_string(), false)],
                vec![("P".to_string(), false), ("L".to_string(), true)],
            ]
        );
        Ok(())
    }

    #[test]
    fn test_indels() -> Result<()> {
        let mut input = rows(1..=5);
        input.push(raw("CA", "B", 4, "_", 0.02));
        input.push(raw("CA", "B", 2, "-", 0.0005));

        let view = capsid_pipeline().run(input, &WildType::default())?;
        assert_eq!(
            view.indels().iter().map(|p| p.get()).collect::<Vec<_>>(),
            vec![4]
        );
        Ok(())
    }

    #[test]
    fn test_idempotent() -> Result<()> {
        let pipeline = capsid_pipeline();
        let wild_type = "MPLPQ".parse::<WildType>().unwrap();

        let first = pipeline.run(rows(1..=75), &wild_type)?;
        let second = pipeline.run(rows(1..=75), &wild_type)?;
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn test_malformed_record_aborts_run() {
        let mut input = rows(1..=3);
        input[4].percent = None;

        let err = capsid_pipeline()
            .run(input, &WildType::default())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "malformed record: row 4: missing required field `percent`"
        );
    }

    #[test]
    fn test_no_matching_records() -> Result<()> {
        let view = capsid_pipeline().run(Vec::new(), &WildType::default())?;
        assert!(view.rows().is_empty());
        assert!(view.indels().is_empty());
        Ok(())
    }

    #[test]
    fn test_serialized_shape() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let view = capsid_pipeline().run(rows(85..=86), &WildType::default())?;
        let json = serde_json::to_value(&view)?;

        assert_eq!(json["sites_per_row"], serde_json::json!(50));
        assert_eq!(json["rows"][0]["start"], serde_json::json!(85));
        assert_eq!(json["rows"][0]["structural"][0]["kind"], "label");
        assert_eq!(
            json["rows"][0]["groups"][0]["records"][0]["aminoAcid"],
            "P"
        );
        assert_eq!(
            json["rows"][0]["groups"][0]["records"][0]["isWildType"],
            false
        );
        Ok(())
    }
}
