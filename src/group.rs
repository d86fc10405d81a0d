//! Grouping of annotated records by position.

use std::collections::BTreeMap;

use nonempty::NonEmpty;
use serde::Serialize;
use tracing::trace;

use crate::core::Position;
use crate::core::Positioned;
use crate::record::AnnotatedRecord;

/// Every position that is a multiple of this value has a visible label.
pub const TICK_INTERVAL: usize = 10;

/// The records found at a single position, most prevalent first.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PositionGroup {
    /// The position shared by every record in the group.
    position: Position,
    /// The records, sorted by descending percent.
    records: NonEmpty<AnnotatedRecord>,
}

impl PositionGroup {
    /// Gets the position of the group.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Gets the records of the group, sorted by descending percent.
    pub fn records(&self) -> &NonEmpty<AnnotatedRecord> {
        &self.records
    }

    /// Gets the most prevalent record at the position.
    pub fn first(&self) -> &AnnotatedRecord {
        self.records.first()
    }

    /// Gets the number of sequences covering the position, as reported by
    /// the most prevalent record.
    pub fn total(&self) -> usize {
        self.first().total()
    }

    /// Whether the position label should be visible in a row of
    /// `sites_per_row` positions: every tenth position plus the first
    /// position of each full row.
    ///
    /// # Examples
    ///
    /// ```
    /// use prevalence::group::group;
    /// use prevalence::record::prevalence::normalize;
    /// use prevalence::record::AnnotatedRecord;
    /// use prevalence::record::RawRecord;
    /// use prevalence::WildType;
    ///
    /// let rows = [10, 51, 52].map(|position| RawRecord {
    ///     gene: Some(String::from("CA")),
    ///     subtype: Some(String::from("B")),
    ///     rx_type: Some(String::from("all")),
    ///     position: Some(position),
    ///     aa: Some(String::from("A")),
    ///     total: Some(10),
    ///     count: Some(10),
    ///     percent: Some(1.0),
    /// });
    ///
    /// let wild_type = WildType::default();
    /// let records = normalize(rows)?;
    /// let groups = group(records.into_iter().map(|r| AnnotatedRecord::new(r, &wild_type)));
    ///
    /// let ticks = groups.iter().map(|g| g.is_tick(50)).collect::<Vec<_>>();
    /// assert_eq!(ticks, vec![true, true, false]);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn is_tick(&self, sites_per_row: usize) -> bool {
        let position = self.position.get();
        position % TICK_INTERVAL == 0 || (sites_per_row > 0 && position % sites_per_row == 1)
    }
}

impl Positioned for PositionGroup {
    fn position(&self) -> Position {
        self.position
    }
}

/// Groups records by position.
///
/// Groups are returned in ascending order of position. Within a group,
/// records are ordered by descending percent, and records with equal percent
/// keep their input order.
pub fn group<I>(records: I) -> Vec<PositionGroup>
where
    I: IntoIterator<Item = AnnotatedRecord>,
{
    let mut by_position = BTreeMap::<Position, Vec<AnnotatedRecord>>::new();

    for record in records {
        by_position.entry(record.position()).or_default().push(record);
    }

    let groups = by_position
        .into_iter()
        .filter_map(|(position, mut records)| {
            // NOTE: `sort_by` is stable, which keeps ties in input order.
            records.sort_by(|a, b| b.percent().total_cmp(&a.percent()));
            NonEmpty::from_vec(records).map(|records| PositionGroup { position, records })
        })
        .collect::<Vec<_>>();

    trace!("grouped records into {} positions", groups.len());
    groups
}
