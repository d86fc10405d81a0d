//! `prevalence` is a crate for arranging amino acid prevalence data into an
//! annotated grid of rows, ready to be handed to a presentation layer.
//!
//! Prevalence data is a flat list of rows, each giving the percentage of
//! sequenced samples that carry some amino acid at some position within a
//! gene, subtype, and treatment stratum. The crate provides two main points of
//! entry:
//!
//! - The individual transformation stages, for when you want to assemble your
//!   own layout.
//! - A [`Pipeline`](pipeline::Pipeline) that runs every stage end to end and
//!   returns a render-ready [`View`](pipeline::View).
//!
//! ## Transformation stages
//!
//! Raw rows ([`record::RawRecord`]) are first normalized into
//! [`record::PrevalenceRecord`]s, which fails with a named field if a row is
//! incomplete. A [`Filter`] then selects the records of one stratum above a
//! minimum percent, and each retained record is annotated against the
//! [`WildType`] sequence ([`record::AnnotatedRecord`]). The annotated records
//! are grouped by position ([`group::group()`]) and split into rows of a fixed
//! number of sites ([`chunk::chunk()`]).
//!
//! For each row, structural and functional domains
//! ([`core::Interval`]s) and categorized special positions
//! ([`overlay::Categories`]) are laid out as gap and label
//! [`Segment`](overlay::Segment)s whose widths are percentages of the row
//! width ([`overlay::map_domains()`] and [`overlay::map_points()`]).
//!
//! ## Pipeline
//!
//! Most users will not want to wire up the stages by hand. A
//! [`Pipeline`](pipeline::Pipeline) cannot be instantiated directly; use
//! [`pipeline::Builder`] instead, which validates the configuration (for
//! example, that there is at least one site per row) before any data is
//! processed.
//!
//! ```
//! use prevalence::core::Interval;
//! use prevalence::pipeline::Builder;
//! use prevalence::WildType;
//!
//! let data = br#"[
//!     {"gene": "CA", "subtype": "B", "rx_type": "all", "position": 85,
//!      "aa": "P", "total": 100, "count": 97, "percent": 0.97},
//!     {"gene": "CA", "subtype": "B", "rx_type": "all", "position": 86,
//!      "aa": "A", "total": 100, "count": 99, "percent": 0.99}
//! ]"#;
//! let rows = prevalence::reader::read_records(&data[..])?;
//!
//! let pipeline = Builder::default()
//!     .gene("CA")
//!     .subtype("B")
//!     .structural(vec!["85-93:CypA".parse::<Interval>()?])
//!     .try_build()?;
//!
//! let view = pipeline.run(rows, &WildType::default())?;
//!
//! for row in view.rows() {
//!     for segment in row.structural() {
//!         println!("{segment}");
//!     }
//! }
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(clippy::missing_docs_in_private_items)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod chunk;
pub mod core;
pub mod filter;
pub mod group;
pub mod overlay;
pub mod pipeline;
pub mod reader;
pub mod record;
pub mod wildtype;

pub use filter::Filter;
pub use wildtype::WildType;
