//! A builder for a [`Pipeline`].

use crate::chunk::DEFAULT_SITES_PER_ROW;
use crate::core::Interval;
use crate::filter::DEFAULT_MIN_PERCENT;
use crate::filter::DEFAULT_RX_TYPE;
use crate::overlay::Categories;
use crate::pipeline::Pipeline;
use crate::Filter;

/// An error related to building a [`Pipeline`].
#[derive(Debug, PartialEq)]
pub enum Error {
    /// The number of sites per row was zero.
    ZeroSitesPerRow,
    /// A required setting was never provided.
    Missing(&'static str),
    /// The minimum percent was not within `[0, 100]`.
    InvalidMinPercent(f64),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ZeroSitesPerRow => write!(f, "sites per row must be greater than zero"),
            Error::Missing(field) => write!(f, "missing required setting: {field}"),
            Error::InvalidMinPercent(value) => {
                write!(f, "minimum percent must be between 0 and 100, found {value}")
            }
        }
    }
}

impl std::error::Error for Error {}

/// A builder for a [`Pipeline`].
#[derive(Clone, Debug, Default)]
pub struct Builder {
    /// The number of sites per row.
    sites_per_row: Option<usize>,
    /// The required gene.
    gene: Option<String>,
    /// The required subtype.
    subtype: Option<String>,
    /// The required treatment stratum.
    rx_type: Option<String>,
    /// The minimum percent.
    min_percent: Option<f64>,
    /// The structural domains.
    structural: Vec<Interval>,
    /// The functional domains.
    functional: Vec<Interval>,
    /// The special position categories.
    special: Categories,
}

impl Builder {
    /// Sets the number of sites per row (defaults to `50`).
    pub fn sites_per_row(mut self, sites_per_row: usize) -> Self {
        self.sites_per_row = Some(sites_per_row);
        self
    }

    /// Sets the required gene.
    pub fn gene(mut self, gene: impl Into<String>) -> Self {
        self.gene = Some(gene.into());
        self
    }

    /// Sets the required subtype.
    pub fn subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtype = Some(subtype.into());
        self
    }

    /// Sets the required treatment stratum (defaults to `all`).
    pub fn rx_type(mut self, rx_type: impl Into<String>) -> Self {
        self.rx_type = Some(rx_type.into());
        self
    }

    /// Sets the minimum percent (defaults to `0.1`).
    pub fn min_percent(mut self, min_percent: f64) -> Self {
        self.min_percent = Some(min_percent);
        self
    }

    /// Sets the structural domains. Order is significant; see
    /// [`map_domains()`](crate::overlay::map_domains).
    pub fn structural(mut self, intervals: Vec<Interval>) -> Self {
        self.structural = intervals;
        self
    }

    /// Sets the functional domains. Order is significant; see
    /// [`map_domains()`](crate::overlay::map_domains).
    pub fn functional(mut self, intervals: Vec<Interval>) -> Self {
        self.functional = intervals;
        self
    }

    /// Sets the special position categories.
    pub fn special(mut self, categories: Categories) -> Self {
        self.special = categories;
        self
    }

    /// Consumes `self` to attempt to build a [`Pipeline`].
    ///
    /// # Examples
    ///
    /// ```
    /// use prevalence::pipeline::Builder;
    ///
    /// let pipeline = Builder::default().gene("CA").subtype("B").try_build()?;
    /// assert_eq!(pipeline.sites_per_row(), 50);
    ///
    /// assert!(Builder::default()
    ///     .gene("CA")
    ///     .subtype("B")
    ///     .sites_per_row(0)
    ///     .try_build()
    ///     .is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_build(self) -> Result<Pipeline, Error> {
        let sites_per_row = self.sites_per_row.unwrap_or(DEFAULT_SITES_PER_ROW);
        if sites_per_row == 0 {
            return Err(Error::ZeroSitesPerRow);
        }

        let min_percent = self.min_percent.unwrap_or(DEFAULT_MIN_PERCENT);
        if !(0.0..=100.0).contains(&min_percent) {
            return Err(Error::InvalidMinPercent(min_percent));
        }

        let gene = self.gene.ok_or(Error::Missing("gene"))?;
        let subtype = self.subtype.ok_or(Error::Missing("subtype"))?;
        let rx_type = self
            .rx_type
            .unwrap_or_else(|| String::from(DEFAULT_RX_TYPE));

        Ok(Pipeline {
            sites_per_row,
            filter: Filter::new(gene, subtype, rx_type, min_percent),
            structural: self.structural,
            functional: self.functional,
            special: self.special,
        })
    }
}
