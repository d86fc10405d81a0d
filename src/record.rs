//! Prevalence records at each stage of normalization.

pub mod annotated;
pub mod prevalence;
pub mod raw;

pub use annotated::AnnotatedRecord;
pub use annotated::PercentLevel;
pub use prevalence::PrevalenceRecord;
pub use raw::RawRecord;
