//! Core functionality used across the crate.

pub mod interval;
pub mod position;

pub use interval::Interval;
pub use position::Position;
pub use position::Positioned;
