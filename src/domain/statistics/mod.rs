//! Statistics are derived, never primary: they are recalculated from
//! series and volume rows on every request.

pub mod entity;
pub use entity::{LibraryStats, SeriesOwnership};
