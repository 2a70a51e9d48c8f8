pub mod entity;
pub mod invariants;

pub use entity::{NewSeries, Series, UNKNOWN};
pub use invariants::{validate_series, validate_total_volumes};
