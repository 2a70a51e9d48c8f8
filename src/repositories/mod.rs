// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO invariant enforcement
// - NO cross-repository calls
// - Explicit SQL only

pub mod series_repository;
pub mod volume_repository;

pub use series_repository::{SeriesRepository, SqliteSeriesRepository};
pub use volume_repository::{SqliteVolumeRepository, VolumeRepository};
