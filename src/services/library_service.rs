// src/services/library_service.rs
//
// Library Service - series and volume ownership orchestration
//
// Owns every write to the library. Volume counts come from the resolver;
// catalogs are only read.

use log::{info, warn};
use serde::Serialize;
use std::sync::Arc;

use crate::domain::series::UNKNOWN;
use crate::domain::{
    validate_series, validate_volume_number, IsbnLookup, LibraryStats, NewSeries, Series,
    Volume, VolumeCoverEntry,
};
use crate::error::{AppError, AppResult};
use crate::integrations::{CatalogManga, MangaCatalog};
use crate::repositories::{SeriesRepository, VolumeRepository};
use crate::services::VolumeCountResolver;

/// Grid size used for "mark all" when a series has no known total
pub const DEFAULT_GRID_VOLUMES: u32 = 20;

/// Upper bound for cover lookups when a series has no known total
pub const DEFAULT_COVER_VOLUMES: u32 = 50;

#[derive(Debug, Clone, Serialize)]
pub struct SeriesDetail {
    pub series: Series,
    /// Volume rows that exist, ascending
    pub volumes: Vec<Volume>,
    pub owned_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanOutcome {
    pub series_id: i64,
    /// A new series was inserted for this scan
    pub created: bool,
    /// Volume marked as owned, if the scanned title carried a number
    pub volume: Option<u32>,
}

pub struct LibraryService {
    series_repo: Arc<dyn SeriesRepository>,
    volume_repo: Arc<dyn VolumeRepository>,
    manga_catalog: Arc<dyn MangaCatalog>,
    resolver: Arc<VolumeCountResolver>,
}

impl LibraryService {
    pub fn new(
        series_repo: Arc<dyn SeriesRepository>,
        volume_repo: Arc<dyn VolumeRepository>,
        manga_catalog: Arc<dyn MangaCatalog>,
        resolver: Arc<VolumeCountResolver>,
    ) -> Self {
        Self {
            series_repo,
            volume_repo,
            manga_catalog,
            resolver,
        }
    }

    // ========================================================================
    // ADDING SERIES
    // ========================================================================

    pub fn add_series(&self, series: NewSeries) -> AppResult<Series> {
        validate_series(&series)?;
        let created = self.series_repo.insert(&series)?;
        info!("Added series {} (id {})", created, created.id);
        Ok(created)
    }

    /// Add a primary-catalog hit, filling in the volume count
    pub async fn add_from_catalog(&self, manga: &CatalogManga) -> AppResult<Series> {
        let total_volumes = self
            .resolver
            .best_volume_count(&manga.title, manga.volumes)
            .await;

        self.add_series(NewSeries {
            title: manga.title.clone(),
            author: manga.author.clone().unwrap_or_else(|| UNKNOWN.to_string()),
            total_volumes,
            status: manga.status.clone().unwrap_or_else(|| UNKNOWN.to_string()),
            cover_image: manga.cover_url.clone(),
            description: manga.description.clone(),
        })
    }

    /// Record a scanned book: reuse or create its series, then own the volume
    pub async fn add_from_scan(&self, lookup: &IsbnLookup) -> AppResult<ScanOutcome> {
        if lookup.series_title.trim().is_empty() {
            return Err(AppError::Validation(format!(
                "Could not derive a series title from \"{}\"",
                lookup.full_title
            )));
        }

        let (series_id, created) = match self.series_repo.find_by_title(&lookup.series_title)? {
            Some(existing) => (existing.id, false),
            None => {
                let total_volumes = self
                    .resolver
                    .best_volume_count(&lookup.series_title, None)
                    .await;

                let series = self.add_series(NewSeries {
                    title: lookup.series_title.clone(),
                    author: lookup.first_author().unwrap_or(UNKNOWN).to_string(),
                    total_volumes,
                    status: UNKNOWN.to_string(),
                    cover_image: lookup.cover_url.clone(),
                    description: lookup.description.clone(),
                })?;
                (series.id, true)
            }
        };

        if let Some(volume_number) = lookup.volume_number {
            self.volume_repo.set_owned(series_id, volume_number, true)?;
        }

        Ok(ScanOutcome {
            series_id,
            created,
            volume: lookup.volume_number,
        })
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    /// Newest first
    pub fn list_series(&self) -> AppResult<Vec<Series>> {
        self.series_repo.list_all()
    }

    pub fn series_detail(&self, series_id: i64) -> AppResult<SeriesDetail> {
        let series = self.require_series(series_id)?;
        let volumes = self.volume_repo.list_by_series(series_id)?;
        let owned_count = volumes.iter().filter(|v| v.is_owned).count() as u32;

        Ok(SeriesDetail {
            series,
            volumes,
            owned_count,
        })
    }

    pub fn library_stats(&self) -> AppResult<LibraryStats> {
        let ownership = self.volume_repo.ownership_summary()?;
        Ok(LibraryStats::from_ownership(ownership))
    }

    /// Per-volume covers for a series, bounded by its total (or 50)
    pub async fn volume_covers(&self, series_id: i64) -> AppResult<Vec<VolumeCoverEntry>> {
        let series = self.require_series(series_id)?;
        let max_volumes = series.total_volumes.unwrap_or(DEFAULT_COVER_VOLUMES);

        Ok(self
            .resolver
            .volumes_with_covers(&series.title, max_volumes)
            .await)
    }

    // ========================================================================
    // OWNERSHIP
    // ========================================================================

    pub fn toggle_volume(&self, series_id: i64, volume_number: u32, owned: bool) -> AppResult<()> {
        validate_volume_number(volume_number)?;
        self.ensure_exists(series_id)?;
        self.volume_repo.set_owned(series_id, volume_number, owned)
    }

    /// Set ownership of every volume in the series' grid. Returns the grid size.
    pub fn mark_all(&self, series_id: i64, owned: bool) -> AppResult<u32> {
        let series = self.require_series(series_id)?;
        let grid = series.total_volumes.unwrap_or(DEFAULT_GRID_VOLUMES);

        for volume_number in 1..=grid {
            self.volume_repo.set_owned(series_id, volume_number, owned)?;
        }

        info!(
            "Marked volumes 1..={} of \"{}\" as {}",
            grid,
            series.title,
            if owned { "owned" } else { "not owned" }
        );
        Ok(grid)
    }

    // ========================================================================
    // EDITING
    // ========================================================================

    pub fn update_total_volumes(&self, series_id: i64, count: u32) -> AppResult<()> {
        if count < 1 {
            return Err(AppError::Validation(
                "Volume count must be at least 1".to_string(),
            ));
        }
        self.ensure_exists(series_id)?;
        self.series_repo.update_total_volumes(series_id, Some(count))
    }

    /// Re-fetch the volume count and description from the primary catalog
    pub async fn refresh_info(&self, series_id: i64) -> AppResult<Series> {
        let series = self.require_series(series_id)?;

        let hit = self
            .manga_catalog
            .search_manga(&series.title, 1)
            .await?
            .into_iter()
            .next();

        let Some(manga) = hit else {
            warn!(
                "{} has no match for \"{}\"",
                self.manga_catalog.name(),
                series.title
            );
            return Err(AppError::NotFound);
        };

        let total_volumes = self
            .resolver
            .best_volume_count(&manga.title, manga.volumes)
            .await;

        self.series_repo
            .update_info(series_id, total_volumes, manga.description.as_deref())?;

        self.require_series(series_id)
    }

    pub fn delete_series(&self, series_id: i64) -> AppResult<()> {
        self.ensure_exists(series_id)?;
        self.series_repo.delete(series_id)?;
        info!("Deleted series {}", series_id);
        Ok(())
    }

    fn ensure_exists(&self, series_id: i64) -> AppResult<()> {
        if !self.series_repo.exists(series_id)? {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    fn require_series(&self, series_id: i64) -> AppResult<Series> {
        self.series_repo
            .get_by_id(series_id)?
            .ok_or(AppError::NotFound)
    }
}
