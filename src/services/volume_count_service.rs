// src/services/volume_count_service.rs
//
// Volume Count Resolver
//
// ARCHITECTURE:
// - Answers "how many volumes does this series have?" from an optional
//   authoritative count and a free-text book catalog
// - Builds per-volume cover lists and resolves single books by ISBN
// - Never fails: catalog errors are logged and downgraded to None / empty
// - Stateless between calls, safe to share behind Arc

use log::{debug, info, warn};
use std::sync::Arc;

use crate::domain::{IsbnLookup, ResolvedVolumeCount, VolumeCoverEntry};
use crate::error::AppResult;
use crate::integrations::{BookCatalog, CatalogEntry, CatalogQuery};
use crate::services::volume_count_rules::VolumeCountRules;

pub struct VolumeCountResolver {
    catalog: Arc<dyn BookCatalog>,
    rules: VolumeCountRules,
}

impl VolumeCountResolver {
    pub fn new(catalog: Arc<dyn BookCatalog>) -> Self {
        Self {
            catalog,
            rules: VolumeCountRules::default(),
        }
    }

    /// Highest volume number found among relevant catalog titles
    pub async fn volume_count_from_catalog(&self, series_title: &str) -> Option<u32> {
        let entries = self.series_entries(series_title).await?;

        let count = self.rules.max_volume_number(series_title, &entries);
        match count {
            Some(count) => info!(
                "Catalog titles suggest {} volumes for \"{}\" ({} entries)",
                count,
                series_title,
                entries.len()
            ),
            None => info!("No volume numbers found for \"{}\"", series_title),
        }
        count
    }

    /// Authoritative count when positive, otherwise the catalog estimate
    pub async fn resolve(
        &self,
        series_title: &str,
        authoritative_count: Option<i32>,
    ) -> Option<ResolvedVolumeCount> {
        if let Some(count) = authoritative_count.filter(|count| *count > 0) {
            debug!("Using authoritative count {} for \"{}\"", count, series_title);
            return Some(ResolvedVolumeCount::authoritative(count as u32));
        }

        self.volume_count_from_catalog(series_title)
            .await
            .map(ResolvedVolumeCount::from_catalog_titles)
    }

    pub async fn best_volume_count(
        &self,
        series_title: &str,
        authoritative_count: Option<i32>,
    ) -> Option<u32> {
        self.resolve(series_title, authoritative_count)
            .await
            .map(|resolved| resolved.count)
    }

    /// One cover entry per volume number in `1..=max_volumes`, ascending
    pub async fn volumes_with_covers(
        &self,
        series_title: &str,
        max_volumes: u32,
    ) -> Vec<VolumeCoverEntry> {
        let Some(entries) = self.series_entries(series_title).await else {
            return Vec::new();
        };

        let covers = self.rules.cover_entries(series_title, &entries, max_volumes);
        debug!(
            "Built {} cover entries for \"{}\" (max {})",
            covers.len(),
            series_title,
            max_volumes
        );
        covers
    }

    /// Resolve a scanned ISBN to its series name, volume number and metadata
    pub async fn lookup_by_isbn(&self, isbn: &str) -> Option<IsbnLookup> {
        if isbn.trim().is_empty() {
            debug!("Ignoring empty ISBN");
            return None;
        }

        let entries = match self.catalog.search(&CatalogQuery::isbn(isbn)).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!("ISBN lookup for {} failed: {}", isbn.trim(), e);
                return None;
            }
        };

        let Some(book) = entries.into_iter().next() else {
            info!("No book found for ISBN {}", isbn.trim());
            return None;
        };

        Some(self.isbn_lookup_from_entry(book))
    }

    fn isbn_lookup_from_entry(&self, book: CatalogEntry) -> IsbnLookup {
        IsbnLookup {
            series_title: self.rules.strip_volume_marker(&book.title),
            volume_number: self.rules.extract_volume_number(&book.title),
            cover_url: book
                .thumbnail
                .as_deref()
                .map(|thumbnail| self.rules.upgrade_cover_url(thumbnail)),
            full_title: book.title,
            authors: book.authors,
            description: book.description,
        }
    }

    /// Search results for a series, or None when the catalog failed or had nothing
    async fn series_entries(&self, series_title: &str) -> Option<Vec<CatalogEntry>> {
        match self.search_series(series_title).await {
            Ok(entries) if entries.is_empty() => {
                info!("Catalog returned no results for \"{}\"", series_title);
                None
            }
            Ok(entries) => Some(entries),
            Err(e) => {
                warn!("Catalog search for \"{}\" failed: {}", series_title, e);
                None
            }
        }
    }

    async fn search_series(&self, series_title: &str) -> AppResult<Vec<CatalogEntry>> {
        let clean_title = self.rules.clean_series_title(series_title);
        self.catalog
            .search(&CatalogQuery::series_volumes(&clean_title))
            .await
    }
}
