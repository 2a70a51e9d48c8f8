// src/application/state.rs

use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::{
    create_connection_pool, get_connection, get_database_path, initialize_database, ConnectionPool,
};
use crate::error::AppResult;
use crate::integrations::{
    CatalogManga, GoogleBooksClient, JikanClient, MangaCatalog, MangaDexClient,
};
use crate::repositories::{SqliteSeriesRepository, SqliteVolumeRepository};
use crate::services::{LibraryService, VolumeCountResolver, WishlistService};

/// Series-level catalog to search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogSource {
    #[default]
    Jikan,
    MangaDex,
}

/// Everything a command needs, wired once at startup.
/// All fields are Arc-wrapped so commands can share them freely.
pub struct AppState {
    pub pool: Arc<ConnectionPool>,
    pub library: Arc<LibraryService>,
    pub wishlist: Arc<WishlistService>,
    pub resolver: Arc<VolumeCountResolver>,
    pub jikan: Arc<JikanClient>,
    pub mangadex: Arc<MangaDexClient>,
}

impl AppState {
    /// Open (or create) the library database and build every service
    pub fn initialize(config: &AppConfig) -> AppResult<Self> {
        let db_path = get_database_path(config.database.path.as_deref())?;
        log::info!("Using library database at {}", db_path.display());

        let pool = Arc::new(create_connection_pool(&db_path)?);
        initialize_database(&*get_connection(&pool)?)?;

        Self::with_pool(config, pool)
    }

    /// Build services over an existing, initialized pool
    pub fn with_pool(config: &AppConfig, pool: Arc<ConnectionPool>) -> AppResult<Self> {
        let google_books = Arc::new(GoogleBooksClient::new(&config.google_books, &config.http)?);
        let jikan = Arc::new(JikanClient::new(&config.jikan, &config.http)?);
        let mangadex = Arc::new(MangaDexClient::new(&config.mangadex, &config.http)?);

        let series_repo = Arc::new(SqliteSeriesRepository::new(pool.clone()));
        let volume_repo = Arc::new(SqliteVolumeRepository::new(pool.clone()));

        let resolver = Arc::new(VolumeCountResolver::new(google_books));

        let library = Arc::new(LibraryService::new(
            series_repo.clone(),
            volume_repo.clone(),
            jikan.clone(),
            resolver.clone(),
        ));
        let wishlist = Arc::new(WishlistService::new(series_repo, volume_repo));

        Ok(Self {
            pool,
            library,
            wishlist,
            resolver,
            jikan,
            mangadex,
        })
    }

    pub fn catalog(&self, source: CatalogSource) -> Arc<dyn MangaCatalog> {
        match source {
            CatalogSource::Jikan => self.jikan.clone(),
            CatalogSource::MangaDex => self.mangadex.clone(),
        }
    }

    /// Search one catalog. MangaDex hits have no volume total in search
    /// results, so it is filled from the aggregate endpoint when available.
    pub async fn search_manga(
        &self,
        source: CatalogSource,
        query: &str,
        limit: u32,
    ) -> AppResult<Vec<CatalogManga>> {
        let mut results = self.catalog(source).search_manga(query, limit).await?;

        if source == CatalogSource::MangaDex {
            for manga in results.iter_mut().filter(|m| m.volumes.is_none()) {
                manga.volumes = self.mangadex.volume_count(&manga.source_id).await;
            }
        }

        Ok(results)
    }

    /// Full record for a search hit, falling back to the hit itself
    pub async fn manga_details(&self, source: CatalogSource, hit: CatalogManga) -> CatalogManga {
        if source != CatalogSource::MangaDex {
            return hit;
        }

        match self.mangadex.manga_details(&hit.source_id).await {
            Some(mut details) => {
                details.volumes = details.volumes.or(hit.volumes);
                details
            }
            None => hit,
        }
    }
}
