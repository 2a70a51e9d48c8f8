// src/lib.rs
// MangaShelf - Local-first manga collection tracker
//
// Architecture:
// - Domain-centric: series, volumes and derived statistics/wishlist
// - Explicit: volume counts are resolved by ordered, testable rules
// - Read-only catalogs: external services never write to the library
// - Local-first: one SQLite file owned by the user

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;
pub mod integrations;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    missing_volumes,
    validate_series,
    validate_total_volumes,
    validate_volume_number,
    IsbnLookup,
    // Statistics
    LibraryStats,
    // Series
    NewSeries,
    ResolvedVolumeCount,
    Series,
    SeriesMatchCandidate,
    SeriesOwnership,
    // Volume
    Volume,
    // Volume counts
    VolumeCountSource,
    VolumeCoverEntry,
    // Wishlist
    WishlistEntry,
};

// ============================================================================
// PUBLIC API - Errors and Configuration
// ============================================================================

pub use config::AppConfig;
pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{create_connection_pool, create_memory_pool, initialize_database, ConnectionPool};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{
    SeriesRepository,
    SqliteSeriesRepository,
    SqliteVolumeRepository,
    VolumeRepository,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    LibraryService,
    ScanOutcome,
    SeriesDetail,
    VolumeCountResolver,
    VolumeCountRules,
    WishlistService,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{AppState, CatalogSource, ErrorResponse};

// ============================================================================
// PUBLIC API - Integrations
// ============================================================================

pub use integrations::{
    BookCatalog,
    CatalogEntry,
    CatalogManga,
    CatalogQuery,
    GoogleBooksClient,
    JikanClient,
    MangaCatalog,
    MangaDexClient,
};
