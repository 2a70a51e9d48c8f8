// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod library_service;
pub mod volume_count_rules;
pub mod volume_count_service;
pub mod wishlist_service;

#[cfg(test)]
mod library_service_tests;

pub use library_service::{
    LibraryService,
    ScanOutcome,
    SeriesDetail,
    DEFAULT_COVER_VOLUMES,
    DEFAULT_GRID_VOLUMES,
};

pub use volume_count_rules::{VolumeCountRules, VOLUME_NUMBER_PATTERNS};

pub use volume_count_service::VolumeCountResolver;

pub use wishlist_service::WishlistService;
