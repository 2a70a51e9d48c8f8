// src/integrations/catalog.rs
//
// Catalog seams
//
// Two kinds of read-only catalogs are used:
// - BookCatalog: free-text book listings (one entry per published volume),
//   mined for volume numbers and covers
// - MangaCatalog: series-level search with an optional authoritative volume total
//
// Both return DTOs only. Services decide what the data means.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;

// ============================================================================
// BOOK CATALOG
// ============================================================================

/// One book listing as returned by a free-text search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Free text, e.g. "Dandadan, Vol. 7". No structural guarantee.
    pub title: String,
    pub authors: Vec<String>,
    pub thumbnail: Option<String>,
    pub description: Option<String>,
}

impl CatalogEntry {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            authors: Vec::new(),
            thumbnail: None,
            description: None,
        }
    }

    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }
}

/// A book-catalog search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    pub text: String,
    pub max_results: u32,
    /// Restrict to book-type entries
    pub books_only: bool,
    pub order_by_relevance: bool,
}

impl CatalogQuery {
    /// Result cap for series volume searches
    pub const SERIES_RESULT_CAP: u32 = 40;

    /// `"<title>" vol`, 40 books ordered by relevance
    pub fn series_volumes(clean_title: &str) -> Self {
        Self {
            text: format!("\"{}\" vol", clean_title),
            max_results: Self::SERIES_RESULT_CAP,
            books_only: true,
            order_by_relevance: true,
        }
    }

    /// `isbn:<value>`, single result
    pub fn isbn(isbn: &str) -> Self {
        Self {
            text: format!("isbn:{}", isbn.trim()),
            max_results: 1,
            books_only: false,
            order_by_relevance: false,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookCatalog: Send + Sync {
    /// Run one search. Entries come back in the catalog's ranking order.
    async fn search(&self, query: &CatalogQuery) -> AppResult<Vec<CatalogEntry>>;
}

// ============================================================================
// MANGA CATALOG
// ============================================================================

/// Series-level search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogManga {
    /// Identifier within the originating catalog
    pub source_id: String,
    pub title: String,
    pub author: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub year: Option<i32>,
    pub cover_url: Option<String>,
    /// Authoritative total when the catalog reports one (usually only for
    /// finished series). May be a non-positive placeholder.
    pub volumes: Option<i32>,
    pub tags: Vec<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MangaCatalog: Send + Sync {
    /// Short identifier used in logs ("jikan", "mangadex")
    fn name(&self) -> &'static str;

    async fn search_manga(&self, query: &str, limit: u32) -> AppResult<Vec<CatalogManga>>;
}
