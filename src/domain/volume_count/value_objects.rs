// src/domain/volume_count/value_objects.rs
//
// Volume-count value objects
//
// All of these are transient: built fresh for each resolver call and
// dropped once the caller has consumed the result.

use serde::{Deserialize, Serialize};

/// A catalog entry that passed the relevance filter and yielded a volume number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesMatchCandidate {
    /// Catalog title as returned, e.g. "Dandadan, Vol. 7"
    pub title: String,

    /// Always >= 1
    pub volume_number: u32,
}

/// One cover per distinct volume number of a series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeCoverEntry {
    pub volume_number: u32,
    pub title: String,
    /// Absent when the catalog has no thumbnail; callers render a placeholder
    pub cover_url: Option<String>,
}

/// Result of looking up a single book by ISBN
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsbnLookup {
    /// Title with the volume marker removed, e.g. "Dandadan"
    pub series_title: String,

    pub volume_number: Option<u32>,

    /// Title exactly as the catalog reports it
    pub full_title: String,

    pub cover_url: Option<String>,

    pub authors: Vec<String>,

    pub description: Option<String>,
}

impl IsbnLookup {
    pub fn first_author(&self) -> Option<&str> {
        self.authors.first().map(String::as_str)
    }
}

/// Where a resolved count came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeCountSource {
    /// Structured field of the primary catalog
    Authoritative,

    /// Maximum volume number mined from secondary catalog titles
    CatalogTitles,
}

impl std::fmt::Display for VolumeCountSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VolumeCountSource::Authoritative => write!(f, "authoritative"),
            VolumeCountSource::CatalogTitles => write!(f, "catalog_titles"),
        }
    }
}

/// A positive volume count together with its provenance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedVolumeCount {
    pub count: u32,
    pub source: VolumeCountSource,
}

impl ResolvedVolumeCount {
    pub fn authoritative(count: u32) -> Self {
        Self {
            count,
            source: VolumeCountSource::Authoritative,
        }
    }

    pub fn from_catalog_titles(count: u32) -> Self {
        Self {
            count,
            source: VolumeCountSource::CatalogTitles,
        }
    }
}
