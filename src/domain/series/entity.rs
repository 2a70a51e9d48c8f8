use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder used when a catalog does not report an author or status
pub const UNKNOWN: &str = "Unknown";

/// A tracked manga series in the local library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Internal row identifier
    pub id: i64,

    pub title: String,

    pub author: String,

    /// Total published volumes, if known
    pub total_volumes: Option<u32>,

    /// Publication status as reported by the catalog ("Publishing", "Finished", ...)
    pub status: String,

    pub cover_image: Option<String>,

    pub description: Option<String>,

    pub created_at: DateTime<Utc>,
}

/// Fields needed to insert a new series.
/// The id and creation timestamp are assigned on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSeries {
    pub title: String,
    pub author: String,
    pub total_volumes: Option<u32>,
    pub status: String,
    pub cover_image: Option<String>,
    pub description: Option<String>,
}

impl NewSeries {
    /// A series with only a title; everything else unknown
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: UNKNOWN.to_string(),
            total_volumes: None,
            status: UNKNOWN.to_string(),
            cover_image: None,
            description: None,
        }
    }

    pub fn with_total_volumes(mut self, total_volumes: Option<u32>) -> Self {
        self.total_volumes = total_volumes;
        self
    }
}

impl Series {
    /// Volume numbers the series is expected to have, `1..=total`.
    /// Empty when the total is unknown.
    pub fn expected_volumes(&self) -> std::ops::RangeInclusive<u32> {
        1..=self.total_volumes.unwrap_or(0)
    }
}

impl std::fmt::Display for Series {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.total_volumes {
            Some(total) => write!(f, "{} ({} vols)", self.title, total),
            None => write!(f, "{} (? vols)", self.title),
        }
    }
}
