use serde::{Deserialize, Serialize};

/// Library-wide totals.
/// Always derived from series and volume rows, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryStats {
    pub total_series: u32,
    pub total_owned_volumes: u64,
    /// Sum of the known totals; series with an unknown total add nothing
    pub total_volumes: u64,
    /// Series with a known total whose owned count reaches it
    pub completed_series: u32,
}

/// Per-series input to the stats computation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesOwnership {
    pub total_volumes: Option<u32>,
    pub owned_volumes: u32,
}

impl LibraryStats {
    pub fn from_ownership<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = SeriesOwnership>,
    {
        rows.into_iter().fold(Self::default(), |mut stats, row| {
            stats.total_series = stats.total_series.saturating_add(1);
            stats.total_owned_volumes = stats
                .total_owned_volumes
                .saturating_add(u64::from(row.owned_volumes));
            if let Some(total) = row.total_volumes.filter(|t| *t > 0) {
                stats.total_volumes = stats.total_volumes.saturating_add(u64::from(total));
                if row.owned_volumes >= total {
                    stats.completed_series = stats.completed_series.saturating_add(1);
                }
            }
            stats
        })
    }

    /// Owned share of all known volumes, rounded to a whole percent
    pub fn completion_percent(&self) -> u32 {
        if self.total_volumes == 0 {
            return 0;
        }
        ((self.total_owned_volumes as f64 / self.total_volumes as f64) * 100.0).round() as u32
    }
}
