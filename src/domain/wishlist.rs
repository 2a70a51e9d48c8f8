// src/domain/wishlist.rs
//
// The wishlist is the set of missing volumes: for every series with a known
// total, each volume in 1..=total that is not owned.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::series::Series;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistEntry {
    pub series_id: i64,
    pub series_title: String,
    pub missing_volumes: Vec<u32>,
}

/// Missing volumes of one series, ascending.
/// Returns `None` when the total is unknown or nothing is missing.
pub fn missing_volumes(series: &Series, owned: &[u32]) -> Option<WishlistEntry> {
    let owned: HashSet<u32> = owned.iter().copied().collect();
    let missing: Vec<u32> = series
        .expected_volumes()
        .filter(|n| !owned.contains(n))
        .collect();

    if missing.is_empty() {
        return None;
    }

    Some(WishlistEntry {
        series_id: series.id,
        series_title: series.title.clone(),
        missing_volumes: missing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn series(total: Option<u32>) -> Series {
        Series {
            id: 7,
            title: "Dandadan".to_string(),
            author: "Yukinobu Tatsu".to_string(),
            total_volumes: total,
            status: "Publishing".to_string(),
            cover_image: None,
            description: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_missing_volumes_ascending() {
        let entry = missing_volumes(&series(Some(5)), &[4, 1, 2]).unwrap();
        assert_eq!(entry.series_id, 7);
        assert_eq!(entry.missing_volumes, vec![3, 5]);
    }

    #[test]
    fn test_unknown_total_has_no_entry() {
        assert!(missing_volumes(&series(None), &[1]).is_none());
    }

    #[test]
    fn test_complete_series_has_no_entry() {
        assert!(missing_volumes(&series(Some(3)), &[1, 2, 3]).is_none());
    }

    #[test]
    fn test_owned_beyond_total_is_ignored() {
        let entry = missing_volumes(&series(Some(2)), &[2, 9]).unwrap();
        assert_eq!(entry.missing_volumes, vec![1]);
    }
}
