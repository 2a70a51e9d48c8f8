// src/services/wishlist_service.rs
//
// Wishlist Service - READ-ONLY
//
// The wishlist is never stored: it is recomputed from series totals and
// volume ownership on every call.

use std::sync::Arc;

use crate::domain::{missing_volumes, WishlistEntry};
use crate::error::{AppError, AppResult};
use crate::repositories::{SeriesRepository, VolumeRepository};

pub struct WishlistService {
    series_repo: Arc<dyn SeriesRepository>,
    volume_repo: Arc<dyn VolumeRepository>,
}

impl WishlistService {
    pub fn new(
        series_repo: Arc<dyn SeriesRepository>,
        volume_repo: Arc<dyn VolumeRepository>,
    ) -> Self {
        Self {
            series_repo,
            volume_repo,
        }
    }

    /// Missing volumes across the library, series in listing order.
    /// Series with an unknown total or nothing missing are left out.
    pub fn missing_volumes(&self) -> AppResult<Vec<WishlistEntry>> {
        let mut entries = Vec::new();

        for series in self.series_repo.list_all()? {
            let owned = self.volume_repo.owned_numbers(series.id)?;
            if let Some(entry) = missing_volumes(&series, &owned) {
                entries.push(entry);
            }
        }

        Ok(entries)
    }

    pub fn missing_for_series(&self, series_id: i64) -> AppResult<Option<WishlistEntry>> {
        let series = self
            .series_repo
            .get_by_id(series_id)?
            .ok_or(AppError::NotFound)?;
        let owned = self.volume_repo.owned_numbers(series_id)?;

        Ok(missing_volumes(&series, &owned))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_memory_pool, initialize_database};
    use crate::domain::NewSeries;
    use crate::repositories::{SqliteSeriesRepository, SqliteVolumeRepository};

    fn setup() -> (WishlistService, SqliteSeriesRepository, SqliteVolumeRepository) {
        let pool = Arc::new(create_memory_pool().unwrap());
        initialize_database(&pool.get().unwrap()).unwrap();

        let service = WishlistService::new(
            Arc::new(SqliteSeriesRepository::new(pool.clone())),
            Arc::new(SqliteVolumeRepository::new(pool.clone())),
        );
        (
            service,
            SqliteSeriesRepository::new(pool.clone()),
            SqliteVolumeRepository::new(pool),
        )
    }

    #[test]
    fn test_missing_volumes_across_library() {
        let (service, series_repo, volume_repo) = setup();

        let monster = series_repo
            .insert(&NewSeries::titled("Monster").with_total_volumes(Some(4)))
            .unwrap();
        let complete = series_repo
            .insert(&NewSeries::titled("Blame!").with_total_volumes(Some(1)))
            .unwrap();
        series_repo.insert(&NewSeries::titled("One Piece")).unwrap();

        volume_repo.set_owned(monster.id, 2, true).unwrap();
        volume_repo.set_owned(monster.id, 3, false).unwrap();
        volume_repo.set_owned(complete.id, 1, true).unwrap();

        let wishlist = service.missing_volumes().unwrap();

        assert_eq!(wishlist.len(), 1);
        assert_eq!(wishlist[0].series_title, "Monster");
        assert_eq!(wishlist[0].missing_volumes, vec![1, 3, 4]);
    }

    #[test]
    fn test_missing_for_series() {
        let (service, series_repo, _) = setup();
        let series = series_repo
            .insert(&NewSeries::titled("Nana").with_total_volumes(Some(2)))
            .unwrap();

        let entry = service.missing_for_series(series.id).unwrap().unwrap();
        assert_eq!(entry.missing_volumes, vec![1, 2]);

        assert!(matches!(
            service.missing_for_series(series.id + 100),
            Err(AppError::NotFound)
        ));
    }
}
