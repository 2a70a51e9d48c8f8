// src/repositories/volume_repository.rs
//
// Volume ownership persistence

use rusqlite::{params, Row};
use std::sync::Arc;

use crate::db::ConnectionPool;
use crate::domain::{SeriesOwnership, Volume};
use crate::error::AppResult;

pub trait VolumeRepository: Send + Sync {
    /// Ascending by volume number
    fn list_by_series(&self, series_id: i64) -> AppResult<Vec<Volume>>;
    /// Insert or update the ownership flag of one volume
    fn set_owned(&self, series_id: i64, volume_number: u32, owned: bool) -> AppResult<()>;
    /// Owned volume numbers, ascending
    fn owned_numbers(&self, series_id: i64) -> AppResult<Vec<u32>>;
    /// One row per series with its known total and owned count
    fn ownership_summary(&self) -> AppResult<Vec<SeriesOwnership>>;
}

pub struct SqliteVolumeRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteVolumeRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_volume(row: &Row) -> Result<Volume, rusqlite::Error> {
        let volume_number: i64 = row.get("volume_number")?;
        let is_owned: i64 = row.get("is_owned")?;
        let is_read: i64 = row.get("is_read")?;

        Ok(Volume {
            series_id: row.get("series_id")?,
            volume_number: volume_number as u32,
            is_owned: is_owned != 0,
            is_read: is_read != 0,
        })
    }
}

impl VolumeRepository for SqliteVolumeRepository {
    fn list_by_series(&self, series_id: i64) -> AppResult<Vec<Volume>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT * FROM volumes WHERE series_id = ?1 ORDER BY volume_number",
        )?;

        let volumes: Vec<Volume> = stmt
            .query_map(params![series_id], Self::row_to_volume)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(volumes)
    }

    fn set_owned(&self, series_id: i64, volume_number: u32, owned: bool) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT INTO volumes (series_id, volume_number, is_owned)
             VALUES (?1, ?2, ?3)
             ON CONFLICT (series_id, volume_number) DO UPDATE SET is_owned = excluded.is_owned",
            params![series_id, volume_number, owned as i64],
        )?;

        Ok(())
    }

    fn owned_numbers(&self, series_id: i64) -> AppResult<Vec<u32>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT volume_number FROM volumes
             WHERE series_id = ?1 AND is_owned = 1
             ORDER BY volume_number",
        )?;

        let numbers: Vec<u32> = stmt
            .query_map(params![series_id], |row| row.get::<_, i64>(0))?
            .map(|n| n.map(|n| n as u32))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(numbers)
    }

    fn ownership_summary(&self) -> AppResult<Vec<SeriesOwnership>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT s.total_volumes, COALESCE(SUM(v.is_owned), 0)
             FROM series s
             LEFT JOIN volumes v ON v.series_id = s.id
             GROUP BY s.id",
        )?;

        let rows: Vec<SeriesOwnership> = stmt
            .query_map([], |row| {
                let total: Option<i64> = row.get(0)?;
                let owned: i64 = row.get(1)?;
                Ok(SeriesOwnership {
                    total_volumes: total.map(|t| t as u32),
                    owned_volumes: owned as u32,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }
}
