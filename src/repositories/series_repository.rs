// src/repositories/series_repository.rs
//
// Series persistence

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Row};
use std::sync::Arc;

use crate::db::ConnectionPool;
use crate::domain::{NewSeries, Series};
use crate::error::AppResult;

pub trait SeriesRepository: Send + Sync {
    fn insert(&self, series: &NewSeries) -> AppResult<Series>;
    fn get_by_id(&self, id: i64) -> AppResult<Option<Series>>;
    /// Case-insensitive exact title match
    fn find_by_title(&self, title: &str) -> AppResult<Option<Series>>;
    /// Newest first
    fn list_all(&self) -> AppResult<Vec<Series>>;
    fn update_total_volumes(&self, id: i64, total_volumes: Option<u32>) -> AppResult<()>;
    fn update_info(
        &self,
        id: i64,
        total_volumes: Option<u32>,
        description: Option<&str>,
    ) -> AppResult<()>;
    fn delete(&self, id: i64) -> AppResult<()>;
    fn exists(&self, id: i64) -> AppResult<bool>;
}

pub struct SqliteSeriesRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteSeriesRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Map database row to Series - returns rusqlite::Error for query_map compatibility
    fn row_to_series(row: &Row) -> Result<Series, rusqlite::Error> {
        let total_volumes: Option<i64> = row.get("total_volumes")?;

        let created_at_str: String = row.get("created_at")?;
        let created_at = DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        Ok(Series {
            id: row.get("id")?,
            title: row.get("title")?,
            author: row.get("author")?,
            total_volumes: total_volumes.map(|v| v as u32),
            status: row.get("status")?,
            cover_image: row.get("cover_image")?,
            description: row.get("description")?,
            created_at,
        })
    }
}

impl SeriesRepository for SqliteSeriesRepository {
    fn insert(&self, series: &NewSeries) -> AppResult<Series> {
        let conn = self.pool.get()?;
        let created_at = Utc::now();

        conn.execute(
            "INSERT INTO series (title, author, total_volumes, status, cover_image, description, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                series.title,
                series.author,
                series.total_volumes,
                series.status,
                series.cover_image,
                series.description,
                created_at.to_rfc3339(),
            ],
        )?;

        Ok(Series {
            id: conn.last_insert_rowid(),
            title: series.title.clone(),
            author: series.author.clone(),
            total_volumes: series.total_volumes,
            status: series.status.clone(),
            cover_image: series.cover_image.clone(),
            description: series.description.clone(),
            created_at,
        })
    }

    fn get_by_id(&self, id: i64) -> AppResult<Option<Series>> {
        let conn = self.pool.get()?;

        let series = conn
            .query_row(
                "SELECT * FROM series WHERE id = ?1",
                params![id],
                Self::row_to_series,
            )
            .optional()?;

        Ok(series)
    }

    fn find_by_title(&self, title: &str) -> AppResult<Option<Series>> {
        let conn = self.pool.get()?;

        let series = conn
            .query_row(
                "SELECT * FROM series WHERE title = ?1 COLLATE NOCASE ORDER BY id LIMIT 1",
                params![title],
                Self::row_to_series,
            )
            .optional()?;

        Ok(series)
    }

    fn list_all(&self) -> AppResult<Vec<Series>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare("SELECT * FROM series ORDER BY created_at DESC, id DESC")?;

        let series: Vec<Series> = stmt
            .query_map([], Self::row_to_series)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(series)
    }

    fn update_total_volumes(&self, id: i64, total_volumes: Option<u32>) -> AppResult<()> {
        let conn = self.pool.get()?;
        conn.execute(
            "UPDATE series SET total_volumes = ?1 WHERE id = ?2",
            params![total_volumes, id],
        )?;
        Ok(())
    }

    fn update_info(
        &self,
        id: i64,
        total_volumes: Option<u32>,
        description: Option<&str>,
    ) -> AppResult<()> {
        let conn = self.pool.get()?;
        conn.execute(
            "UPDATE series SET total_volumes = ?1, description = ?2 WHERE id = ?3",
            params![total_volumes, description, id],
        )?;
        Ok(())
    }

    fn delete(&self, id: i64) -> AppResult<()> {
        let conn = self.pool.get()?;
        conn.execute("DELETE FROM series WHERE id = ?1", params![id])?;
        Ok(())
    }

    fn exists(&self, id: i64) -> AppResult<bool> {
        let conn = self.pool.get()?;
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM series WHERE id = ?1)",
            params![id],
            |row| row.get(0),
        )?;
        Ok(exists)
    }
}
