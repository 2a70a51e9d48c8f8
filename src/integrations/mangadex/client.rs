// src/integrations/mangadex/client.rs
//
// MangaDex API Integration
//
// Alternative primary catalog. Search results carry no volume total; the
// aggregate endpoint is queried per series when a total is needed.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::config::{HttpConfig, MangaDexConfig};
use crate::error::AppResult;
use crate::integrations::catalog::{CatalogManga, MangaCatalog};
use crate::integrations::http::{build_http_client, ensure_success};

const UNKNOWN_TITLE: &str = "Unknown Title";
const UNKNOWN_AUTHOR: &str = "Unknown Author";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<MangaData>,
}

#[derive(Debug, Deserialize)]
struct DetailResponse {
    data: MangaData,
}

#[derive(Debug, Deserialize)]
struct MangaData {
    id: String,
    attributes: MangaAttributes,
    #[serde(default)]
    relationships: Vec<RelationshipData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MangaAttributes {
    /// Language code → title, in the order MangaDex sends them
    #[serde(default)]
    title: Map<String, Value>,
    #[serde(default)]
    alt_titles: Vec<Map<String, Value>>,
    #[serde(default)]
    description: Map<String, Value>,
    status: Option<String>,
    year: Option<i32>,
    #[serde(default)]
    tags: Vec<TagData>,
}

#[derive(Debug, Deserialize)]
struct TagData {
    attributes: TagAttributes,
}

#[derive(Debug, Deserialize)]
struct TagAttributes {
    #[serde(default)]
    name: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RelationshipData {
    #[serde(rename = "type")]
    kind: String,
    attributes: Option<RelationshipAttributes>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RelationshipAttributes {
    name: Option<String>,
    file_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AggregateResponse {
    /// An object keyed by volume label, or an empty array when there are none
    #[serde(default)]
    volumes: Value,
}

/// MangaDex API Client
pub struct MangaDexClient {
    base_url: String,
    cover_base_url: String,
    http_client: Client,
}

impl MangaDexClient {
    pub fn new(config: &MangaDexConfig, http: &HttpConfig) -> AppResult<Self> {
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            cover_base_url: config.cover_base_url.trim_end_matches('/').to_string(),
            http_client: build_http_client(http)?,
        })
    }

    /// Highest numbered volume from the aggregate endpoint.
    /// Absent when nothing numeric is listed, the number does not fit a
    /// volume total, or the request fails.
    pub async fn volume_count(&self, manga_id: &str) -> Option<i32> {
        match self.fetch_aggregate(manga_id).await {
            Ok(aggregate) => aggregate_volume_total(&aggregate.volumes),
            Err(e) => {
                log::warn!("Could not get MangaDex volume count for {}: {}", manga_id, e);
                None
            }
        }
    }

    /// Full details plus the aggregate volume count; `None` on any failure
    pub async fn manga_details(&self, manga_id: &str) -> Option<CatalogManga> {
        match self.fetch_details(manga_id).await {
            Ok(detail) => {
                let mut manga = self.map_manga(detail.data);
                manga.volumes = self.volume_count(manga_id).await;
                Some(manga)
            }
            Err(e) => {
                log::warn!("MangaDex details for {} failed: {}", manga_id, e);
                None
            }
        }
    }

    async fn fetch_details(&self, manga_id: &str) -> AppResult<DetailResponse> {
        let url = format!("{}/manga/{}", self.base_url, manga_id);
        let response = self
            .http_client
            .get(&url)
            .query(&[("includes[]", "cover_art"), ("includes[]", "author")])
            .send()
            .await?;
        let response = ensure_success("MangaDex", response)?;
        Ok(response.json().await?)
    }

    async fn fetch_aggregate(&self, manga_id: &str) -> AppResult<AggregateResponse> {
        let url = format!("{}/manga/{}/aggregate", self.base_url, manga_id);
        let response = self.http_client.get(&url).send().await?;
        let response = ensure_success("MangaDex", response)?;
        Ok(response.json().await?)
    }

    fn map_manga(&self, manga: MangaData) -> CatalogManga {
        CatalogManga {
            title: best_title(&manga.attributes),
            author: Some(author_name(&manga.relationships)),
            description: best_description(&manga.attributes.description),
            status: manga.attributes.status.as_deref().map(display_status),
            year: manga.attributes.year,
            cover_url: self.cover_url(&manga.id, &manga.relationships),
            volumes: None,
            tags: manga
                .attributes
                .tags
                .iter()
                .filter_map(|tag| tag.attributes.name.get("en").and_then(Value::as_str))
                .map(str::to_string)
                .collect(),
            source_id: manga.id,
        }
    }

    fn cover_url(&self, manga_id: &str, relationships: &[RelationshipData]) -> Option<String> {
        relationships
            .iter()
            .find(|r| r.kind == "cover_art")
            .and_then(|r| r.attributes.as_ref())
            .and_then(|a| a.file_name.as_deref())
            .map(|file_name| format!("{}/{}/{}.512.jpg", self.cover_base_url, manga_id, file_name))
    }
}

#[async_trait]
impl MangaCatalog for MangaDexClient {
    fn name(&self) -> &'static str {
        "mangadex"
    }

    async fn search_manga(&self, query: &str, limit: u32) -> AppResult<Vec<CatalogManga>> {
        let url = format!("{}/manga", self.base_url);
        let limit = limit.to_string();

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("title", query),
                ("limit", limit.as_str()),
                ("includes[]", "cover_art"),
                ("includes[]", "author"),
                ("contentRating[]", "safe"),
                ("contentRating[]", "suggestive"),
                ("order[relevance]", "desc"),
            ])
            .send()
            .await?;

        let response = ensure_success("MangaDex", response)?;
        let body: SearchResponse = response.json().await?;

        // Volume totals are not fetched here: one aggregate call per result is too slow
        Ok(body.data.into_iter().map(|m| self.map_manga(m)).collect())
    }
}

// ============================================================================
// MAPPING HELPERS
// ============================================================================

fn first_string(map: &Map<String, Value>) -> Option<String> {
    map.values().find_map(Value::as_str).map(str::to_string)
}

fn string_at(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_string)
}

/// English, then romanized Japanese, then any title, then an English alt title
fn best_title(attributes: &MangaAttributes) -> String {
    string_at(&attributes.title, "en")
        .or_else(|| string_at(&attributes.title, "ja-ro"))
        .or_else(|| first_string(&attributes.title))
        .or_else(|| {
            attributes
                .alt_titles
                .iter()
                .find_map(|alt| string_at(alt, "en"))
        })
        .unwrap_or_else(|| UNKNOWN_TITLE.to_string())
}

fn best_description(description: &Map<String, Value>) -> Option<String> {
    string_at(description, "en")
        .or_else(|| string_at(description, "it"))
        .or_else(|| first_string(description))
}

fn author_name(relationships: &[RelationshipData]) -> String {
    relationships
        .iter()
        .find(|r| r.kind == "author")
        .and_then(|r| r.attributes.as_ref())
        .and_then(|a| a.name.clone())
        .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string())
}

fn display_status(status: &str) -> String {
    match status {
        "ongoing" => "Publishing".to_string(),
        "completed" => "Finished".to_string(),
        "hiatus" => "On Hiatus".to_string(),
        "cancelled" => "Cancelled".to_string(),
        other => other.to_string(),
    }
}

/// Largest leading integer among the volume keys, ignoring "none"
fn max_volume_key(volumes: &Value) -> Option<u32> {
    let volumes = volumes.as_object()?;

    volumes
        .keys()
        .filter(|key| key.as_str() != "none")
        .filter_map(|key| leading_integer(key))
        .max()
        .filter(|max| *max > 0)
}

fn aggregate_volume_total(volumes: &Value) -> Option<i32> {
    max_volume_key(volumes).and_then(|max| i32::try_from(max).ok())
}

/// "12" → 12, "1.5" → 1, "x" → None
fn leading_integer(label: &str) -> Option<u32> {
    let trimmed = label.trim_start();
    let digits: String = trimmed.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}
