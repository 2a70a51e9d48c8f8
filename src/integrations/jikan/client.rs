// src/integrations/jikan/client.rs
//
// Jikan (MyAnimeList) API Integration
//
// Primary catalog: series search with an authoritative `volumes` field that
// is only populated for finished series.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::config::{HttpConfig, JikanConfig};
use crate::error::AppResult;
use crate::integrations::catalog::{CatalogManga, MangaCatalog};
use crate::integrations::http::{build_http_client, ensure_success};

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<MangaData>,
}

#[derive(Debug, Deserialize)]
struct MangaData {
    mal_id: i64,
    title: String,
    #[serde(default)]
    authors: Vec<NamedData>,
    volumes: Option<i32>,
    status: Option<String>,
    synopsis: Option<String>,
    images: Option<ImagesData>,
    published: Option<PublishedData>,
    #[serde(default)]
    genres: Vec<NamedData>,
}

#[derive(Debug, Deserialize)]
struct NamedData {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ImagesData {
    jpg: Option<ImageUrlData>,
}

#[derive(Debug, Deserialize)]
struct ImageUrlData {
    image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PublishedData {
    prop: Option<PublishedPropData>,
}

#[derive(Debug, Deserialize)]
struct PublishedPropData {
    from: Option<PartialDateData>,
}

#[derive(Debug, Deserialize)]
struct PartialDateData {
    year: Option<i32>,
}

/// Jikan API Client
pub struct JikanClient {
    base_url: String,
    http_client: Client,
}

impl JikanClient {
    pub fn new(config: &JikanConfig, http: &HttpConfig) -> AppResult<Self> {
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http_client: build_http_client(http)?,
        })
    }

    fn map_manga(manga: MangaData) -> CatalogManga {
        CatalogManga {
            source_id: manga.mal_id.to_string(),
            title: manga.title,
            author: manga.authors.into_iter().next().map(|a| a.name),
            description: manga.synopsis,
            status: manga.status,
            year: manga
                .published
                .and_then(|p| p.prop)
                .and_then(|p| p.from)
                .and_then(|d| d.year),
            cover_url: manga
                .images
                .and_then(|i| i.jpg)
                .and_then(|jpg| jpg.image_url),
            volumes: manga.volumes,
            tags: manga.genres.into_iter().map(|g| g.name).collect(),
        }
    }
}

#[async_trait]
impl MangaCatalog for JikanClient {
    fn name(&self) -> &'static str {
        "jikan"
    }

    async fn search_manga(&self, query: &str, limit: u32) -> AppResult<Vec<CatalogManga>> {
        let url = format!("{}/manga", self.base_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[("q", query.to_string()), ("limit", limit.to_string())])
            .send()
            .await?;

        let response = ensure_success("Jikan", response)?;
        let body: SearchResponse = response.json().await?;

        Ok(body.data.into_iter().map(Self::map_manga).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation_trims_base_url() {
        let config = JikanConfig {
            base_url: "https://api.jikan.moe/v4/".to_string(),
        };
        let client = JikanClient::new(&config, &HttpConfig::default()).unwrap();
        assert_eq!(client.base_url, "https://api.jikan.moe/v4");
        assert_eq!(client.name(), "jikan");
    }

    #[tokio::test]
    async fn test_unreachable_catalog_is_http_error() {
        let config = JikanConfig {
            base_url: "http://127.0.0.1:9".to_string(),
        };
        let client = JikanClient::new(&config, &HttpConfig::default()).unwrap();

        let result = client.search_manga("Berserk", 5).await;
        assert!(matches!(result, Err(crate::error::AppError::Http(_))));
    }

    #[test]
    fn test_map_search_response() {
        let body: SearchResponse = serde_json::from_str(
            r#"{
                "data": [{
                    "mal_id": 2,
                    "title": "Berserk",
                    "authors": [{"name": "Miura, Kentarou"}, {"name": "Studio Gaga"}],
                    "volumes": null,
                    "status": "Publishing",
                    "synopsis": "Guts.",
                    "images": {"jpg": {"image_url": "https://cdn.myanimelist.net/images/manga/1/157897.jpg"}},
                    "published": {"prop": {"from": {"year": 1989, "month": 8}}},
                    "genres": [{"name": "Action"}, {"name": "Drama"}]
                }, {
                    "mal_id": 3,
                    "title": "20th Century Boys",
                    "volumes": 22
                }]
            }"#,
        )
        .unwrap();

        let results: Vec<CatalogManga> = body.data.into_iter().map(JikanClient::map_manga).collect();

        assert_eq!(results.len(), 2);
        let berserk = &results[0];
        assert_eq!(berserk.source_id, "2");
        assert_eq!(berserk.author.as_deref(), Some("Miura, Kentarou"));
        assert_eq!(berserk.volumes, None);
        assert_eq!(berserk.year, Some(1989));
        assert_eq!(berserk.tags, vec!["Action".to_string(), "Drama".to_string()]);
        assert!(berserk.cover_url.is_some());

        let boys = &results[1];
        assert_eq!(boys.volumes, Some(22));
        assert!(boys.author.is_none());
        assert!(boys.status.is_none());
    }
}
