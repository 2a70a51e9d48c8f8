// src/integrations/google_books/client.rs
//
// Google Books API Integration
//
// ARCHITECTURE:
// - REST client for the public volumes search endpoint
// - Maps external data → CatalogEntry DTOs
// - Malformed items are skipped one by one; the batch survives
// - No retries, no caching

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::config::{GoogleBooksConfig, HttpConfig};
use crate::error::AppResult;
use crate::integrations::catalog::{BookCatalog, CatalogEntry, CatalogQuery};
use crate::integrations::http::{build_http_client, ensure_success};

/// Volumes search response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumesResponse {
    #[serde(default)]
    total_items: u32,
    /// Kept raw so one bad item cannot fail the whole batch
    items: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemData {
    volume_info: VolumeInfoData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeInfoData {
    title: String,
    #[serde(default)]
    authors: Vec<String>,
    image_links: Option<ImageLinksData>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ImageLinksData {
    thumbnail: Option<String>,
}

/// Google Books API Client
pub struct GoogleBooksClient {
    base_url: String,
    api_key: Option<String>,
    http_client: Client,
}

impl GoogleBooksClient {
    pub fn new(config: &GoogleBooksConfig, http: &HttpConfig) -> AppResult<Self> {
        Ok(Self {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            http_client: build_http_client(http)?,
        })
    }

    /// Query parameters for a search, key appended when configured
    fn query_params(&self, query: &CatalogQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("q", query.text.clone()),
            ("maxResults", query.max_results.to_string()),
        ];

        if query.books_only {
            params.push(("printType", "books".to_string()));
        }
        if query.order_by_relevance {
            params.push(("orderBy", "relevance".to_string()));
        }
        if let Some(key) = &self.api_key {
            params.push(("key", key.clone()));
        }

        params
    }

    /// Map the raw response to entries, dropping items without a usable title
    fn map_response(response: VolumesResponse) -> Vec<CatalogEntry> {
        let items = response.items.unwrap_or_default();
        log::debug!(
            "Google Books returned {} of {} total items",
            items.len(),
            response.total_items
        );

        items
            .into_iter()
            .filter_map(|raw| match serde_json::from_value::<ItemData>(raw) {
                Ok(item) => Some(Self::map_item(item)),
                Err(e) => {
                    log::debug!("Skipping malformed Google Books item: {}", e);
                    None
                }
            })
            .collect()
    }

    fn map_item(item: ItemData) -> CatalogEntry {
        let info = item.volume_info;
        CatalogEntry {
            title: info.title,
            authors: info.authors,
            thumbnail: info.image_links.and_then(|links| links.thumbnail),
            description: info.description,
        }
    }
}

#[async_trait]
impl BookCatalog for GoogleBooksClient {
    async fn search(&self, query: &CatalogQuery) -> AppResult<Vec<CatalogEntry>> {
        let response = self
            .http_client
            .get(&self.base_url)
            .query(&self.query_params(query))
            .send()
            .await?;

        let response = ensure_success("Google Books", response)?;
        let body: VolumesResponse = response.json().await?;

        Ok(Self::map_response(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(api_key: Option<&str>) -> GoogleBooksClient {
        let config = GoogleBooksConfig {
            api_key: api_key.map(str::to_string),
            ..GoogleBooksConfig::default()
        };
        GoogleBooksClient::new(&config, &HttpConfig::default()).unwrap()
    }

    #[test]
    fn test_series_query_params() {
        let params = client(None).query_params(&CatalogQuery::series_volumes("Dandadan"));
        assert_eq!(
            params,
            vec![
                ("q", "\"Dandadan\" vol".to_string()),
                ("maxResults", "40".to_string()),
                ("printType", "books".to_string()),
                ("orderBy", "relevance".to_string()),
            ]
        );
    }

    #[test]
    fn test_api_key_appended_when_configured() {
        let params = client(Some("secret")).query_params(&CatalogQuery::isbn("123"));
        assert_eq!(params.last(), Some(&("key", "secret".to_string())));
        assert!(!params.iter().any(|(name, _)| *name == "printType"));
    }

    #[test]
    fn test_map_response_tolerates_bad_items() {
        let body: VolumesResponse = serde_json::from_str(
            r#"{
                "totalItems": 4,
                "items": [
                    {"volumeInfo": {"title": "Dandadan, Vol. 1",
                        "authors": ["Yukinobu Tatsu"],
                        "imageLinks": {"thumbnail": "http://books.google.com/x?zoom=1"}}},
                    {"volumeInfo": {"authors": ["No Title"]}},
                    {"id": "no-volume-info"},
                    {"volumeInfo": {"title": "Dandadan, Vol. 2", "description": "Aliens"}}
                ]
            }"#,
        )
        .unwrap();

        let entries = GoogleBooksClient::map_response(body);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "Dandadan, Vol. 1");
        assert_eq!(entries[0].authors, vec!["Yukinobu Tatsu".to_string()]);
        assert_eq!(
            entries[0].thumbnail.as_deref(),
            Some("http://books.google.com/x?zoom=1")
        );
        assert_eq!(entries[1].description.as_deref(), Some("Aliens"));
        assert!(entries[1].thumbnail.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_catalog_is_http_error() {
        let config = GoogleBooksConfig {
            base_url: "http://127.0.0.1:9/volumes".to_string(),
            ..GoogleBooksConfig::default()
        };
        let client = GoogleBooksClient::new(&config, &HttpConfig::default()).unwrap();

        let result = client.search(&CatalogQuery::isbn("9781974703630")).await;
        assert!(matches!(result, Err(crate::error::AppError::Http(_))));
    }

    #[test]
    fn test_map_response_without_items() {
        let body: VolumesResponse = serde_json::from_str(r#"{"totalItems": 0}"#).unwrap();
        assert!(GoogleBooksClient::map_response(body).is_empty());
    }
}
