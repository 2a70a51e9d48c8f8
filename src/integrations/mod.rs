// src/integrations/mod.rs
//
// External Integrations Module
//
// Read-only catalog clients. Each maps external payloads into the DTOs
// defined in `catalog` and never touches the library database.

pub mod catalog;
pub mod google_books;
pub mod http;
pub mod jikan;
pub mod mangadex;

pub use catalog::{BookCatalog, CatalogEntry, CatalogManga, CatalogQuery, MangaCatalog};
pub use google_books::GoogleBooksClient;
pub use http::build_http_client;
pub use jikan::JikanClient;
pub use mangadex::MangaDexClient;
