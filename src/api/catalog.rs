// src/api/catalog.rs
//! Google Books search and normalization into `Book`.
//!
//! The normalization half is pure and has no knowledge of HTTP; the
//! client half issues exactly one request per search.

use super::client::preview;
use super::responses::{ImageLinks, IndustryIdentifier, Volume, VolumeSearchResponse};
use crate::constants::{
    CATALOG_MAX_RESULTS, CATALOG_MIN_RESULTS, OUTBOUND_REQUEST_TIMEOUT, UNTITLED_BOOK,
};
use crate::error::AppError;
use crate::model::Book;
use crate::types::ValidatedUrl;
use reqwest::Client;

/// Identifier types in order of preference.
const PREFERRED_IDENTIFIERS: [&str; 2] = ["ISBN_13", "ISBN_10"];

/// Keeps catalog requests within `[CATALOG_MIN_RESULTS, CATALOG_MAX_RESULTS]`.
pub fn clamp_max_results(requested: i64) -> i64 {
    requested.clamp(CATALOG_MIN_RESULTS, CATALOG_MAX_RESULTS)
}

/// Picks the most useful identifier: ISBN-13, then ISBN-10, then whatever came first.
pub fn best_isbn(identifiers: &[IndustryIdentifier]) -> Option<String> {
    for kind in PREFERRED_IDENTIFIERS {
        if let Some(found) = identifiers
            .iter()
            .find(|item| item.kind.as_deref() == Some(kind))
        {
            return found.identifier.clone();
        }
    }
    identifiers.first().and_then(|item| item.identifier.clone())
}

/// The larger thumbnail when present, always over https.
pub fn secure_cover_url(links: &ImageLinks) -> Option<String> {
    links
        .thumbnail
        .as_deref()
        .filter(|url| !url.is_empty())
        .or_else(|| links.small_thumbnail.as_deref().filter(|url| !url.is_empty()))
        .map(|url| url.replace("http://", "https://"))
}

/// Converts one catalog volume into the client-facing book shape.
pub fn normalize_volume(volume: Volume) -> Book {
    let info = volume.volume_info.unwrap_or_default();
    let identifiers = info.industry_identifiers.unwrap_or_default();
    let cover_url = info.image_links.as_ref().and_then(secure_cover_url);

    Book {
        catalog_id: volume.id,
        title: info
            .title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| UNTITLED_BOOK.to_string()),
        authors: info.authors.unwrap_or_default(),
        published: info.published_date,
        isbn: best_isbn(&identifiers),
        cover_url,
        description: info.description,
        publisher: info.publisher,
        main_category: info.main_category,
        categories: info.categories.unwrap_or_default(),
        page_count: info.page_count,
        notes: None,
    }
}

/// Google Books volume search.
#[derive(Clone)]
pub struct GoogleBooksClient {
    client: Client,
    endpoint: ValidatedUrl,
    api_key: Option<String>,
}

impl GoogleBooksClient {
    pub fn new(endpoint: ValidatedUrl, api_key: Option<String>) -> Result<Self, AppError> {
        let client = Client::builder().timeout(OUTBOUND_REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }
}

#[async_trait::async_trait]
impl super::BookCatalog for GoogleBooksClient {
    async fn search(&self, query: &str, max_results: i64) -> Result<Vec<Book>, AppError> {
        let max_results = clamp_max_results(max_results);
        let mut params = vec![
            ("q", query.to_string()),
            ("maxResults", max_results.to_string()),
        ];
        if let Some(key) = &self.api_key {
            params.push(("key", key.clone()));
        }

        log::debug!("Catalog search '{}' (max {})", query, max_results);
        let response = self
            .client
            .get(self.endpoint.as_str())
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            log::warn!("Google Books error: {} {}", status.as_u16(), preview(&text));
            return Err(AppError::CatalogService {
                message: text,
                status,
            });
        }

        let parsed: VolumeSearchResponse = serde_json::from_str(&text)?;
        let books: Vec<Book> = parsed
            .items
            .unwrap_or_default()
            .into_iter()
            .map(normalize_volume)
            .collect();
        log::info!("Catalog search '{}' returned {} results", query, books.len());
        Ok(books)
    }
}
