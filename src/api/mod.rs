// src/api/mod.rs
//! Upstream API interaction — the catalog we search and the workspace we file into.
//!
//! Business logic depends on the two traits below, never on HTTP details,
//! so the schema cache and author resolver can be exercised against
//! in-memory fakes.

pub mod authors;
pub mod cache;
pub mod catalog;
pub mod client;
pub mod responses;

use crate::error::AppError;
use crate::model::{Book, DatabaseSchema, PagePayload};
use crate::types::{DatabaseId, PageId, PropertyName};

/// The ability to read and write a Notion workspace.
#[async_trait::async_trait]
pub trait NotionRepository: Send + Sync {
    /// Property names and types of a database.
    async fn retrieve_schema(&self, database: &DatabaseId) -> Result<DatabaseSchema, AppError>;

    /// Rows of `database` whose title property equals `title` exactly.
    async fn find_by_title(
        &self,
        database: &DatabaseId,
        title_property: &PropertyName,
        title: &str,
    ) -> Result<Vec<PageId>, AppError>;

    /// Creates a page; the payload must carry its parent.
    async fn create_page(&self, payload: &PagePayload) -> Result<PageId, AppError>;
}

/// The ability to look books up in an external catalog.
#[async_trait::async_trait]
pub trait BookCatalog: Send + Sync {
    async fn search(&self, query: &str, max_results: i64) -> Result<Vec<Book>, AppError>;
}

pub use authors::AuthorResolver;
pub use cache::SchemaCache;
pub use catalog::GoogleBooksClient;
pub use client::NotionHttpClient;
