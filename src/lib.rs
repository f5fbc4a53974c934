// src/lib.rs
//! notion-book-tracker library — search a book catalog and file books into a Notion database.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling** — `AppError`, `ValidationError`
//! - **Configuration** — `CommandLineInput`, `ServiceConfig`
//! - **Domain model** — `Book`, `DatabaseSchema`, `PagePayload`, `PropertyValue`
//! - **Domain types** — `DatabaseId`, `PageId`, `NotionToken`, `PropertyName`, etc.
//! - **API clients** — `GoogleBooksClient`, `NotionHttpClient`, the repository traits
//! - **HTTP surface** — `router`, `AppState`

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod mapping;
pub mod model;
pub mod pipeline;
pub mod server;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, NotionErrorCode};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, ServiceConfig};

// --- Domain Model ---
pub use crate::model::{Book, DatabaseSchema, PagePayload, PageProperties, PropertyType, PropertyValue};

// --- Domain Types ---
pub use crate::types::{
    DatabaseId, NotionToken, PageId, PropertyName, SharedSecret, ValidatedUrl,
};

// --- API Clients ---
pub use crate::api::{
    AuthorResolver, BookCatalog, GoogleBooksClient, NotionHttpClient, NotionRepository,
    SchemaCache,
};

// --- Workflows ---
pub use crate::pipeline::{Library, Shelf};

// --- HTTP Surface ---
pub use crate::server::{router, ApiKeyGuard, AppState, RateLimiter};
