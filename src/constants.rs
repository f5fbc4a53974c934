// src/constants.rs
//! Domain constants that define the operational boundaries of the service.
//!
//! Each constant is named for the domain concept it constrains. Reading
//! these should tell you how the service talks to its two upstreams and
//! how it lays a book out on a Notion page.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Upstream endpoints
// ---------------------------------------------------------------------------

/// Notion API version pinned in every request.
pub const NOTION_VERSION: &str = "2022-06-28";

/// Default Notion REST base, overridable for tests and proxies.
pub const NOTION_API_BASE_URL: &str = "https://api.notion.com/v1";

/// Default Google Books volume search endpoint.
pub const GOOGLE_BOOKS_URL: &str = "https://www.googleapis.com/books/v1/volumes";

/// Fixed timeout applied to every outbound HTTP call.
pub const OUTBOUND_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Catalog search boundaries
// ---------------------------------------------------------------------------

/// Smallest `maxResults` the catalog will be asked for.
pub const CATALOG_MIN_RESULTS: i64 = 1;

/// Google Books caps `maxResults` at 40; we keep result lists short.
pub const CATALOG_MAX_RESULTS: i64 = 20;

/// Result count used when the client does not ask for one.
pub const CATALOG_DEFAULT_RESULTS: i64 = 10;

/// Title given to volumes the catalog returns without one.
pub const UNTITLED_BOOK: &str = "Untitled";

// ---------------------------------------------------------------------------
// Request throttling
// ---------------------------------------------------------------------------

/// Length of the sliding window the per-client limit applies to.
pub const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(60);

/// Requests per window when `RATE_LIMIT_PER_MIN` is not set.
pub const DEFAULT_RATE_LIMIT_PER_MIN: i64 = 60;

/// Header carrying the shared secret.
pub const API_KEY_HEADER: &str = "x-api-key";

// ---------------------------------------------------------------------------
// Book page layout
// ---------------------------------------------------------------------------

/// Title property name used when the database schema cannot be read.
pub const FALLBACK_TITLE_PROPERTY: &str = "Name";

/// Relation property linking a book to its author rows.
pub const DEFAULT_AUTHOR_RELATION_PROPERTY: &str = "Author";

/// Notion rejects rich text over 2000 characters; summaries stay well below.
pub const SUMMARY_MAX_CHARS: usize = 1800;

/// Appended to a summary that had to be cut.
pub const TRUNCATION_MARKER: &str = "...";

pub const SUMMARY_PROPERTY: &str = "Summary";
pub const GENRE_PROPERTY: &str = "Genre";
pub const TROPES_PROPERTY: &str = "Tropes";
pub const PUBLICATION_DATE_PROPERTY: &str = "Publication Date";
pub const ISBN_PROPERTY: &str = "ISBN";
pub const CATALOG_ID_PROPERTY: &str = "Google Books ID";
pub const PUBLISHER_PROPERTY: &str = "Publisher";
pub const TOTAL_PAGES_PROPERTY: &str = "Total Pages";

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters of an upstream error body written to the log.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 500;
