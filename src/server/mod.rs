// src/server/mod.rs
//! HTTP surface: routing, shared state and the request guard.

mod guard;
mod handlers;
mod rate_limit;

pub use guard::ApiKeyGuard;
pub use rate_limit::RateLimiter;

use crate::api::authors::AuthorDatabase;
use crate::api::{GoogleBooksClient, NotionHttpClient};
use crate::config::ServiceConfig;
use crate::constants::RATE_LIMIT_WINDOW;
use crate::error::AppError;
use crate::pipeline::{Library, Shelf};
use axum::routing::{get, post};
use axum::{middleware, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub library: Arc<Library>,
    pub api_key_guard: Arc<ApiKeyGuard>,
    pub rate_limiter: RateLimiter,
}

impl AppState {
    pub fn new(library: Library, api_key_guard: ApiKeyGuard, rate_limiter: RateLimiter) -> Self {
        Self {
            library: Arc::new(library),
            api_key_guard: Arc::new(api_key_guard),
            rate_limiter,
        }
    }

    /// Wires the real upstream clients from configuration.
    ///
    /// Without both a Notion token and a database id the service still
    /// starts; `/add` then answers 500.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, AppError> {
        let catalog = GoogleBooksClient::new(
            config.catalog_url.clone(),
            config.catalog_api_key.clone(),
        )?;

        let shelf = match config.notion_target() {
            Some((token, database)) => {
                let client = NotionHttpClient::new(token, config.notion_base_url.clone())?;
                let authors = config.author_database.clone().map(|id| AuthorDatabase {
                    id,
                    title_override: config.author_title_property.clone(),
                });
                if authors.is_none() {
                    log::info!("NOTION_AUTHOR_DB_ID not set; author linking disabled");
                }
                Some(Shelf::new(
                    Arc::new(client),
                    database.clone(),
                    authors,
                    config.author_relation_property.clone(),
                ))
            }
            None => {
                log::warn!("NOTION_TOKEN or NOTION_DATABASE_ID not set; /add is disabled");
                None
            }
        };

        if config.api_key.is_none() {
            log::warn!("API_KEY not set; /search and /add accept any caller");
        }
        let rate_limiter = RateLimiter::new(config.rate_limit_per_min, RATE_LIMIT_WINDOW);
        if !rate_limiter.is_enabled() {
            log::warn!("Rate limiting disabled (RATE_LIMIT_PER_MIN <= 0)");
        }

        Ok(Self::new(
            Library::new(Arc::new(catalog), shelf),
            ApiKeyGuard::new(config.api_key.clone()),
            rate_limiter,
        ))
    }
}

/// `/health` is open; `/search` and `/add` pass the key check and the rate limit.
pub fn router(state: AppState) -> Router {
    let guarded: Router<AppState> = Router::new()
        .route("/search", get(handlers::search))
        .route("/add", post(handlers::add))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            guard::guard_requests,
        ));

    Router::new()
        .route("/health", get(handlers::health))
        .merge(guarded)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
