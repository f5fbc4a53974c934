// src/server/handlers.rs
//! Request handlers. Each one unpacks the request, calls the library and
//! shapes the JSON answer; failures go out through `AppError`.

use super::AppState;
use crate::constants::CATALOG_DEFAULT_RESULTS;
use crate::error::AppError;
use crate::model::Book;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub max_results: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<Book>,
}

#[derive(Debug, Serialize)]
pub struct AddResponse {
    pub status: &'static str,
    pub notion_id: String,
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn search(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchResponse>, AppError> {
    let Query(params) = params.map_err(|rejection| AppError::InvalidRequest(rejection.body_text()))?;
    let query = params.q.unwrap_or_default();
    let max_results = params.max_results.unwrap_or(CATALOG_DEFAULT_RESULTS);

    let results = state.library.search(&query, max_results).await?;
    Ok(Json(SearchResponse { query, results }))
}

pub async fn add(
    State(state): State<AppState>,
    book: Result<Json<Book>, JsonRejection>,
) -> Result<Json<AddResponse>, AppError> {
    let Json(book) = book.map_err(|rejection| AppError::InvalidRequest(rejection.body_text()))?;
    let id = state.library.add(&book).await?;
    Ok(Json(AddResponse {
        status: "added",
        notion_id: id.to_string(),
    }))
}
