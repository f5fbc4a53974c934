// src/api/client.rs
//! HTTP client wrapper for the Notion API.
//!
//! Handles authentication headers, the per-call timeout and the mapping
//! of non-2xx responses onto `AppError::NotionService`. Response bodies of
//! failed calls are logged here and nowhere else.

use super::responses::{DatabaseResponse, NotionErrorBody, PageRef, QueryResponse};
use crate::constants::{ERROR_BODY_PREVIEW_LENGTH, NOTION_VERSION, OUTBOUND_REQUEST_TIMEOUT};
use crate::error::{AppError, NotionErrorCode};
use crate::model::{DatabaseSchema, PagePayload};
use crate::types::{DatabaseId, NotionToken, PageId, PropertyName, ValidatedUrl};
use reqwest::{header, Client, Response};
use serde::Serialize;

/// A thin wrapper around reqwest Client for Notion API requests.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
    base_url: ValidatedUrl,
}

impl NotionHttpClient {
    /// Creates a new HTTP client with Notion API authentication.
    pub fn new(token: &NotionToken, base_url: ValidatedUrl) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(token)?)
            .timeout(OUTBOUND_REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client, base_url })
    }

    /// Creates the default headers for Notion API requests.
    fn create_headers(token: &NotionToken) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", token.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid Notion token format: {}", e))
            })?,
        );

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_VERSION),
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// Makes a GET request to the specified endpoint (path without base URL).
    pub async fn get(&self, endpoint: &str) -> Result<Response, AppError> {
        let url = self.base_url.join_path(endpoint);
        log::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        log::debug!("GET {} -> {}", endpoint, response.status());
        Ok(response)
    }

    /// Makes a POST request with JSON body to the specified endpoint.
    pub async fn post<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<Response, AppError> {
        let url = self.base_url.join_path(endpoint);
        if log::log_enabled!(log::Level::Debug) {
            log::debug!(
                "POST {} body: {}",
                url,
                serde_json::to_string(body).unwrap_or_else(|_| "<unserializable>".to_string())
            );
        }
        let response = self.client.post(url).json(body).send().await?;
        log::debug!("POST {} -> {}", endpoint, response.status());
        Ok(response)
    }
}

#[async_trait::async_trait]
impl super::NotionRepository for NotionHttpClient {
    async fn retrieve_schema(&self, database: &DatabaseId) -> Result<DatabaseSchema, AppError> {
        let endpoint = format!("databases/{}", database.to_dashed());
        let response = self.get(&endpoint).await?;
        let body = successful_body(response, "Database fetch").await?;
        let parsed: DatabaseResponse = serde_json::from_str(&body)?;
        Ok(parsed.into_schema())
    }

    async fn find_by_title(
        &self,
        database: &DatabaseId,
        title_property: &PropertyName,
        title: &str,
    ) -> Result<Vec<PageId>, AppError> {
        let endpoint = format!("databases/{}/query", database.to_dashed());
        let filter = serde_json::json!({
            "filter": {
                "property": title_property,
                "title": { "equals": title },
            }
        });
        let response = self.post(&endpoint, &filter).await?;
        let body = successful_body(response, "Database query").await?;
        let parsed: QueryResponse = serde_json::from_str(&body)?;
        Ok(parsed.results.into_iter().map(|page| page.id).collect())
    }

    async fn create_page(&self, payload: &PagePayload) -> Result<PageId, AppError> {
        let response = self.post("pages", payload).await?;
        let body = successful_body(response, "Page create").await?;
        let created: PageRef = serde_json::from_str(&body)?;
        Ok(created.id)
    }
}

/// Reads the body of a successful response, or logs and classifies a failed one.
///
/// `operation` names the call in the warning so the log says what was attempted.
pub(crate) async fn successful_body(response: Response, operation: &str) -> Result<String, AppError> {
    let status = response.status();
    let text = response.text().await?;
    if status.is_success() {
        return Ok(text);
    }

    log::warn!(
        "{} error: {} {}",
        operation,
        status.as_u16(),
        preview(&text)
    );

    let (code, message) = match serde_json::from_str::<NotionErrorBody>(&text) {
        Ok(body) => (NotionErrorCode::from_api_response(&body.code), body.message),
        Err(_) => (NotionErrorCode::from_http_status(status.as_u16()), text),
    };
    if code.is_access_problem() {
        log::warn!("Is the database shared with the integration? ({})", code);
    }
    Err(AppError::NotionService {
        code,
        message,
        status,
    })
}

/// Shortens a body for the log without splitting a character.
pub(crate) fn preview(text: &str) -> String {
    if text.chars().count() <= ERROR_BODY_PREVIEW_LENGTH {
        return text.to_string();
    }
    let mut shortened: String = text.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
    shortened.push('…');
    shortened
}
