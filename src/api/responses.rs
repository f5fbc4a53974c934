// src/api/responses.rs
//! Wire types for the two upstream APIs.
//!
//! Only the fields the service reads are modelled. Everything is lenient:
//! missing or `null` members deserialize to their empty value.

use crate::model::{DatabaseSchema, PropertyType};
use crate::types::PageId;
use serde::Deserialize;
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Google Books
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VolumeSearchResponse {
    #[serde(default)]
    pub items: Option<Vec<Volume>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Volume {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "volumeInfo", default)]
    pub volume_info: Option<VolumeInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub authors: Option<Vec<String>>,
    #[serde(default)]
    pub published_date: Option<String>,
    #[serde(default)]
    pub industry_identifiers: Option<Vec<IndustryIdentifier>>,
    #[serde(default)]
    pub image_links: Option<ImageLinks>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub main_category: Option<String>,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    #[serde(default)]
    pub page_count: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct IndustryIdentifier {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub identifier: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLinks {
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub small_thumbnail: Option<String>,
}

// ---------------------------------------------------------------------------
// Notion
// ---------------------------------------------------------------------------

/// `GET /v1/databases/{id}`, reduced to the property type tags.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseResponse {
    #[serde(default)]
    pub properties: Option<BTreeMap<String, Option<PropertyDefinition>>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertyDefinition {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

impl DatabaseResponse {
    pub fn into_schema(self) -> DatabaseSchema {
        DatabaseSchema::from_properties(self.properties.unwrap_or_default().into_iter().map(
            |(name, definition)| {
                let tag = definition.and_then(|d| d.kind).unwrap_or_default();
                (name, PropertyType::from_tag(&tag))
            },
        ))
    }
}

/// `POST /v1/databases/{id}/query`, reduced to row ids.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub results: Vec<PageRef>,
}

/// Any response carrying an object id, e.g. `POST /v1/pages`.
#[derive(Debug, Clone, Deserialize)]
pub struct PageRef {
    pub id: PageId,
}

/// Error envelope returned with every non-2xx Notion response.
#[derive(Debug, Clone, Deserialize)]
pub struct NotionErrorBody {
    pub code: String,
    #[serde(default)]
    pub message: String,
}
