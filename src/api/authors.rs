// src/api/authors.rs
//! Find-or-create rows in the authors database.
//!
//! Each author name maps to one row, matched by exact title. Names are
//! resolved one after another; a name whose lookup or creation Notion
//! rejects is logged and left out, so the result can be shorter than the
//! input. Concurrent requests for a new name may both create a row.

use super::{NotionRepository, SchemaCache};
use crate::error::AppError;
use crate::model::{PagePayload, PageProperties, PropertyValue};
use crate::types::{DatabaseId, PageId, PropertyName};
use std::sync::Arc;

/// Where author rows live and how their title property is named.
#[derive(Debug, Clone)]
pub struct AuthorDatabase {
    pub id: DatabaseId,
    /// Skips title-property discovery when set.
    pub title_override: Option<PropertyName>,
}

pub struct AuthorResolver {
    repository: Arc<dyn NotionRepository>,
    schemas: Arc<SchemaCache>,
    database: Option<AuthorDatabase>,
}

impl AuthorResolver {
    pub fn new(
        repository: Arc<dyn NotionRepository>,
        schemas: Arc<SchemaCache>,
        database: Option<AuthorDatabase>,
    ) -> Self {
        Self {
            repository,
            schemas,
            database,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.database.is_some()
    }

    /// Row ids for `names`, in input order, skipping names that failed.
    pub async fn resolve(&self, names: &[String]) -> Result<Vec<PageId>, AppError> {
        let Some(database) = &self.database else {
            return Ok(Vec::new());
        };
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let title_property = match &database.title_override {
            Some(name) => name.clone(),
            None => match self.schemas.title_property(&database.id).await? {
                Some(name) => name,
                None => {
                    log::warn!(
                        "Could not resolve author title property name; skipping author linking."
                    );
                    return Ok(Vec::new());
                }
            },
        };

        let mut ids = Vec::with_capacity(names.len());
        for name in names {
            match self.find_or_create(&database.id, &title_property, name).await {
                Ok(id) => ids.push(id),
                Err(err) if err.is_upstream_rejection() => {
                    log::warn!("Skipping author '{}': {}", name, err);
                }
                Err(err) => return Err(err),
            }
        }
        log::debug!("Resolved {}/{} authors", ids.len(), names.len());
        Ok(ids)
    }

    async fn find_or_create(
        &self,
        database: &DatabaseId,
        title_property: &PropertyName,
        name: &str,
    ) -> Result<PageId, AppError> {
        let existing = self
            .repository
            .find_by_title(database, title_property, name)
            .await?;
        if let Some(id) = existing.into_iter().next() {
            log::debug!("Author '{}' already exists as {}", name, id);
            return Ok(id);
        }

        let mut properties = PageProperties::new();
        properties.insert(title_property.clone(), PropertyValue::title(name));
        let payload = PagePayload::new(properties).in_database(database.clone());
        let id = self.repository.create_page(&payload).await?;
        log::info!("Created author '{}' as {}", name, id);
        Ok(id)
    }
}
