// src/api/cache.rs
//! Process-lifetime cache of database schemas.
//!
//! A database's properties are fetched once and kept until restart;
//! schema edits made in Notion are not observed before then. The cache is
//! a plain concurrent map: two requests racing on a cold entry may both
//! fetch, and the later write wins.

use super::NotionRepository;
use crate::error::AppError;
use crate::model::DatabaseSchema;
use crate::types::{DatabaseId, PropertyName};
use dashmap::DashMap;
use std::sync::Arc;

/// Schema lookups backed by a [`NotionRepository`].
pub struct SchemaCache {
    repository: Arc<dyn NotionRepository>,
    schemas: DashMap<DatabaseId, Arc<DatabaseSchema>>,
    title_properties: DashMap<DatabaseId, PropertyName>,
}

impl SchemaCache {
    pub fn new(repository: Arc<dyn NotionRepository>) -> Self {
        Self {
            repository,
            schemas: DashMap::new(),
            title_properties: DashMap::new(),
        }
    }

    /// The schema of `database`, fetched on first use.
    ///
    /// A database Notion refuses to describe is cached as the empty schema,
    /// so pages are still created with their title only. Transport failures
    /// are returned to the caller and nothing is cached.
    pub async fn schema(&self, database: &DatabaseId) -> Result<Arc<DatabaseSchema>, AppError> {
        if let Some(cached) = self.schemas.get(database) {
            return Ok(Arc::clone(cached.value()));
        }

        match self.fetch(database).await {
            Ok(schema) => Ok(schema),
            Err(err) if err.is_upstream_rejection() => {
                log::warn!(
                    "Using empty schema for database {}: {}",
                    database.as_str(),
                    err
                );
                let empty = Arc::new(DatabaseSchema::empty());
                self.schemas.insert(database.clone(), Arc::clone(&empty));
                Ok(empty)
            }
            Err(err) => Err(err),
        }
    }

    /// Name of the title property of `database`.
    ///
    /// `Ok(None)` means it could not be determined; that outcome is not
    /// cached, so the next call asks Notion again.
    pub async fn title_property(
        &self,
        database: &DatabaseId,
    ) -> Result<Option<PropertyName>, AppError> {
        if let Some(cached) = self.title_properties.get(database) {
            return Ok(Some(cached.value().clone()));
        }

        let known = self
            .schemas
            .get(database)
            .filter(|schema| !schema.is_empty())
            .map(|schema| Arc::clone(schema.value()));
        let schema = match known {
            Some(schema) => schema,
            None => match self.fetch(database).await {
                Ok(schema) => schema,
                Err(err) if err.is_upstream_rejection() => {
                    log::warn!(
                        "Could not read title property of database {}: {}",
                        database.as_str(),
                        err
                    );
                    return Ok(None);
                }
                Err(err) => return Err(err),
            },
        };

        Ok(schema.title_property().cloned())
    }

    /// Fetches and stores a schema, remembering its title property.
    async fn fetch(&self, database: &DatabaseId) -> Result<Arc<DatabaseSchema>, AppError> {
        log::info!("Fetching schema for database {}", database.as_str());
        let schema = Arc::new(self.repository.retrieve_schema(database).await?);
        log::debug!(
            "Database {} has {} properties",
            database.as_str(),
            schema.len()
        );

        if let Some(title) = schema.title_property() {
            self.title_properties
                .insert(database.clone(), title.clone());
        }
        self.schemas.insert(database.clone(), Arc::clone(&schema));
        Ok(schema)
    }
}
