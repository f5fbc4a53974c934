// src/pipeline.rs
//! The two things a client can do: search the catalog and shelve a book.
//!
//! `Library` wires the catalog, the schema cache, the author resolver and
//! the page builder together. Handlers call it; tests can build it from
//! fakes without any HTTP.

use crate::api::authors::AuthorDatabase;
use crate::api::{AuthorResolver, BookCatalog, NotionRepository, SchemaCache};
use crate::constants::FALLBACK_TITLE_PROPERTY;
use crate::error::AppError;
use crate::mapping::{attach_author_relation, build_book_page};
use crate::model::Book;
use crate::types::{DatabaseId, PageId, PropertyName};
use std::sync::Arc;

/// Everything needed to write book pages; absent when Notion is not configured.
pub struct Shelf {
    repository: Arc<dyn NotionRepository>,
    schemas: Arc<SchemaCache>,
    authors: AuthorResolver,
    database: DatabaseId,
    author_relation: PropertyName,
}

impl Shelf {
    pub fn new(
        repository: Arc<dyn NotionRepository>,
        database: DatabaseId,
        author_database: Option<AuthorDatabase>,
        author_relation: PropertyName,
    ) -> Self {
        let schemas = Arc::new(SchemaCache::new(Arc::clone(&repository)));
        let authors = AuthorResolver::new(
            Arc::clone(&repository),
            Arc::clone(&schemas),
            author_database,
        );
        Self {
            repository,
            schemas,
            authors,
            database,
            author_relation,
        }
    }

    /// Creates the page for `book` and returns its id.
    ///
    /// Calls run strictly in sequence: schema, then authors one by one,
    /// then the page itself.
    pub async fn add(&self, book: &Book) -> Result<PageId, AppError> {
        let schema = self.schemas.schema(&self.database).await?;
        let title_property = self
            .schemas
            .title_property(&self.database)
            .await?
            .unwrap_or_else(|| PropertyName::new(FALLBACK_TITLE_PROPERTY));

        let mut payload = build_book_page(book, &schema, &title_property);

        if self.authors.is_enabled() {
            let author_ids = self.authors.resolve(&book.authors).await?;
            attach_author_relation(&mut payload, &self.author_relation, author_ids);
        }

        let payload = payload.in_database(self.database.clone());
        log::debug!(
            "Creating page '{}' with properties: {:?}",
            book.title,
            payload.properties.names().collect::<Vec<_>>()
        );
        let id = self.repository.create_page(&payload).await?;
        log::info!("Added '{}' as page {}", book.title, id);
        Ok(id)
    }
}

/// Search and add, as exposed over HTTP.
pub struct Library {
    catalog: Arc<dyn BookCatalog>,
    shelf: Option<Shelf>,
}

impl Library {
    pub fn new(catalog: Arc<dyn BookCatalog>, shelf: Option<Shelf>) -> Self {
        Self { catalog, shelf }
    }

    pub async fn search(&self, query: &str, max_results: i64) -> Result<Vec<Book>, AppError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::InvalidRequest(
                "query parameter 'q' must not be empty".to_string(),
            ));
        }
        self.catalog.search(query, max_results).await
    }

    pub async fn add(&self, book: &Book) -> Result<PageId, AppError> {
        book.validate()?;
        let shelf = self.shelf.as_ref().ok_or_else(|| {
            AppError::MissingConfiguration("NOTION_TOKEN and NOTION_DATABASE_ID".to_string())
        })?;
        shelf.add(book).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DatabaseSchema, PagePayload, PropertyType, PropertyValue};
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;

    struct NoCatalog;

    #[async_trait::async_trait]
    impl BookCatalog for NoCatalog {
        async fn search(&self, query: &str, _: i64) -> Result<Vec<Book>, AppError> {
            Ok(vec![Book::titled(query)])
        }
    }

    /// Records created pages; the main database has only a title called "Book".
    #[derive(Default)]
    struct Recorder {
        pages: Mutex<Vec<PagePayload>>,
    }

    #[async_trait::async_trait]
    impl NotionRepository for Recorder {
        async fn retrieve_schema(&self, _: &DatabaseId) -> Result<DatabaseSchema, AppError> {
            Ok(DatabaseSchema::from_properties([("Book", PropertyType::Title)]))
        }

        async fn find_by_title(
            &self,
            _: &DatabaseId,
            _: &PropertyName,
            _: &str,
        ) -> Result<Vec<PageId>, AppError> {
            Ok(Vec::new())
        }

        async fn create_page(&self, payload: &PagePayload) -> Result<PageId, AppError> {
            self.pages.lock().push(payload.clone());
            Ok(serde_json::from_value(serde_json::json!("page-1")).unwrap())
        }
    }

    fn database() -> DatabaseId {
        DatabaseId::parse("550e8400e29b41d4a716446655440000").unwrap()
    }

    #[tokio::test]
    async fn add_without_notion_config_is_misconfigured() {
        let library = Library::new(Arc::new(NoCatalog), None);
        let err = library.add(&Book::titled("Dune")).await.unwrap_err();
        assert!(matches!(err, AppError::MissingConfiguration(_)));
    }

    #[tokio::test]
    async fn blank_title_is_rejected_before_any_call() {
        let recorder = Arc::new(Recorder::default());
        let shelf = Shelf::new(recorder.clone(), database(), None, "Author".into());
        let library = Library::new(Arc::new(NoCatalog), Some(shelf));

        let err = library.add(&Book::titled("")).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert!(recorder.pages.lock().is_empty());
    }

    #[tokio::test]
    async fn add_uses_discovered_title_and_parent() {
        let recorder = Arc::new(Recorder::default());
        let shelf = Shelf::new(recorder.clone(), database(), None, "Author".into());
        let library = Library::new(Arc::new(NoCatalog), Some(shelf));

        let mut book = Book::titled("Dune");
        book.authors = vec!["Frank Herbert".into()];
        let id = library.add(&book).await.unwrap();
        assert_eq!(id.as_str(), "page-1");

        let pages = recorder.pages.lock();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].properties.len(), 1);
        assert_eq!(
            pages[0].properties.get("Book"),
            Some(&PropertyValue::title("Dune"))
        );
        assert_eq!(
            pages[0].parent.as_ref().map(|p| p.database_id.clone()),
            Some(database())
        );
    }

    #[tokio::test]
    async fn blank_query_is_rejected() {
        let library = Library::new(Arc::new(NoCatalog), None);
        assert!(matches!(
            library.search("   ", 10).await,
            Err(AppError::InvalidRequest(_))
        ));
        assert_eq!(library.search("dune", 10).await.unwrap()[0].title, "dune");
    }
}
