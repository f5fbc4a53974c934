// src/mapping/page_builder.rs
//! Schema-driven construction of a book page.
//!
//! Every optional field is written only when the target database has a
//! property of that name with the expected type. Databases laid out
//! differently simply receive fewer properties instead of a Notion
//! validation error.

use super::normalize::{to_notion_date_start, truncate_summary};
use crate::constants::{
    CATALOG_ID_PROPERTY, GENRE_PROPERTY, ISBN_PROPERTY, PUBLICATION_DATE_PROPERTY,
    PUBLISHER_PROPERTY, SUMMARY_PROPERTY, TOTAL_PAGES_PROPERTY, TROPES_PROPERTY,
};
use crate::model::{
    Book, Cover, DatabaseSchema, PagePayload, PageProperties, PropertyType, PropertyValue,
};
use crate::types::{PageId, PropertyName};

/// Accumulates page properties, consulting the schema before each write.
struct SchemaGuided<'a> {
    schema: &'a DatabaseSchema,
    properties: PageProperties,
}

impl<'a> SchemaGuided<'a> {
    fn new(schema: &'a DatabaseSchema) -> Self {
        Self {
            schema,
            properties: PageProperties::new(),
        }
    }

    fn accepts(&self, name: &str, kind: PropertyType) -> bool {
        self.schema.has(name, &kind)
    }

    fn set_rich_text(&mut self, name: &str, value: Option<&str>) {
        let Some(value) = value.filter(|v| !v.is_empty()) else {
            return;
        };
        if self.accepts(name, PropertyType::RichText) {
            self.properties.insert(name, PropertyValue::rich_text(value));
        }
    }

    fn set_date(&mut self, name: &str, value: Option<&str>) {
        let Some(value) = value.filter(|v| !v.is_empty()) else {
            return;
        };
        if !self.accepts(name, PropertyType::Date) {
            return;
        }
        match to_notion_date_start(value) {
            Some(start) => self.properties.insert(name, PropertyValue::date(start)),
            None => log::debug!("Skipping {}: '{}' is not a recognisable date", name, value),
        }
    }

    fn set_multi_select(&mut self, name: &str, values: &[String]) {
        let values: Vec<&str> = values
            .iter()
            .map(String::as_str)
            .filter(|v| !v.is_empty())
            .collect();
        if values.is_empty() {
            return;
        }
        if self.accepts(name, PropertyType::MultiSelect) {
            self.properties
                .insert(name, PropertyValue::multi_select(values));
        }
    }

    fn set_number(&mut self, name: &str, value: Option<i64>) {
        let Some(value) = value else {
            return;
        };
        if self.accepts(name, PropertyType::Number) {
            self.properties.insert(name, PropertyValue::number(value));
        }
    }

    fn finish(self) -> PageProperties {
        self.properties
    }
}

/// Maps a book onto the page payload for a database with `schema`.
///
/// The title is always written under `title_property`. The author relation
/// is not handled here; see [`attach_author_relation`].
pub fn build_book_page(
    book: &Book,
    schema: &DatabaseSchema,
    title_property: &PropertyName,
) -> PagePayload {
    let mut guided = SchemaGuided::new(schema);

    let summary = book.description.as_deref().map(truncate_summary);

    guided.set_rich_text(SUMMARY_PROPERTY, summary.as_deref());
    guided.set_rich_text(GENRE_PROPERTY, book.main_category.as_deref());
    guided.set_multi_select(TROPES_PROPERTY, &book.categories);
    // A database may type "Publication Date" as either date or text; at most one of these writes.
    guided.set_date(PUBLICATION_DATE_PROPERTY, book.published.as_deref());
    guided.set_rich_text(PUBLICATION_DATE_PROPERTY, book.published.as_deref());
    guided.set_rich_text(ISBN_PROPERTY, book.isbn.as_deref());
    guided.set_rich_text(CATALOG_ID_PROPERTY, book.catalog_id.as_deref());
    guided.set_rich_text(PUBLISHER_PROPERTY, book.publisher.as_deref());
    guided.set_number(TOTAL_PAGES_PROPERTY, book.page_count);

    let mut properties = guided.finish();
    properties.insert(title_property.clone(), PropertyValue::title(&book.title));

    let mut payload = PagePayload::new(properties);
    payload.cover = book
        .cover_url
        .as_deref()
        .filter(|url| !url.is_empty())
        .map(Cover::external);
    payload
}

/// Links the page to its author rows. Nothing is written when no author resolved.
pub fn attach_author_relation(
    payload: &mut PagePayload,
    relation_property: &PropertyName,
    author_ids: Vec<PageId>,
) {
    if author_ids.is_empty() {
        return;
    }
    payload
        .properties
        .insert(relation_property.clone(), PropertyValue::relation(author_ids));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn full_schema() -> DatabaseSchema {
        DatabaseSchema::from_properties([
            ("Name", PropertyType::Title),
            ("Summary", PropertyType::RichText),
            ("Genre", PropertyType::RichText),
            ("Tropes", PropertyType::MultiSelect),
            ("Publication Date", PropertyType::Date),
            ("ISBN", PropertyType::RichText),
            ("Google Books ID", PropertyType::RichText),
            ("Publisher", PropertyType::RichText),
            ("Total Pages", PropertyType::Number),
            ("Status", PropertyType::Status),
        ])
    }

    fn dune() -> Book {
        Book {
            catalog_id: Some("B1hSG45JCX4C".into()),
            title: "Dune".into(),
            authors: vec!["Frank Herbert".into()],
            published: Some("1965-08".into()),
            isbn: Some("9780441013593".into()),
            cover_url: Some("https://books.google.com/dune.jpg".into()),
            description: Some("Set on the desert planet Arrakis.".into()),
            publisher: Some("Ace".into()),
            main_category: Some("Fiction".into()),
            categories: vec!["Science Fiction".into(), "".into(), "Classics".into()],
            page_count: Some(412),
            notes: Some("reread".into()),
        }
    }

    fn title() -> PropertyName {
        PropertyName::new("Name")
    }

    #[test]
    fn full_schema_receives_every_field() {
        let payload = build_book_page(&dune(), &full_schema(), &title());
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "properties": {
                    "Name": {"title": [{"text": {"content": "Dune"}}]},
                    "Summary": {"rich_text": [{"text": {"content": "Set on the desert planet Arrakis."}}]},
                    "Genre": {"rich_text": [{"text": {"content": "Fiction"}}]},
                    "Tropes": {"multi_select": [{"name": "Science Fiction"}, {"name": "Classics"}]},
                    "Publication Date": {"date": {"start": "1965-08-01"}},
                    "ISBN": {"rich_text": [{"text": {"content": "9780441013593"}}]},
                    "Google Books ID": {"rich_text": [{"text": {"content": "B1hSG45JCX4C"}}]},
                    "Publisher": {"rich_text": [{"text": {"content": "Ace"}}]},
                    "Total Pages": {"number": 412}
                },
                "cover": {"type": "external", "external": {"url": "https://books.google.com/dune.jpg"}}
            })
        );
    }

    #[test]
    fn genre_requires_a_rich_text_genre_property() {
        let book = Book {
            main_category: Some("Fiction".into()),
            ..Book::titled("Dune")
        };

        let without = DatabaseSchema::from_properties([("Name", PropertyType::Title)]);
        assert!(!build_book_page(&book, &without, &title())
            .properties
            .contains("Genre"));

        let as_select = DatabaseSchema::from_properties([
            ("Name", PropertyType::Title),
            ("Genre", PropertyType::from_tag("select")),
        ]);
        assert!(!build_book_page(&book, &as_select, &title())
            .properties
            .contains("Genre"));

        let with = DatabaseSchema::from_properties([
            ("Name", PropertyType::Title),
            ("Genre", PropertyType::RichText),
        ]);
        assert_eq!(
            build_book_page(&book, &with, &title()).properties.get("Genre"),
            Some(&PropertyValue::rich_text("Fiction"))
        );
    }

    #[test]
    fn title_only_book_yields_single_property_and_no_cover() {
        let schema = DatabaseSchema::from_properties([("Name", PropertyType::Title)]);
        let payload = build_book_page(&Book::titled("Dune"), &schema, &title());
        assert_eq!(payload.properties.len(), 1);
        assert_eq!(
            payload.properties.get("Name"),
            Some(&PropertyValue::title("Dune"))
        );
        assert!(payload.cover.is_none());
    }

    #[test]
    fn empty_schema_still_writes_title_and_cover() {
        let payload = build_book_page(&dune(), &DatabaseSchema::empty(), &title());
        assert_eq!(payload.properties.len(), 1);
        assert!(payload.cover.is_some());
    }

    #[test]
    fn unparseable_date_is_omitted_from_date_property() {
        let book = Book {
            published: Some("not-a-date".into()),
            ..Book::titled("Dune")
        };
        let payload = build_book_page(&book, &full_schema(), &title());
        assert!(!payload.properties.contains("Publication Date"));
    }

    #[test]
    fn text_publication_date_gets_raw_value() {
        let schema = DatabaseSchema::from_properties([
            ("Name", PropertyType::Title),
            ("Publication Date", PropertyType::RichText),
        ]);
        let book = Book {
            published: Some("circa 1965".into()),
            ..Book::titled("Dune")
        };
        assert_eq!(
            build_book_page(&book, &schema, &title())
                .properties
                .get("Publication Date"),
            Some(&PropertyValue::rich_text("circa 1965"))
        );
    }

    #[test]
    fn long_description_is_truncated() {
        let book = Book {
            description: Some("x".repeat(5000)),
            ..Book::titled("Dune")
        };
        let payload = build_book_page(&book, &full_schema(), &title());
        let Some(PropertyValue::RichText { rich_text }) = payload.properties.get("Summary") else {
            panic!("summary missing");
        };
        assert_eq!(rich_text[0].text.content.chars().count(), 1800);
    }

    #[test]
    fn blank_fields_and_empty_tropes_are_skipped() {
        let book = Book {
            isbn: Some(String::new()),
            categories: vec![String::new()],
            cover_url: Some(String::new()),
            ..Book::titled("Dune")
        };
        let payload = build_book_page(&book, &full_schema(), &title());
        assert_eq!(payload.properties.len(), 1);
        assert!(payload.cover.is_none());
    }

    #[test]
    fn author_relation_only_written_when_resolved() {
        let relation = PropertyName::new("Author");
        let mut payload = build_book_page(&Book::titled("Dune"), &full_schema(), &title());
        attach_author_relation(&mut payload, &relation, Vec::new());
        assert!(!payload.properties.contains("Author"));

        let id: PageId = serde_json::from_value(json!("author-1")).unwrap();
        attach_author_relation(&mut payload, &relation, vec![id.clone()]);
        assert_eq!(
            payload.properties.get("Author"),
            Some(&PropertyValue::relation([id]))
        );
    }
}
