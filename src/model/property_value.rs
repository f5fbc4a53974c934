use crate::types::{DatabaseId, PageId, PropertyName};
use serde::Serialize;
use std::collections::BTreeMap;

/// Plain text wrapped the way Notion expects rich text input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RichTextInput {
    pub text: TextContent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextContent {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateInput {
    pub start: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectInput {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationRef {
    pub id: PageId,
}

/// A property value to be written to a page, one variant per property type we write.
///
/// Serializes to exactly the object Notion accepts under the property's
/// name, e.g. `{"number": 412}` or `{"rich_text": [{"text": {"content": "..."}}]}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Title { title: Vec<RichTextInput> },
    RichText { rich_text: Vec<RichTextInput> },
    Date { date: DateInput },
    MultiSelect { multi_select: Vec<SelectInput> },
    Number { number: i64 },
    Relation { relation: Vec<RelationRef> },
}

fn text_run(content: impl Into<String>) -> Vec<RichTextInput> {
    vec![RichTextInput {
        text: TextContent {
            content: content.into(),
        },
    }]
}

impl PropertyValue {
    pub fn title(content: impl Into<String>) -> Self {
        Self::Title {
            title: text_run(content),
        }
    }

    pub fn rich_text(content: impl Into<String>) -> Self {
        Self::RichText {
            rich_text: text_run(content),
        }
    }

    /// `start` must already be an ISO date (`YYYY-MM-DD`).
    pub fn date(start: impl Into<String>) -> Self {
        Self::Date {
            date: DateInput {
                start: start.into(),
            },
        }
    }

    pub fn multi_select<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::MultiSelect {
            multi_select: names
                .into_iter()
                .map(|name| SelectInput { name: name.into() })
                .collect(),
        }
    }

    pub fn number(number: i64) -> Self {
        Self::Number { number }
    }

    pub fn relation(ids: impl IntoIterator<Item = PageId>) -> Self {
        Self::Relation {
            relation: ids.into_iter().map(|id| RelationRef { id }).collect(),
        }
    }

    /// Returns the Notion API type name for this property value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Title { .. } => "title",
            Self::RichText { .. } => "rich_text",
            Self::Date { .. } => "date",
            Self::MultiSelect { .. } => "multi_select",
            Self::Number { .. } => "number",
            Self::Relation { .. } => "relation",
        }
    }
}

/// The `properties` object of a page-create request.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct PageProperties(BTreeMap<PropertyName, PropertyValue>);

impl PageProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<PropertyName>, value: PropertyValue) {
        self.0.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &PropertyName> {
        self.0.keys()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parent {
    pub database_id: DatabaseId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExternalFile {
    pub url: String,
}

/// Page cover; only externally hosted images are ever set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Cover {
    External { external: ExternalFile },
}

impl Cover {
    pub fn external(url: impl Into<String>) -> Self {
        Self::External {
            external: ExternalFile { url: url.into() },
        }
    }
}

/// Body of `POST /v1/pages`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PagePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<Parent>,
    pub properties: PageProperties,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<Cover>,
}

impl PagePayload {
    pub fn new(properties: PageProperties) -> Self {
        Self {
            parent: None,
            properties,
            cover: None,
        }
    }

    pub fn in_database(mut self, database_id: DatabaseId) -> Self {
        self.parent = Some(Parent { database_id });
        self
    }
}
