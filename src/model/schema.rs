use crate::types::PropertyName;
use std::collections::BTreeMap;
use std::fmt;

/// The type tag Notion reports for a database property.
///
/// Only the tags the page builder knows how to write are named; everything
/// else is carried as `Other` so it can be logged and then ignored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyType {
    Title,
    RichText,
    Date,
    Url,
    MultiSelect,
    Number,
    Status,
    Relation,
    Other(String),
}

impl PropertyType {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "title" => Self::Title,
            "rich_text" => Self::RichText,
            "date" => Self::Date,
            "url" => Self::Url,
            "multi_select" => Self::MultiSelect,
            "number" => Self::Number,
            "status" => Self::Status,
            "relation" => Self::Relation,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            Self::Title => "title",
            Self::RichText => "rich_text",
            Self::Date => "date",
            Self::Url => "url",
            Self::MultiSelect => "multi_select",
            Self::Number => "number",
            Self::Status => "status",
            Self::Relation => "relation",
            Self::Other(tag) => tag,
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Property names and types of one Notion database.
///
/// An empty schema is a valid value: it is what a database we could not
/// read degrades to, and it makes the page builder write the title only.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DatabaseSchema {
    properties: BTreeMap<PropertyName, PropertyType>,
}

impl DatabaseSchema {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_properties<I, N>(properties: I) -> Self
    where
        I: IntoIterator<Item = (N, PropertyType)>,
        N: Into<PropertyName>,
    {
        Self {
            properties: properties
                .into_iter()
                .map(|(name, kind)| (name.into(), kind))
                .collect(),
        }
    }

    pub fn type_of(&self, name: &str) -> Option<&PropertyType> {
        self.properties.get(name)
    }

    /// Whether `name` exists and carries exactly `expected` as its type.
    pub fn has(&self, name: &str, expected: &PropertyType) -> bool {
        self.type_of(name) == Some(expected)
    }

    /// The database's title property. Notion guarantees exactly one; the
    /// first in name order wins if a malformed response carries more.
    pub fn title_property(&self) -> Option<&PropertyName> {
        self.properties
            .iter()
            .find(|(_, kind)| **kind == PropertyType::Title)
            .map(|(name, _)| name)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}
