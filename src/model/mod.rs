//! Domain model: the book a client works with, the schema a database
//! advertises, and the page payload sent back to Notion.

mod book;
mod property_value;
mod schema;

pub use book::Book;
pub use property_value::{
    Cover, DateInput, ExternalFile, PagePayload, PageProperties, Parent, PropertyValue,
    RelationRef, RichTextInput, SelectInput, TextContent,
};
pub use schema::{DatabaseSchema, PropertyType};
