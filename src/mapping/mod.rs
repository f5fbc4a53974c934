//! Mapping from the client's `Book` to a Notion page payload.

mod normalize;
mod page_builder;

pub use normalize::{to_notion_date_start, truncate_summary};
pub use page_builder::{attach_author_relation, build_book_page};
