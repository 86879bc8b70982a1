//! Content module - front-matter parsing, records and the content query

mod frontmatter;
pub mod loader;
mod markdown;
mod record;

pub use frontmatter::FrontMatter;
pub use loader::{ContentGraph, ContentLoader};
pub use markdown::BodySummary;
pub use record::{Category, ContentRecord, RecordError};
