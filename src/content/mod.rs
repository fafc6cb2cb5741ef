//! Content module - posts, projects, front-matter and markdown

mod error;
mod frontmatter;
pub mod loader;
mod markdown;
mod post;
mod registry;

pub use error::ContentError;
pub use frontmatter::FrontMatter;
pub use markdown::MarkdownRenderer;
pub use post::{Post, Project, EPOCH_DATE};
pub use registry::{parse_entry, ContentEntry, ContentRegistry};
