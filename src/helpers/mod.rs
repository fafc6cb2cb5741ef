//! Helper functions shared by the loader, the generator and templates

pub mod date;
pub mod toc;
pub mod url;

pub use date::{format_date, parse_date, year_of};
pub use toc::{toc, Heading};
pub use url::{full_url_for, post_path, post_tag_path, project_tag_path, tag_slug, url_for};
