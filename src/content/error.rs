//! Content errors
//!
//! Neither variant is fatal: a missing slug is rendered as a "not found"
//! view and a malformed entry is dropped from the listing.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    #[error("No post with slug '{slug}'")]
    MissingContent { slug: String },

    #[error("Malformed entry {source_path}: {reason}")]
    MalformedEntry { source_path: String, reason: String },
}

impl ContentError {
    pub fn missing(slug: &str) -> Self {
        Self::MissingContent {
            slug: slug.to_string(),
        }
    }

    pub fn malformed(source_path: &str, reason: impl Into<String>) -> Self {
        Self::MalformedEntry {
            source_path: source_path.to_string(),
            reason: reason.into(),
        }
    }
}
