//! Post and Project models

use serde::{Deserialize, Serialize};

use crate::taxonomy::Tagged;
use crate::timeline::Dated;

/// Date given to posts whose front-matter has none. Sorts after every real date.
pub const EPOCH_DATE: &str = "1970-01-01";

/// A blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Unique, URL-safe identifier
    pub slug: String,

    pub title: String,

    /// ISO-8601 date as written in front-matter
    pub date: String,

    /// Empty when the front-matter has none
    pub summary: String,

    pub tags: Vec<String>,

    /// Raw markdown body
    pub body: String,

    /// Rendered HTML body
    pub content: String,

    /// Source file path relative to the posts directory
    pub source: String,
}

impl Post {
    /// Create a post with defaults for everything but the identity fields
    pub fn new(slug: impl Into<String>, date: impl Into<String>) -> Self {
        let slug = slug.into();
        Self {
            title: slug.clone(),
            source: format!("{}.md", slug),
            slug,
            date: date.into(),
            summary: String::new(),
            tags: Vec::new(),
            body: String::new(),
            content: String::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

impl Tagged for Post {
    fn tags(&self) -> &[String] {
        &self.tags
    }
}

impl Dated for Post {
    fn date(&self) -> &str {
        &self.date
    }
}

/// A portfolio project, declared in the site configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub name: String,
    pub link: Option<String>,
    pub description: String,
    pub tags: Vec<String>,
}

impl Tagged for Project {
    fn tags(&self) -> &[String] {
        &self.tags
    }
}
