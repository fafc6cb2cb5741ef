//! Content loader - builds the manifest from the posts directory

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{ContentEntry, ContentRegistry, MarkdownRenderer};
use crate::Folio;

/// Loads posts from `<source_dir>/<posts_dir>`
pub struct ContentLoader<'a> {
    folio: &'a Folio,
    renderer: MarkdownRenderer,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(folio: &'a Folio) -> Self {
        let highlight = &folio.config.highlight;
        let renderer = MarkdownRenderer::with_options(&highlight.theme, highlight.line_number);
        Self { folio, renderer }
    }

    pub fn posts_dir(&self) -> PathBuf {
        self.folio.source_dir.join(&self.folio.config.posts_dir)
    }

    /// Scan the posts directory once and list every markdown file in path
    /// order. Files that cannot be read are logged and left out.
    pub fn manifest(&self) -> Result<Vec<ContentEntry>> {
        let posts_dir = self.posts_dir();
        if !posts_dir.exists() {
            tracing::warn!("Posts directory {:?} does not exist", posts_dir);
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();

        for entry in WalkDir::new(&posts_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) {
                continue;
            }

            let source = path
                .strip_prefix(&posts_dir)
                .unwrap_or(path)
                .to_string_lossy()
                .replace('\\', "/");

            match fs::read_to_string(path) {
                Ok(text) => entries.push(ContentEntry::new(source, text)),
                Err(e) => tracing::warn!("Failed to read post {:?}: {}", path, e),
            }
        }

        tracing::debug!("Manifest has {} entries", entries.len());
        Ok(entries)
    }

    /// Load all posts, newest first
    pub fn load_all(&self) -> Result<ContentRegistry> {
        let entries = self.manifest()?;
        Ok(ContentRegistry::from_entries(
            &entries,
            &self.renderer,
            self.folio.config.render_drafts,
        ))
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}
