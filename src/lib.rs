//! folio: a static portfolio and blog generator
//!
//! Posts are markdown files with a front-matter header. They are loaded once,
//! sorted newest first, and rendered together with the portfolio sections of
//! the site configuration (about, experience, projects) into static HTML.
//! Tag filters, the popular-tags ranking and the year timeline are computed
//! by [`taxonomy`] and [`timeline`].

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod taxonomy;
pub mod templates;
pub mod timeline;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// A site on disk
#[derive(Debug, Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Source directory
    pub source_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Folio {
    /// Open the site rooted at `base_dir`. A missing config file means
    /// all defaults.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();

        let config = match config::SiteConfig::locate(&base_dir) {
            Some(path) => config::SiteConfig::load(&path)?,
            None => {
                tracing::debug!("No config file in {:?}, using defaults", base_dir);
                config::SiteConfig::default()
            }
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Build a site from an already loaded configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let source_dir = base_dir.join(&config.source_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            source_dir,
            public_dir,
        }
    }

    /// Initialize a new site
    pub fn init(&self) -> Result<()> {
        commands::init::run(self)
    }

    /// Generate the static site
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
