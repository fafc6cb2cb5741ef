//! Site configuration (_config.yml / _config.toml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::content::Project;

/// Config file names, in lookup order
pub const CONFIG_FILES: [&str; 3] = ["_config.yml", "_config.yaml", "_config.toml"];

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub tagline: String,
    pub author: String,
    pub email: String,
    pub location: String,
    pub resume_url: Option<String>,
    pub logo_url: Option<String>,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub source_dir: String,
    pub public_dir: String,
    pub posts_dir: String,

    // Writing
    pub render_drafts: bool,
    pub date_format: String,
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Views
    pub appearance: Appearance,
    pub popular_tags: usize,
    pub latest_posts: usize,
    pub related_posts: usize,
    pub toc_min_headings: usize,

    // Portfolio
    #[serde(default)]
    pub social: SocialLinks,
    #[serde(default)]
    pub about: About,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub projects: Vec<Project>,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            tagline: String::new(),
            author: "John Doe".to_string(),
            email: String::new(),
            location: String::new(),
            resume_url: None,
            logo_url: None,
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            source_dir: "source".to_string(),
            public_dir: "public".to_string(),
            posts_dir: "_posts".to_string(),

            render_drafts: false,
            date_format: "MMM D, YYYY".to_string(),
            highlight: HighlightConfig::default(),

            appearance: Appearance::default(),
            popular_tags: 12,
            latest_posts: 3,
            related_posts: 3,
            toc_min_headings: 3,

            social: SocialLinks::default(),
            about: About::default(),
            experience: Vec::new(),
            projects: Vec::new(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a YAML or TOML file, chosen by extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;

        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::from_str(&content)
                .with_context(|| format!("Failed to parse config {:?}", path))?,
            _ => serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse config {:?}", path))?,
        };

        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Find the config file in a site directory
    pub fn locate(base_dir: &Path) -> Option<PathBuf> {
        CONFIG_FILES
            .iter()
            .map(|name| base_dir.join(name))
            .find(|p| p.exists())
    }
}

/// Initial light/dark appearance of generated pages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    #[default]
    Light,
    Dark,
    /// Follow `prefers-color-scheme` in the browser
    System,
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLinks {
    pub github: Option<String>,
    pub linkedin: Option<String>,
}

/// About section of the home view
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct About {
    pub blurb: String,
    /// "At a glance" bullet points
    pub highlights: Vec<String>,
}

/// One role in the experience list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub role: String,
    pub company: String,
    pub period: String,
    pub location: String,
    pub bullets: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.popular_tags, 12);
        assert_eq!(config.latest_posts, 3);
        assert_eq!(config.toc_min_headings, 3);
        assert_eq!(config.appearance, Appearance::Light);
        assert_eq!(config.posts_dir, "_posts");
    }

    #[test]
    fn test_parse_yaml_config() {
        let yaml = r#"
title: Waltzing in Tryst
tagline: DevOps • AWS • Docker
appearance: dark
popular_tags: 5
social:
  github: https://github.com/someone
about:
  blurb: Engineer.
  highlights:
    - Terraform
experience:
  - role: DevOps Engineer
    company: Acme
    period: 2023 - Present
    bullets:
      - Built pipelines
projects:
  - name: Site
    link: https://github.com/someone/site
    description: This site
    tags: [Docker, AWS]
  - name: Offline tool
    description: No link
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Waltzing in Tryst");
        assert_eq!(config.appearance, Appearance::Dark);
        assert_eq!(config.popular_tags, 5);
        assert_eq!(config.related_posts, 3);
        assert_eq!(
            config.social.github.as_deref(),
            Some("https://github.com/someone")
        );
        assert_eq!(config.about.highlights, vec!["Terraform"]);
        assert_eq!(config.experience[0].bullets.len(), 1);
        assert_eq!(config.projects.len(), 2);
        assert_eq!(config.projects[0].tags, vec!["Docker", "AWS"]);
        assert!(config.projects[1].link.is_none());
        assert!(config.projects[1].tags.is_empty());
    }

    #[test]
    fn test_load_toml_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.toml");
        fs::write(
            &path,
            r#"
title = "From TOML"
latest_posts = 5

[[projects]]
name = "Blocker"
description = "Blocks games"
tags = ["Python"]
"#,
        )
        .unwrap();

        assert_eq!(SiteConfig::locate(dir.path()), Some(path.clone()));
        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.title, "From TOML");
        assert_eq!(config.latest_posts, 5);
        assert_eq!(config.projects[0].name, "Blocker");
    }

    #[test]
    fn test_locate_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(SiteConfig::locate(dir.path()), None);
    }
}
