//! Create a new post

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use crate::Folio;

const PLACEHOLDER_BODY: &str = "Write your post here.";

/// Front-matter written for a new post
#[derive(Debug, Serialize)]
struct NewPost<'a> {
    title: &'a str,
    date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<&'a str>,
    tags: &'a [String],
}

/// Create `<posts_dir>/<slug>.md` and return its path
pub fn create_post(
    folio: &Folio,
    title: &str,
    tags: &[String],
    summary: Option<&str>,
) -> Result<PathBuf> {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a file name from title {:?}", title);
    }

    let target_dir = folio.source_dir.join(&folio.config.posts_dir);
    fs::create_dir_all(&target_dir)?;

    let file_path = target_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let header = NewPost {
        title,
        date: chrono::Local::now().format("%Y-%m-%d").to_string(),
        summary,
        tags,
    };
    let yaml = serde_yaml::to_string(&header).context("Failed to write front-matter")?;
    // The loader skips posts without a body
    let content = format!("---\n{}---\n\n{}\n", yaml, PLACEHOLDER_BODY);

    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

/// Split a `--tags a,b` argument into tags
pub fn parse_tags(arg: Option<&str>) -> Vec<String> {
    arg.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::loader::ContentLoader;
    use crate::content::FrontMatter;

    #[test]
    fn test_create_post_writes_front_matter() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        let tags = parse_tags(Some("Helm, Kubernetes,"));

        let path = create_post(&folio, "Helm: the basics", &tags, Some("Charts")).unwrap();
        assert!(path.ends_with("source/_posts/helm-the-basics.md"));

        let text = fs::read_to_string(&path).unwrap();
        let (fm, body) = FrontMatter::parse(&text).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Helm: the basics"));
        assert_eq!(fm.summary.as_deref(), Some("Charts"));
        assert_eq!(fm.tags, vec!["Helm", "Kubernetes"]);
        assert!(fm.date.is_some());
        assert_eq!(body.trim(), PLACEHOLDER_BODY);

        let registry = ContentLoader::new(&folio).load_all().unwrap();
        assert_eq!(registry.len(), 1);
        let post = registry.get("helm-the-basics").unwrap();
        assert_eq!(post.title, "Helm: the basics");
        assert_eq!(post.tags, vec!["Helm", "Kubernetes"]);
    }

    #[test]
    fn test_create_post_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        create_post(&folio, "Twice", &[], None).unwrap();
        assert!(create_post(&folio, "Twice", &[], None).is_err());
    }

    #[test]
    fn test_parse_tags() {
        assert!(parse_tags(None).is_empty());
        assert_eq!(parse_tags(Some("a,b")), vec!["a", "b"]);
    }
}
