//! Content registry - the sorted, immutable post collection

use std::collections::HashSet;

use super::{ContentError, FrontMatter, MarkdownRenderer, Post, EPOCH_DATE};

/// One item of the content manifest: a source path and its raw text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentEntry {
    /// Path relative to the posts directory, e.g. `2024/helm-basics.md`
    pub source: String,
    pub text: String,
}

impl ContentEntry {
    pub fn new(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            text: text.into(),
        }
    }

    /// File name without directories or extension
    fn stem(&self) -> &str {
        let name = self.source.rsplit(['/', '\\']).next().unwrap_or(&self.source);
        name.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(name)
    }
}

/// All posts, newest first
#[derive(Debug, Clone, Default)]
pub struct ContentRegistry {
    posts: Vec<Post>,
}

impl ContentRegistry {
    /// Build the registry from a manifest.
    ///
    /// Broken entries are logged and skipped; the rest still load.
    pub fn from_entries(
        entries: &[ContentEntry],
        renderer: &MarkdownRenderer,
        include_drafts: bool,
    ) -> Self {
        let mut posts = Vec::with_capacity(entries.len());
        let mut slugs = HashSet::new();

        for entry in entries {
            match parse_entry(entry, renderer, include_drafts) {
                Ok(Some(post)) => {
                    if slugs.insert(post.slug.clone()) {
                        posts.push(post);
                    } else {
                        tracing::warn!(
                            "Skipping {}: slug '{}' is already used",
                            entry.source,
                            post.slug
                        );
                    }
                }
                Ok(None) => tracing::debug!("Skipping draft {}", entry.source),
                Err(e) => tracing::warn!("{}", e),
            }
        }

        Self::from_posts(posts)
    }

    /// Wrap already-built posts, sorting them newest first.
    ///
    /// The sort is stable: posts with equal dates keep their input order.
    pub fn from_posts(mut posts: Vec<Post>) -> Self {
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        Self { posts }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Look up a post by slug
    pub fn get(&self, slug: &str) -> Result<&Post, ContentError> {
        self.posts
            .iter()
            .find(|p| p.slug == slug)
            .ok_or_else(|| ContentError::missing(slug))
    }

    /// The `n` newest posts
    pub fn latest(&self, n: usize) -> &[Post] {
        &self.posts[..n.min(self.posts.len())]
    }
}

/// Turn one manifest entry into a post, attaching defaults for missing
/// metadata. Returns `Ok(None)` for drafts that should not be published.
pub fn parse_entry(
    entry: &ContentEntry,
    renderer: &MarkdownRenderer,
    include_drafts: bool,
) -> Result<Option<Post>, ContentError> {
    let (fm, body) = FrontMatter::parse(&entry.text)
        .map_err(|e| ContentError::malformed(&entry.source, e.to_string()))?;

    if fm.draft && !include_drafts {
        return Ok(None);
    }

    if body.trim().is_empty() {
        return Err(ContentError::malformed(&entry.source, "missing body"));
    }

    let slug = fm
        .slug
        .as_deref()
        .map(slug::slugify)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| slug::slugify(entry.stem()));
    if slug.is_empty() {
        return Err(ContentError::malformed(&entry.source, "cannot derive a slug"));
    }

    let content = renderer
        .render(body)
        .map_err(|e| ContentError::malformed(&entry.source, e.to_string()))?;

    Ok(Some(Post {
        title: fm
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| slug.clone()),
        date: fm.date.unwrap_or_else(|| EPOCH_DATE.to_string()),
        summary: fm.summary.unwrap_or_default(),
        tags: fm.tags,
        body: body.to_string(),
        content,
        source: entry.source.clone(),
        slug,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::{distinct_tags, tag_frequency, TagCount};
    use crate::timeline::group_by_year;

    fn entry(name: &str, date: &str, tags: &str) -> ContentEntry {
        ContentEntry::new(
            format!("{}.md", name),
            format!(
                "---\ntitle: {}\ndate: {}\ntags: [{}]\n---\nBody of {}\n",
                name, date, tags, name
            ),
        )
    }

    fn three_posts() -> ContentRegistry {
        let renderer = MarkdownRenderer::new();
        ContentRegistry::from_entries(
            &[
                entry("new-year", "2024-01-01", "Docker"),
                entry("summer", "2023-06-15", "Terraform, Docker"),
                entry("may-day", "2024-05-01", "Docker"),
            ],
            &renderer,
            false,
        )
    }

    #[test]
    fn test_round_trip_three_posts() {
        let registry = three_posts();
        let dates: Vec<_> = registry.posts().iter().map(|p| p.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-05-01", "2024-01-01", "2023-06-15"]);

        assert_eq!(distinct_tags(registry.posts()), vec!["Docker", "Terraform"]);
        assert_eq!(
            tag_frequency(registry.posts()),
            vec![TagCount::new("Docker", 3), TagCount::new("Terraform", 1)]
        );

        let groups = group_by_year(registry.posts());
        let shape: Vec<(String, Vec<&str>)> = groups
            .iter()
            .map(|g| {
                (
                    g.year.clone(),
                    g.items.iter().map(|p| p.date.as_str()).collect(),
                )
            })
            .collect();
        assert_eq!(
            shape,
            vec![
                ("2024".to_string(), vec!["2024-05-01", "2024-01-01"]),
                ("2023".to_string(), vec!["2023-06-15"]),
            ]
        );
    }

    #[test]
    fn test_defaults_for_missing_metadata() {
        let renderer = MarkdownRenderer::new();
        let registry = ContentRegistry::from_entries(
            &[
                ContentEntry::new("bare-post.md", "Just a body, no header.\n"),
                entry("dated", "2020-02-02", "Go"),
            ],
            &renderer,
            false,
        );

        let bare = registry.get("bare-post").unwrap();
        assert_eq!(bare.title, "bare-post");
        assert_eq!(bare.date, EPOCH_DATE);
        assert_eq!(bare.summary, "");
        assert!(bare.tags.is_empty());
        assert!(bare.content.contains("Just a body"));

        // The epoch fallback sorts last
        assert_eq!(registry.posts().last().unwrap().slug, "bare-post");
    }

    #[test]
    fn test_missing_slug_is_missing_content() {
        let registry = three_posts();
        assert_eq!(
            registry.get("nope"),
            Err(ContentError::MissingContent {
                slug: "nope".to_string()
            })
        );
    }

    #[test]
    fn test_entry_without_body_is_skipped() {
        let renderer = MarkdownRenderer::new();
        let empty = ContentEntry::new("empty.md", "---\ntitle: Empty\n---\n   \n");
        assert!(matches!(
            parse_entry(&empty, &renderer, false),
            Err(ContentError::MalformedEntry { .. })
        ));

        let registry = ContentRegistry::from_entries(
            &[empty, entry("ok", "2024-01-01", "")],
            &renderer,
            false,
        );
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.posts()[0].slug, "ok");
    }

    #[test]
    fn test_invalid_json_header_is_skipped() {
        let renderer = MarkdownRenderer::new();
        let broken = ContentEntry::new("broken.md", "{\"title\": }\nBody\n");
        let registry = ContentRegistry::from_entries(
            &[broken, entry("fine", "2024-01-01", "")],
            &renderer,
            false,
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_slug_from_front_matter_and_path() {
        let renderer = MarkdownRenderer::new();
        let custom = ContentEntry::new("2024/whatever.md", "---\nslug: My Custom Slug\n---\nBody\n");
        let nested = ContentEntry::new("2024/Helm Basics.markdown", "Body\n");

        let post = parse_entry(&custom, &renderer, false).unwrap().unwrap();
        assert_eq!(post.slug, "my-custom-slug");
        let post = parse_entry(&nested, &renderer, false).unwrap().unwrap();
        assert_eq!(post.slug, "helm-basics");
        assert_eq!(post.source, "2024/Helm Basics.markdown");
    }

    #[test]
    fn test_duplicate_slug_keeps_first() {
        let renderer = MarkdownRenderer::new();
        let registry = ContentRegistry::from_entries(
            &[
                ContentEntry::new("a/post.md", "---\ntitle: First\n---\nOne\n"),
                ContentEntry::new("b/post.md", "---\ntitle: Second\n---\nTwo\n"),
            ],
            &renderer,
            false,
        );
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("post").unwrap().title, "First");
    }

    #[test]
    fn test_drafts() {
        let renderer = MarkdownRenderer::new();
        let draft = ContentEntry::new("wip.md", "---\ntitle: WIP\ndraft: true\n---\nSoon\n");
        assert_eq!(parse_entry(&draft, &renderer, false).unwrap(), None);
        assert!(parse_entry(&draft, &renderer, true).unwrap().is_some());
    }

    #[test]
    fn test_equal_dates_keep_manifest_order() {
        let renderer = MarkdownRenderer::new();
        let registry = ContentRegistry::from_entries(
            &[
                entry("first", "2024-01-01", ""),
                entry("second", "2024-01-01", ""),
                entry("third", "2024-01-01", ""),
            ],
            &renderer,
            false,
        );
        let slugs: Vec<_> = registry.posts().iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_latest() {
        let registry = three_posts();
        assert_eq!(registry.latest(2).len(), 2);
        assert_eq!(registry.latest(2)[0].slug, "may-day");
        assert_eq!(registry.latest(10).len(), 3);
    }
}
