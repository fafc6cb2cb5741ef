//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS, NON_ALPHANUMERIC};

use crate::config::SiteConfig;

/// Bytes escaped in a tag's directory name. `.` and `/` are escaped so a tag
/// can never name a parent or nested directory.
const TAG_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-');

/// Bytes escaped when a site path becomes a link
const PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?');

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/posts/") // -> "/blog/posts/"
/// url_for(&config, "posts/tags/c%23/") // -> "/blog/posts/tags/c%2523/"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = encode_url(path.trim_start_matches('/'));

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    format!("{}{}", config.url.trim_end_matches('/'), url_for(config, path))
}

/// Path of a single post view, relative to the site root
pub fn post_path(slug: &str) -> String {
    format!("posts/{}/", slug)
}

/// Path of the post index filtered by `tag`
pub fn post_tag_path(tag: &str) -> String {
    format!("posts/tags/{}/", tag_slug(tag))
}

/// Path of the home view with its projects filtered by `tag`
pub fn project_tag_path(tag: &str) -> String {
    format!("projects/tags/{}/", tag_slug(tag))
}

/// Encode a site path for use in a link, keeping `/` separators
pub fn encode_url(path: &str) -> String {
    utf8_percent_encode(path, PATH).to_string()
}

/// Directory name for a tag's filtered page.
///
/// The case-folded tag is percent-encoded, so tags differing only in case
/// share a segment while any other two tags (`C`, `C#`, `C++`) never do.
pub fn tag_slug(tag: &str) -> String {
    if tag.is_empty() {
        // `_` is always escaped in real tags, so this cannot collide
        return "_".to_string();
    }
    utf8_percent_encode(&tag.to_lowercase(), TAG_SEGMENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        SiteConfig {
            url: "https://example.com".to_string(),
            root: "/blog/".to_string(),
            ..SiteConfig::default()
        }
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "/css/style.css"), "/blog/css/style.css");
        assert_eq!(url_for(&config, "posts/"), "/blog/posts/");
        assert_eq!(url_for(&config, ""), "/blog/");
    }

    #[test]
    fn test_full_url_for() {
        let config = test_config();
        assert_eq!(
            full_url_for(&config, "/contact/"),
            "https://example.com/blog/contact/"
        );
    }

    #[test]
    fn test_tag_paths() {
        assert_eq!(post_tag_path("DevOps"), "posts/tags/devops/");
        assert_eq!(post_tag_path("devops"), "posts/tags/devops/");
        assert_eq!(post_tag_path("CI-CD"), "posts/tags/ci-cd/");
        assert_eq!(
            project_tag_path("Workplace automation"),
            "projects/tags/workplace%20automation/"
        );
        assert_eq!(tag_slug("CI/CD"), "ci%2Fcd");
        assert_eq!(tag_slug(".."), "%2E%2E");
        assert_eq!(tag_slug(""), "_");
        assert_eq!(tag_slug("_"), "%5F");
    }

    #[test]
    fn test_similar_tags_get_distinct_segments() {
        let segments: std::collections::HashSet<_> =
            ["C", "C#", "C++", "c-"].iter().map(|t| tag_slug(t)).collect();
        assert_eq!(segments.len(), 4);
        assert_eq!(tag_slug("C#"), "c%23");
        assert_eq!(tag_slug("C++"), "c%2B%2B");
    }

    #[test]
    fn test_url_for_escapes_tag_segments() {
        let config = test_config();
        assert_eq!(
            url_for(&config, &post_tag_path("C#")),
            "/blog/posts/tags/c%2523/"
        );
        assert_eq!(
            url_for(&config, &post_tag_path("Kubernetes")),
            "/blog/posts/tags/kubernetes/"
        );
    }
}
