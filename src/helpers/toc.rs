//! Table of contents extraction from rendered post HTML

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    static ref HEADING_RE: Regex =
        Regex::new(r#"(?s)<h([2-4])\b([^>]*)>(.*?)</h[2-4]>"#).expect("valid heading regex");
    static ref ID_RE: Regex = Regex::new(r#"\bid="([^"]+)""#).expect("valid id regex");
    static ref TAG_RE: Regex = Regex::new(r"<[^>]*>").expect("valid tag regex");
}

/// A heading linked from the table of contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    pub id: String,
    /// Heading text with markup removed (entities are left escaped)
    pub text: String,
    pub level: u8,
}

/// Collect `<h2>`..`<h4>` headings that carry an `id`, in document order
pub fn headings(html: &str) -> Vec<Heading> {
    HEADING_RE
        .captures_iter(html)
        .filter_map(|caps| {
            let level = caps[1].parse().ok()?;
            let id = ID_RE.captures(&caps[2])?[1].to_string();
            let text = TAG_RE.replace_all(&caps[3], "").trim().to_string();
            Some(Heading { id, text, level })
        })
        .collect()
}

/// Headings for the "On this page" box, or `None` when the post has fewer
/// than `min_headings` of them.
pub fn toc(html: &str, min_headings: usize) -> Option<Vec<Heading>> {
    let found = headings(html);
    (!found.is_empty() && found.len() >= min_headings).then_some(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    const POST: &str = r#"<h1 id="title">Title</h1>
<p>intro</p>
<h2 id="setup">Setup</h2>
<h3 id="install-kubectl">Install <code>kubectl</code></h3>
<h4 id="notes">Notes &amp; caveats</h4>
<h5 id="deep">Too deep</h5>
<h2>No id</h2>"#;

    #[test]
    fn test_headings_levels_two_to_four_with_ids() {
        let found = headings(POST);
        assert_eq!(
            found,
            vec![
                Heading {
                    id: "setup".into(),
                    text: "Setup".into(),
                    level: 2
                },
                Heading {
                    id: "install-kubectl".into(),
                    text: "Install kubectl".into(),
                    level: 3
                },
                Heading {
                    id: "notes".into(),
                    text: "Notes &amp; caveats".into(),
                    level: 4
                },
            ]
        );
    }

    #[test]
    fn test_toc_threshold() {
        assert_eq!(toc(POST, 3).map(|h| h.len()), Some(3));
        assert!(toc(POST, 4).is_none());
        assert!(toc("<p>nothing</p>", 0).is_none());
    }
}
