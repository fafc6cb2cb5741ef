//! Built-in site templates using the Tera template engine
//!
//! Templates are embedded in the binary; a site needs no theme directory.

use anyhow::Result;
use serde::Serialize;
use tera::{Context, Tera};

use crate::config::{About, Appearance, Experience, SocialLinks};
use crate::helpers::Heading;

/// Stylesheet written to `css/style.css`
pub const STYLESHEET: &str = include_str!("site/style.css");

/// Template renderer with the embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // URLs and rendered post bodies are inserted as-is; free text is
        // escaped explicitly in the templates.
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("home.html", include_str!("site/home.html")),
            ("posts.html", include_str!("site/posts.html")),
            ("post.html", include_str!("site/post.html")),
            ("contact.html", include_str!("site/contact.html")),
            ("not_found.html", include_str!("site/not_found.html")),
            // Partials
            (
                "partials/filter_bar.html",
                include_str!("site/partials/filter_bar.html"),
            ),
            (
                "partials/sidebar.html",
                include_str!("site/partials/sidebar.html"),
            ),
        ])?;

        tera.register_filter("plural", plural_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: `{{ count | plural(word="post") }}` -> "1 post", "3 posts"
fn plural_filter(
    value: &tera::Value,
    args: &std::collections::HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let count = tera::try_get_value!("plural", "value", u64, value);
    let word = match args.get("word") {
        Some(val) => tera::try_get_value!("plural", "word", String, val),
        None => "item".to_string(),
    };
    let suffix = if count == 1 { "" } else { "s" };
    Ok(tera::Value::String(format!("{} {}{}", count, word, suffix)))
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub tagline: String,
    pub author: String,
    pub email: String,
    pub location: String,
    pub resume_url: Option<String>,
    pub logo_url: Option<String>,
    pub language: String,
    pub appearance: Appearance,
    pub social: SocialLinks,
    pub about: About,
    pub experience: Vec<Experience>,
    pub home_url: String,
    pub posts_url: String,
    pub contact_url: String,
    pub css_url: String,
    pub current_year: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostCard {
    pub slug: String,
    pub title: String,
    pub date: String,
    pub date_display: String,
    pub summary: String,
    pub url: String,
    pub tags: Vec<TagLink>,
}

/// A clickable tag: filter button, post tag or popular-tags entry
#[derive(Debug, Clone, Serialize)]
pub struct TagLink {
    pub name: String,
    pub url: String,
    pub count: Option<usize>,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterBar {
    pub all_url: String,
    /// No tag selected
    pub all_active: bool,
    pub tags: Vec<TagLink>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimelineYear {
    pub year: String,
    pub posts: Vec<PostCard>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectCard {
    pub name: String,
    pub link: Option<String>,
    pub description: String,
    pub tags: Vec<TagLink>,
}

/// Sidebar shared by the post index and post views
#[derive(Debug, Clone, Serialize)]
pub struct SidebarData {
    pub popular_tags: Vec<TagLink>,
    pub timeline: Vec<TimelineYear>,
    /// Link shown next to "Popular tags" when a tag is selected
    pub clear_url: Option<String>,
    /// Slug of the post being viewed, empty on the index
    pub current_slug: String,
}

/// Body of a single post view
#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    pub card: PostCard,
    pub content: String,
    /// `None` when the post has too few headings for a table of contents
    pub toc: Option<Vec<Heading>>,
    pub related: Vec<PostCard>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_parse() {
        assert!(TemplateRenderer::new().is_ok());
    }

    #[test]
    fn test_plural_filter() {
        let args = std::collections::HashMap::from([(
            "word".to_string(),
            tera::Value::String("post".to_string()),
        )]);
        let one = plural_filter(&tera::Value::from(1), &args).unwrap();
        let many = plural_filter(&tera::Value::from(3), &args).unwrap();
        assert_eq!(one, tera::Value::String("1 post".to_string()));
        assert_eq!(many, tera::Value::String("3 posts".to_string()));
    }
}
