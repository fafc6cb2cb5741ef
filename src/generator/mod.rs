//! Generator module - writes the static site using the built-in Tera templates
//!
//! Every view receives its tag selection as an argument. Filtered views are
//! written as separate pages (`posts/tags/<tag>/`, `projects/tags/<tag>/`), so
//! nothing is shared between views at render time.

use anyhow::{Context as _, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tera::Context;

use crate::content::{ContentError, ContentRegistry, Post, Project};
use crate::helpers::{
    format_date, full_url_for, post_path, post_tag_path, project_tag_path, tag_slug, toc, url_for,
};
use crate::taxonomy::{distinct_tags, filter_by_tag, popular_tags, related, tags_match};
use crate::templates::{
    FilterBar, PostCard, PostView, ProjectCard, SidebarData, SiteData, TagLink, TemplateRenderer,
    TimelineYear, STYLESHEET,
};
use crate::timeline::group_by_year;
use crate::Folio;

/// Static site generator using Tera templates
pub struct Generator {
    folio: Folio,
    renderer: TemplateRenderer,
}

/// Summary of one generation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateStats {
    pub posts: usize,
    pub post_tag_pages: usize,
    pub project_tag_pages: usize,
}

impl Generator {
    /// Create a new generator
    pub fn new(folio: &Folio) -> Result<Self> {
        Ok(Self {
            folio: folio.clone(),
            renderer: TemplateRenderer::new()?,
        })
    }

    /// Generate the entire site
    pub fn generate(&self, registry: &ContentRegistry) -> Result<GenerateStats> {
        fs::create_dir_all(&self.folio.public_dir)?;

        let site = self.build_site_data();
        let posts = registry.posts();
        let projects = &self.folio.config.projects;

        self.write("css/style.css", STYLESHEET)?;

        // Home, plus one copy per project tag
        let html = self.render_home(&site, registry, projects, None)?;
        self.write("index.html", &html)?;
        let project_tags = unique_tag_pages(projects);
        for tag in &project_tags {
            let html = self.render_home(&site, registry, projects, Some(tag.as_str()))?;
            self.write(&format!("{}index.html", project_tag_path(tag)), &html)?;
        }

        // Post index, plus one copy per post tag
        let html = self.render_post_index(&site, posts, None)?;
        self.write("posts/index.html", &html)?;
        let post_tags = unique_tag_pages(posts);
        for tag in &post_tags {
            let html = self.render_post_index(&site, posts, Some(tag.as_str()))?;
            self.write(&format!("{}index.html", post_tag_path(tag)), &html)?;
        }

        for post in posts {
            let html = self.render_post_page(&site, registry, &post.slug)?;
            self.write(&format!("{}index.html", post_path(&post.slug)), &html)?;
        }

        let html = self.render_page(
            &site,
            "contact.html",
            "contact/",
            "contact",
            "Contact",
            Context::new(),
        )?;
        self.write("contact/index.html", &html)?;

        let html = self.render_not_found(&site)?;
        self.write("404.html", &html)?;

        let stats = GenerateStats {
            posts: posts.len(),
            post_tag_pages: post_tags.len(),
            project_tag_pages: project_tags.len(),
        };
        tracing::info!(
            "Generated {} posts, {} post tag pages, {} project tag pages",
            stats.posts,
            stats.post_tag_pages,
            stats.project_tag_pages
        );
        Ok(stats)
    }

    /// Render the view for one post, or the not-found view when no post has
    /// that slug
    pub fn render_post_page(
        &self,
        site: &SiteData,
        registry: &ContentRegistry,
        slug: &str,
    ) -> Result<String> {
        let post = match registry.get(slug) {
            Ok(post) => post,
            Err(e @ ContentError::MissingContent { .. }) => {
                tracing::debug!("{}", e);
                return self.render_not_found(site);
            }
            Err(e) => return Err(e.into()),
        };

        let config = &self.folio.config;
        let all = registry.posts();

        let view = PostView {
            card: self.post_card(post, None),
            content: post.content.clone(),
            toc: toc(&post.content, config.toc_min_headings),
            related: related(post, all, config.related_posts)
                .into_iter()
                .map(|p| self.post_card(p, None))
                .collect(),
        };
        let sidebar = self.sidebar(all, None, &post.slug);

        let mut context = Context::new();
        context.insert("post", &view);
        context.insert("sidebar", &sidebar);
        self.render_page(
            site,
            "post.html",
            &post_path(&post.slug),
            "posts",
            &post.title,
            context,
        )
    }

    /// Render the post index with an optional tag selected
    pub fn render_post_index(
        &self,
        site: &SiteData,
        posts: &[Post],
        active_tag: Option<&str>,
    ) -> Result<String> {
        let filtered = filter_by_tag(posts, active_tag);

        let filter = FilterBar {
            all_url: url_for(&self.folio.config, "posts/"),
            all_active: active_tag.is_none(),
            tags: self.tag_links(&distinct_tags(posts), active_tag, post_tag_path),
        };
        let cards: Vec<PostCard> = filtered
            .iter()
            .map(|p| self.post_card(p, active_tag))
            .collect();
        let sidebar = self.sidebar(posts, active_tag, "");

        let mut context = Context::new();
        context.insert("active_tag", &active_tag);
        context.insert("filter", &filter);
        context.insert("posts", &cards);
        context.insert("sidebar", &sidebar);

        let (path, title) = match active_tag {
            Some(tag) => (post_tag_path(tag), format!("Posts tagged {}", tag)),
            None => ("posts/".to_string(), "All posts".to_string()),
        };
        self.render_page(site, "posts.html", &path, "posts", &title, context)
    }

    /// Render the home view with its projects filtered by an optional tag
    pub fn render_home(
        &self,
        site: &SiteData,
        registry: &ContentRegistry,
        projects: &[Project],
        active_tag: Option<&str>,
    ) -> Result<String> {
        let config = &self.folio.config;

        let filter = FilterBar {
            // The unfiltered projects live on the home page itself
            all_url: format!("{}#projects", url_for(config, "")),
            all_active: active_tag.is_none(),
            tags: self.tag_links(&distinct_tags(projects), active_tag, project_tag_path),
        };
        let cards: Vec<ProjectCard> = filter_by_tag(projects, active_tag)
            .into_iter()
            .map(|p| ProjectCard {
                name: p.name.clone(),
                link: p.link.clone(),
                description: p.description.clone(),
                tags: self.tag_links(&p.tags, active_tag, project_tag_path),
            })
            .collect();
        let latest: Vec<PostCard> = registry
            .latest(config.latest_posts)
            .iter()
            .map(|p| self.post_card(p, None))
            .collect();

        let mut context = Context::new();
        context.insert("filter", &filter);
        context.insert("projects", &cards);
        context.insert("latest_posts", &latest);
        let path = active_tag.map(project_tag_path).unwrap_or_default();
        self.render_page(site, "home.html", &path, "home", "", context)
    }

    pub fn render_not_found(&self, site: &SiteData) -> Result<String> {
        self.render_page(
            site,
            "not_found.html",
            "404.html",
            "posts",
            "Not found",
            Context::new(),
        )
    }

    /// Render a template with the variables every page needs. `path` is the
    /// page location relative to the site root.
    fn render_page(
        &self,
        site: &SiteData,
        template: &str,
        path: &str,
        nav: &str,
        title: &str,
        mut context: Context,
    ) -> Result<String> {
        context.insert("site", site);
        context.insert("nav", nav);
        context.insert("page_title", title);
        context.insert("canonical_url", &full_url_for(&self.folio.config, path));
        self.renderer
            .render(template, &context)
            .with_context(|| format!("Failed to render {}", template))
    }

    /// Build site data for templates
    pub fn build_site_data(&self) -> SiteData {
        let config = &self.folio.config;
        SiteData {
            title: config.title.clone(),
            tagline: config.tagline.clone(),
            author: config.author.clone(),
            email: config.email.clone(),
            location: config.location.clone(),
            resume_url: config.resume_url.clone(),
            logo_url: config.logo_url.clone(),
            language: config.language.clone(),
            appearance: config.appearance,
            social: config.social.clone(),
            about: config.about.clone(),
            experience: config.experience.clone(),
            home_url: url_for(config, ""),
            posts_url: url_for(config, "posts/"),
            contact_url: url_for(config, "contact/"),
            css_url: url_for(config, "css/style.css"),
            current_year: chrono::Local::now().format("%Y").to_string(),
        }
    }

    fn post_card(&self, post: &Post, active_tag: Option<&str>) -> PostCard {
        let config = &self.folio.config;
        PostCard {
            slug: post.slug.clone(),
            title: post.title.clone(),
            date: post.date.clone(),
            date_display: format_date(&post.date, &config.date_format),
            summary: post.summary.clone(),
            url: url_for(config, &post_path(&post.slug)),
            tags: self.tag_links(&post.tags, active_tag, post_tag_path),
        }
    }

    fn tag_links(
        &self,
        tags: &[String],
        active_tag: Option<&str>,
        path: fn(&str) -> String,
    ) -> Vec<TagLink> {
        tags.iter()
            .map(|tag| TagLink {
                name: tag.clone(),
                url: url_for(&self.folio.config, &path(tag)),
                count: None,
                active: active_tag.is_some_and(|active| tags_match(tag, active)),
            })
            .collect()
    }

    /// Popular tags over all posts and the timeline of the selected ones
    fn sidebar(&self, posts: &[Post], active_tag: Option<&str>, current_slug: &str) -> SidebarData {
        let config = &self.folio.config;

        let popular = popular_tags(posts, config.popular_tags)
            .into_iter()
            .map(|tc| TagLink {
                url: url_for(config, &post_tag_path(&tc.tag)),
                active: active_tag.is_some_and(|active| tags_match(&tc.tag, active)),
                count: Some(tc.count),
                name: tc.tag,
            })
            .collect();

        let timeline = group_by_year(filter_by_tag(posts, active_tag))
            .into_iter()
            .map(|group| TimelineYear {
                year: group.year,
                posts: group
                    .items
                    .iter()
                    .map(|p| self.post_card(p, active_tag))
                    .collect(),
            })
            .collect();

        SidebarData {
            popular_tags: popular,
            timeline,
            clear_url: active_tag.map(|_| url_for(config, "posts/")),
            current_slug: current_slug.to_string(),
        }
    }

    /// Write a file under the public directory
    fn write(&self, relative: &str, contents: &str) -> Result<()> {
        let output_path = self.folio.public_dir.join(relative);
        write_file(&output_path, contents)?;
        tracing::debug!("Generated: {:?}", output_path);
        Ok(())
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create dir {:?}", parent))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {:?}", path))
}

/// One tag per output page. Tags differing only in case share a page.
fn unique_tag_pages<T: crate::taxonomy::Tagged>(items: &[T]) -> Vec<String> {
    let mut seen = HashSet::new();
    distinct_tags(items)
        .into_iter()
        .filter(|tag| seen.insert(tag_slug(tag)))
        .collect()
}
