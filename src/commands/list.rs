//! List site content

use anyhow::Result;

use crate::content::loader::ContentLoader;
use crate::taxonomy::{distinct_tags, tag_frequency};
use crate::timeline::group_by_year;
use crate::Folio;

/// List site content by type
pub fn run(folio: &Folio, content_type: &str) -> Result<()> {
    let lines = render(folio, content_type)?;
    for line in lines {
        println!("{}", line);
    }
    Ok(())
}

/// The lines `run` prints
pub fn render(folio: &Folio, content_type: &str) -> Result<Vec<String>> {
    let mut out = Vec::new();

    match content_type {
        "post" | "posts" => {
            let registry = ContentLoader::new(folio).load_all()?;
            out.push(format!("Posts ({}):", registry.len()));
            for post in registry.posts() {
                out.push(format!("  {} - {} [{}]", post.date, post.title, post.source));
            }
        }
        "tag" | "tags" => {
            let registry = ContentLoader::new(folio).load_all()?;
            let tags = tag_frequency(registry.posts());
            out.push(format!("Tags ({}):", tags.len()));
            for tc in tags {
                out.push(format!("  {} ({})", tc.tag, tc.count));
            }
        }
        "project" | "projects" => {
            let projects = &folio.config.projects;
            out.push(format!(
                "Projects ({}), tags: {}",
                projects.len(),
                distinct_tags(projects).join(", ")
            ));
            for project in projects {
                out.push(format!("  {} [{}]", project.name, project.tags.join(", ")));
            }
        }
        "timeline" => {
            let registry = ContentLoader::new(folio).load_all()?;
            for group in group_by_year(registry.posts()) {
                out.push(format!("{} ({})", group.year, group.items.len()));
                for post in group.items {
                    out.push(format!("  {} - {}", post.date, post.title));
                }
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, tag, project, timeline",
                content_type
            );
        }
    }

    Ok(out)
}
