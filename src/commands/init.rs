//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::config::CONFIG_FILES;
use crate::Folio;

const DEFAULT_CONFIG: &str = r#"# Site
title: My Portfolio
tagline: Engineer
author: John Doe
email: john@example.com
location: ''
language: en
# light, dark or system
appearance: light

# URL
url: http://example.com
root: /

# Directory
source_dir: source
public_dir: public
posts_dir: _posts

# Writing
render_drafts: false
date_format: MMM D, YYYY
highlight:
  theme: base16-ocean.dark
  line_number: false

# Sidebar and related posts
popular_tags: 12
latest_posts: 3
related_posts: 3
toc_min_headings: 3

social:
  github:
  linkedin:

about:
  blurb: A few words about yourself.
  highlights:
    - Something you are good at

experience:
  - role: Engineer
    company: Example Corp
    period: 2023 - Present
    location: Remote
    bullets:
      - Built things

projects:
  - name: This site
    link: https://github.com/you/portfolio
    description: Generated with folio
    tags: [Rust]
"#;

/// Create the config file and a sample post in `target_dir`
pub fn init_site(target_dir: &Path) -> Result<()> {
    if let Some(existing) = CONFIG_FILES
        .iter()
        .map(|name| target_dir.join(name))
        .find(|path| path.exists())
    {
        anyhow::bail!("Site already initialized: {:?} exists", existing);
    }

    fs::create_dir_all(target_dir.join("source/_posts"))?;
    fs::write(target_dir.join("_config.yml"), DEFAULT_CONFIG)?;

    let today = chrono::Local::now().format("%Y-%m-%d");
    let sample_post = format!(
        r#"---
title: Hello World
date: {}
summary: The first post on this site.
tags: [Meta]
---

Welcome! This post lives in `source/_posts/hello-world.md`.

## Writing posts

```bash
$ folio new "My New Post" --tags Rust,Notes
```

## Building the site

```bash
$ folio generate
```

## Listing content

```bash
$ folio list tag
```
"#,
        today
    );

    fs::write(target_dir.join("source/_posts/hello-world.md"), sample_post)?;

    Ok(())
}

/// Initialize the site at `folio.base_dir`
pub fn run(folio: &Folio) -> Result<()> {
    init_site(&folio.base_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Appearance;
    use crate::content::loader::ContentLoader;

    #[test]
    fn test_init_creates_loadable_site() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();

        let folio = Folio::new(dir.path()).unwrap();
        assert_eq!(folio.config.title, "My Portfolio");
        assert_eq!(folio.config.appearance, Appearance::Light);
        assert_eq!(folio.config.projects.len(), 1);
        assert!(folio.config.social.github.is_none());

        let registry = ContentLoader::new(&folio).load_all().unwrap();
        assert_eq!(registry.len(), 1);
        let post = registry.get("hello-world").unwrap();
        assert_eq!(post.tags, vec!["Meta"]);
    }

    #[test]
    fn test_init_refuses_existing_site() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();
        assert!(init_site(dir.path()).is_err());
    }
}
