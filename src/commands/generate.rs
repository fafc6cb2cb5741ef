//! Generate static files

use anyhow::Result;
use notify::Watcher;
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

use crate::config::SiteConfig;
use crate::content::loader::ContentLoader;
use crate::generator::{GenerateStats, Generator};
use crate::Folio;

/// Load every post and write the whole site
pub fn run(folio: &Folio) -> Result<()> {
    run_with_stats(folio).map(|_| ())
}

pub fn run_with_stats(folio: &Folio) -> Result<GenerateStats> {
    let start = Instant::now();

    let loader = ContentLoader::new(folio);
    let registry = loader.load_all()?;
    tracing::info!("Loaded {} posts", registry.len());

    let generator = Generator::new(folio)?;
    let stats = generator.generate(&registry)?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(stats)
}

/// Watch the sources and the config file, regenerating on change.
///
/// The config is re-read on every rebuild so edits to projects or
/// experience show up without a restart.
pub async fn watch(folio: &Folio) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    if folio.source_dir.exists() {
        watcher.watch(&folio.source_dir, notify::RecursiveMode::Recursive)?;
    } else {
        tracing::warn!("Source directory {:?} does not exist", folio.source_dir);
    }

    if let Some(config_path) = SiteConfig::locate(&folio.base_dir) {
        watcher.watch(&config_path, notify::RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    let mut last_rebuild = Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(_event) => {
                // Debounce: editors emit several events per save
                if last_rebuild.elapsed() > Duration::from_millis(500) {
                    tracing::info!("File changed, regenerating...");
                    let result = Folio::new(&folio.base_dir).and_then(|fresh| run(&fresh));
                    if let Err(e) = result {
                        tracing::error!("Generation failed: {:#}", e);
                    }
                    last_rebuild = Instant::now();
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_run_generates_site_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let posts = dir.path().join("source/_posts");
        fs::create_dir_all(&posts).unwrap();
        fs::write(
            posts.join("first.md"),
            "---\ntitle: First\ndate: 2024-03-01\ntags: [Docker]\n---\nHello\n",
        )
        .unwrap();
        fs::write(posts.join("broken.md"), "---\ntitle: Empty\n---\n").unwrap();

        let folio = Folio::new(dir.path()).unwrap();
        let stats = run_with_stats(&folio).unwrap();

        assert_eq!(stats.posts, 1);
        assert_eq!(stats.post_tag_pages, 1);
        assert!(folio.public_dir.join("posts/first/index.html").exists());
        assert!(folio.public_dir.join("posts/tags/docker/index.html").exists());
        assert!(!folio.public_dir.join("posts/broken/index.html").exists());
    }

    #[test]
    fn test_run_without_posts_dir() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        let stats = run_with_stats(&folio).unwrap();
        assert_eq!(stats.posts, 0);
        assert!(folio.public_dir.join("index.html").exists());
    }
}
