//! Tag aggregation over posts and projects
//!
//! Tags keep the casing they were written with. Only comparisons fold case:
//! filtering by `"DevOps"` and by `"devops"` selects the same items.

use indexmap::IndexMap;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;

use crate::content::Post;

/// Anything that carries tags
pub trait Tagged {
    fn tags(&self) -> &[String];
}

impl<T: Tagged + ?Sized> Tagged for &T {
    fn tags(&self) -> &[String] {
        (**self).tags()
    }
}

/// Number of items carrying a tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

impl TagCount {
    pub fn new(tag: impl Into<String>, count: usize) -> Self {
        Self {
            tag: tag.into(),
            count,
        }
    }
}

/// Case-insensitive tag equality
pub fn tags_match(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// Whether `item` carries `tag`, ignoring case
pub fn has_tag<T: Tagged + ?Sized>(item: &T, tag: &str) -> bool {
    item.tags().iter().any(|t| tags_match(t, tag))
}

/// Ordering for displaying tags alphabetically: case-folded first, then
/// lowercase before uppercase so `docker` < `Docker` < `helm`.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Every tag used by `items`, without duplicates, sorted alphabetically.
///
/// Deduplication is by exact string, so `Docker` and `docker` both appear.
pub fn distinct_tags<T: Tagged>(items: &[T]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut tags: Vec<String> = items
        .iter()
        .flat_map(|item| item.tags())
        .filter(|t| seen.insert(t.as_str()))
        .cloned()
        .collect();
    tags.sort_by(|a, b| locale_cmp(a, b));
    tags
}

/// How many items carry each tag, most used first.
///
/// An item listing a tag twice counts once. Equal counts keep the order in
/// which the tags were first seen.
pub fn tag_frequency<T: Tagged>(items: &[T]) -> Vec<TagCount> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();

    for item in items {
        let mut in_item = HashSet::new();
        for tag in item.tags() {
            if in_item.insert(tag.as_str()) {
                *counts.entry(tag.as_str()).or_insert(0) += 1;
            }
        }
    }

    let mut ranked: Vec<TagCount> = counts
        .into_iter()
        .map(|(tag, count)| TagCount::new(tag, count))
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked
}

/// The `n` most used tags
pub fn popular_tags<T: Tagged>(items: &[T], n: usize) -> Vec<TagCount> {
    let mut ranked = tag_frequency(items);
    ranked.truncate(n);
    ranked
}

/// Items carrying `tag` (ignoring case). `None` means no filter and returns
/// every item in its original order.
pub fn filter_by_tag<'a, T: Tagged>(items: &'a [T], tag: Option<&str>) -> Vec<&'a T> {
    match tag {
        None => items.iter().collect(),
        Some(tag) => items.iter().filter(|item| has_tag(*item, tag)).collect(),
    }
}

/// Posts sharing tags with `current`, best match first, at most `n`.
///
/// `current` itself and posts with nothing in common are left out. Equal
/// scores keep the order of `all`.
pub fn related<'a>(current: &Post, all: &'a [Post], n: usize) -> Vec<&'a Post> {
    let mut scored: Vec<(usize, &Post)> = all
        .iter()
        .filter(|p| p.slug != current.slug)
        .map(|p| {
            let shared = distinct_tags(std::slice::from_ref(p))
                .iter()
                .filter(|t| has_tag(current, t))
                .count();
            (shared, p)
        })
        .filter(|(shared, _)| *shared > 0)
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().take(n).map(|(_, p)| p).collect()
}
