//! @ai:module:intent Load column posts and list them by tag, pin and date
//! @ai:module:layer application
//! @ai:module:public_api ColumnFeed, TagFilter, collect_tags, load_posts
//! @ai:module:depends_on columns::post
//! @ai:module:stateless true

use super::post::{Post, PostPreview};
use anyhow::Context;
use arena_engine::sort_labels;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::info;

/// Tags shown per post in a listing.
const PREVIEW_TAGS: usize = 4;

/// @ai:intent Which posts a listing shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TagFilter {
    #[default]
    All,
    Tag(String),
}

impl TagFilter {
    pub fn matches(&self, post: &Post) -> bool {
        match self {
            TagFilter::All => true,
            TagFilter::Tag(tag) => post.tags.iter().any(|t| t == tag),
        }
    }
}

impl From<Option<String>> for TagFilter {
    fn from(tag: Option<String>) -> Self {
        match tag {
            Some(tag) if !tag.is_empty() && tag != "all" => TagFilter::Tag(tag),
            _ => TagFilter::All,
        }
    }
}

/// @ai:intent The set of posts behind the column section
#[derive(Debug, Clone, Default)]
pub struct ColumnFeed {
    posts: Vec<Post>,
}

impl ColumnFeed {
    pub fn new(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// @ai:intent Distinct tags across all posts in collation order
    pub fn tags(&self) -> Vec<String> {
        collect_tags(&self.posts)
    }

    /// @ai:intent Posts under a filter: pinned first, then newest first, at most limit
    /// @ai:effects pure
    /// @ai:edge_cases unparseable dates sort as the oldest
    pub fn list(&self, filter: &TagFilter, limit: usize, excerpt_chars: usize) -> Vec<PostPreview> {
        let mut matching: Vec<&Post> = self.posts.iter().filter(|p| filter.matches(p)).collect();

        matching.sort_by(|a, b| {
            b.pinned
                .cmp(&a.pinned)
                .then_with(|| b.timestamp().cmp(&a.timestamp()))
        });

        matching
            .into_iter()
            .take(limit)
            .map(|p| p.preview(excerpt_chars, PREVIEW_TAGS))
            .collect()
    }

    /// @ai:intent Look up one post by id
    pub fn get(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }
}

/// @ai:intent Distinct non-empty tags of the given posts in collation order
/// @ai:effects pure
pub fn collect_tags(posts: &[Post]) -> Vec<String> {
    let distinct: BTreeSet<&str> = posts
        .iter()
        .flat_map(|p| p.tags.iter().map(String::as_str))
        .filter(|t| !t.is_empty())
        .collect();

    let mut tags: Vec<String> = distinct.into_iter().map(str::to_string).collect();
    sort_labels(&mut tags);
    tags
}

/// @ai:intent Read posts from a JSON array file
/// @ai:pre path exists and holds a JSON array of posts
/// @ai:effects fs:read
pub fn load_posts(path: &Path) -> anyhow::Result<Vec<Post>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read columns from {}", path.display()))?;
    let posts: Vec<Post> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid columns file {}", path.display()))?;

    info!("Loaded {} column posts from {}", posts.len(), path.display());
    Ok(posts)
}
