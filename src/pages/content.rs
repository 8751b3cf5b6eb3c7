//! Content source: the boundary to the headless CMS.
//!
//! Pages consume it; the router never does.

use std::cmp::Reverse;

use thiserror::Error;

use crate::config::PostConfig;

/// Errors from the content backend.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content backend unavailable: {0}")]
    Unavailable(String),
}

/// A blog post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub body: String,
    pub published: String,
    pub image: Option<String>,
}

impl From<&PostConfig> for Post {
    fn from(config: &PostConfig) -> Self {
        Self {
            slug: config.slug.clone(),
            title: config.title.clone(),
            summary: config.summary.clone(),
            body: config.body.clone(),
            published: config.published.clone(),
            image: config.image.clone(),
        }
    }
}

/// Read access to CMS content.
pub trait ContentSource: Send + Sync {
    /// Look up one post; `Ok(None)` when the slug is unknown.
    fn post(&self, slug: &str) -> Result<Option<Post>, ContentError>;

    /// All posts, newest first.
    fn posts(&self) -> Result<Vec<Post>, ContentError>;
}

/// Content held in memory, loaded from configuration.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContent {
    posts: Vec<Post>,
}

impl InMemoryContent {
    pub fn new(mut posts: Vec<Post>) -> Self {
        // ISO dates sort lexically.
        posts.sort_by_key(|p| Reverse(p.published.clone()));
        Self { posts }
    }

    pub fn from_config(posts: &[PostConfig]) -> Self {
        Self::new(posts.iter().map(Post::from).collect())
    }
}

impl ContentSource for InMemoryContent {
    fn post(&self, slug: &str) -> Result<Option<Post>, ContentError> {
        Ok(self.posts.iter().find(|p| p.slug == slug).cloned())
    }

    fn posts(&self) -> Result<Vec<Post>, ContentError> {
        Ok(self.posts.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(slug: &str, published: &str) -> Post {
        Post {
            slug: slug.into(),
            title: slug.to_uppercase(),
            summary: String::new(),
            body: String::new(),
            published: published.into(),
            image: None,
        }
    }

    #[test]
    fn test_newest_first() {
        let content = InMemoryContent::new(vec![
            post("oud", "2023-01-10"),
            post("nieuw", "2024-06-01"),
        ]);
        let slugs: Vec<_> = content.posts().unwrap().into_iter().map(|p| p.slug).collect();
        assert_eq!(slugs, vec!["nieuw", "oud"]);
    }

    #[test]
    fn test_lookup() {
        let content = InMemoryContent::new(vec![post("hallo", "2024-01-01")]);
        assert_eq!(content.post("hallo").unwrap().unwrap().title, "HALLO");
        assert!(content.post("weg").unwrap().is_none());
    }
}
