//! Filter engine: platform, category and score predicates over posts
//!
//! The result is a [`WorkingSet`], an order-preserving selection of borrowed
//! posts. Every aggregate downstream reads from a working set.

use crate::records::Post;
use indexmap::IndexSet;
use rustc_hash::FxHashSet;

/// Default minimum misinformation score of the dashboard
pub const DEFAULT_MIN_SCORE: u8 = 70;

/// Active filter selection
///
/// An empty platform or category set matches nothing: an explicit empty
/// selection is not the same as "no filter".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub platforms: IndexSet<String>,
    pub categories: IndexSet<String>,
    pub min_score: u8,
}

impl FilterCriteria {
    pub fn new(
        platforms: impl IntoIterator<Item = impl Into<String>>,
        categories: impl IntoIterator<Item = impl Into<String>>,
        min_score: u8,
    ) -> Self {
        Self {
            platforms: platforms.into_iter().map(Into::into).collect(),
            categories: categories.into_iter().map(Into::into).collect(),
            min_score,
        }
    }

    /// Select every platform and category present in `posts`, in first-seen order
    pub fn all_of<'a>(posts: impl IntoIterator<Item = &'a Post>, min_score: u8) -> Self {
        let mut platforms = IndexSet::new();
        let mut categories = IndexSet::new();
        for post in posts {
            if !platforms.contains(post.platform.as_str()) {
                platforms.insert(post.platform.clone());
            }
            if !categories.contains(post.category.as_str()) {
                categories.insert(post.category.clone());
            }
        }
        Self {
            platforms,
            categories,
            min_score,
        }
    }

    /// Whether a single post passes all three predicates
    pub fn matches(&self, post: &Post) -> bool {
        post.misinfo_score >= self.min_score
            && self.platforms.contains(post.platform.as_str())
            && self.categories.contains(post.category.as_str())
    }
}

/// Posts passing the current filter, in source order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkingSet<'a> {
    posts: Vec<&'a Post>,
}

impl<'a> WorkingSet<'a> {
    pub fn from_posts(posts: Vec<&'a Post>) -> Self {
        Self { posts }
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn posts(&self) -> &[&'a Post] {
        &self.posts
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Post> + '_ {
        self.posts.iter().copied()
    }

    /// Distinct user ids of the posts, in first-seen order
    pub fn user_ids(&self) -> IndexSet<&'a str> {
        self.posts.iter().map(|p| p.user_id.as_str()).collect()
    }

    /// Same as [`user_ids`](Self::user_ids) as a hash set for membership tests
    pub fn user_set(&self) -> FxHashSet<&'a str> {
        self.posts.iter().map(|p| p.user_id.as_str()).collect()
    }
}

impl<'s, 'a> IntoIterator for &'s WorkingSet<'a> {
    type Item = &'a Post;
    type IntoIter = std::iter::Copied<std::slice::Iter<'s, &'a Post>>;

    fn into_iter(self) -> Self::IntoIter {
        self.posts.iter().copied()
    }
}

/// Apply `criteria` to `posts`, preserving their relative order
pub fn filter<'a>(
    posts: impl IntoIterator<Item = &'a Post>,
    criteria: &FilterCriteria,
) -> WorkingSet<'a> {
    WorkingSet {
        posts: posts.into_iter().filter(|p| criteria.matches(p)).collect(),
    }
}
