//! Blog Statistics
//!
//! Pure aggregate queries over an in-memory collection of blog records.
//! Nothing here performs I/O or mutates its input.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Read-only view of a blog used by the aggregate queries.
pub trait BlogRecord {
    /// Grouping key for per-author aggregates (exact string equality)
    fn author(&self) -> &str;

    /// Like count
    fn likes(&self) -> i64;
}

impl<T: BlogRecord + ?Sized> BlogRecord for &T {
    fn author(&self) -> &str {
        (**self).author()
    }

    fn likes(&self) -> i64 {
        (**self).likes()
    }
}

/// Author with the highest number of posts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorBlogs {
    pub author: String,
    pub blogs: usize,
}

/// Author with the highest summed likes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorLikes {
    pub author: String,
    pub likes: i64,
}

// =========================================================================
// total_likes
// =========================================================================

/// Sum of likes across all blogs. Zero for an empty collection.
///
/// Saturates at the `i64` bounds instead of overflowing.
pub fn total_likes<B: BlogRecord>(blogs: &[B]) -> i64 {
    blogs
        .iter()
        .map(BlogRecord::likes)
        .fold(0i64, i64::saturating_add)
}

// =========================================================================
// favorite_blog
// =========================================================================

/// The blog with the most likes.
///
/// Ties go to the earliest blog in input order. Returns `None` for an
/// empty collection.
pub fn favorite_blog<B: BlogRecord>(blogs: &[B]) -> Option<&B> {
    blogs.iter().fold(None, |best: Option<&B>, blog| match best {
        Some(current) if current.likes() >= blog.likes() => Some(current),
        _ => Some(blog),
    })
}

// =========================================================================
// most_blogs / most_likes
// =========================================================================

/// The author with the most posts, or `None` for an empty collection.
pub fn most_blogs<B: BlogRecord>(blogs: &[B]) -> Option<AuthorBlogs> {
    leading_author(blogs, |_| 1).map(|(author, count)| AuthorBlogs {
        author: author.to_string(),
        blogs: count as usize,
    })
}

/// The author with the highest summed likes, or `None` for an empty collection.
/// Per-author sums saturate like [`total_likes`].
pub fn most_likes<B: BlogRecord>(blogs: &[B]) -> Option<AuthorLikes> {
    leading_author(blogs, BlogRecord::likes).map(|(author, likes)| AuthorLikes {
        author: author.to_string(),
        likes,
    })
}

/// Group by author, sum `weight` per group, and pick the group with the
/// highest total.
///
/// Groups are kept in order of the author's first appearance and only a
/// strictly greater total replaces the current leader, so among tied authors
/// the one that appeared first wins.
fn leading_author<B, F>(blogs: &[B], weight: F) -> Option<(&str, i64)>
where
    B: BlogRecord,
    F: Fn(&B) -> i64,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<(&str, i64)> = Vec::new();

    for blog in blogs {
        let author = blog.author();
        let slot = *index.entry(author).or_insert_with(|| {
            totals.push((author, 0));
            totals.len() - 1
        });
        totals[slot].1 = totals[slot].1.saturating_add(weight(blog));
    }

    totals.into_iter().fold(None, |best, candidate| match best {
        Some((_, top)) if top >= candidate.1 => best,
        _ => Some(candidate),
    })
}

/// All four aggregates computed over the same collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogStats<B> {
    pub total_likes: i64,
    pub favorite_blog: Option<B>,
    pub most_blogs: Option<AuthorBlogs>,
    pub most_likes: Option<AuthorLikes>,
}

impl<B: BlogRecord + Clone> BlogStats<B> {
    /// Compute every aggregate in one call
    pub fn compute(blogs: &[B]) -> Self {
        Self {
            total_likes: total_likes(blogs),
            favorite_blog: favorite_blog(blogs).cloned(),
            most_blogs: most_blogs(blogs),
            most_likes: most_likes(blogs),
        }
    }
}
