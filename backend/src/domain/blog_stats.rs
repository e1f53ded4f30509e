//! Aggregate statistics over a list of blog entries.

use std::collections::HashMap;

use super::Blog;

/// Author credited with the most entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorBlogCount {
    /// Author name as written on the entries.
    pub author: String,
    /// Number of entries by this author.
    pub blogs: u64,
}

/// Author whose entries collected the most likes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorLikes {
    /// Author name as written on the entries.
    pub author: String,
    /// Sum of likes across this author's entries.
    pub likes: u64,
}

/// All statistics computed over one snapshot of the entry store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogStats {
    /// Sum of likes across every entry.
    pub total_likes: u64,
    /// Most liked entry.
    pub favorite_blog: Option<Blog>,
    /// Most prolific author.
    pub most_blogs: Option<AuthorBlogCount>,
    /// Most liked author.
    pub most_likes: Option<AuthorLikes>,
}

impl BlogStats {
    /// Compute every statistic over `blogs`.
    pub fn from_blogs(blogs: &[Blog]) -> Self {
        Self {
            total_likes: total_likes(blogs),
            favorite_blog: favorite_blog(blogs).cloned(),
            most_blogs: most_blogs(blogs),
            most_likes: most_likes(blogs),
        }
    }
}

/// Sum of likes across `blogs`. Saturates instead of overflowing.
pub fn total_likes(blogs: &[Blog]) -> u64 {
    blogs
        .iter()
        .fold(0_u64, |sum, blog| sum.saturating_add(blog.likes()))
}

/// Entry with the most likes; the later entry wins a tie.
pub fn favorite_blog(blogs: &[Blog]) -> Option<&Blog> {
    blogs.iter().max_by_key(|blog| blog.likes())
}

/// Per-author totals in order of each author's first appearance.
fn group_by_author(blogs: &[Blog], weight: impl Fn(&Blog) -> u64) -> Vec<(&str, u64)> {
    let mut order: Vec<(&str, u64)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for blog in blogs {
        let author = blog.author();
        if let Some(&slot) = index.get(author) {
            if let Some(entry) = order.get_mut(slot) {
                entry.1 = entry.1.saturating_add(weight(blog));
            }
        } else {
            index.insert(author, order.len());
            order.push((author, weight(blog)));
        }
    }
    order
}

/// First author (by first appearance) holding the strictly greatest total.
fn leader(groups: Vec<(&str, u64)>) -> Option<(String, u64)> {
    groups
        .into_iter()
        .fold(None, |best: Option<(&str, u64)>, candidate| match best {
            Some(current) if current.1 >= candidate.1 => Some(current),
            _ => Some(candidate),
        })
        .map(|(author, total)| (author.to_owned(), total))
}

/// Author with the most entries; the author seen first wins a tie.
pub fn most_blogs(blogs: &[Blog]) -> Option<AuthorBlogCount> {
    leader(group_by_author(blogs, |_| 1)).map(|(author, blogs)| AuthorBlogCount { author, blogs })
}

/// Author with the most likes in total; the author seen first wins a tie.
pub fn most_likes(blogs: &[Blog]) -> Option<AuthorLikes> {
    leader(group_by_author(blogs, Blog::likes)).map(|(author, likes)| AuthorLikes { author, likes })
}
