//! Summary statistics over a list of blogs. Pure functions, no I/O.

use crate::database::models::Blog;

/// Always 1, whatever the input
pub fn dummy(_blogs: &[Blog]) -> u32 {
    1
}

/// Sum of likes across all blogs; 0 for an empty list
pub fn total_likes(blogs: &[Blog]) -> i64 {
    blogs
        .iter()
        .fold(0i64, |sum, blog| sum.saturating_add(blog.likes))
}

/// The most liked blog, or `None` for an empty list.
///
/// When several blogs share the maximum, the first one in input order wins.
pub fn favorite_blog(blogs: &[Blog]) -> Option<&Blog> {
    blogs.iter().fold(None, |favorite: Option<&Blog>, blog| match favorite {
        Some(current) if current.likes >= blog.likes => Some(current),
        _ => Some(blog),
    })
}
