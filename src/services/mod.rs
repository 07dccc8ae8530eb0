pub mod blog_stats;

pub use blog_stats::{dummy, favorite_blog, total_likes};
