//! Content module - loads, validates and queries posts

mod frontmatter;
pub mod loader;
mod markdown;
mod post;
pub mod schema;
pub mod store;
pub mod text;

pub use frontmatter::FrontMatter;
pub use loader::ContentLoader;
pub use markdown::MarkdownRenderer;
pub use post::{AdjacentPosts, Post, PostKind};
pub use store::PostStore;

#[cfg(test)]
pub(crate) use post::tests::post as sample_post;
