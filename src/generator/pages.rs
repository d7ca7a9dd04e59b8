//! HTML pages shared by the static generator and the server

use anyhow::Result;
use chrono::Datelike;
use tera::Context;

use crate::config::SiteConfig;
use crate::content::{AdjacentPosts, MarkdownRenderer, Post, PostKind};
use crate::helpers::{absolute_url, post_url};
use crate::templates::{KindLink, NavPost, PostData, SiteData, TemplateRenderer};

/// Number of posts listed on the home page
const HOME_POST_COUNT: usize = 5;

/// Renders every HTML page of the site
pub struct PageRenderer {
    config: SiteConfig,
    templates: TemplateRenderer,
    markdown: MarkdownRenderer,
}

impl PageRenderer {
    pub fn new(config: &SiteConfig) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            templates: TemplateRenderer::new()?,
            markdown: MarkdownRenderer::with_options(&config.highlight),
        })
    }

    pub fn markdown(&self) -> &MarkdownRenderer {
        &self.markdown
    }

    /// Home page with the latest published posts
    pub fn home(&self, published: &[Post]) -> Result<String> {
        let mut context = self.base_context();
        context.insert("posts", &summaries(published.iter().take(HOME_POST_COUNT)));
        self.templates.render("home.html", &context)
    }

    /// Blog index, optionally restricted to one kind
    pub fn blog_index(&self, posts: &[Post], kind: Option<PostKind>) -> Result<String> {
        let heading = match kind {
            None => "Blog",
            Some(PostKind::Note) => "Notes",
            Some(PostKind::Article) => "Articles",
        };

        let mut context = self.base_context();
        context.insert("heading", heading);
        context.insert("kind", &kind.map(|k| k.as_str()));
        context.insert("kind_links", &KindLink::all());
        context.insert("posts", &summaries(posts.iter()));
        self.templates.render("blog.html", &context)
    }

    /// A single post with its newer/older navigation
    pub fn post(&self, post: &Post, adjacent: &AdjacentPosts) -> Result<String> {
        let canonical_url = post
            .canonical_url
            .clone()
            .unwrap_or_else(|| post_url(&self.config, &post.slug));

        let mut context = self.base_context();
        context.insert("post", &PostData::from(post));
        context.insert("content", &self.markdown.render(&post.content)?);
        context.insert("canonical_url", &canonical_url);
        context.insert("cover_image", &post.cover_image);
        context.insert("newer", &adjacent.newer.as_ref().map(NavPost::from));
        context.insert("older", &adjacent.older.as_ref().map(NavPost::from));
        self.templates.render("post.html", &context)
    }

    pub fn not_found(&self) -> Result<String> {
        self.templates.render("not_found.html", &self.base_context())
    }

    fn base_context(&self) -> Context {
        let mut context = Context::new();
        context.insert("site", &SiteData::from(&self.config));
        context.insert("feed_url", &absolute_url(&self.config, "feed.xml"));
        context.insert("year", &chrono::Utc::now().year());
        context
    }
}

fn summaries<'a>(posts: impl Iterator<Item = &'a Post>) -> Vec<PostData> {
    posts.map(PostData::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::sample_post;

    fn renderer() -> PageRenderer {
        let config = SiteConfig {
            name: "Folio Test".to_string(),
            url: "https://example.com".to_string(),
            ..SiteConfig::default()
        };
        PageRenderer::new(&config).unwrap()
    }

    #[test]
    fn test_home_limits_posts() {
        let posts: Vec<Post> = (1..=7)
            .map(|d| sample_post(&format!("post-{d}"), &format!("2024-01-0{d}")))
            .collect();
        let html = renderer().home(&posts).unwrap();
        assert!(html.contains("post-1"));
        assert!(html.contains("post-5"));
        assert!(!html.contains("post-6"));
    }

    #[test]
    fn test_blog_index_lists_posts() {
        let posts = vec![sample_post("alpha", "2024-02-01"), sample_post("beta", "2024-01-01")];
        let html = renderer().blog_index(&posts, None).unwrap();
        assert!(html.contains(r#"<a href="/blog/alpha">ALPHA</a>"#));
        assert!(html.contains(r#"<a href="/blog/beta">BETA</a>"#));
        assert!(html.contains("<h1>Blog</h1>"));
    }

    #[test]
    fn test_blog_index_for_kind_and_empty() {
        let html = renderer().blog_index(&[], Some(PostKind::Article)).unwrap();
        assert!(html.contains("<h1>Articles</h1>"));
        assert!(html.contains(r#"<a href="/blog/kind/articles" aria-current="page">Articles</a>"#));
        assert!(html.contains("No posts yet."));
    }

    #[test]
    fn test_post_page() {
        let mut post = sample_post("middle", "2024-02-01");
        post.content = "# Heading\n\nSome *text*.".to_string();
        post.tags = vec!["rust".to_string()];
        let adjacent = AdjacentPosts {
            newer: Some(sample_post("newer", "2024-03-01")),
            older: None,
        };

        let html = renderer().post(&post, &adjacent).unwrap();
        assert!(html.contains("<em>text</em>"));
        assert!(html.contains("February 1, 2024"));
        assert!(html.contains("<li>rust</li>"));
        assert!(html.contains(r#"<a rel="prev" href="/blog/newer">"#));
        assert!(!html.contains(r#"rel="next""#));
        assert!(html.contains("Folio Test"));
    }

    #[test]
    fn test_not_found_page() {
        assert!(renderer().not_found().unwrap().contains("Not found"));
    }
}
