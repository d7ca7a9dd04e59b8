//! Built-in page templates using the Tera template engine
//!
//! Templates are embedded directly in the binary.

use anyhow::Result;
use serde::Serialize;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::{Post, PostKind};
use crate::helpers::{full_date, post_path};

/// Template renderer with the embedded templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("folio/layout.html")),
            ("macros.html", include_str!("folio/macros.html")),
            ("home.html", include_str!("folio/home.html")),
            ("blog.html", include_str!("folio/blog.html")),
            ("post.html", include_str!("folio/post.html")),
            ("not_found.html", include_str!("folio/not_found.html")),
        ])?;

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub name: String,
    pub description: String,
    pub author: String,
    pub email: String,
    pub url: String,
    pub language: String,
}

impl From<&SiteConfig> for SiteData {
    fn from(config: &SiteConfig) -> Self {
        Self {
            name: config.name.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            email: config.email.clone(),
            url: config.base_url().to_string(),
            language: config.language.clone(),
        }
    }
}

/// A post as shown in listings and on its own page
#[derive(Debug, Clone, Serialize)]
pub struct PostData {
    pub slug: String,
    pub title: String,
    pub date: String,
    pub display_date: String,
    pub kind: String,
    pub tags: Vec<String>,
    pub excerpt: String,
    pub reading_time_minutes: u32,
    pub path: String,
}

impl From<&Post> for PostData {
    fn from(post: &Post) -> Self {
        Self {
            slug: post.slug.clone(),
            title: post.title.clone(),
            date: post.date_string(),
            display_date: full_date(&post.date),
            kind: post.kind.to_string(),
            tags: post.tags.clone(),
            excerpt: post.excerpt.clone(),
            reading_time_minutes: post.reading_time_minutes,
            path: post_path(&post.slug),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NavPost {
    pub title: String,
    pub path: String,
}

impl From<&Post> for NavPost {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            path: post_path(&post.slug),
        }
    }
}

/// Link to a per-kind listing
#[derive(Debug, Clone, Serialize)]
pub struct KindLink {
    pub kind: &'static str,
    pub label: &'static str,
    pub path: String,
}

impl KindLink {
    pub fn all() -> Vec<Self> {
        PostKind::ALL
            .into_iter()
            .map(|kind| Self {
                kind: kind.as_str(),
                label: match kind {
                    PostKind::Note => "Notes",
                    PostKind::Article => "Articles",
                },
                path: kind.listing_path(),
            })
            .collect()
    }
}
