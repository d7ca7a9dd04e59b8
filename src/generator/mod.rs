//! Generator module - writes the site into the public directory

pub mod feed;
pub mod pages;
pub mod sitemap;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::content::{AdjacentPosts, Post, PostKind, PostStore};
use crate::Folio;
pub use pages::PageRenderer;

/// Static site generator
pub struct Generator {
    folio: Folio,
    pages: PageRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(folio: &Folio) -> Result<Self> {
        Ok(Self {
            folio: folio.clone(),
            pages: PageRenderer::new(&folio.config)?,
        })
    }

    /// Generate the entire site from the published posts in `store`
    pub fn generate(&self, store: &PostStore) -> Result<usize> {
        let published = store.list_published()?;

        fs::create_dir_all(&self.folio.public_dir)?;
        self.copy_static_assets()?;

        self.write("index.html", &self.pages.home(&published)?)?;
        self.write("blog/index.html", &self.pages.blog_index(&published, None)?)?;
        for kind in PostKind::ALL {
            let posts: Vec<Post> = published.iter().filter(|p| p.kind == kind).cloned().collect();
            self.write(
                &format!("blog/kind/{}/index.html", kind.plural()),
                &self.pages.blog_index(&posts, Some(kind))?,
            )?;
        }

        for post in &published {
            let adjacent = AdjacentPosts::locate(&published, &post.slug);
            let html = self.pages.post(post, &adjacent)?;
            self.write(&format!("blog/{}/index.html", post.slug), &html)?;
        }

        self.write("404.html", &self.pages.not_found()?)?;

        let config = &self.folio.config;
        self.write(
            "feed.xml",
            &feed::rss_feed(config, &published, self.pages.markdown())?,
        )?;
        self.write(
            "sitemap.xml",
            &sitemap::sitemap(config, &published, chrono::Utc::now()),
        )?;

        tracing::info!(
            "Generated {} posts into {}",
            published.len(),
            self.folio.public_dir.display()
        );
        Ok(published.len())
    }

    /// Write a file relative to the public directory
    fn write(&self, relative: &str, content: &str) -> Result<()> {
        let output_path = self.folio.public_dir.join(relative);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&output_path, content)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        tracing::debug!("Generated: {}", relative);
        Ok(())
    }

    /// Copy the static directory verbatim into the public directory
    fn copy_static_assets(&self) -> Result<()> {
        let static_dir = &self.folio.static_dir;
        if !static_dir.is_dir() {
            return Ok(());
        }

        for entry in WalkDir::new(static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let dest = public_path(&self.folio.public_dir, static_dir, path)?;
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)
                .with_context(|| format!("Failed to copy {}", path.display()))?;
        }

        Ok(())
    }
}

fn public_path(public_dir: &Path, static_dir: &Path, path: &Path) -> Result<PathBuf> {
    Ok(public_dir.join(path.strip_prefix(static_dir)?))
}
