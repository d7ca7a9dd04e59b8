//! folio-rs: a small blog engine for Markdown posts
//!
//! Posts live as Markdown/MDX files with YAML frontmatter in a single
//! directory. They are validated, normalized and sorted, then published as
//! HTML pages, an RSS feed and a sitemap, either as static files or through
//! a small development server.

pub mod cache;
pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

pub use error::ContentError;

/// Name of the site configuration file inside the site directory
pub const CONFIG_FILE: &str = "_config.yml";

/// The main Folio application
#[derive(Debug, Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding the post sources
    pub posts_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
    /// Static assets copied/served verbatim
    pub static_dir: PathBuf,
}

impl Folio {
    /// Create a new Folio instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create an instance with an explicit configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let posts_dir = base_dir.join(&config.posts_dir);
        let public_dir = base_dir.join(&config.public_dir);
        let static_dir = base_dir.join(&config.static_dir);

        Self {
            config,
            base_dir,
            posts_dir,
            public_dir,
            static_dir,
        }
    }

    /// Initialize a new site
    pub fn init(&self) -> Result<()> {
        commands::init::run(self)
    }

    /// Generate the static site
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new post
    pub fn new_post(&self, title: &str, options: &commands::new::NewPostOptions) -> Result<PathBuf> {
        commands::new::create_post(self, title, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_config() {
        let tmp = TempDir::new().unwrap();
        let folio = Folio::new(tmp.path()).unwrap();
        assert_eq!(folio.posts_dir, tmp.path().join("content/posts"));
        assert_eq!(folio.public_dir, tmp.path().join("public"));
        assert_eq!(folio.static_dir, tmp.path().join("static"));
    }

    #[test]
    fn test_reads_config_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            "name: My Blog\nposts_dir: posts\npublic_dir: dist\n",
        )
        .unwrap();

        let folio = Folio::new(tmp.path()).unwrap();
        assert_eq!(folio.config.name, "My Blog");
        assert_eq!(folio.posts_dir, tmp.path().join("posts"));
        assert_eq!(folio.public_dir, tmp.path().join("dist"));
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "revalidate: [not a number]\n").unwrap();
        assert!(Folio::new(tmp.path()).is_err());
    }
}
