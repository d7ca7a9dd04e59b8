//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub name: String,
    pub description: String,
    pub author: String,
    pub email: String,
    pub language: String,

    // URL
    pub url: String,

    // Directory
    pub posts_dir: String,
    pub public_dir: String,
    pub static_dir: String,

    // Content loading
    /// Seconds a loaded post collection is reused; 0 reloads on every query
    pub revalidate: u64,
    pub on_invalid: InvalidPostPolicy,

    // Rendering
    #[serde(default)]
    pub highlight: HighlightConfig,
    #[serde(default)]
    pub sitemap: SitemapConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "Folio".to_string(),
            description: String::new(),
            author: String::new(),
            email: String::new(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),

            posts_dir: "content/posts".to_string(),
            public_dir: "public".to_string(),
            static_dir: "static".to_string(),

            revalidate: 3600,
            on_invalid: InvalidPostPolicy::Fail,

            highlight: HighlightConfig::default(),
            sitemap: SitemapConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Site URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// Revalidation window, `None` when memoization is disabled
    pub fn revalidate_window(&self) -> Option<Duration> {
        (self.revalidate > 0).then(|| Duration::from_secs(self.revalidate))
    }
}

/// What to do with a post whose frontmatter fails validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidPostPolicy {
    /// Abort the whole load
    #[default]
    Fail,
    /// Log a warning and leave the post out
    Skip,
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

/// Sitemap configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    pub static_routes: Vec<SitemapRoute>,
    pub post_changefreq: String,
    pub post_priority: f32,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            static_routes: vec![
                SitemapRoute {
                    path: "/".to_string(),
                    changefreq: "weekly".to_string(),
                    priority: 1.0,
                },
                SitemapRoute {
                    path: "/blog".to_string(),
                    changefreq: "weekly".to_string(),
                    priority: 0.9,
                },
            ],
            post_changefreq: "monthly".to_string(),
            post_priority: 0.7,
        }
    }
}

/// A fixed route listed in the sitemap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SitemapRoute {
    pub path: String,
    pub changefreq: String,
    pub priority: f32,
}
