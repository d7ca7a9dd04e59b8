//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::config::SiteConfig;

/// Characters escaped inside a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Site-relative path of a post page
///
/// # Examples
/// ```ignore
/// post_path("hello world") // -> "/blog/hello%20world"
/// ```
pub fn post_path(slug: &str) -> String {
    format!("/blog/{}", utf8_percent_encode(slug, SEGMENT))
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// absolute_url(&config, "blog") // -> "https://example.com/blog"
/// ```
pub fn absolute_url(config: &SiteConfig, path: &str) -> String {
    let path = path.trim_start_matches('/');
    format!("{}/{}", config.base_url(), path)
}

/// Absolute URL of a post page
pub fn post_url(config: &SiteConfig, slug: &str) -> String {
    absolute_url(config, &post_path(slug))
}
