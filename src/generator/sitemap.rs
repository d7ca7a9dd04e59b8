//! Sitemap generation.
//!
//! Lists the configured static routes followed by every published post.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/blog/hello</loc>
//!     <lastmod>2024-01-01</lastmod>
//!     <changefreq>monthly</changefreq>
//!     <priority>0.7</priority>
//!   </url>
//! </urlset>
//! ```

use chrono::{DateTime, Utc};

use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::{absolute_url, date_xml, escape_xml, post_url, w3c_date};

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

struct UrlEntry {
    loc: String,
    lastmod: String,
    changefreq: String,
    priority: f32,
}

/// Build the sitemap for `posts`; static routes are stamped with `now`
pub fn sitemap(config: &SiteConfig, posts: &[Post], now: DateTime<Utc>) -> String {
    let static_routes = config.sitemap.static_routes.iter().map(|route| UrlEntry {
        loc: absolute_url(config, &route.path),
        lastmod: date_xml(&now),
        changefreq: route.changefreq.clone(),
        priority: route.priority,
    });

    let post_routes = posts.iter().map(|post| UrlEntry {
        loc: post_url(config, &post.slug),
        lastmod: w3c_date(&post.date),
        changefreq: config.sitemap.post_changefreq.clone(),
        priority: config.sitemap.post_priority,
    });

    into_xml(static_routes.chain(post_routes))
}

fn into_xml(entries: impl Iterator<Item = UrlEntry>) -> String {
    let mut xml = String::with_capacity(4096);

    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"");
    xml.push_str(SITEMAP_NS);
    xml.push_str("\">\n");

    for entry in entries {
        xml.push_str("  <url>\n    <loc>");
        xml.push_str(&escape_xml(&entry.loc));
        xml.push_str("</loc>\n    <lastmod>");
        xml.push_str(&entry.lastmod);
        xml.push_str("</lastmod>\n    <changefreq>");
        xml.push_str(&escape_xml(&entry.changefreq));
        xml.push_str("</changefreq>\n    <priority>");
        xml.push_str(&format!("{:.1}", entry.priority));
        xml.push_str("</priority>\n  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}
