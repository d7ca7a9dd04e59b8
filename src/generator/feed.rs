//! RSS feed generation.
//!
//! One `<item>` per published post; the full rendered body is carried in
//! `content:encoded` so readers can show the post without visiting the site.

use anyhow::Result;

use crate::config::SiteConfig;
use crate::content::{MarkdownRenderer, Post};
use crate::helpers::{absolute_url, cdata, escape_xml, post_url, rfc822, strip_invalid_xml_chars};

/// Build the RSS 2.0 document for `posts` (already filtered and sorted)
pub fn rss_feed(config: &SiteConfig, posts: &[Post], markdown: &MarkdownRenderer) -> Result<String> {
    let mut feed = String::with_capacity(4096);
    feed.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    feed.push('\n');
    feed.push_str(
        r#"<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom" xmlns:content="http://purl.org/rss/1.0/modules/content/">"#,
    );
    feed.push_str("\n  <channel>\n");
    feed.push_str(&format!("    <title>{}</title>\n", escape_xml(&config.name)));
    feed.push_str(&format!(
        "    <description>{}</description>\n",
        escape_xml(&config.description)
    ));
    feed.push_str(&format!(
        "    <link>{}</link>\n",
        escape_xml(config.base_url())
    ));
    feed.push_str(&format!(
        "    <atom:link href=\"{}\" rel=\"self\" type=\"application/rss+xml\"/>\n",
        escape_xml(&absolute_url(config, "feed.xml"))
    ));
    if !config.language.is_empty() {
        feed.push_str(&format!(
            "    <language>{}</language>\n",
            escape_xml(&config.language)
        ));
    }

    for post in posts {
        let link = post_url(config, &post.slug);
        let content = strip_invalid_xml_chars(&markdown.render(&post.content)?);

        feed.push_str("    <item>\n");
        feed.push_str(&format!(
            "      <title>{}</title>\n",
            escape_xml(&strip_invalid_xml_chars(&post.title))
        ));
        feed.push_str(&format!("      <link>{}</link>\n", escape_xml(&link)));
        feed.push_str(&format!(
            "      <guid isPermaLink=\"true\">{}</guid>\n",
            escape_xml(&link)
        ));
        feed.push_str(&format!("      <pubDate>{}</pubDate>\n", rfc822(&post.date)));
        feed.push_str(&format!(
            "      <description>{}</description>\n",
            escape_xml(&strip_invalid_xml_chars(&post.excerpt))
        ));
        for tag in &post.tags {
            feed.push_str(&format!("      <category>{}</category>\n", escape_xml(tag)));
        }
        feed.push_str(&format!(
            "      <content:encoded>{}</content:encoded>\n",
            cdata(&content)
        ));
        feed.push_str("    </item>\n");
    }

    feed.push_str("  </channel>\n</rss>\n");
    Ok(feed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::sample_post;

    fn config() -> SiteConfig {
        SiteConfig {
            name: "Tom & Jerry".to_string(),
            description: "Cartoons <3".to_string(),
            url: "https://example.com/".to_string(),
            ..SiteConfig::default()
        }
    }

    #[test]
    fn test_feed_channel() {
        let xml = rss_feed(&config(), &[], &MarkdownRenderer::new()).unwrap();
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains("<title>Tom &amp; Jerry</title>"));
        assert!(xml.contains("<description>Cartoons &lt;3</description>"));
        assert!(xml.contains("<link>https://example.com</link>"));
        assert!(xml.contains(r#"href="https://example.com/feed.xml""#));
        assert!(!xml.contains("<item>"));
    }

    #[test]
    fn test_feed_items() {
        let mut post = sample_post("first-post", "2024-01-01");
        post.title = "A <b> & 'c'".to_string();
        post.excerpt = "Short & sweet".to_string();
        post.content = "Hello **world**\n\n<div>]]></div>".to_string();
        post.tags = vec!["rust".to_string()];

        let xml = rss_feed(&config(), &[post], &MarkdownRenderer::new()).unwrap();
        assert_eq!(xml.matches("<item>").count(), 1);
        assert!(xml.contains("<title>A &lt;b&gt; &amp; &apos;c&apos;</title>"));
        assert!(xml.contains("<link>https://example.com/blog/first-post</link>"));
        assert!(xml.contains(
            r#"<guid isPermaLink="true">https://example.com/blog/first-post</guid>"#
        ));
        assert!(xml.contains("<pubDate>Mon, 01 Jan 2024 00:00:00 GMT</pubDate>"));
        assert!(xml.contains("<description>Short &amp; sweet</description>"));
        assert!(xml.contains("<category>rust</category>"));
        assert!(xml.contains("<content:encoded><![CDATA[<p>Hello <strong>world</strong>"));
        assert!(xml.contains("]]]]><![CDATA[>"));
    }

    #[test]
    fn test_feed_keeps_post_order() {
        let posts = vec![sample_post("newer", "2024-02-01"), sample_post("older", "2024-01-01")];
        let xml = rss_feed(&config(), &posts, &MarkdownRenderer::new()).unwrap();
        let newer = xml.find("/blog/newer").unwrap();
        let older = xml.find("/blog/older").unwrap();
        assert!(newer < older);
    }
}
