//! Post model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// A blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// File name without extension; lookup key and URL segment
    pub slug: String,

    /// Post title (trimmed)
    pub title: String,

    /// Publication date
    pub date: NaiveDate,

    /// Authored or derived summary
    pub excerpt: String,

    pub kind: PostKind,

    pub tags: Vec<String>,

    /// Drafts are loaded but never published
    pub draft: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,

    /// Trimmed Markdown body
    pub content: String,

    pub reading_time_minutes: u32,

    /// Source file the post was read from
    #[serde(skip)]
    pub source: PathBuf,
}

impl Post {
    /// Publication date as `YYYY-MM-DD`
    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn is_published(&self) -> bool {
        !self.draft
    }
}

/// The two kinds of writing on the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostKind {
    Note,
    Article,
}

impl PostKind {
    pub const ALL: [PostKind; 2] = [PostKind::Note, PostKind::Article];

    pub fn as_str(&self) -> &'static str {
        match self {
            PostKind::Note => "note",
            PostKind::Article => "article",
        }
    }

    /// Directory name used for per-kind listings
    pub fn plural(&self) -> &'static str {
        match self {
            PostKind::Note => "notes",
            PostKind::Article => "articles",
        }
    }

    pub fn from_plural(plural: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.plural() == plural)
    }

    /// Site-relative path of the listing for this kind
    pub fn listing_path(&self) -> String {
        format!("/blog/kind/{}", self.plural())
    }
}

impl fmt::Display for PostKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostKind {
    type Err = String;

    /// Accepts only the exact lowercase literals
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "note" => Ok(PostKind::Note),
            "article" => Ok(PostKind::Article),
            other => Err(format!(
                "expected `note` or `article`, found `{}`",
                other
            )),
        }
    }
}

/// Chronological neighbours of a post within the published sequence
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AdjacentPosts {
    /// The next more recent post
    pub newer: Option<Post>,
    /// The next older post
    pub older: Option<Post>,
}

impl AdjacentPosts {
    /// Locate `slug` in a newest-first sequence and pick its neighbours
    pub fn locate(posts: &[Post], slug: &str) -> Self {
        let Some(pos) = posts.iter().position(|p| p.slug == slug) else {
            return Self::default();
        };
        Self {
            newer: pos.checked_sub(1).map(|i| posts[i].clone()),
            older: posts.get(pos + 1).cloned(),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn post(slug: &str, date: &str) -> Post {
        Post {
            slug: slug.to_string(),
            title: slug.to_uppercase(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            excerpt: format!("About {}", slug),
            kind: PostKind::Note,
            tags: Vec::new(),
            draft: false,
            canonical_url: None,
            cover_image: None,
            content: format!("About {}", slug),
            reading_time_minutes: 1,
            source: PathBuf::from(format!("{}.md", slug)),
        }
    }

    #[test]
    fn test_kind_parsing_is_exact() {
        assert_eq!("note".parse::<PostKind>(), Ok(PostKind::Note));
        assert_eq!("article".parse::<PostKind>(), Ok(PostKind::Article));
        assert!("Note".parse::<PostKind>().is_err());
        assert!(" article".parse::<PostKind>().is_err());
        assert!("essay".parse::<PostKind>().is_err());
    }

    #[test]
    fn test_adjacent_in_middle() {
        let posts = vec![
            post("c", "2024-03-01"),
            post("b", "2024-02-01"),
            post("a", "2024-01-01"),
        ];
        let adjacent = AdjacentPosts::locate(&posts, "b");
        assert_eq!(adjacent.newer.unwrap().slug, "c");
        assert_eq!(adjacent.older.unwrap().slug, "a");
    }

    #[test]
    fn test_adjacent_at_edges() {
        let posts = vec![post("new", "2024-02-01"), post("old", "2024-01-01")];

        let newest = AdjacentPosts::locate(&posts, "new");
        assert!(newest.newer.is_none());
        assert_eq!(newest.older.unwrap().slug, "old");

        let oldest = AdjacentPosts::locate(&posts, "old");
        assert_eq!(oldest.newer.unwrap().slug, "new");
        assert!(oldest.older.is_none());
    }

    #[test]
    fn test_adjacent_unknown_slug() {
        let posts = vec![post("only", "2024-01-01")];
        assert_eq!(AdjacentPosts::locate(&posts, "nope"), AdjacentPosts::default());
        assert_eq!(AdjacentPosts::locate(&[], "nope"), AdjacentPosts::default());
    }

    #[test]
    fn test_post_serializes_camel_case() {
        let json = serde_json::to_value(post("hello", "2024-01-01")).unwrap();
        assert_eq!(json["date"], "2024-01-01");
        assert_eq!(json["kind"], "note");
        assert_eq!(json["readingTimeMinutes"], 1);
        assert!(json.get("canonicalUrl").is_none());
        assert!(json.get("source").is_none());
    }
}
