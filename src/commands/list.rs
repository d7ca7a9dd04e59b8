//! List site content

use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::content::{Post, PostKind, PostStore};
use crate::Folio;

/// What `folio list` prints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Posts,
    Drafts,
    Tags,
    Kinds,
}

impl std::str::FromStr for ListKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "post" | "posts" => Ok(ListKind::Posts),
            "draft" | "drafts" => Ok(ListKind::Drafts),
            "tag" | "tags" => Ok(ListKind::Tags),
            "kind" | "kinds" => Ok(ListKind::Kinds),
            _ => anyhow::bail!("Unknown type: {}. Available: post, draft, tag, kind", s),
        }
    }
}

#[derive(Debug, Serialize)]
struct Count {
    name: String,
    count: usize,
}

/// List site content by type
pub fn run(folio: &Folio, content_type: &str, json: bool) -> Result<()> {
    let store = PostStore::for_site(folio);
    print!("{}", render(&store, content_type.parse()?, json)?);
    Ok(())
}

fn render(store: &PostStore, kind: ListKind, json: bool) -> Result<String> {
    let mut out = String::new();

    match kind {
        ListKind::Posts | ListKind::Drafts => {
            let posts: Vec<Post> = if kind == ListKind::Posts {
                store.list_published()?
            } else {
                store.load_all()?.iter().filter(|p| p.draft).cloned().collect()
            };

            if json {
                out.push_str(&serde_json::to_string_pretty(&posts)?);
                out.push('\n');
                return Ok(out);
            }

            let label = if kind == ListKind::Posts { "Posts" } else { "Drafts" };
            out.push_str(&format!("{} ({}):\n", label, posts.len()));
            for post in posts {
                out.push_str(&format!(
                    "  {} - {} [{}] ({})\n",
                    post.date_string(),
                    post.title,
                    post.kind,
                    post.slug
                ));
            }
        }
        ListKind::Tags => {
            let mut tags: BTreeMap<String, usize> = BTreeMap::new();
            for post in store.list_published()? {
                for tag in post.tags {
                    *tags.entry(tag).or_insert(0) += 1;
                }
            }
            let mut tags: Vec<Count> = tags
                .into_iter()
                .map(|(name, count)| Count { name, count })
                .collect();
            tags.sort_by(|a, b| b.count.cmp(&a.count));
            write_counts(&mut out, "Tags", &tags, json)?;
        }
        ListKind::Kinds => {
            let kinds = PostKind::ALL
                .iter()
                .map(|kind| {
                    Ok(Count {
                        name: kind.to_string(),
                        count: store.list_by_kind(*kind)?.len(),
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            write_counts(&mut out, "Kinds", &kinds, json)?;
        }
    }

    Ok(out)
}

fn write_counts(out: &mut String, label: &str, counts: &[Count], json: bool) -> Result<()> {
    if json {
        out.push_str(&serde_json::to_string_pretty(counts)?);
        out.push('\n');
        return Ok(());
    }

    out.push_str(&format!("{} ({}):\n", label, counts.len()));
    for entry in counts {
        out.push_str(&format!("  {} ({})\n", entry.name, entry.count));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentLoader;
    use std::fs;
    use tempfile::TempDir;

    fn store() -> (TempDir, PostStore) {
        let tmp = TempDir::new().unwrap();
        let posts = [
            ("a.md", "title: A\ndate: 2024-01-01\nkind: note\ntags: [rust, web]"),
            ("b.md", "title: B\ndate: 2024-02-01\nkind: article\ntags: [rust]"),
            ("c.md", "title: C\ndate: 2024-03-01\nkind: note\ndraft: true"),
        ];
        for (name, fm) in posts {
            fs::write(tmp.path().join(name), format!("---\n{fm}\n---\nBody.\n")).unwrap();
        }
        let store = PostStore::new(ContentLoader::new(tmp.path()), None);
        (tmp, store)
    }

    #[test]
    fn test_list_kind_parse() {
        assert_eq!("post".parse::<ListKind>().unwrap(), ListKind::Posts);
        assert_eq!("drafts".parse::<ListKind>().unwrap(), ListKind::Drafts);
        assert!("page".parse::<ListKind>().is_err());
    }

    #[test]
    fn test_list_posts_and_drafts() {
        let (_tmp, store) = store();
        let posts = render(&store, ListKind::Posts, false).unwrap();
        assert!(posts.starts_with("Posts (2):\n  2024-02-01 - B [article] (b)\n"));

        let drafts = render(&store, ListKind::Drafts, false).unwrap();
        assert_eq!(drafts, "Drafts (1):\n  2024-03-01 - C [note] (c)\n");
    }

    #[test]
    fn test_list_tags_and_kinds() {
        let (_tmp, store) = store();
        let tags = render(&store, ListKind::Tags, false).unwrap();
        assert_eq!(tags, "Tags (2):\n  rust (2)\n  web (1)\n");

        let kinds = render(&store, ListKind::Kinds, false).unwrap();
        assert_eq!(kinds, "Kinds (2):\n  note (1)\n  article (1)\n");
    }

    #[test]
    fn test_list_json() {
        let (_tmp, store) = store();
        let json = render(&store, ListKind::Posts, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["slug"], "b");
        assert_eq!(value[0]["date"], "2024-02-01");
        assert_eq!(value[1]["readingTimeMinutes"], 1);
    }
}
