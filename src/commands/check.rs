//! Validate every post without generating anything

use anyhow::Result;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::content::loader::load_post;
use crate::content::ContentLoader;
use crate::error::ContentError;
use crate::Folio;

/// Outcome of checking the posts directory
#[derive(Debug, Default)]
pub struct CheckReport {
    pub posts: usize,
    pub drafts: usize,
    pub errors: Vec<ContentError>,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate each post file, collecting every problem instead of stopping at the first
pub fn check(loader: &ContentLoader) -> Result<CheckReport, ContentError> {
    let mut report = CheckReport::default();
    let mut seen: HashMap<String, PathBuf> = HashMap::new();

    for path in loader.post_files()? {
        let post = match load_post(&path) {
            Ok(post) => post,
            Err(e) => {
                report.errors.push(e);
                continue;
            }
        };

        if let Some(first) = seen.insert(post.slug.clone(), path.clone()) {
            report.errors.push(ContentError::DuplicateSlug {
                slug: post.slug,
                first,
                second: path,
            });
            continue;
        }

        if post.draft {
            report.drafts += 1;
        } else {
            report.posts += 1;
        }
    }

    Ok(report)
}

/// Run the check command
pub fn run(folio: &Folio) -> Result<()> {
    let report = check(&ContentLoader::for_site(folio))?;

    for error in &report.errors {
        tracing::error!("{}", error);
    }
    println!(
        "Checked {} posts and {} drafts in {}",
        report.posts,
        report.drafts,
        folio.posts_dir.display()
    );

    if !report.is_ok() {
        anyhow::bail!("{} invalid post(s)", report.errors.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_check_collects_all_errors() {
        let tmp = TempDir::new().unwrap();
        let write = |name: &str, fm: &str| {
            fs::write(tmp.path().join(name), format!("---\n{fm}\n---\nBody.\n")).unwrap()
        };
        write("good.md", "title: Good\ndate: 2024-01-01\nkind: note");
        write("draft.md", "title: Draft\ndate: 2024-01-02\nkind: note\ndraft: true");
        write("no-title.md", "date: 2024-01-03\nkind: note");
        write("bad-kind.md", "title: Bad\ndate: 2024-01-04\nkind: Essay");
        write("good.mdx", "title: Again\ndate: 2024-01-05\nkind: article");

        let report = check(&ContentLoader::new(tmp.path())).unwrap();
        assert_eq!(report.posts, 1);
        assert_eq!(report.drafts, 1);
        assert_eq!(report.errors.len(), 3);
        assert!(!report.is_ok());

        let fields: Vec<&str> = report.errors.iter().flat_map(|e| e.fields()).collect();
        assert_eq!(fields, vec!["kind", "title"]);
        assert!(report
            .errors
            .iter()
            .any(|e| matches!(e, ContentError::DuplicateSlug { slug, .. } if slug == "good")));
    }

    #[test]
    fn test_check_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let err = check(&ContentLoader::new(tmp.path().join("missing"))).unwrap_err();
        assert!(matches!(err, ContentError::SourceUnavailable { .. }));
    }
}
