//! Content loader - reads posts from the posts directory

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::schema;
use super::text::reading_time_minutes;
use super::{FrontMatter, Post};
use crate::config::InvalidPostPolicy;
use crate::error::{ContentError, FieldIssue};
use crate::Folio;

/// Extensions recognised as post sources
pub const POST_EXTENSIONS: [&str; 2] = ["md", "mdx"];

/// Loads posts from a single directory
#[derive(Debug, Clone)]
pub struct ContentLoader {
    posts_dir: PathBuf,
    on_invalid: InvalidPostPolicy,
}

impl ContentLoader {
    /// Create a loader over `posts_dir` that fails on the first invalid post
    pub fn new<P: Into<PathBuf>>(posts_dir: P) -> Self {
        Self {
            posts_dir: posts_dir.into(),
            on_invalid: InvalidPostPolicy::Fail,
        }
    }

    /// Create a loader from the site configuration
    pub fn for_site(folio: &Folio) -> Self {
        Self::new(&folio.posts_dir).with_policy(folio.config.on_invalid)
    }

    pub fn with_policy(mut self, on_invalid: InvalidPostPolicy) -> Self {
        self.on_invalid = on_invalid;
        self
    }

    pub fn posts_dir(&self) -> &Path {
        &self.posts_dir
    }

    /// Load every post, drafts included, newest first.
    ///
    /// Posts sharing a date keep file-name order.
    pub fn load_all(&self) -> Result<Vec<Post>, ContentError> {
        let files = self.post_files()?;
        let mut posts: Vec<Post> = Vec::with_capacity(files.len());
        let mut seen: HashMap<String, PathBuf> = HashMap::new();

        for path in files {
            let post = match load_post(&path) {
                Ok(post) => post,
                Err(e @ ContentError::Validation { .. })
                    if self.on_invalid == InvalidPostPolicy::Skip =>
                {
                    tracing::warn!("Skipping invalid post: {}", e);
                    continue;
                }
                Err(e) => return Err(e),
            };

            if let Some(first) = seen.insert(post.slug.clone(), path.clone()) {
                return Err(ContentError::DuplicateSlug {
                    slug: post.slug,
                    first,
                    second: path,
                });
            }
            posts.push(post);
        }

        // Stable: equal dates keep enumeration order
        posts.sort_by(|a, b| b.date.cmp(&a.date));

        tracing::debug!(
            "Loaded {} posts from {}",
            posts.len(),
            self.posts_dir.display()
        );
        Ok(posts)
    }

    /// Post source files directly inside the posts directory, by file name
    pub fn post_files(&self) -> Result<Vec<PathBuf>, ContentError> {
        let unavailable = |path: &Path, source: io::Error| ContentError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        };

        let metadata =
            fs::metadata(&self.posts_dir).map_err(|e| unavailable(&self.posts_dir, e))?;
        if !metadata.is_dir() {
            return Err(unavailable(
                &self.posts_dir,
                io::Error::other("not a directory"),
            ));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.posts_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| {
                let path = e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.posts_dir.clone());
                unavailable(&path, e.into())
            })?;
            if entry.file_type().is_file() && is_post_file(entry.path()) {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }
}

/// Read and parse a single post file
pub fn load_post(path: &Path) -> Result<Post, ContentError> {
    let source = fs::read_to_string(path).map_err(|e| ContentError::SourceUnavailable {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_post(&source, path)
}

/// Parse post source text. The slug comes from the file name of `path`.
pub fn parse_post(source: &str, path: &Path) -> Result<Post, ContentError> {
    let invalid = |issues: Vec<FieldIssue>| ContentError::Validation {
        file: path.to_path_buf(),
        issues,
    };

    let slug = slug_from_path(path);
    schema::validate_slug(&slug).map_err(|e| invalid(vec![FieldIssue::new("slug", e)]))?;

    let (fm, body) = FrontMatter::parse(source)
        .map_err(|e| invalid(vec![FieldIssue::new("frontmatter", e.to_string())]))?;
    let meta = schema::validate(&fm, body).map_err(invalid)?;

    Ok(Post {
        slug,
        title: meta.title,
        date: meta.date,
        excerpt: meta.excerpt,
        kind: meta.kind,
        tags: meta.tags,
        draft: meta.draft,
        canonical_url: meta.canonical_url,
        cover_image: meta.cover_image,
        content: body.trim().to_string(),
        reading_time_minutes: reading_time_minutes(body),
        source: path.to_path_buf(),
    })
}

/// Slug of a post: its file name without the extension
pub fn slug_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Check if a file has a post extension (case-sensitive)
fn is_post_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| POST_EXTENSIONS.contains(&e))
        .unwrap_or(false)
}
