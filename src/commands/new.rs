//! Create a new post

use anyhow::Result;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use crate::content::loader::POST_EXTENSIONS;
use crate::content::schema;
use crate::content::PostKind;
use crate::Folio;

/// Options for `folio new`
#[derive(Debug, Clone)]
pub struct NewPostOptions {
    pub kind: PostKind,
    pub draft: bool,
    /// File name (without extension); derived from the title when absent
    pub slug: Option<String>,
}

impl Default for NewPostOptions {
    fn default() -> Self {
        Self {
            kind: PostKind::Note,
            draft: false,
            slug: None,
        }
    }
}

/// Body of a fresh post; the excerpt is derived from it
const PLACEHOLDER_BODY: &str = "Start writing here.";

/// Frontmatter written for a fresh post
#[derive(Serialize)]
struct Scaffold<'a> {
    title: &'a str,
    date: String,
    kind: PostKind,
    tags: Vec<String>,
    draft: bool,
}

/// Create a new post file and return its path
pub fn create_post(folio: &Folio, title: &str, options: &NewPostOptions) -> Result<PathBuf> {
    let title = title.trim();
    if title.is_empty() {
        anyhow::bail!("Title must not be empty");
    }

    let slug = match &options.slug {
        Some(slug) => slug.trim().to_string(),
        None => slug::slugify(title),
    };
    if slug.contains(['/', '\\']) || schema::validate_slug(&slug).is_err() {
        anyhow::bail!("Invalid slug: {:?}", slug);
    }

    fs::create_dir_all(&folio.posts_dir)?;
    let file_path = folio.posts_dir.join(format!("{}.md", slug));

    // Any source with this slug would collide on load
    for ext in POST_EXTENSIONS {
        let existing = folio.posts_dir.join(format!("{}.{}", slug, ext));
        if existing.exists() {
            anyhow::bail!("File already exists: {:?}", existing);
        }
    }

    let scaffold = Scaffold {
        title,
        date: chrono::Local::now().format("%Y-%m-%d").to_string(),
        kind: options.kind,
        tags: Vec::new(),
        draft: options.draft,
    };
    let content = format!(
        "---\n{}---\n\n{}\n",
        serde_yaml::to_string(&scaffold)?,
        PLACEHOLDER_BODY
    );

    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}
