//! Content pipeline errors

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading the post collection
#[derive(Debug, Error)]
pub enum ContentError {
    /// The posts directory or one of its files could not be read
    #[error("content source unavailable: {}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A post's frontmatter does not satisfy the schema
    #[error("content validation failed in {}: {}", file.display(), join_issues(issues))]
    Validation {
        file: PathBuf,
        issues: Vec<FieldIssue>,
    },

    /// Two source files map to the same slug
    #[error(
        "content validation failed: slug `{slug}` is defined by both {} and {}",
        first.display(),
        second.display()
    )]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
}

impl ContentError {
    /// Field names reported by a validation failure (empty for other errors)
    pub fn fields(&self) -> Vec<&str> {
        match self {
            ContentError::Validation { issues, .. } => {
                issues.iter().map(|i| i.field.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }
}

/// A single schema violation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
