//! Front-matter schema: field validators composed into one pass that
//! either yields normalized metadata or every field-level issue found.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_yaml::Value;
use url::Url;

use super::text::fallback_excerpt;
use super::{FrontMatter, PostKind};
use crate::error::FieldIssue;

/// Front-matter after validation and normalization
#[derive(Debug, Clone, PartialEq)]
pub struct PostMeta {
    pub title: String,
    pub date: NaiveDate,
    pub excerpt: String,
    pub kind: PostKind,
    pub tags: Vec<String>,
    pub draft: bool,
    pub canonical_url: Option<String>,
    pub cover_image: Option<String>,
}

/// Validate `fm` against the post schema. `body` is used to derive the
/// excerpt when none is authored.
pub fn validate(fm: &FrontMatter, body: &str) -> Result<PostMeta, Vec<FieldIssue>> {
    let mut issues = Vec::new();

    let title = check(&mut issues, "title", title(fm.title.as_ref()));
    let date = check(&mut issues, "date", date(fm.date.as_ref()));
    let excerpt = check(&mut issues, "excerpt", excerpt(fm.excerpt.as_ref(), body));
    let kind = check(&mut issues, "kind", kind(fm.kind.as_ref()));
    let tags = check(&mut issues, "tags", tags(fm.tags.as_ref()));
    let draft = check(&mut issues, "draft", draft(fm.draft.as_ref()));
    let canonical_url = check(
        &mut issues,
        "canonicalUrl",
        canonical_url(fm.canonical_url.as_ref()),
    );
    let cover_image = check(&mut issues, "coverImage", cover_image(fm.cover_image.as_ref()));

    match (title, date, excerpt, kind, tags, draft, canonical_url, cover_image) {
        (
            Some(title),
            Some(date),
            Some(excerpt),
            Some(kind),
            Some(tags),
            Some(draft),
            Some(canonical_url),
            Some(cover_image),
        ) if issues.is_empty() => Ok(PostMeta {
            title,
            date,
            excerpt,
            kind,
            tags,
            draft,
            canonical_url,
            cover_image,
        }),
        _ => Err(issues),
    }
}

fn check<T>(issues: &mut Vec<FieldIssue>, field: &str, result: Result<T, String>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(message) => {
            issues.push(FieldIssue::new(field, message));
            None
        }
    }
}

fn title(value: Option<&Value>) -> Result<String, String> {
    match value {
        None => Err("missing frontmatter: title".to_string()),
        Some(Value::String(s)) if s.trim().is_empty() => {
            Err("missing frontmatter: title".to_string())
        }
        Some(Value::String(s)) => Ok(s.trim().to_string()),
        Some(other) => Err(type_error("a string", other)),
    }
}

fn date(value: Option<&Value>) -> Result<NaiveDate, String> {
    match value {
        None => Err("missing frontmatter: date".to_string()),
        Some(Value::String(s)) => parse_date_string(s)
            .ok_or_else(|| format!("`{}` is not a valid calendar date", s.trim())),
        Some(other) => Err(type_error("a date or date string", other)),
    }
}

/// Authored excerpt when it is a non-blank string; any other value
/// (absent, blank, a number, a list) falls back to the body.
fn excerpt(value: Option<&Value>, body: &str) -> Result<String, String> {
    let authored = match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    };
    let excerpt = authored.unwrap_or_else(|| fallback_excerpt(body));
    if excerpt.is_empty() {
        return Err("missing frontmatter: excerpt (and the body has no text to derive one)".to_string());
    }
    Ok(excerpt)
}

fn kind(value: Option<&Value>) -> Result<PostKind, String> {
    match value {
        None => Err("missing frontmatter: kind".to_string()),
        Some(Value::String(s)) => s.parse(),
        Some(other) => Err(type_error("`note` or `article`", other)),
    }
}

fn tags(value: Option<&Value>) -> Result<Vec<String>, String> {
    let raw: Vec<String> = match value {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::String(s)) => s.split(',').map(str::to_string).collect(),
        Some(Value::Sequence(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(format!("item {}: {}", i, type_error("a string", other))),
            })
            .collect::<Result<_, _>>()?,
        Some(other) => return Err(type_error("a list of strings or a comma-separated string", other)),
    };
    Ok(normalize_tags(raw))
}

/// Trim, drop empties and keep the first occurrence of each tag
pub fn normalize_tags<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tags: Vec<String> = Vec::new();
    for tag in raw {
        let tag = tag.as_ref().trim();
        if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

fn draft(value: Option<&Value>) -> Result<bool, String> {
    match value {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(other) => Err(type_error("a boolean", other)),
    }
}

fn canonical_url(value: Option<&Value>) -> Result<Option<String>, String> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => {
            let s = s.trim();
            Url::parse(s)
                .map(|_| Some(s.to_string()))
                .map_err(|e| format!("`{}` is not an absolute URL: {}", s, e))
        }
        Some(other) => Err(type_error("a URL string", other)),
    }
}

fn cover_image(value: Option<&Value>) -> Result<Option<String>, String> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Err("must not be empty".to_string()),
        Some(Value::String(s)) => Ok(Some(s.trim().to_string())),
        Some(other) => Err(type_error("a string", other)),
    }
}

/// Parse the date formats authors write by hand and reduce them to a
/// calendar date. Zoned timestamps are taken in UTC.
pub fn parse_date_string(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc).date_naive())
}

/// A slug becomes a path segment of the generated site, so it must name
/// a real file: not empty, not `.` or `..`.
pub fn validate_slug(slug: &str) -> Result<(), String> {
    match slug {
        "" => Err("file name has no stem".to_string()),
        "." | ".." => Err(format!("`{}` is not a usable slug", slug)),
        _ => Ok(()),
    }
}

fn type_error(expected: &str, found: &Value) -> String {
    let found = match found {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    };
    format!("expected {}, found {}", expected, found)
}
