//! Front-matter parsing

use serde::Deserialize;
use serde_yaml::Value;
use std::collections::HashMap;

const DELIMITER: &str = "---";

/// Raw front-matter of a post, before schema validation
///
/// Every recognised key is kept as an untyped YAML value so that type
/// mismatches are reported per field by the schema instead of failing
/// the whole block.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FrontMatter {
    pub title: Option<Value>,
    pub date: Option<Value>,
    pub excerpt: Option<Value>,
    pub kind: Option<Value>,
    pub tags: Option<Value>,
    pub draft: Option<Value>,
    pub canonical_url: Option<Value>,
    pub cover_image: Option<Value>,

    /// Keys the schema does not know about
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, body)
    pub fn parse(content: &str) -> Result<(Self, &str), serde_yaml::Error> {
        match split(content) {
            Some((yaml, body)) => {
                if yaml.trim().is_empty() {
                    return Ok((FrontMatter::default(), body));
                }
                let fm = serde_yaml::from_str::<FrontMatter>(yaml)?;
                Ok((fm, body))
            }
            None => Ok((FrontMatter::default(), content)),
        }
    }
}

/// Split a document into its YAML header and body.
///
/// The header must open on the first line with `---` and close with the
/// next line consisting of `---`. Returns `None` when there is no header.
pub fn split(content: &str) -> Option<(&str, &str)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut lines = content.split_inclusive('\n');
    let first = lines.next()?;
    if first.trim_end() != DELIMITER {
        return None;
    }

    let yaml_start = first.len();
    let mut offset = yaml_start;
    for line in lines {
        if line.trim_end() == DELIMITER {
            let yaml = &content[yaml_start..offset];
            let body = &content[offset + line.len()..];
            return Some((yaml, body));
        }
        offset += line.len();
    }

    // No closing delimiter
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
date: 2024-01-15
kind: note
tags:
  - rust
  - blog
canonicalUrl: https://example.com/hello
---

This is the content.
"#;

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, Some(Value::from("Hello World")));
        assert_eq!(fm.date, Some(Value::from("2024-01-15")));
        assert!(matches!(fm.tags, Some(Value::Sequence(ref s)) if s.len() == 2));
        assert_eq!(
            fm.canonical_url,
            Some(Value::from("https://example.com/hello"))
        );
        assert_eq!(body, "\nThis is the content.\n");
    }

    #[test]
    fn test_unknown_keys_are_kept_aside() {
        let content = "---\ntitle: T\nlayout: wide\n---\nBody";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.extra.get("layout"), Some(&Value::from("wide")));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "Just a body.\n";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert!(fm.title.is_none());
        assert_eq!(body, content);
    }

    #[test]
    fn test_unclosed_frontmatter_is_body() {
        let content = "---\ntitle: Never closed\n";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert!(fm.title.is_none());
        assert_eq!(body, content);
    }

    #[test]
    fn test_empty_frontmatter() {
        let (fm, body) = FrontMatter::parse("---\n---\nBody").unwrap();
        assert!(fm.title.is_none());
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_crlf_and_bom() {
        let content = "\u{feff}---\r\ntitle: Windows\r\n---\r\nBody\r\n";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, Some(Value::from("Windows")));
        assert_eq!(body, "Body\r\n");
    }

    #[test]
    fn test_horizontal_rule_in_body_is_not_a_delimiter() {
        let content = "---\ntitle: Rules\n---\nabove\n\n---\n\nbelow\n";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, Some(Value::from("Rules")));
        assert!(body.contains("above"));
        assert!(body.contains("below"));
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let content = "---\ntitle: [unclosed\n---\nBody";
        assert!(FrontMatter::parse(content).is_err());
    }

    #[test]
    fn test_non_mapping_yaml_is_an_error() {
        let content = "---\n- just\n- a list\n---\nBody";
        assert!(FrontMatter::parse(content).is_err());
    }
}
