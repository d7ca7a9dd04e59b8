//! Text derivations over a post body

/// Reading speed used for reading-time estimates
pub const WORDS_PER_MINUTE: usize = 220;

/// Maximum length, in characters, of a derived excerpt
pub const EXCERPT_MAX_CHARS: usize = 220;

/// Count whitespace-delimited words
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Estimated reading time in whole minutes, never less than one
pub fn reading_time_minutes(body: &str) -> u32 {
    let minutes = word_count(body).div_ceil(WORDS_PER_MINUTE).max(1);
    u32::try_from(minutes).unwrap_or(u32::MAX)
}

/// Collapse every run of whitespace into a single space
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Derive an excerpt from the first non-empty paragraph of `body`.
///
/// Paragraphs are separated by blank lines. The result is whitespace
/// collapsed and cut at [`EXCERPT_MAX_CHARS`] characters with no ellipsis.
/// Returns an empty string when the body has no text.
pub fn fallback_excerpt(body: &str) -> String {
    first_paragraph(body)
        .map(|p| collapse_whitespace(&p).chars().take(EXCERPT_MAX_CHARS).collect())
        .unwrap_or_default()
}

fn first_paragraph(body: &str) -> Option<String> {
    let mut paragraph: Vec<&str> = Vec::new();
    for line in body.lines() {
        if line.trim().is_empty() {
            if !paragraph.is_empty() {
                break;
            }
        } else {
            paragraph.push(line);
        }
    }
    (!paragraph.is_empty()).then(|| paragraph.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn test_reading_time() {
        assert_eq!(reading_time_minutes(&words(440)), 2);
        assert_eq!(reading_time_minutes(&words(441)), 3);
        assert_eq!(reading_time_minutes(&words(220)), 1);
        assert_eq!(reading_time_minutes("one"), 1);
        assert_eq!(reading_time_minutes(""), 1);
    }

    #[test]
    fn test_word_count_ignores_extra_whitespace() {
        assert_eq!(word_count("  a\tb\n\nc   d "), 4);
        assert_eq!(word_count("   "), 0);
    }

    #[test]
    fn test_excerpt_is_first_paragraph() {
        assert_eq!(fallback_excerpt("Para one.\n\nPara two."), "Para one.");
    }

    #[test]
    fn test_excerpt_skips_leading_blank_lines_and_collapses() {
        let body = "\n\n  \nFirst   line\n   continues\there.\n\nSecond.";
        assert_eq!(fallback_excerpt(body), "First line continues here.");
    }

    #[test]
    fn test_excerpt_blank_line_with_spaces_separates() {
        assert_eq!(fallback_excerpt("One.\n   \nTwo."), "One.");
    }

    #[test]
    fn test_excerpt_hard_cut() {
        let long = "x".repeat(300);
        let excerpt = fallback_excerpt(&long);
        assert_eq!(excerpt.chars().count(), EXCERPT_MAX_CHARS);
        assert!(!excerpt.ends_with('…'));
    }

    #[test]
    fn test_excerpt_cuts_on_characters_not_bytes() {
        let body = "é".repeat(250);
        assert_eq!(fallback_excerpt(&body).chars().count(), EXCERPT_MAX_CHARS);
    }

    #[test]
    fn test_excerpt_of_empty_body() {
        assert_eq!(fallback_excerpt(""), "");
        assert_eq!(fallback_excerpt("\n \n"), "");
    }
}
