//! Core parsing primitives for text extraction.
//!
//! The version layer is built on these: extracting the current version from
//! an environment file and rewriting the version line in place.

use regex::Regex;

/// Extract first match from content using regex pattern with capture group.
/// Pattern must contain exactly one capture group for the value to extract.
pub fn extract_first(content: &str, pattern: &str) -> Option<String> {
    let re = Regex::new(pattern).ok()?;
    re.captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Replace every full match of the pattern with the replacement text.
/// Returns (new_content, replacement_count); None on regex compile error.
pub fn replace_all(content: &str, pattern: &str, replacement: &str) -> Option<(String, usize)> {
    let re = Regex::new(pattern).ok()?;
    let mut count = 0usize;

    let replaced = re
        .replace_all(content, |_caps: &regex::Captures| {
            count += 1;
            replacement.to_string()
        })
        .to_string();

    Some((replaced, count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_first_finds_version() {
        let content = "APP_NAME=depapp\nAPP_VERSION=1.2.3\n";
        let pattern = r"APP_VERSION=([0-9]+\.[0-9]+\.[0-9]+)";
        assert_eq!(extract_first(content, pattern), Some("1.2.3".to_string()));
    }

    #[test]
    fn extract_first_returns_none_on_no_match() {
        let content = "no version here";
        let pattern = r"APP_VERSION=([0-9]+\.[0-9]+\.[0-9]+)";
        assert_eq!(extract_first(content, pattern), None);
    }

    #[test]
    fn extract_first_returns_none_on_invalid_pattern() {
        assert_eq!(extract_first("content", "("), None);
    }

    #[test]
    fn replace_all_counts_replacements() {
        let (replaced, count) = replace_all("x=1 x=2", r"x=\d", "x=9").unwrap();
        assert_eq!(replaced, "x=9 x=9");
        assert_eq!(count, 2);
    }

    #[test]
    fn replace_all_no_match_leaves_content_unchanged() {
        let (replaced, count) = replace_all("y=1", r"x=\d", "x=9").unwrap();
        assert_eq!(replaced, "y=1");
        assert_eq!(count, 0);
    }
}
