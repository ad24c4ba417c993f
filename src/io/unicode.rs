//! Unicode utilities for text processing.
//!
//! Truncation here works on grapheme clusters so that previews and
//! fallback snippets never split a user-perceived character.

use unicode_segmentation::UnicodeSegmentation;

/// Counts the number of grapheme clusters in a string.
///
/// # Examples
///
/// ```
/// use healthfaq::io::unicode::grapheme_count;
///
/// assert_eq!(grapheme_count("Hello"), 5);
/// assert_eq!(grapheme_count("世界"), 2);
/// ```
#[must_use]
pub fn grapheme_count(s: &str) -> usize {
    s.graphemes(true).count()
}

/// Truncates a string at a grapheme cluster boundary.
///
/// # Arguments
///
/// * `s` - The string to truncate.
/// * `max_graphemes` - Maximum number of grapheme clusters.
///
/// # Returns
///
/// A string slice containing at most `max_graphemes` grapheme clusters.
#[must_use]
pub fn truncate_graphemes(s: &str, max_graphemes: usize) -> &str {
    let mut end_byte = 0;

    for (count, grapheme) in s.graphemes(true).enumerate() {
        if count >= max_graphemes {
            break;
        }
        end_byte += grapheme.len();
    }

    &s[..end_byte]
}

/// Shortens `s` to `max_graphemes`, marking the cut with `...`.
///
/// Strings that already fit are returned unchanged.
#[must_use]
pub fn ellipsize(s: &str, max_graphemes: usize) -> String {
    if grapheme_count(s) <= max_graphemes {
        return s.to_string();
    }
    if max_graphemes <= 3 {
        return truncate_graphemes(s, max_graphemes).to_string();
    }
    format!("{}...", truncate_graphemes(s, max_graphemes - 3))
}

/// Returns the text before the first period, trimmed.
///
/// Text without a period is returned whole.
#[must_use]
pub fn first_sentence(s: &str) -> &str {
    s.split('.').next().unwrap_or(s).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grapheme_count() {
        assert_eq!(grapheme_count("Hello"), 5);
        assert_eq!(grapheme_count("世界"), 2);
        assert_eq!(grapheme_count("e\u{301}"), 1);
    }

    #[test]
    fn test_truncate_graphemes() {
        assert_eq!(truncate_graphemes("Hello", 3), "Hel");
        assert_eq!(truncate_graphemes("Hello", 10), "Hello");
        assert_eq!(truncate_graphemes("世界你好", 2), "世界");
        assert_eq!(truncate_graphemes("", 5), "");
    }

    #[test]
    fn test_ellipsize() {
        assert_eq!(ellipsize("Hello", 10), "Hello");
        assert_eq!(ellipsize("Hello World", 8), "Hello...");
        assert_eq!(ellipsize("Hi there", 2), "Hi");
        assert_eq!(ellipsize("日本語のテキスト", 5), "日本...");
    }

    #[test]
    fn test_first_sentence() {
        assert_eq!(first_sentence("Iron is low. Eat spinach."), "Iron is low");
        assert_eq!(first_sentence("  No period here "), "No period here");
        assert_eq!(first_sentence(".leading"), "");
        assert_eq!(first_sentence(""), "");
    }
}
