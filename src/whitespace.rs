//! Whitespace normalization for text fragments
//!
//! Normalization is applied to each text node before it is appended to the
//! output, never to the finished document. Only HTML whitespace (space, tab,
//! line feed, form feed, carriage return) counts as whitespace; non-ASCII
//! characters such as NBSP or CJK ideographic space are content.

use std::borrow::Cow;

/// True for the five HTML whitespace characters
pub fn is_html_whitespace(ch: char) -> bool {
    ch.is_ascii_whitespace()
}

/// Collapse every whitespace run to a single ASCII space
///
/// Leading and trailing runs are collapsed too, not removed: whether a
/// boundary space survives depends on the neighbouring fragment, which is
/// decided when the fragment is appended. With `preformatted` set the text is
/// returned untouched.
///
/// # Examples
///
/// ```
/// use html_markdown_converter::whitespace::normalize;
///
/// assert_eq!(normalize("  multiple \t\n spaces ", false), " multiple spaces ");
/// assert_eq!(normalize("  keep\n  this", true), "  keep\n  this");
/// ```
pub fn normalize(text: &str, preformatted: bool) -> Cow<'_, str> {
    if preformatted || !needs_collapse(text) {
        return Cow::Borrowed(text);
    }

    let mut result = String::with_capacity(text.len());
    let mut in_run = false;
    for ch in text.chars() {
        if is_html_whitespace(ch) {
            if !in_run {
                result.push(' ');
                in_run = true;
            }
        } else {
            result.push(ch);
            in_run = false;
        }
    }
    Cow::Owned(result)
}

/// Strip leading and trailing HTML whitespace (non-ASCII spaces are kept)
pub fn trim(text: &str) -> &str {
    text.trim_matches(is_html_whitespace)
}

fn needs_collapse(text: &str) -> bool {
    let mut prev_space = false;
    for ch in text.chars() {
        if ch == ' ' {
            if prev_space {
                return true;
            }
            prev_space = true;
        } else if is_html_whitespace(ch) {
            return true;
        } else {
            prev_space = false;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_collapse_mixed_runs() {
        assert_eq!(normalize("a \t\r\n b", false), "a b");
        assert_eq!(normalize("\n\nlead", false), " lead");
        assert_eq!(normalize("trail\t\t", false), "trail ");
    }

    #[test]
    fn test_clean_text_is_borrowed() {
        assert!(matches!(normalize("already clean", false), Cow::Borrowed(_)));
        assert!(matches!(normalize("two  spaces", false), Cow::Owned(_)));
    }

    #[test]
    fn test_preformatted_is_verbatim() {
        let code = "  x = 1\n    y = 2\n";
        assert_eq!(normalize(code, true), code);
    }

    #[test]
    fn test_non_ascii_is_never_whitespace() {
        assert_eq!(normalize("行1\u{3000}行2", false), "行1\u{3000}行2");
        assert_eq!(normalize("a\u{a0}\u{a0}b", false), "a\u{a0}\u{a0}b");
        assert_eq!(trim("\u{a0}x\u{a0}"), "\u{a0}x\u{a0}");
    }

    #[test]
    fn test_trim() {
        assert_eq!(trim(" \n text \t"), "text");
        assert_eq!(trim("   "), "");
    }

    proptest! {
        #[test]
        fn prop_whitespace_runs_become_one_space(
            words in prop::collection::vec("[a-z0-9行字]{1,8}", 1..6),
            gaps in prop::collection::vec("[ \t\n\r]{1,5}", 6),
        ) {
            let mut input = String::new();
            for (i, word) in words.iter().enumerate() {
                if i > 0 {
                    input.push_str(&gaps[i]);
                }
                input.push_str(word);
            }

            let normalized = normalize(&input, false);
            prop_assert_eq!(normalized.as_ref(), words.join(" "));
        }

        #[test]
        fn prop_normalized_text_has_no_double_spaces(input in "[ a-z\t\n]{0,40}") {
            let normalized = normalize(&input, false);
            prop_assert!(!normalized.contains("  "));
            prop_assert!(!normalized.contains('\n'));
            prop_assert!(!normalized.contains('\t'));
        }
    }
}
