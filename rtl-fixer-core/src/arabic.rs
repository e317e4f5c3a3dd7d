//! Arabic range test
use regex::Regex;
use std::sync::OnceLock;

/// First code point of the Arabic Unicode block.
pub const ARABIC_BLOCK_START: char = '\u{0600}';
/// Last code point of the Arabic Unicode block.
pub const ARABIC_BLOCK_END: char = '\u{06FF}';

fn arabic_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"[\x{0600}-\x{06FF}]").ok())
        .as_ref()
}

/// True when `text` holds at least one code point in U+0600..=U+06FF.
#[must_use]
pub fn contains_arabic(text: &str) -> bool {
    arabic_pattern().map_or_else(
        || {
            text.chars()
                .any(|c| (ARABIC_BLOCK_START..=ARABIC_BLOCK_END).contains(&c))
        },
        |re| re.is_match(text),
    )
}

/// True when any of the given text fragments holds Arabic.
pub fn any_contains_arabic<I, S>(fragments: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    fragments
        .into_iter()
        .any(|fragment| contains_arabic(fragment.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_arabic_words() {
        assert!(contains_arabic("مرحبا"));
        assert!(contains_arabic("Hello مرحبا world"));
    }

    #[test]
    fn latin_and_empty_text_are_not_arabic() {
        assert!(!contains_arabic("Hello world"));
        assert!(!contains_arabic(""));
        assert!(!contains_arabic("   \n\t"));
    }

    #[test]
    fn block_edges_are_inclusive() {
        assert!(contains_arabic("\u{0600}"));
        assert!(contains_arabic("\u{06FF}"));
        assert!(!contains_arabic("\u{05FF}"));
        assert!(!contains_arabic("\u{0700}"));
    }

    #[test]
    fn other_rtl_scripts_are_ignored() {
        // Hebrew and the Arabic presentation forms sit outside the tested block.
        assert!(!contains_arabic("שלום"));
        assert!(!contains_arabic("\u{FEFB}"));
    }

    #[test]
    fn any_fragment_matches() {
        assert!(any_contains_arabic(["abc", "", "سلام"]));
        assert!(!any_contains_arabic(["abc", "def"]));
        assert!(!any_contains_arabic(Vec::<String>::new()));
    }
}
