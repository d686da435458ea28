//! Text normalization and line-shape predicates.

use lazy_static::lazy_static;
use regex::Regex;

const TATWEEL: char = '\u{0640}';

lazy_static! {
    // Dash marker followed by at least one whitespace character
    static ref SUBENTRY_MARKER: Regex = Regex::new(r"^\s*[-\x{2013}\x{2014}]\s+").unwrap();
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Bidirectional formatting controls that Word scatters through RTL text.
fn is_bidi_control(ch: char) -> bool {
    matches!(ch, '\u{200E}' | '\u{200F}' | '\u{202A}'..='\u{202E}' | '\u{2066}'..='\u{2069}')
}

/// Canonicalize one paragraph of raw text.
///
/// En and em dashes fold to `-`, tatweel and bidi controls are dropped,
/// and whitespace runs collapse to a single space. Idempotent.
pub fn normalize_text(raw: &str) -> String {
    let folded: String = raw
        .chars()
        .filter(|&ch| ch != TATWEEL && !is_bidi_control(ch))
        .map(|ch| match ch {
            '\u{2013}' | '\u{2014}' => '-',
            other => other,
        })
        .collect();

    collapse_whitespace(&folded)
}

/// Trim and collapse every whitespace run to one space.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text.trim(), " ").into_owned()
}

/// Subentry test: strip the leading dash marker of a subentry line.
/// Returns `None` when the line is not a subentry.
pub fn strip_subentry_marker(text: &str) -> Option<&str> {
    SUBENTRY_MARKER
        .find(text)
        .map(|m| text[m.end()..].trim())
}

/// Remove `range` from `text`, joining the two sides with one space.
pub(crate) fn splice_out(text: &str, range: std::ops::Range<usize>) -> String {
    let before = text[..range.start].trim_end();
    let after = text[range.end..].trim_start();
    match (before.is_empty(), after.is_empty()) {
        (true, _) => after.trim_end().to_string(),
        (_, true) => before.trim_start().to_string(),
        _ => format!("{} {}", before.trim_start(), after.trim_end()),
    }
}

#[cfg(test)]
mod normalize_tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn folds_dash_variants() {
        assert_eq!(normalize_text("\u{2013} ܐܒܐ"), "- ܐܒܐ");
        assert_eq!(normalize_text("\u{2014} ܐܒܐ"), "- ܐܒܐ");
    }

    #[test]
    fn strips_tatweel() {
        assert_eq!(normalize_text("كـــبير"), "كبير");
    }

    #[test]
    fn strips_bidi_controls() {
        assert_eq!(normalize_text("\u{200F}ܐܒܐ\u{200E} أب"), "ܐܒܐ أب");
    }

    #[test]
    fn collapses_and_trims_whitespace() {
        assert_eq!(normalize_text("  ܐ \t\t ܒ   ج  "), "ܐ ܒ ج");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text("   \u{0640} "), "");
    }

    #[test]
    fn subentry_needs_whitespace_after_dash() {
        assert_eq!(strip_subentry_marker("- ܐܒܐ"), Some("ܐܒܐ"));
        assert_eq!(strip_subentry_marker("  \u{2013}\tܐܒܐ"), Some("ܐܒܐ"));
        assert_eq!(strip_subentry_marker("-ܐܒܐ"), None);
        assert_eq!(strip_subentry_marker("ܐܒܐ - أب"), None);
    }

    #[test]
    fn strip_marker_returns_body() {
        assert_eq!(strip_subentry_marker("- ܐܒܐ أب"), Some("ܐܒܐ أب"));
        assert_eq!(strip_subentry_marker("ܐܒܐ"), None);
    }

    #[test]
    fn splice_joins_with_single_space() {
        let text = "كلمة(ث)أخرى";
        let start = text.find('(').unwrap();
        let end = text.find(')').unwrap() + 1;
        assert_eq!(splice_out(text, start..end), "كلمة أخرى");
        assert_eq!(splice_out("(ث) كلمة", 0.."(ث)".len()), "كلمة");
    }

    proptest! {
        #[test]
        fn normalization_is_idempotent(s in "[ \t\u{0640}\u{2013}\u{2014}a-zܐ-ܬء-ي\\-]{0,40}") {
            let once = normalize_text(&s);
            prop_assert_eq!(normalize_text(&once), once);
        }
    }
}
