//! Slug-to-label formatting.

use std::sync::LazyLock;

use percent_encoding::percent_decode_str;
use regex::{Captures, Regex};

/// Turn a hyphenated path segment into a readable label.
///
/// Hyphens become spaces and the first character of every ASCII word is
/// uppercased. A word is a maximal run of `[A-Za-z0-9_]`, so non-ASCII letters
/// act as word separators and are left untouched. No locale rules apply.
///
/// ```
/// use autocrumb_core::label::format_label;
/// assert_eq!(format_label("my-first-post"), "My First Post");
/// assert_eq!(format_label("v2_api"), "V2_api");
/// ```
pub fn format_label(segment: &str) -> String {
    static WORD_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"[A-Za-z0-9_]+").expect("valid regex"));

    let spaced = segment.replace('-', " ");
    WORD_RE
        .replace_all(&spaced, |caps: &Captures<'_>| {
            // Word matches are ASCII-only, so byte slicing is safe.
            let word = &caps[0];
            let mut out = String::with_capacity(word.len());
            out.push_str(&word[..1].to_ascii_uppercase());
            out.push_str(&word[1..]);
            out
        })
        .into_owned()
}

/// Percent-decode a raw path segment before it is formatted.
///
/// Invalid UTF-8 sequences are replaced rather than rejected.
pub fn decode_segment(segment: &str) -> String {
    percent_decode_str(segment).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hyphens_become_spaces() {
        assert_eq!(format_label("getting-started"), "Getting Started");
        assert_eq!(format_label("blog"), "Blog");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(format_label(""), "");
    }

    #[test]
    fn only_first_letter_changes() {
        assert_eq!(format_label("iPhone-tips"), "IPhone Tips");
        assert_eq!(format_label("API-docs"), "API Docs");
        assert_eq!(format_label("2024-recap"), "2024 Recap");
    }

    #[test]
    fn punctuation_starts_new_words() {
        assert_eq!(format_label("page.html"), "Page.Html");
        assert_eq!(format_label("rock'n'roll"), "Rock'N'Roll");
        assert_eq!(format_label("--double--dash"), "  Double  Dash");
    }

    #[test]
    fn non_ascii_letters_split_words() {
        // `é` is not a word character, so `t` after it starts a new word.
        assert_eq!(format_label("caf\u{e9}-t\u{e9}l\u{e9}"), "Caf\u{e9} T\u{e9}L\u{e9}");
        assert_eq!(format_label("\u{fc}ber"), "\u{fc}Ber");
    }

    #[test]
    fn formatting_is_idempotent() {
        for input in ["my-first-post", "Already Spaced", "x_y-z", "caf\u{e9}", ""] {
            let once = format_label(input);
            assert_eq!(format_label(&once), once, "input {input:?}");
        }
    }

    #[test]
    fn segments_are_percent_decoded() {
        assert_eq!(decode_segment("hello%20world"), "hello world");
        assert_eq!(decode_segment("caf%C3%A9"), "caf\u{e9}");
        assert_eq!(decode_segment("100%"), "100%");
        assert_eq!(decode_segment("%FF"), "\u{fffd}");
    }
}
