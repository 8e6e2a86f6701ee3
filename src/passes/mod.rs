//! Normalization pass library.
//!
//! Each pass is a pure string-to-string function. Passes never fail; a
//! character without a mapping passes through unchanged. Selection and
//! gating live in the pipeline, not here.

pub mod combining;
pub mod compat;
pub mod delete;
pub mod digits;
pub mod encoding;
pub mod escapes;
pub mod hangul;
pub mod punct;
pub mod script;

use std::borrow::Cow;

/// Maps individual characters to replacement strings, borrowing when no
/// character matches.
pub(crate) fn map_chars<'a>(s: &'a str, f: impl Fn(char) -> Option<&'static str>) -> Cow<'a, str> {
    match s.char_indices().find(|&(_, c)| f(c).is_some()) {
        None => Cow::Borrowed(s),
        Some((start, _)) => {
            let mut out = String::with_capacity(s.len());
            out.push_str(&s[..start]);
            for c in s[start..].chars() {
                match f(c) {
                    Some(t) => out.push_str(t),
                    None => out.push(c),
                }
            }
            Cow::Owned(out)
        }
    }
}

/// Character-to-character variant of [`map_chars`].
pub(crate) fn translate_chars<'a>(s: &'a str, f: impl Fn(char) -> Option<char>) -> Cow<'a, str> {
    match s.char_indices().find(|&(_, c)| f(c).is_some()) {
        None => Cow::Borrowed(s),
        Some((start, _)) => {
            let mut out = String::with_capacity(s.len());
            out.push_str(&s[..start]);
            for c in s[start..].chars() {
                out.push(f(c).unwrap_or(c));
            }
            Cow::Owned(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_chars_borrows_when_unmatched() {
        let out = map_chars("hello", |_| None);
        assert!(matches!(out, Cow::Borrowed("hello")));
    }

    #[test]
    fn map_chars_replaces_matches() {
        let out = map_chars("a-b", |c| (c == '-').then_some(" minus "));
        assert_eq!(out, "a minus b");
    }

    #[test]
    fn translate_chars_swaps_single_chars() {
        let out = translate_chars("abc", |c| (c == 'b').then_some('B'));
        assert_eq!(out, "aBc");
    }
}
