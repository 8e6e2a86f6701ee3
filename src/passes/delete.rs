//! Deletion passes: control characters, zero-width characters, tatweel,
//! Arabic and Hebrew diacritics.

use fancy_regex::Regex as FancyRegex;
use once_cell::sync::Lazy;
use regex::Regex;

// C0 controls except tab, linefeed, carriage return; DEL and the C1 block.
static C0_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\u{0}-\u{8}\u{B}\u{C}\u{E}-\u{1F}]").unwrap());
static DEL_C1_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\u{7F}-\u{9F}]").unwrap());
// Variation selectors after ordinary letters, numbers, punctuation are
// dropped; after emoji and symbols they stay meaningful.
static VARIATION_SELECTORS_RE: Lazy<FancyRegex> =
    Lazy::new(|| FancyRegex::new(r"(?<=[\u{0}-\u{218F}])[\u{FE00}-\u{FE0F}]").unwrap());
static VARIATION_SELECTORS_SUP_RE: Lazy<FancyRegex> =
    Lazy::new(|| FancyRegex::new(r"(?<=[\u{0}-\u{218F}])[\u{E0100}-\u{E01EF}]").unwrap());

/// Deletes control characters (except tab and linefeed) and variation
/// selectors that follow most letters, numbers, and punctuation.
pub fn delete_control_characters(s: &str) -> String {
    let s = C0_RE.replace_all(s, "");
    let s = DEL_C1_RE.replace_all(&s, "");
    let s = VARIATION_SELECTORS_RE.replace_all(&s, "");
    VARIATION_SELECTORS_SUP_RE.replace_all(&s, "").into_owned()
}

static ZERO_WIDTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\u{AD}\u{200B}-\u{200F}\u{FEFF}]").unwrap());

/// Deletes soft hyphen, zero-width space/joiner/non-joiner, direction
/// marks, and the byte order mark.
pub fn delete_zero_width_characters(s: &str) -> String {
    ZERO_WIDTH_RE.replace_all(s, "").into_owned()
}

pub fn delete_arabic_tatweel(s: &str) -> String {
    s.replace('\u{640}', "")
}

static ARABIC_DIACRITICS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\u{64B}-\u{652}]").unwrap());

/// Deletes fathatan through sukun.
pub fn delete_arabic_diacritics(s: &str) -> String {
    ARABIC_DIACRITICS_RE.replace_all(s, "").into_owned()
}

static HEBREW_POINTS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\u{5B0}-\u{5BD}\u{5BF}\u{5C1}\u{5C2}\u{5C7}]").unwrap());

/// Deletes Hebrew points (sheva through qamats qatan).
pub fn delete_hebrew_diacritics(s: &str) -> String {
    HEBREW_POINTS_RE.replace_all(s, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_tab_and_linefeed() {
        assert_eq!(delete_control_characters("a\tb\u{1}c"), "a\tbc");
    }

    #[test]
    fn variation_selector_dropped_after_letter_kept_after_emoji() {
        assert_eq!(delete_control_characters("A\u{FE0F}"), "A");
        assert_eq!(delete_control_characters("\u{2764}\u{FE0F}"), "\u{2764}\u{FE0F}");
    }

    #[test]
    fn zero_width_and_bom() {
        assert_eq!(delete_zero_width_characters("a\u{200B}b\u{FEFF}"), "ab");
        assert_eq!(delete_zero_width_characters("soft\u{AD}hyphen"), "softhyphen");
    }

    #[test]
    fn tatweel_and_diacritics() {
        assert_eq!(delete_arabic_tatweel("\u{628}\u{640}\u{62F}"), "\u{628}\u{62F}");
        assert_eq!(delete_arabic_diacritics("\u{645}\u{64E}\u{631}"), "\u{645}\u{631}");
        assert_eq!(delete_hebrew_diacritics("\u{5E9}\u{5B8}"), "\u{5E9}");
    }
}
