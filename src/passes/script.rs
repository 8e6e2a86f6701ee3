//! Script-specific letter repairs: Arabic/Farsi/Pashto letter profiles,
//! Georgian archaic letters, Arabic token detachment.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{map_chars, translate_chars};

fn arabic_letter(c: char) -> Option<char> {
    Some(match c {
        '\u{6A9}' => '\u{643}', // Farsi keheh to kaf
        '\u{6CC}' => '\u{64A}', // Farsi yeh to yeh
        '\u{675}' => '\u{623}', // high hamza alef to alef with hamza above
        '\u{676}' => '\u{624}', // high hamza waw to waw with hamza above
        '\u{678}' => '\u{626}', // high hamza yeh to yeh with hamza above
        '\u{67C}' => '\u{62A}', // teh with ring to teh
        '\u{689}' => '\u{62F}', // dal with ring to dal
        '\u{693}' => '\u{631}', // reh with ring to reh
        '\u{6AB}' => '\u{6AF}', // kaf with ring to gaf
        '\u{6BC}' => '\u{646}', // noon with ring to noon
        '\u{6CD}' => '\u{64A}', // yeh with tail to yeh
        _ => return None,
    })
}

/// Letter profile for generic Arabic text.
pub fn normalize_arabic_characters(s: &str) -> String {
    translate_chars(s, arabic_letter).into_owned()
}

fn farsi_letter(c: char) -> Option<char> {
    Some(match c {
        '\u{64A}' => '\u{6CC}', // Arabic yeh to Farsi yeh
        '\u{649}' => '\u{6CC}', // alef maksura to Farsi yeh
        '\u{6CD}' => '\u{6CC}', // yeh with tail to Farsi yeh
        '\u{643}' => '\u{6A9}', // Arabic kaf to keheh
        '\u{6AB}' => '\u{6AF}', // kaf with ring to gaf
        '\u{67C}' => '\u{62A}', // teh with ring to teh
        '\u{689}' => '\u{62F}', // dal with ring to dal
        '\u{693}' => '\u{631}', // reh with ring to reh
        '\u{6BC}' => '\u{646}', // noon with ring to noon
        _ => return None,
    })
}

/// Letter profile for Farsi text.
pub fn normalize_farsi_characters(s: &str) -> String {
    translate_chars(s, farsi_letter).into_owned()
}

fn pashto_letter(c: char) -> Option<char> {
    Some(match c {
        '\u{649}' => '\u{6CC}', // alef maksura to Farsi yeh
        '\u{6CD}' => '\u{6CC}', // yeh with tail to Farsi yeh
        '\u{643}' => '\u{6A9}', // Arabic kaf to keheh
        _ => return None,
    })
}

/// Letter profile for Pashto text; ring letters are regular Pashto
/// consonants and stay as they are.
pub fn normalize_pashto_characters(s: &str) -> String {
    translate_chars(s, pashto_letter).into_owned()
}

// Mtavruli, Asomtavruli, and Nuskhuri to Mkhedruli.
fn georgian_mkhedruli(c: char) -> Option<char> {
    let cp = c as u32;
    let out = match cp {
        0x1C90..=0x1CBA => 0x10D0 + (cp - 0x1C90),
        0x1CBD..=0x1CBF => 0x10FD + (cp - 0x1CBD),
        0x10A0..=0x10C5 => 0x10D0 + (cp - 0x10A0),
        0x10C7 => 0x10F7,
        0x10CD => 0x10FD,
        0x2D00..=0x2D25 => 0x10D0 + (cp - 0x2D00),
        0x2D27 => 0x10F7,
        0x2D2D => 0x10FD,
        _ => return None,
    };
    char::from_u32(out)
}

fn georgian_archaic(c: char) -> Option<&'static str> {
    Some(match c {
        '\u{10F1}' => "\u{10D4}",           // he to e
        '\u{10F2}' => "\u{10D8}",           // hie to i
        '\u{10F3}' => "\u{10D5}\u{10D8}",   // we to vi
        '\u{10F4}' => "\u{10EE}\u{10D4}",   // har to khe
        '\u{10F5}' => "\u{10F0}\u{10DD}\u{10D8}", // hoe to hoi
        _ => return None,
    })
}

/// Maps the old Georgian alphabets to Mkhedruli, then expands archaic
/// letters to their modern spellings.
pub fn normalize_georgian_characters(s: &str) -> String {
    let s = translate_chars(s, georgian_mkhedruli).into_owned();
    map_chars(&s, georgian_archaic).into_owned()
}

static PUNCT_BEFORE_ARABIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([-_+*|%0-9]+)([\u{600}-\u{6FF}])").unwrap());
static ARABIC_BEFORE_PUNCT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([\u{600}-\u{6FF}])([-_+*|%0-9]+)").unwrap());

/// Detaches ASCII digits and certain punctuation from adjacent Arabic
/// letters with a space.
pub fn repair_arabic_tokenization(s: &str) -> String {
    let s = PUNCT_BEFORE_ARABIC_RE.replace_all(s, "${1} ${2}");
    ARABIC_BEFORE_PUNCT_RE.replace_all(&s, "${1} ${2}").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arabic_profile_flattens_regional_letters() {
        assert_eq!(normalize_arabic_characters("\u{6A9}\u{6CC}"), "\u{643}\u{64A}");
    }

    #[test]
    fn farsi_profile_goes_the_other_way() {
        assert_eq!(normalize_farsi_characters("\u{64A}\u{643}"), "\u{6CC}\u{6A9}");
        assert_eq!(normalize_farsi_characters("\u{649}"), "\u{6CC}");
    }

    #[test]
    fn pashto_profile_keeps_ring_letters() {
        assert_eq!(normalize_pashto_characters("\u{643}"), "\u{6A9}");
        assert_eq!(normalize_pashto_characters("\u{67C}"), "\u{67C}");
    }

    #[test]
    fn georgian_mtavruli_to_mkhedruli() {
        assert_eq!(normalize_georgian_characters("\u{1C90}\u{1C91}"), "\u{10D0}\u{10D1}");
        // Asomtavruli capital an to mkhedruli an.
        assert_eq!(normalize_georgian_characters("\u{10A0}"), "\u{10D0}");
    }

    #[test]
    fn georgian_archaic_expand_even_from_old_alphabets() {
        assert_eq!(normalize_georgian_characters("\u{10F5}"), "\u{10F0}\u{10DD}\u{10D8}");
        // Asomtavruli hoe translates to mkhedruli hoe, then expands.
        assert_eq!(normalize_georgian_characters("\u{10C5}"), "\u{10F0}\u{10DD}\u{10D8}");
    }

    #[test]
    fn digits_detach_from_arabic() {
        assert_eq!(repair_arabic_tokenization("123\u{645}"), "123 \u{645}");
        assert_eq!(repair_arabic_tokenization("\u{645}-"), "\u{645} -");
        assert_eq!(repair_arabic_tokenization("abc123"), "abc123");
    }
}
