//! Hangul jamo composition.
//!
//! A syllable block is lead * 588 + vowel * 28 + trail + 0xAC00, where 588
//! is 21 vowels times 28 trail slots and slot 0 means no trailing jamo.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static VOWEL_JAMO_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\u{1161}-\u{1175}]").unwrap());
// Lead consonant, vowel, optional trailing consonant.
static JAMO_TRIPLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([\u{1100}-\u{1112}])([\u{1161}-\u{1175}])([\u{11A8}-\u{11C2}]?)").unwrap());

fn jamo_triple_to_syllable(lead: char, vowel: char, trail: Option<char>) -> Option<char> {
    let lead = lead as u32;
    let vowel = vowel as u32;
    debug_assert!((0x1100..=0x1112).contains(&lead));
    debug_assert!((0x1161..=0x1175).contains(&vowel));
    if !(0x1100..=0x1112).contains(&lead) || !(0x1161..=0x1175).contains(&vowel) {
        return None;
    }
    let trail_index = match trail {
        None => 0,
        Some(t) => {
            let t = t as u32;
            debug_assert!((0x11A8..=0x11C2).contains(&t));
            if !(0x11A8..=0x11C2).contains(&t) {
                return None;
            }
            t - 0x11A7
        }
    };
    char::from_u32(0xAC00 + (lead - 0x1100) * 588 + (vowel - 0x1161) * 28 + trail_index)
}

/// Converts modern Hangul jamo triples and doubles to syllable blocks.
pub fn normalize_hangul(s: &str) -> String {
    if !VOWEL_JAMO_RE.is_match(s) {
        return s.to_string();
    }
    JAMO_TRIPLE_RE
        .replace_all(s, |caps: &Captures| {
            let lead = caps[1].chars().next();
            let vowel = caps[2].chars().next();
            let trail = caps[3].chars().next();
            match (lead, vowel) {
                (Some(l), Some(v)) => match jamo_triple_to_syllable(l, v, trail) {
                    Some(syllable) => syllable.to_string(),
                    None => caps[0].to_string(),
                },
                _ => caps[0].to_string(),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composes_double_and_triple() {
        // ha + n = 한, ga (no trail) = 가
        assert_eq!(normalize_hangul("\u{1112}\u{1161}\u{11AB}"), "\u{D55C}");
        assert_eq!(normalize_hangul("\u{1100}\u{1161}"), "\u{AC00}");
    }

    #[test]
    fn full_jamo_space_round_trips() {
        // Every modern lead/vowel/trail combination lands in the syllable
        // block and decomposes back to the same jamo indices.
        for lead in 0x1100u32..=0x1112 {
            for vowel in 0x1161u32..=0x1175 {
                for trail in std::iter::once(None).chain((0x11A8u32..=0x11C2).map(Some)) {
                    let mut input = String::new();
                    input.push(char::from_u32(lead).unwrap());
                    input.push(char::from_u32(vowel).unwrap());
                    if let Some(t) = trail {
                        input.push(char::from_u32(t).unwrap());
                    }
                    let out = normalize_hangul(&input);
                    let mut chars = out.chars();
                    let syllable = chars.next().unwrap() as u32;
                    assert_eq!(chars.next(), None);
                    let offset = syllable - 0xAC00;
                    assert_eq!(offset / 588, lead - 0x1100);
                    assert_eq!(offset % 588 / 28, vowel - 0x1161);
                    assert_eq!(offset % 28, trail.map_or(0, |t| t - 0x11A7));
                }
            }
        }
    }

    #[test]
    fn lone_jamo_left_alone() {
        assert_eq!(normalize_hangul("\u{1100}"), "\u{1100}");
        assert_eq!(normalize_hangul("\u{1161}"), "\u{1161}");
    }
}
