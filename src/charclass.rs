//! Character classification index.
//!
//! Every character of interest carries a bit vector of class flags. A text
//! unit's vector is the bitwise OR of its characters' vectors, which lets the
//! pipeline skip a pass in O(1) when no character of the relevant class is
//! present. Over-approximation is harmless (the pass just finds nothing to
//! do); a missing flag would silently disable a pass, so ranges err wide.

use std::collections::HashMap;
use std::ops::{BitOr, BitOrAssign};

use crate::mapping::TableKind;

/// Bit vector of character class flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CharFlags(pub u64);

impl CharFlags {
    pub const EMPTY: CharFlags = CharFlags(0);
    pub const DELETABLE_CONTROL: CharFlags = CharFlags(1 << 0);
    pub const ZERO_WIDTH: CharFlags = CharFlags(1 << 1);
    pub const LIGATURE: CharFlags = CharFlags(1 << 2);
    pub const SIGN_SYMBOL: CharFlags = CharFlags(1 << 3);
    pub const DECOMPOSABLE_COMBINING: CharFlags = CharFlags(1 << 4);
    pub const COMPOSE_ANCHOR: CharFlags = CharFlags(1 << 5);
    pub const COMPOSE_DIACRITIC: CharFlags = CharFlags(1 << 6);
    pub const ARABIC_PUNCT: CharFlags = CharFlags(1 << 7);
    pub const TATWEEL: CharFlags = CharFlags(1 << 8);
    pub const CJK_PUNCT: CharFlags = CharFlags(1 << 9);
    pub const GREEK_PUNCT: CharFlags = CharFlags(1 << 10);
    pub const MISC_F_PUNCT: CharFlags = CharFlags(1 << 11);
    pub const DASH: CharFlags = CharFlags(1 << 12);
    pub const NON_ZERO_SPACE: CharFlags = CharFlags(1 << 13);
    pub const ENCLOSURE: CharFlags = CharFlags(1 << 14);
    pub const CJK_COMPAT: CharFlags = CharFlags(1 << 15);
    pub const MAPPABLE_DIGIT: CharFlags = CharFlags(1 << 16);
    pub const FONT_SMALL_VERTICAL: CharFlags = CharFlags(1 << 17);
    pub const CORE_COMPAT: CharFlags = CharFlags(1 << 18);
    pub const DETACHABLE: CharFlags = CharFlags(1 << 19);
    pub const AMPERSAND: CharFlags = CharFlags(1 << 20);
    pub const SEMICOLON: CharFlags = CharFlags(1 << 21);
    pub const PERCENT: CharFlags = CharFlags(1 << 22);
    pub const ENCODING_REPAIR: CharFlags = CharFlags(1 << 23);
    /// Supplementary-plane character of interest (nukta, digit).
    pub const ASTRAL_OF_INTEREST: CharFlags = CharFlags(1 << 24);
    pub const LATIN: CharFlags = CharFlags(1 << 25);
    pub const GREEK: CharFlags = CharFlags(1 << 26);
    pub const CYRILLIC: CharFlags = CharFlags(1 << 27);
    pub const HEBREW: CharFlags = CharFlags(1 << 28);
    pub const HEBREW_DIACRITIC: CharFlags = CharFlags(1 << 29);
    /// Includes Arabic presentation forms.
    pub const ARABIC: CharFlags = CharFlags(1 << 30);
    pub const ARABIC_PRESENTATION: CharFlags = CharFlags(1 << 31);
    pub const ARABIC_DIACRITIC: CharFlags = CharFlags(1 << 32);
    pub const ARABIC_PROFILE: CharFlags = CharFlags(1 << 33);
    pub const FARSI_PROFILE: CharFlags = CharFlags(1 << 34);
    pub const PASHTO_PROFILE: CharFlags = CharFlags(1 << 35);
    pub const GEORGIAN: CharFlags = CharFlags(1 << 36);
    /// Thaana, Nko, Samaritan, Mandaic, Syriac.
    pub const THAANA_PLUS: CharFlags = CharFlags(1 << 37);
    pub const DEVANAGARI: CharFlags = CharFlags(1 << 38);
    /// Bengali, Gurmukhi, Gujarati, Oriya, Tamil, Telugu, Kannada,
    /// Malayalam, Sinhala.
    pub const BENGALI_PLUS: CharFlags = CharFlags(1 << 39);
    pub const NUKTA: CharFlags = CharFlags(1 << 40);
    /// Thai, Lao, Tibetan, Myanmar, Georgian.
    pub const THAI_PLUS: CharFlags = CharFlags(1 << 41);
    /// Khmer, Mongolian, Canadian Syllabics, Limbu, Tai Le, New Tai Lue,
    /// Buginese, Tai Tham, Balinese, Sundanese, Batak, Lepcha, Ol Chiki.
    pub const KHMER_PLUS: CharFlags = CharFlags(1 << 42);
    /// Lisu, Vai, Bamum, Syloti Nagri, Phags-Pa, Saurashtra, Kayah Li,
    /// Rejang, Javanese, Cham, Tai Viet, Meetei Mayek.
    pub const LISU_PLUS: CharFlags = CharFlags(1 << 43);
    /// C1 stand-in for an undecodable raw byte, or U+FFFD.
    pub const STRAY_BYTE: CharFlags = CharFlags(1 << 44);
    pub const FULL_HALF_WIDTH: CharFlags = CharFlags(1 << 45);
    pub const HANGUL_VOWEL: CharFlags = CharFlags(1 << 46);

    pub const fn intersects(self, other: CharFlags) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for CharFlags {
    type Output = CharFlags;
    fn bitor(self, rhs: CharFlags) -> CharFlags {
        CharFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for CharFlags {
    fn bitor_assign(&mut self, rhs: CharFlags) {
        self.0 |= rhs.0;
    }
}

/// Per-character class flags, built once per context. The static range phase
/// runs in `new()`; the table-derived phase runs as mapping tables load.
pub struct CharClassIndex {
    flags: HashMap<char, CharFlags>,
}

impl CharClassIndex {
    pub fn new() -> Self {
        let mut index = CharClassIndex {
            flags: HashMap::with_capacity(16_384),
        };
        index.init_static_ranges();
        index
    }

    pub fn classify(&self, c: char) -> CharFlags {
        self.flags.get(&c).copied().unwrap_or(CharFlags::EMPTY)
    }

    /// OR of all character vectors in the unit.
    pub fn unit_vector(&self, s: &str) -> CharFlags {
        let mut v = CharFlags::EMPTY;
        for c in s.chars() {
            if let Some(f) = self.flags.get(&c) {
                v |= *f;
            }
        }
        v
    }

    fn add(&mut self, c: char, f: CharFlags) {
        *self.flags.entry(c).or_insert(CharFlags::EMPTY) |= f;
    }

    fn add_range(&mut self, lo: u32, hi_exclusive: u32, f: CharFlags) {
        for cp in lo..hi_exclusive {
            if let Some(c) = char::from_u32(cp) {
                self.add(c, f);
            }
        }
    }

    fn add_points(&mut self, points: &[u32], f: CharFlags) {
        for &cp in points {
            if let Some(c) = char::from_u32(cp) {
                self.add(c, f);
            }
        }
    }

    fn init_static_ranges(&mut self) {
        // Deletable control characters: C0 (minus tab/newline/CR), DEL, the
        // C1 block, and variation selectors.
        self.add_range(0x0000, 0x0009, CharFlags::DELETABLE_CONTROL);
        self.add_range(0x000B, 0x000D, CharFlags::DELETABLE_CONTROL);
        self.add_range(0x000E, 0x0020, CharFlags::DELETABLE_CONTROL);
        self.add('\u{7F}', CharFlags::DELETABLE_CONTROL);
        self.add_range(0x0080, 0x00A0, CharFlags::DELETABLE_CONTROL);
        self.add_range(0xFE00, 0xFE10, CharFlags::DELETABLE_CONTROL);
        self.add_range(0xE0100, 0xE01F0, CharFlags::DELETABLE_CONTROL);
        // Zero-width and directional characters, byte order mark.
        self.add_range(0x200B, 0x2010, CharFlags::ZERO_WIDTH);
        self.add('\u{FEFF}', CharFlags::ZERO_WIDTH);
        self.add('\u{0640}', CharFlags::TATWEEL);
        // Stray-byte stand-ins: C1 block (from lossy byte decoding) and the
        // replacement character.
        self.add_range(0x0080, 0x00A0, CharFlags::STRAY_BYTE);
        self.add('\u{FFFD}', CharFlags::STRAY_BYTE);
        // Decomposable ligatures outside the mapping tables (partial list).
        self.add_points(
            &[0x0E33, 0x0EB3, 0x0EDC, 0x0EDD, 0x1E9B],
            CharFlags::LIGATURE,
        );
        self.add('\u{AD}', CharFlags::DASH);
        self.add_range(0x2010, 0x2016, CharFlags::DASH);
        self.add_points(
            &[
                0x2212, 0x2500, 0x2501, 0x2E3A, 0x2E3B, 0xFE31, 0xFE32, 0xFE58, 0xFE63, 0xFF0D,
            ],
            CharFlags::DASH,
        );
        self.add_range(0x2000, 0x200B, CharFlags::NON_ZERO_SPACE);
        self.add_points(&[0x00A0, 0x202F, 0x205F, 0x3000], CharFlags::NON_ZERO_SPACE);
        for c in "0123456789-_+*|%".chars() {
            self.add(c, CharFlags::DETACHABLE);
        }
        self.add('&', CharFlags::AMPERSAND);
        self.add(';', CharFlags::SEMICOLON);
        self.add('%', CharFlags::PERCENT);
        self.add_range(0xFF01, 0xFFEF, CharFlags::FULL_HALF_WIDTH);
        // Latin
        self.add_range(0x0041, 0x005B, CharFlags::LATIN);
        self.add_range(0x0061, 0x007B, CharFlags::LATIN);
        self.add_range(0x00C0, 0x00D7, CharFlags::LATIN);
        self.add_range(0x00D8, 0x00F7, CharFlags::LATIN);
        self.add_range(0x00F8, 0x02B0, CharFlags::LATIN);
        self.add_range(0x2C60, 0x2C80, CharFlags::LATIN);
        self.add_range(0xA720, 0xA800, CharFlags::LATIN);
        self.add_range(0xAB30, 0xAB70, CharFlags::LATIN);
        // Greek
        self.add_range(0x0370, 0x0400, CharFlags::GREEK);
        self.add_range(0x1F00, 0x2000, CharFlags::GREEK);
        // Cyrillic
        self.add_range(0x0400, 0x0530, CharFlags::CYRILLIC);
        self.add_range(0x1C80, 0x1C90, CharFlags::CYRILLIC);
        self.add_range(0x2DE0, 0x2E00, CharFlags::CYRILLIC);
        self.add_range(0xA640, 0xA6A0, CharFlags::CYRILLIC);
        // Hebrew
        self.add_range(0x0590, 0x0600, CharFlags::HEBREW);
        self.add_range(0xFB1D, 0xFB50, CharFlags::HEBREW);
        self.add_range(0x05B0, 0x05BE, CharFlags::HEBREW_DIACRITIC);
        self.add_points(&[0x05BF, 0x05C1, 0x05C2, 0x05C7], CharFlags::HEBREW_DIACRITIC);
        // Arabic
        self.add_range(0x0600, 0x0700, CharFlags::ARABIC);
        self.add_range(0x0750, 0x0780, CharFlags::ARABIC);
        self.add_range(0x08A0, 0x0900, CharFlags::ARABIC);
        self.add_range(
            0xFB50,
            0xFE00,
            CharFlags::ARABIC | CharFlags::ARABIC_PRESENTATION,
        );
        self.add_range(
            0xFE70,
            0xFEFF,
            CharFlags::ARABIC | CharFlags::ARABIC_PRESENTATION,
        );
        self.add_range(0x064B, 0x0653, CharFlags::ARABIC_DIACRITIC);
        self.add_points(
            &[
                0x06A9, 0x06CC, 0x0675, 0x0676, 0x0678, 0x067C, 0x0689, 0x0693, 0x06AB, 0x06BC,
                0x06CD,
            ],
            CharFlags::ARABIC_PROFILE,
        );
        self.add_points(
            &[
                0x064A, 0x0649, 0x06CD, 0x0643, 0x06AB, 0x067C, 0x0689, 0x0693, 0x06BC,
            ],
            CharFlags::FARSI_PROFILE,
        );
        self.add_points(&[0x0649, 0x06CD, 0x0643], CharFlags::PASHTO_PROFILE);
        // Georgian: Mkhedruli, Asomtavruli, Mtavruli, Nuskhuri.
        self.add_range(0x10A0, 0x1100, CharFlags::GEORGIAN);
        self.add_range(0x1C90, 0x1CC0, CharFlags::GEORGIAN);
        self.add_range(0x2D00, 0x2D30, CharFlags::GEORGIAN);
        self.add_range(0x0780, 0x08A0, CharFlags::THAANA_PLUS);
        self.add_range(0x0900, 0x0980, CharFlags::DEVANAGARI);
        self.add_range(0xA8E0, 0xA900, CharFlags::DEVANAGARI);
        self.add_range(0x0980, 0x0E00, CharFlags::BENGALI_PLUS);
        for &cp in &[
            0x093C, 0x09BC, 0x0A3C, 0x0ABC, 0x0B3C, 0x0CBC, 0x1C37, 0x110BA, 0x11173, 0x111CA,
            0x11236, 0x112E9, 0x1133C, 0x11446, 0x114C3, 0x115C0, 0x116B7, 0x1183A, 0x11943,
            0x11D42, 0x1E94A,
        ] {
            let mut f = CharFlags::NUKTA;
            if cp >= 0x10000 {
                f |= CharFlags::ASTRAL_OF_INTEREST;
            }
            self.add_points(&[cp], f);
        }
        self.add_range(0x0E00, 0x1100, CharFlags::THAI_PLUS);
        // Hangul jungseong (vowel jamo); anchor for syllable composition.
        self.add_range(0x1161, 0x1176, CharFlags::HANGUL_VOWEL);
        self.add_range(0x1780, 0x1AB0, CharFlags::KHMER_PLUS);
        self.add_range(0x1B00, 0x1C80, CharFlags::KHMER_PLUS);
        self.add_range(0x1CC0, 0x1CD0, CharFlags::KHMER_PLUS);
        self.add_range(0xA4D0, 0xA630, CharFlags::LISU_PLUS);
        self.add_range(0xA6A0, 0xA700, CharFlags::LISU_PLUS);
        self.add_range(0xA800, 0xA830, CharFlags::LISU_PLUS);
        self.add_range(0xA840, 0xA8E0, CharFlags::LISU_PLUS);
        self.add_range(0xA900, 0xA960, CharFlags::LISU_PLUS);
        self.add_range(0xA980, 0xA9E0, CharFlags::LISU_PLUS);
        self.add_range(0xAA00, 0xAA60, CharFlags::LISU_PLUS);
        self.add_range(0xAA80, 0xAB00, CharFlags::LISU_PLUS);
    }

    /// Table-derived classification phase, called once per table entry as the
    /// mapping store loads.
    pub fn note_mapping(&mut self, kind: TableKind, source: &str, target: &str) {
        let mut chars = source.chars();
        let first = match chars.next() {
            Some(c) => c,
            None => return,
        };
        let second = chars.next();
        let single = second.is_none();
        match kind {
            TableKind::Digit => {
                if single {
                    let mut f = CharFlags::MAPPABLE_DIGIT;
                    if first as u32 >= 0x10000 {
                        f |= CharFlags::ASTRAL_OF_INTEREST;
                    }
                    self.add(first, f);
                }
            }
            TableKind::FontSmallVertical => {
                if single {
                    self.add(first, CharFlags::FONT_SMALL_VERTICAL);
                }
            }
            TableKind::CoreCompat => {
                if single {
                    self.add(first, CharFlags::CORE_COMPAT);
                }
            }
            TableKind::CjkCompat => {
                if single {
                    self.add(first, CharFlags::CJK_COMPAT);
                }
            }
            TableKind::Baseline => {
                if single {
                    let cp = first as u32;
                    if (0x0132..=0x01F3).contains(&cp) || (0xFB00..=0xFB4F).contains(&cp) {
                        self.add(first, CharFlags::LIGATURE);
                    } else if cp == 0x00B5
                        || (0x03D0..=0x03F9).contains(&cp)
                        || (0x20A8..=0x213B).contains(&cp)
                    {
                        self.add(first, CharFlags::SIGN_SYMBOL);
                    } else if (0x0340..=0x0387).contains(&cp) {
                        self.add(first, CharFlags::GREEK_PUNCT);
                    } else if (0x060C..=0x06D4).contains(&cp) {
                        self.add(first, CharFlags::ARABIC_PUNCT);
                    } else if (0x3008..=0x3011).contains(&cp)
                        || (0x3014..=0x301B).contains(&cp)
                        || (0xFF61..=0xFF64).contains(&cp)
                        || matches!(cp, 0x3001 | 0x3002 | 0xFE11 | 0xFE12 | 0xFE51)
                    {
                        self.add(first, CharFlags::CJK_PUNCT);
                    } else if cp == 0x0F0C {
                        self.add(first, CharFlags::MISC_F_PUNCT);
                    }
                }
            }
            TableKind::Enclosure => {
                self.add(first, CharFlags::ENCLOSURE);
            }
            TableKind::EncodingRepair => {
                self.add(first, CharFlags::ENCODING_REPAIR);
            }
            TableKind::Combining => {
                if single {
                    self.add(first, CharFlags::DECOMPOSABLE_COMBINING);
                } else if target.chars().count() == 1 {
                    self.add(first, CharFlags::COMPOSE_ANCHOR);
                    if let Some(c) = second {
                        self.add(c, CharFlags::COMPOSE_DIACRITIC);
                    }
                } else {
                    log::debug!("unexpected combining entry {source:?} -> {target:?}");
                }
            }
            TableKind::PresForm => {}
        }
    }
}

impl Default for CharClassIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_are_distinct_bits() {
        let all = [
            CharFlags::DELETABLE_CONTROL,
            CharFlags::ZERO_WIDTH,
            CharFlags::LIGATURE,
            CharFlags::SIGN_SYMBOL,
            CharFlags::DECOMPOSABLE_COMBINING,
            CharFlags::COMPOSE_ANCHOR,
            CharFlags::COMPOSE_DIACRITIC,
            CharFlags::ARABIC_PUNCT,
            CharFlags::TATWEEL,
            CharFlags::CJK_PUNCT,
            CharFlags::GREEK_PUNCT,
            CharFlags::MISC_F_PUNCT,
            CharFlags::DASH,
            CharFlags::NON_ZERO_SPACE,
            CharFlags::ENCLOSURE,
            CharFlags::CJK_COMPAT,
            CharFlags::MAPPABLE_DIGIT,
            CharFlags::FONT_SMALL_VERTICAL,
            CharFlags::CORE_COMPAT,
            CharFlags::DETACHABLE,
            CharFlags::AMPERSAND,
            CharFlags::SEMICOLON,
            CharFlags::PERCENT,
            CharFlags::ENCODING_REPAIR,
            CharFlags::ASTRAL_OF_INTEREST,
            CharFlags::LATIN,
            CharFlags::GREEK,
            CharFlags::CYRILLIC,
            CharFlags::HEBREW,
            CharFlags::HEBREW_DIACRITIC,
            CharFlags::ARABIC,
            CharFlags::ARABIC_PRESENTATION,
            CharFlags::ARABIC_DIACRITIC,
            CharFlags::ARABIC_PROFILE,
            CharFlags::FARSI_PROFILE,
            CharFlags::PASHTO_PROFILE,
            CharFlags::GEORGIAN,
            CharFlags::THAANA_PLUS,
            CharFlags::DEVANAGARI,
            CharFlags::BENGALI_PLUS,
            CharFlags::NUKTA,
            CharFlags::THAI_PLUS,
            CharFlags::KHMER_PLUS,
            CharFlags::LISU_PLUS,
            CharFlags::STRAY_BYTE,
            CharFlags::FULL_HALF_WIDTH,
            CharFlags::HANGUL_VOWEL,
        ];
        assert!(all.len() >= 40);
        let mut seen = 0u64;
        for f in all {
            assert_eq!(f.0.count_ones(), 1);
            assert_eq!(seen & f.0, 0, "duplicate bit {:#x}", f.0);
            seen |= f.0;
        }
    }

    #[test]
    fn static_ranges_classify() {
        let index = CharClassIndex::new();
        assert!(index.classify('\u{0001}').intersects(CharFlags::DELETABLE_CONTROL));
        assert!(index.classify('\u{200C}').intersects(CharFlags::ZERO_WIDTH));
        assert!(index.classify('\u{0640}').intersects(CharFlags::TATWEEL));
        assert!(index.classify('\u{0093}').intersects(CharFlags::STRAY_BYTE));
        assert!(index.classify('\u{FFFD}').intersects(CharFlags::STRAY_BYTE));
        assert!(index.classify('A').intersects(CharFlags::LATIN));
        assert!(index.classify('\u{2C60}').intersects(CharFlags::LATIN));
        assert!(index.classify('\u{03B1}').intersects(CharFlags::GREEK));
        assert!(index.classify('\u{0430}').intersects(CharFlags::CYRILLIC));
        assert!(index.classify('\u{05D0}').intersects(CharFlags::HEBREW));
        assert!(index.classify('\u{0627}').intersects(CharFlags::ARABIC));
        assert!(index.classify('\u{FEFB}').intersects(CharFlags::ARABIC_PRESENTATION));
        assert!(index.classify('\u{10D0}').intersects(CharFlags::GEORGIAN));
        assert!(index.classify('\u{093C}').intersects(CharFlags::NUKTA));
        assert!(index.classify('\u{11236}').intersects(CharFlags::ASTRAL_OF_INTEREST));
        assert!(index.classify('\u{1161}').intersects(CharFlags::HANGUL_VOWEL));
        assert!(index.classify('\u{FF21}').intersects(CharFlags::FULL_HALF_WIDTH));
        // Tab and newline are never deletable.
        assert!(index.classify('\t').is_empty());
        assert!(index.classify('\n').is_empty());
        assert!(index.classify('a').intersects(CharFlags::LATIN));
    }

    #[test]
    fn unit_vector_is_or_of_chars() {
        let index = CharClassIndex::new();
        let v = index.unit_vector("a\u{0430}");
        assert!(v.intersects(CharFlags::LATIN));
        assert!(v.intersects(CharFlags::CYRILLIC));
        assert!(!v.intersects(CharFlags::GREEK));
        assert!(index.unit_vector("plain ascii text.").intersects(CharFlags::LATIN));
    }
}
