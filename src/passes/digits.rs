//! Maps non-ASCII decimal digits to ASCII, one block family at a time.
//!
//! Only true decimal systems map one-to-one onto ASCII digits; Roman
//! numerals, Chinese numbers, and Ethiopic numbers stay untouched.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::charclass::CharFlags;
use crate::mapping::MappingStore;

// Arabic-Indic and extended Arabic-Indic digits.
static ARABIC_DIGITS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\u{660}-\u{669}\u{6F0}-\u{6F9}]").unwrap());
// Nko digits.
static THAANA_PLUS_DIGITS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\u{7C0}-\u{7C9}]").unwrap());
static DEVANAGARI_DIGITS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\u{966}-\u{96F}]").unwrap());
// Bengali, Gurmukhi, Gujarati, Oriya, Tamil, Telugu, Kannada, Malayalam,
// Sinhala lith digits.
static BENGALI_PLUS_DIGITS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"[\u{9E6}-\u{9EF}\u{A66}-\u{A6F}\u{AE6}-\u{AEF}\u{B66}-\u{B6F}\u{BE6}-\u{BEF}\u{C66}-\u{C6F}\u{CE6}-\u{CEF}\u{D66}-\u{D6F}\u{DE6}-\u{DEF}]",
    )
    .unwrap()
});
// Thai, Lao, Tibetan, Myanmar, Myanmar Shan digits.
static THAI_PLUS_DIGITS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\u{E50}-\u{E59}\u{ED0}-\u{ED9}\u{F20}-\u{F29}\u{1040}-\u{1049}\u{1090}-\u{1099}]")
        .unwrap()
});
// Khmer, Mongolian, Limbu, New Tai Lue, Tai Tham hora/tham, Balinese,
// Sundanese, Lepcha, Ol Chiki digits.
static KHMER_PLUS_DIGITS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"[\u{17E0}-\u{17E9}\u{1810}-\u{1819}\u{1946}-\u{194F}\u{19D0}-\u{19DA}\u{1A80}-\u{1A89}\u{1A90}-\u{1A99}\u{1B50}-\u{1B59}\u{1BB0}-\u{1BB9}\u{1C40}-\u{1C49}\u{1C50}-\u{1C59}]",
    )
    .unwrap()
});
// Vai, Saurashtra, Kayah Li, Javanese, Myanmar Tai Laing, Cham, Meetei
// Mayek digits.
static LISU_PLUS_DIGITS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"[\u{A620}-\u{A629}\u{A8D0}-\u{A8D9}\u{A900}-\u{A909}\u{A9D0}-\u{A9D9}\u{A9F0}-\u{A9F9}\u{AA50}-\u{AA59}\u{ABF0}-\u{ABF9}]",
    )
    .unwrap()
});
// Osmanya, Hanifi Rohingya, Brahmi, Sora Sompeng, Chakma, Sharada,
// Khudawadi, Newa, Tirhuta, Modi, Takri, Ahom, Warang Citi, Bhaiksuki,
// Masaram Gondi, Gunjala Gondi, Mro, Pahawh Hmong, Adlam digits.
static ASTRAL_DIGITS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"[\u{104A0}-\u{104A9}\u{10D30}-\u{10D39}\u{11066}-\u{1106F}\u{110F0}-\u{110F9}\u{11136}-\u{1113F}\u{111D0}-\u{111D9}\u{112F0}-\u{112F9}\u{11450}-\u{11459}\u{114D0}-\u{114D9}\u{11650}-\u{11659}\u{116C0}-\u{116C9}\u{11730}-\u{11739}\u{118E0}-\u{118E9}\u{11C50}-\u{11C59}\u{11D50}-\u{11D59}\u{11DA0}-\u{11DA9}\u{16A60}-\u{16A69}\u{16B50}-\u{16B59}\u{1E950}-\u{1E959}]",
    )
    .unwrap()
});

pub fn map_digits_to_ascii(store: &MappingStore, s: &str, lv: CharFlags) -> String {
    let mut s = s.to_string();
    if lv.intersects(CharFlags::ARABIC) {
        s = store.sub_map(&ARABIC_DIGITS_RE, &s).into_owned();
    }
    if lv.intersects(CharFlags::THAANA_PLUS) {
        s = store.sub_map(&THAANA_PLUS_DIGITS_RE, &s).into_owned();
    }
    if lv.intersects(CharFlags::DEVANAGARI) {
        s = store.sub_map(&DEVANAGARI_DIGITS_RE, &s).into_owned();
    }
    if lv.intersects(CharFlags::BENGALI_PLUS) {
        s = store.sub_map(&BENGALI_PLUS_DIGITS_RE, &s).into_owned();
    }
    if lv.intersects(CharFlags::THAI_PLUS) {
        s = store.sub_map(&THAI_PLUS_DIGITS_RE, &s).into_owned();
    }
    if lv.intersects(CharFlags::KHMER_PLUS) {
        s = store.sub_map(&KHMER_PLUS_DIGITS_RE, &s).into_owned();
    }
    if lv.intersects(CharFlags::LISU_PLUS) {
        s = store.sub_map(&LISU_PLUS_DIGITS_RE, &s).into_owned();
    }
    if lv.intersects(CharFlags::ASTRAL_OF_INTEREST) {
        s = store.sub_map(&ASTRAL_DIGITS_RE, &s).into_owned();
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charclass::CharClassIndex;

    fn fixture() -> (MappingStore, CharClassIndex) {
        let mut index = CharClassIndex::new();
        let store = MappingStore::builtin(&mut index);
        (store, index)
    }

    fn map(s: &str) -> String {
        let (store, index) = fixture();
        map_digits_to_ascii(&store, s, index.unit_vector(s))
    }

    #[test]
    fn arabic_indic_full_block() {
        assert_eq!(map("\u{660}\u{661}\u{662}\u{663}\u{664}\u{665}\u{666}\u{667}\u{668}\u{669}"),
                   "0123456789");
        assert_eq!(map("\u{6F1}\u{6F2}"), "12");
    }

    #[test]
    fn devanagari_digits_with_other_chars() {
        assert_eq!(map("\u{20B9}\u{969}\u{966}"), "\u{20B9}30");
    }

    #[test]
    fn thai_lao_and_khmer() {
        assert_eq!(map("\u{E52}\u{ED3}"), "23");
        assert_eq!(map("\u{17E5}"), "5");
    }

    #[test]
    fn adlam_digits_in_supplementary_plane() {
        assert_eq!(map("\u{1E950}\u{1E959}"), "09");
    }

    #[test]
    fn non_decimal_numbers_untouched() {
        // Roman numeral and CJK number characters are not decimal digits.
        assert_eq!(map("\u{2168}\u{4E8C}"), "\u{2168}\u{4E8C}");
    }

    #[test]
    fn digit_mapping_is_idempotent() {
        let once = map("\u{660}\u{96F}");
        assert_eq!(map(&once), once);
    }
}
