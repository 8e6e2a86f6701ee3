//! Combining-mark passes: compose, decompose, and nukta order repair.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::charclass::CharFlags;
use crate::mapping::MappingStore;

static COMBINING_MARK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\u{300}-\u{36F}\u{653}-\u{655}\u{3099}\u{309A}]").unwrap());
// Anchor plus one to three combining marks. Longest clusters first, so a
// fully composable triple is not half-composed by the shorter patterns.
static CLUSTER3_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r".[\u{300}-\u{36F}\u{653}-\u{655}\u{3099}\u{309A}]{3}").unwrap());
static CLUSTER2_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r".[\u{300}-\u{36F}\u{653}-\u{655}\u{3099}\u{309A}]{2}").unwrap());
static CLUSTER1_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r".[\u{300}-\u{36F}\u{653}-\u{655}\u{3099}\u{309A}]").unwrap());
static SOUTH_ASIAN_PAIR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r".[\u{93C}\u{9BE}-\u{102E}\u{1B35}\u{11000}-\u{115FF}]").unwrap());
static SOUTH_ASIAN_MARK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\u{93C}\u{9BE}-\u{102E}\u{1B35}\u{11000}-\u{115FF}]").unwrap());

/// Composes base characters with trailing combining marks into precomposed
/// characters, e.g. `o` + combining diaeresis into `ö`. Runs after the
/// ligature and sign/symbol passes.
pub fn apply_combining_modifiers_compose(store: &MappingStore, s: &str) -> String {
    let mut s = s.to_string();
    // European/Arabic/kana combining marks.
    if COMBINING_MARK_RE.is_match(&s) {
        s = store.sub_map(&CLUSTER3_RE, &s).into_owned();
        s = store.sub_map(&CLUSTER2_RE, &s).into_owned();
        s = store.sub_map(&CLUSTER1_RE, &s).into_owned();
    }
    // Nukta and other South Asian dependent signs.
    if SOUTH_ASIAN_MARK_RE.is_match(&s) {
        s = store.sub_map(&SOUTH_ASIAN_PAIR_RE, &s).into_owned();
    }
    // The ech-yiwn ligature is a letter of the Armenian alphabet and is
    // always recomposed, at variance with NFKC.
    if s.contains('\u{565}') {
        s = s.replace("\u{565}\u{582}", "\u{587}");
    }
    s
}

static DECOMPOSABLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\u{344}\u{958}-\u{95F}\u{9DC}-\u{B5D}\u{F43}-\u{FB9}\u{2ADC}\u{FB1D}-\u{FB4E}]")
        .unwrap()
});
static MUSICAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\u{1D100}-\u{1D1FF}]").unwrap());

/// Splits precomposed characters into base plus combining mark where the
/// decomposed form is canonical (Indic, Tibetan, Hebrew, musical symbols).
pub fn apply_combining_modifiers_decompose(store: &MappingStore, s: &str) -> String {
    let s = store.sub_map(&DECOMPOSABLE_RE, s).into_owned();
    store.sub_map(&MUSICAL_RE, &s).into_owned()
}

macro_rules! swap_res {
    ($name:ident, $pat:literal) => {
        static $name: Lazy<Regex> = Lazy::new(|| Regex::new($pat).unwrap());
    };
}

swap_res!(DEVANAGARI_SWAP_RE, r"([\u{93E}-\u{94D}])(\u{93C}+)");
swap_res!(DEVANAGARI_DUP_RE, r"(\u{93C})\u{93C}+");
swap_res!(BENGALI_SWAP_RE, r"([\u{9BE}-\u{9CD}])(\u{9BC}+)");
swap_res!(GURMUKHI_SWAP_RE, r"([\u{A3E}-\u{A4D}])(\u{A3C}+)");
swap_res!(GUJARATI_SWAP_RE, r"([\u{ABE}-\u{ACD}])(\u{ABC}+)");
swap_res!(ORIYA_SWAP_RE, r"([\u{B3E}-\u{B4D}])(\u{B3C}+)");
swap_res!(KANNADA_SWAP_RE, r"([\u{CBE}-\u{CCD}])(\u{CBC}+)");
swap_res!(BENGALI_DUP_RE, r"(\u{9BC})\u{9BC}+");
swap_res!(GURMUKHI_DUP_RE, r"(\u{A3C})\u{A3C}+");
swap_res!(GUJARATI_DUP_RE, r"(\u{ABC})\u{ABC}+");
swap_res!(ORIYA_DUP_RE, r"(\u{B3C})\u{B3C}+");
swap_res!(KANNADA_DUP_RE, r"(\u{CBC})\u{CBC}+");
swap_res!(LEPCHA_SWAP_RE, r"([\u{1C26}-\u{1C2C}])(\u{1C37})");
swap_res!(KAITHI_SWAP_RE, r"([\u{110B0}-\u{110B8}])(\u{110BA})");
swap_res!(SHARADA_SWAP_RE, r"([\u{111B3}-\u{111C0}])(\u{111CA})");
swap_res!(KHOJKI_SWAP_RE, r"([\u{1122C}-\u{11235}])(\u{11236})");
swap_res!(KHUDAWADI_SWAP_RE, r"([\u{112E0}-\u{112E8}\u{112EA}])(\u{112E9})");
swap_res!(GRANTHA_SWAP_RE, r"([\u{1133E}-\u{1134D}])(\u{1133C})");
swap_res!(NEWA_SWAP_RE, r"([\u{11435}-\u{11442}])(\u{11446})");
swap_res!(TIRHUTA_SWAP_RE, r"([\u{114B0}-\u{114C2}])(\u{114C3})");
swap_res!(SIDDHAM_SWAP_RE, r"([\u{115AF}-\u{115BF}])(\u{115C0})");
swap_res!(TAKRI_SWAP_RE, r"([\u{116AD}-\u{116B6}])(\u{116B7})");
swap_res!(DOGRA_SWAP_RE, r"([\u{1182C}-\u{11839}])(\u{1183A})");
swap_res!(DIVES_AKURU_SWAP_RE, r"([\u{11930}-\u{1193E}])(\u{11943})");
swap_res!(MASARAM_GONDI_SWAP_RE, r"([\u{11D31}-\u{11D3F}\u{11D45}])(\u{11D42})");

/// A nukta canonically precedes a vowel sign or virama. Where the order is
/// reversed, swap the two diacritics; duplicate nuktas collapse to one.
pub fn repair_combining_modifiers_with_nukta(s: &str, lv: CharFlags) -> String {
    let mut s = s.to_string();
    if lv.intersects(CharFlags::DEVANAGARI) {
        s = DEVANAGARI_SWAP_RE.replace_all(&s, "${2}${1}").into_owned();
        s = DEVANAGARI_DUP_RE.replace_all(&s, "${1}").into_owned();
    }
    if lv.intersects(CharFlags::BENGALI_PLUS) {
        s = BENGALI_SWAP_RE.replace_all(&s, "${2}${1}").into_owned();
        s = GURMUKHI_SWAP_RE.replace_all(&s, "${2}${1}").into_owned();
        s = GUJARATI_SWAP_RE.replace_all(&s, "${2}${1}").into_owned();
        s = ORIYA_SWAP_RE.replace_all(&s, "${2}${1}").into_owned();
        s = KANNADA_SWAP_RE.replace_all(&s, "${2}${1}").into_owned();
        s = BENGALI_DUP_RE.replace_all(&s, "${1}").into_owned();
        s = GURMUKHI_DUP_RE.replace_all(&s, "${1}").into_owned();
        s = GUJARATI_DUP_RE.replace_all(&s, "${1}").into_owned();
        s = ORIYA_DUP_RE.replace_all(&s, "${1}").into_owned();
        s = KANNADA_DUP_RE.replace_all(&s, "${1}").into_owned();
    }
    if lv.intersects(CharFlags::KHMER_PLUS) {
        s = LEPCHA_SWAP_RE.replace_all(&s, "${2}${1}").into_owned();
    }
    if lv.intersects(CharFlags::ASTRAL_OF_INTEREST) {
        s = KAITHI_SWAP_RE.replace_all(&s, "${2}${1}").into_owned();
        s = SHARADA_SWAP_RE.replace_all(&s, "${2}${1}").into_owned();
        s = KHOJKI_SWAP_RE.replace_all(&s, "${2}${1}").into_owned();
        s = KHUDAWADI_SWAP_RE.replace_all(&s, "${2}${1}").into_owned();
        s = GRANTHA_SWAP_RE.replace_all(&s, "${2}${1}").into_owned();
        s = NEWA_SWAP_RE.replace_all(&s, "${2}${1}").into_owned();
        s = TIRHUTA_SWAP_RE.replace_all(&s, "${2}${1}").into_owned();
        s = SIDDHAM_SWAP_RE.replace_all(&s, "${2}${1}").into_owned();
        s = TAKRI_SWAP_RE.replace_all(&s, "${2}${1}").into_owned();
        s = DOGRA_SWAP_RE.replace_all(&s, "${2}${1}").into_owned();
        s = DIVES_AKURU_SWAP_RE.replace_all(&s, "${2}${1}").into_owned();
        s = MASARAM_GONDI_SWAP_RE.replace_all(&s, "${2}${1}").into_owned();
    }
    s
}
