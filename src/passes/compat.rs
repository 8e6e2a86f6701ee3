//! Table-driven compatibility substitutions: presentation forms, CJK
//! compatibility, width, font/small/vertical variants, enclosures, core
//! compatibility, plus the hard-coded ligature and sign/symbol sets.

use once_cell::sync::Lazy;
use regex::Regex;

use super::map_chars;
use crate::mapping::MappingStore;

static PRES_FORM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\u{FB50}-\u{FDFF}\u{FE70}-\u{FEFC}]").unwrap());

/// Arabic presentation forms to standard letters, including Arabic
/// ligatures such as lam-alef.
pub fn normalize_arabic_pres_form_characters(store: &MappingStore, s: &str) -> String {
    store.sub_map(&PRES_FORM_RE, s).into_owned()
}

static CJK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\u{2F00}-\u{2FDF}\u{3038}-\u{303A}\u{3250}\u{32C0}-\u{33FF}\u{F900}-\u{FAFF}]")
        .unwrap()
});
static CJK_SUP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\u{1F190}\u{1F200}\u{2F800}-\u{2FA1F}]").unwrap());

/// CJK compatibility characters, e.g. squared-unit signs.
pub fn normalize_cjk(store: &MappingStore, s: &str) -> String {
    let s = store.sub_map(&CJK_RE, s).into_owned();
    store.sub_map(&CJK_SUP_RE, &s).into_owned()
}

static WIDTH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\u{FF01}-\u{FFEE}]").unwrap());

/// Fullwidth and halfwidth forms to their regular counterparts.
pub fn normalize_half_and_full_width_characters(store: &MappingStore, s: &str) -> String {
    store.sub_map(&WIDTH_RE, s).into_owned()
}

static FONT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"[\u{2102}-\u{2149}\u{FB20}-\u{FB29}\u{1D400}-\u{1D7FF}\u{1EE00}-\u{1EEBB}\u{1FBF0}-\u{1FBF9}]",
    )
    .unwrap()
});

/// Mathematical font variants such as double-struck letters.
pub fn normalize_font_characters(store: &MappingStore, s: &str) -> String {
    store.sub_map(&FONT_RE, s).into_owned()
}

static SMALL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\u{FE50}-\u{FE6F}]").unwrap());

pub fn normalize_small_characters(store: &MappingStore, s: &str) -> String {
    store.sub_map(&SMALL_RE, s).into_owned()
}

static VERTICAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\u{309F}\u{30FF}\u{FE10}-\u{FE19}\u{FE30}-\u{FE48}]").unwrap());

pub fn normalize_vertical_characters(store: &MappingStore, s: &str) -> String {
    store.sub_map(&VERTICAL_RE, s).into_owned()
}

static ENCLOSURE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"[\u{2460}-\u{2488}\u{249C}-\u{2500}\u{3036}\u{3200}-\u{3250}\u{3251}-\u{32C0}\u{32D0}-\u{32FF}]",
    )
    .unwrap()
});
static ENCLOSURE_SUP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\u{1F110}-\u{1F16A}\u{1F201}-\u{1F260}]").unwrap());

/// Decomposes enclosed (circled, squared, parenthesized) characters.
pub fn normalize_enclosure_characters(store: &MappingStore, s: &str) -> String {
    let s = store.sub_map(&ENCLOSURE_RE, s).into_owned();
    store.sub_map(&ENCLOSURE_SUP_RE, &s).into_owned()
}

static ROMAN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\u{2160}-\u{217F}]").unwrap());
static HANGUL_COMPAT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\u{3131}-\u{318E}]").unwrap());
static THAI_LAO_COMPAT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\u{E33}\u{EB3}\u{EDC}\u{EDD}]").unwrap());

/// Roman numeral characters, Hangul compatibility jamo, Thai/Lao
/// compatibility characters.
pub fn normalize_core_compat_characters(store: &MappingStore, s: &str) -> String {
    let s = store.sub_map(&ROMAN_RE, s).into_owned();
    let s = store.sub_map(&HANGUL_COMPAT_RE, &s).into_owned();
    store.sub_map(&THAI_LAO_COMPAT_RE, &s).into_owned()
}

fn ligature_expansion(c: char) -> Option<&'static str> {
    Some(match c {
        '\u{132}' => "IJ",
        '\u{133}' => "ij",
        '\u{13F}' => "L\u{B7}",
        '\u{140}' => "l\u{B7}",
        '\u{149}' => "\u{2BC}n",
        '\u{17F}' => "s",
        '\u{1C4}' => "D\u{17D}",
        '\u{1C5}' => "D\u{17E}",
        '\u{1C6}' => "d\u{17E}",
        '\u{1C7}' => "LJ",
        '\u{1C8}' => "Lj",
        '\u{1C9}' => "lj",
        '\u{1CA}' => "NJ",
        '\u{1CB}' => "Nj",
        '\u{1CC}' => "nj",
        '\u{1F1}' => "DZ",
        '\u{1F2}' => "Dz",
        '\u{1F3}' => "dz",
        '\u{1E9B}' => "\u{1E61}",
        '\u{FB00}' => "ff",
        '\u{FB01}' => "fi",
        '\u{FB02}' => "fl",
        '\u{FB03}' => "ffi",
        '\u{FB04}' => "ffl",
        '\u{FB05}' => "st",
        '\u{FB06}' => "st",
        '\u{FB13}' => "\u{574}\u{576}",
        '\u{FB14}' => "\u{574}\u{565}",
        '\u{FB15}' => "\u{574}\u{56B}",
        '\u{FB16}' => "\u{57E}\u{576}",
        '\u{FB17}' => "\u{574}\u{56D}",
        '\u{FB49}' => "\u{5E9}\u{5BC}",
        '\u{FB4F}' => "\u{5D0}\u{5DC}",
        _ => return None,
    })
}

/// Latin, Armenian, and Hebrew ligatures. Arabic ligatures are covered by
/// the presentation form pass.
pub fn normalize_ligatures(s: &str) -> String {
    map_chars(s, ligature_expansion).into_owned()
}

fn sign_symbol_expansion(c: char) -> Option<&'static str> {
    Some(match c {
        '\u{B5}' => "\u{3BC}",  // micro sign to Greek mu
        '\u{3D0}' => "\u{3B2}", // Greek letter symbols to plain letters
        '\u{3D1}' => "\u{3B8}",
        '\u{3D2}' => "\u{3A5}",
        '\u{3D3}' => "\u{38E}",
        '\u{3D4}' => "\u{3AB}",
        '\u{3D5}' => "\u{3C6}",
        '\u{3D6}' => "\u{3C0}",
        '\u{3F0}' => "\u{3BA}",
        '\u{3F1}' => "\u{3C1}",
        '\u{3F2}' => "\u{3C2}",
        '\u{3F4}' => "\u{398}",
        '\u{3F5}' => "\u{3B5}",
        '\u{3F9}' => "\u{3A3}",
        '\u{20A8}' => "Rs",
        '\u{2103}' => "\u{B0}C",
        '\u{2107}' => "\u{190}",
        '\u{2109}' => "\u{B0}F",
        '\u{2116}' => "No.",
        '\u{2126}' => "\u{3A9}", // ohm sign to Greek omega
        '\u{212A}' => "K",       // kelvin sign to Latin K
        '\u{212B}' => "\u{C5}",  // angstrom sign to A with ring
        '\u{2135}' => "\u{5D0}", // alef through dalet symbols
        '\u{2136}' => "\u{5D1}",
        '\u{2137}' => "\u{5D2}",
        '\u{2138}' => "\u{5D3}",
        '\u{213B}' => "FAX",
        _ => return None,
    })
}

pub fn normalize_signs_and_symbols(s: &str) -> String {
    map_chars(s, sign_symbol_expansion).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charclass::CharClassIndex;

    fn store() -> MappingStore {
        MappingStore::builtin(&mut CharClassIndex::new())
    }

    #[test]
    fn pres_forms_to_standard_letters() {
        let store = store();
        assert_eq!(
            normalize_arabic_pres_form_characters(&store, "\u{FEF1}"),
            "\u{64A}"
        );
        // Lam-alef ligature decomposes to two letters.
        assert_eq!(
            normalize_arabic_pres_form_characters(&store, "\u{FEFB}"),
            "\u{644}\u{627}"
        );
    }

    #[test]
    fn width_and_cjk() {
        let store = store();
        assert_eq!(
            normalize_half_and_full_width_characters(&store, "\u{FF21}\u{FF42}\u{FF11}"),
            "Ab1"
        );
        assert_eq!(normalize_cjk(&store, "\u{33A2}"), "km\u{B2}");
    }

    #[test]
    fn font_small_vertical() {
        let store = store();
        assert_eq!(normalize_font_characters(&store, "\u{2102}"), "C");
        assert_eq!(normalize_small_characters(&store, "\u{FE60}"), "&");
        assert_eq!(normalize_vertical_characters(&store, "\u{FE31}"), "-");
    }

    #[test]
    fn enclosures_unwrap() {
        let store = store();
        assert_eq!(normalize_enclosure_characters(&store, "\u{2460}"), "(1)");
        assert_eq!(normalize_enclosure_characters(&store, "\u{1F110}"), "(A)");
    }

    #[test]
    fn core_compat_roman_and_hangul() {
        let store = store();
        assert_eq!(normalize_core_compat_characters(&store, "\u{216B}"), "XII");
        assert_eq!(normalize_core_compat_characters(&store, "\u{3131}"), "\u{1100}");
    }

    #[test]
    fn ligatures_expand() {
        assert_eq!(normalize_ligatures("\u{FB01}le"), "file");
        assert_eq!(normalize_ligatures("\u{FB03}x"), "ffix");
        assert_eq!(normalize_ligatures("plain"), "plain");
    }

    #[test]
    fn signs_and_symbols_expand() {
        assert_eq!(normalize_signs_and_symbols("5\u{B5}m"), "5\u{3BC}m");
        assert_eq!(normalize_signs_and_symbols("\u{2116}5"), "No.5");
        assert_eq!(normalize_signs_and_symbols("20\u{2103}"), "20\u{B0}C");
    }
}
