//! Punctuation normalization families. Each family owns a disjoint set of
//! code points; the dash family alone handles the minus sign and friends.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{map_chars, translate_chars};
use crate::mapping::MappingStore;

fn quote_char(c: char) -> Option<char> {
    Some(match c {
        '\u{AB}' => '\u{201C}',  // double-angle quotation marks
        '\u{BB}' => '\u{201D}',
        '\u{201A}' => '\u{2018}', // low-9 and reversed-9 quotation marks
        '\u{201B}' => '\u{2018}',
        '\u{201E}' => '\u{201C}',
        '\u{201F}' => '\u{201C}',
        '\u{2039}' => '\u{2018}', // single-angle quotation marks
        '\u{203A}' => '\u{2019}',
        _ => return None,
    })
}

fn math_symbol(c: char) -> Option<&'static str> {
    Some(match c {
        '\u{2215}' => "/",        // division slash
        '\u{2216}' => "\\",       // set minus
        '\u{2217}' => "*",        // asterisk operator
        '\u{2218}' => "\u{25E6}", // ring operator to white bullet
        '\u{2219}' => "\u{2022}", // bullet operator to bullet
        '\u{2223}' => "|",        // divides
        '\u{2236}' => ":",        // ratio
        '\u{2254}' => ":=",
        '\u{2255}' => "=:",
        '\u{22C5}' => "\u{B7}",   // dot operator to middle dot
        _ => return None,
    })
}

static GENERAL_PUNCT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\u{2024}-\u{2026}\u{2033}-\u{203C}\u{2047}-\u{2057}]").unwrap());
static ANGLE_PUNCT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\u{2329}\u{232A}\u{2A74}-\u{2A76}]").unwrap());
static INTEGRAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\u{222C}-\u{2230}\u{2A0C}]").unwrap());
static NUMBER_PERIOD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\u{2488}-\u{249B}\u{1F100}-\u{1F10A}]").unwrap());

/// General punctuation: quotation marks, ellipsis, primes, math operator
/// symbols, digit-plus-period characters. Dashes are a separate pass.
pub fn normalize_punctuation(store: &MappingStore, s: &str) -> String {
    let s = translate_chars(s, quote_char).into_owned();
    let s = store.sub_map(&GENERAL_PUNCT_RE, &s).into_owned();
    let s = store.sub_map(&ANGLE_PUNCT_RE, &s).into_owned();
    let s = map_chars(&s, math_symbol).into_owned();
    let s = store.sub_map(&INTEGRAL_RE, &s).into_owned();
    store.sub_map(&NUMBER_PERIOD_RE, &s).into_owned()
}

fn arabic_punct(c: char) -> Option<&'static str> {
    Some(match c {
        '\u{640}' => "",   // tatweel, always deleted
        '\u{60C}' => ",",  // Arabic comma
        '\u{60D}' => "/",  // Arabic date separator
        '\u{61B}' => ";",  // Arabic semicolon
        '\u{61F}' => "?",  // Arabic question mark
        '\u{66A}' => "%",  // Arabic percent sign
        '\u{66B}' => ".",  // Arabic decimal separator
        '\u{66C}' => ",",  // Arabic thousands separator
        '\u{66D}' => "*",  // Arabic five pointed star
        '\u{6D4}' => ".",  // Arabic full stop
        _ => return None,
    })
}

pub fn normalize_arabic_punctuation(s: &str) -> String {
    map_chars(s, arabic_punct).into_owned()
}

fn cjk_punct(c: char) -> Option<char> {
    Some(match c {
        '\u{3001}' => ',',        // ideographic comma
        '\u{3002}' => '.',        // ideographic full stop
        '\u{3008}' => '<',
        '\u{3009}' => '>',
        '\u{300A}' | '\u{300C}' | '\u{300E}' => '\u{201C}', // double-angle/corner brackets
        '\u{300B}' | '\u{300D}' | '\u{300F}' => '\u{201D}',
        '\u{3010}' | '\u{3014}' | '\u{3016}' | '\u{3018}' | '\u{301A}' => '[',
        '\u{3011}' | '\u{3015}' | '\u{3017}' | '\u{3019}' | '\u{301B}' => ']',
        _ => return None,
    })
}

pub fn normalize_cjk_punctuation(s: &str) -> String {
    translate_chars(s, cjk_punct).into_owned()
}

fn greek_punct(c: char) -> Option<char> {
    Some(match c {
        '\u{340}' => '\u{300}', // tone marks to plain accents
        '\u{341}' => '\u{301}',
        '\u{343}' => '\u{313}', // koronis to comma above
        '\u{374}' => '\u{2B9}', // numeral sign to modifier prime
        '\u{37E}' => ';',       // Greek question mark
        '\u{387}' => '\u{B7}',  // ano teleia to middle dot
        _ => return None,
    })
}

pub fn normalize_greek_punctuation(s: &str) -> String {
    translate_chars(s, greek_punct).into_owned()
}

pub fn normalize_misc_f_punctuation(s: &str) -> String {
    // Tibetan no-break morpheme delimiter to plain tsheg.
    translate_chars(s, |c| (c == '\u{F0C}').then_some('\u{F0B}')).into_owned()
}

fn dash_char(c: char) -> Option<char> {
    match c {
        // hyphen through horizontal bar, minus sign, box drawing
        // horizontals, two-em and three-em dash
        '\u{2010}'..='\u{2015}' | '\u{2212}' | '\u{2500}' | '\u{2501}' | '\u{2E3A}'
        | '\u{2E3B}' => Some('-'),
        _ => None,
    }
}

pub fn normalize_dash_punctuation(s: &str) -> String {
    translate_chars(s, dash_char).into_owned()
}

fn space_char(c: char) -> Option<char> {
    match c {
        // no-break space, en quad through hair space, narrow no-break
        // space, medium mathematical space, ideographic space; never tab
        '\u{A0}' | '\u{2000}'..='\u{200A}' | '\u{202F}' | '\u{205F}' | '\u{3000}' => Some(' '),
        _ => None,
    }
}

pub fn normalize_non_zero_spaces(s: &str) -> String {
    translate_chars(s, space_char).into_owned()
}
