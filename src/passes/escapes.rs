//! Escape repairs: multi-level XML entity escapes and double URL escapes.

use fancy_regex::Regex as FancyRegex;
use once_cell::sync::Lazy;
use regex::Regex;

// One or more redundant "amp;" runs between an ampersand and a final
// entity name, e.g. &amp;amp;quot; down to &quot;.
static NESTED_ENTITY_RE: Lazy<FancyRegex> = Lazy::new(|| {
    FancyRegex::new(r"(?i)(?<=&)(?:amp;)+(?=(?:amp|apos|gt|lt|nbsp|quot|#\d{1,6}|#x[0-9A-F]{1,5});)")
        .unwrap()
});

pub fn repair_xml(s: &str) -> String {
    NESTED_ENTITY_RE.replace_all(s, "").into_owned()
}

// %25 standing in for % inside a percent-encoded UTF-8 sequence, two-byte
// and three-byte forms.
static DOUBLE_ESCAPE_2_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(%)25([CD][0-9A-F]%)25([89AB][0-9A-F])").unwrap());
static DOUBLE_ESCAPE_3_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(%)25(E[0-9A-F]%)25([89AB][0-9A-F]%)25([89AB][0-9A-F])").unwrap());

pub fn repair_url_escapes(s: &str) -> String {
    let s = DOUBLE_ESCAPE_2_RE.replace_all(s, "${1}${2}${3}");
    DOUBLE_ESCAPE_3_RE.replace_all(&s, "${1}${2}${3}${4}").into_owned()
}
