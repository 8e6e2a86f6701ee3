//! Cross-script look-alike disambiguation for Latin, Greek, and Cyrillic.
//!
//! Spam, OCR output, and keyboard-mangled text mix visually identical
//! characters across these three scripts ("аррӓ" spelled in Cyrillic where
//! "appä" was meant). Per whitespace token, the pass either retargets
//! look-alike characters to a single script, splits the token at a script
//! transition, or leaves it alone.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::{debug, error, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use smallvec::SmallVec;

use crate::charclass::{CharClassIndex, CharFlags};
use crate::stats::LookAlikeStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Script {
    Latin,
    Greek,
    Cyrillic,
}

impl Script {
    pub const ALL: [Script; 3] = [Script::Latin, Script::Greek, Script::Cyrillic];

    fn index(self) -> usize {
        match self {
            Script::Latin => 0,
            Script::Greek => 1,
            Script::Cyrillic => 2,
        }
    }
}

pub fn char_script(index: &CharClassIndex, c: char) -> Option<Script> {
    let flags = index.classify(c);
    if flags.intersects(CharFlags::LATIN) {
        Some(Script::Latin)
    } else if flags.intersects(CharFlags::GREEK) {
        Some(Script::Greek)
    } else if flags.intersects(CharFlags::CYRILLIC) {
        Some(Script::Cyrillic)
    } else {
        None
    }
}

/// Groups of identical-looking characters, keyed by (source script, target
/// script, source character).
pub struct LookAlikeTable {
    map: HashMap<(Script, Script, char), char>,
}

impl LookAlikeTable {
    pub fn builtin(index: &CharClassIndex) -> Self {
        Self::parse(include_str!("../data/look-alikes.txt"), index)
    }

    /// Loads `look-alikes.txt` from `dir`, falling back to the embedded
    /// copy if missing.
    pub fn from_dir(dir: &Path, index: &CharClassIndex) -> Self {
        let path = dir.join("look-alikes.txt");
        match fs::read_to_string(&path) {
            Ok(text) => Self::parse(&text, index),
            Err(e) => {
                error!("could not open {}: {e}", path.display());
                warn!("falling back to embedded look-alike table");
                Self::builtin(index)
            }
        }
    }

    /// One group of look-alike characters per line, whitespace-separated.
    /// Only the "Identical-looking characters" section feeds automatic
    /// correction; later sections are reference material.
    fn parse(text: &str, index: &CharClassIndex) -> Self {
        let mut map = HashMap::new();
        let mut in_identical_section = false;
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some(rest) = line.strip_prefix("::section") {
                in_identical_section = rest.trim() == "Identical-looking characters";
                continue;
            }
            if !in_identical_section {
                continue;
            }
            let mut per_script: [Option<char>; 3] = [None; 3];
            for token in line.split_whitespace() {
                let Some(c) = token.chars().next() else { continue };
                if let Some(script) = char_script(index, c) {
                    let slot = &mut per_script[script.index()];
                    if slot.is_none() {
                        *slot = Some(c);
                    }
                }
            }
            for source in Script::ALL {
                let Some(from) = per_script[source.index()] else { continue };
                for target in Script::ALL {
                    if source == target {
                        continue;
                    }
                    if let Some(to) = per_script[target.index()] {
                        map.insert((source, target, from), to);
                    }
                }
            }
        }
        LookAlikeTable { map }
    }

    pub fn lookup(&self, source: Script, target: Script, c: char) -> Option<char> {
        self.map.get(&(source, target, c)).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

// Whole tokens allowed to stay Latin-shaped even though every character has
// a Cyrillic twin.
static ROMAN_NUMERAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:X|XX|XXX|XL|L|LX|LXX|LXXX|XC)?(?:I|II|III|IV|V|VI|VII|VIII|IX)?$").unwrap()
});
const LATIN_ALLOW_LIST: [&str; 2] = ["SpA", "USA"];
// Kazakh/Ukrainian function words whose letters all have Latin twins.
const CYRILLIC_ALLOW_LIST: [&str; 9] =
    ["әр", "Әр", "әрі", "сі", "Сі", "іс", "Іс", "ісі", "ірі"];

// Mixed-script tokens that are URLs on Cyrillic-country or generic domains
// are left untouched.
static URL_LATIN_DOMAIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:https?://)?[a-zA-Z][-_./0-9a-zA-Z]*\.(?:bg|by|me|mk|kg|kz|rs|ru|tj|tm|ua|uz|com|info)/[-_./\#0-9\u{400}-\u{4FF}]+$",
    )
    .unwrap()
});
static URL_CYRILLIC_DOMAIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:https?://)?[\u{400}-\u{4FF}][-_./0-9\u{400}-\u{4FF}]*\.(?:bg|by|me|mk|kg|kz|rs|ru|tj|tm|ua|uz|com|info)$",
    )
    .unwrap()
});

fn is_mixed_script_url(token: &str) -> bool {
    URL_LATIN_DOMAIN_RE.is_match(token) || URL_CYRILLIC_DOMAIN_RE.is_match(token)
}

/// Context shared by the look-alike pass: classification index plus the
/// look-alike table.
pub struct LookAlikeCorrector<'a> {
    pub index: &'a CharClassIndex,
    pub table: &'a LookAlikeTable,
}

impl LookAlikeCorrector<'_> {
    /// Applies per-token look-alike correction across a text unit. `lv` is
    /// the unit's classification vector (used for single-script tokens in
    /// mixed-script context).
    pub fn correct(&self, s: &str, lv: CharFlags, stats: &mut LookAlikeStats) -> String {
        let mut result = String::with_capacity(s.len());
        let mut rest = s;
        while !rest.is_empty() {
            let start = rest
                .find(|c: char| !c.is_whitespace())
                .unwrap_or(rest.len());
            result.push_str(&rest[..start]);
            rest = &rest[start..];
            if rest.is_empty() {
                break;
            }
            let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            let token = &rest[..end];
            rest = &rest[end..];
            result.push_str(&self.correct_token(token, lv, stats));
        }
        result
    }

    fn map_token_to_script(&self, token: &str, source: Script, target: Script) -> String {
        token
            .chars()
            .map(|c| self.table.lookup(source, target, c).unwrap_or(c))
            .collect()
    }

    fn correct_token(&self, token: &str, lv: CharFlags, stats: &mut LookAlikeStats) -> String {
        // Per-script character counts and look-alike cover counts
        // (covers[a][b]: characters of script a with a twin in script b).
        let mut counts = [0u32; 3];
        let mut covers = [[0u32; 3]; 3];
        for c in token.chars() {
            if let Some(script) = char_script(self.index, c) {
                counts[script.index()] += 1;
                for target in Script::ALL {
                    if target != script && self.table.lookup(script, target, c).is_some() {
                        covers[script.index()][target.index()] += 1;
                    }
                }
            }
        }
        let lat = counts[Script::Latin.index()];
        let cyr = counts[Script::Cyrillic.index()];
        let lat_to_cyr = covers[Script::Latin.index()][Script::Cyrillic.index()];
        let cyr_to_lat = covers[Script::Cyrillic.index()][Script::Latin.index()];
        let n_scripts = counts.iter().filter(|&&n| n > 0).count();
        let mixed = n_scripts >= 2;

        let mut target: Option<Script> = None;
        if mixed {
            if cyr_to_lat == cyr && lat_to_cyr < lat {
                // Every Cyrillic character doubles as Latin, and not all
                // Latin characters double as Cyrillic.
                target = Some(Script::Latin);
            } else if lat_to_cyr == lat && cyr_to_lat < cyr {
                target = Some(Script::Cyrillic);
            } else if cyr == 1 && cyr_to_lat == 1 && lat >= 3 {
                // Lone minority intruder in a clear majority.
                target = Some(Script::Latin);
            } else if lat == 1 && lat_to_cyr == 1 && cyr >= 3 {
                target = Some(Script::Cyrillic);
            } else {
                let lat_token = self.map_token_to_script(token, Script::Cyrillic, Script::Latin);
                if LATIN_ALLOW_LIST.contains(&lat_token.as_str())
                    || (token.chars().count() >= 2 && ROMAN_NUMERAL_RE.is_match(&lat_token))
                {
                    target = Some(Script::Latin);
                }
                let cyr_token = self.map_token_to_script(token, Script::Latin, Script::Cyrillic);
                if CYRILLIC_ALLOW_LIST.contains(&cyr_token.as_str()) {
                    target = Some(Script::Cyrillic);
                }
            }
        } else if cyr >= 2
            && cyr == token.chars().count() as u32
            && cyr_to_lat == cyr
            && lv.intersects(CharFlags::LATIN)
            && !CYRILLIC_ALLOW_LIST.contains(&token)
        {
            // An all-Cyrillic token whose every character has a Latin twin,
            // inside an otherwise Latin unit, is Latin in disguise.
            target = Some(Script::Latin);
        }

        if let Some(target) = target {
            let corrected: String = token
                .chars()
                .map(|c| match char_script(self.index, c) {
                    Some(script) if script != target => {
                        self.table.lookup(script, target, c).unwrap_or(c)
                    }
                    _ => c,
                })
                .collect();
            match target {
                Script::Latin => stats.to_latin += 1,
                Script::Greek => stats.to_greek += 1,
                Script::Cyrillic => stats.to_cyrillic += 1,
            }
            return corrected;
        }
        let split = self.split_mixed_script_token(token);
        if split != token {
            debug!("look-alike split {token} -> {split}");
            stats.split += 1;
            return split;
        }
        if mixed {
            stats.unchanged += 1;
            if is_mixed_script_url(token) {
                debug!("mixed-script URL left as is: {token}");
            }
        }
        token.to_string()
    }

    /// Inserts a space at a script transition inside a token when both
    /// sides are long enough and the boundary is not softened by
    /// punctuation.
    fn split_mixed_script_token(&self, token: &str) -> String {
        let chars: SmallVec<[char; 24]> = token.chars().collect();
        let len = chars.len();
        let mut out = String::with_capacity(token.len() + 1);
        let mut script: Option<Script> = None;
        let mut script_start = 0usize;
        let mut last_char_is_punctuation = false;
        for (position, &c) in chars.iter().enumerate() {
            if matches!(c, '.' | '/' | '_' | '-') {
                last_char_is_punctuation = true;
            } else {
                let new_script = char_script(self.index, c);
                if new_script != script {
                    if position - script_start >= 3
                        && len - position >= 3
                        && !last_char_is_punctuation
                        && script.is_some()
                        && new_script.is_some()
                        && chars
                            .get(position + 1)
                            .map(|&next| char_script(self.index, next))
                            == Some(new_script)
                    {
                        out.push(' ');
                    }
                    script = new_script;
                    script_start = position;
                }
                last_char_is_punctuation = false;
            }
            out.push(c);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (CharClassIndex, LookAlikeTable) {
        let index = CharClassIndex::new();
        let table = LookAlikeTable::builtin(&index);
        (index, table)
    }

    fn correct(s: &str) -> (String, LookAlikeStats) {
        let (index, table) = fixture();
        let corrector = LookAlikeCorrector {
            index: &index,
            table: &table,
        };
        let lv = index.unit_vector(s);
        let mut stats = LookAlikeStats::default();
        let out = corrector.correct(s, lv, &mut stats);
        (out, stats)
    }

    #[test]
    fn table_parses_both_directions() {
        let (_, table) = fixture();
        assert!(table.len() > 100);
        assert_eq!(table.lookup(Script::Cyrillic, Script::Latin, 'а'), Some('a'));
        assert_eq!(table.lookup(Script::Latin, Script::Cyrillic, 'a'), Some('а'));
        assert_eq!(table.lookup(Script::Greek, Script::Latin, 'Α'), Some('A'));
        // Similar-looking section is reference only.
        assert_eq!(table.lookup(Script::Cyrillic, Script::Latin, 'Я'), None);
    }

    #[test]
    fn mixed_token_retargets_to_latin() {
        // Latin word with one Cyrillic 'о' slipped in.
        let (out, stats) = correct("wоrd");
        assert_eq!(out, "word");
        assert_eq!(stats.to_latin, 1);
    }

    #[test]
    fn mixed_token_retargets_to_cyrillic() {
        // Cyrillic word with a Latin 'o' slipped in.
        let (out, stats) = correct("словo");
        assert_eq!(out, "слово");
        assert_eq!(stats.to_cyrillic, 1);
    }

    #[test]
    fn all_cyrillic_lookalike_token_in_latin_unit() {
        let (out, stats) = correct("the аррӓ value");
        assert_eq!(out, "the appä value");
        assert_eq!(stats.to_latin, 1);
    }

    #[test]
    fn genuine_cyrillic_word_untouched_in_mixed_unit() {
        // 'п' has no Latin twin, so the word stays Cyrillic.
        let (out, _) = correct("see пример here");
        assert_eq!(out, "see пример here");
    }

    #[test]
    fn kazakh_allow_list_protects_short_words() {
        let (out, _) = correct("alpha іс omega");
        assert_eq!(out, "alpha іс omega");
    }

    #[test]
    fn long_mixed_token_splits_at_script_boundary() {
        // Three plus Latin then three plus Cyrillic, neither side all
        // look-alikes: split instead of retarget.
        let (out, stats) = correct("windowпример");
        assert_eq!(out, "window пример");
        assert_eq!(stats.split, 1);
    }

    #[test]
    fn url_like_tokens_not_split() {
        let (out, _) = correct("http://пример.ru");
        assert_eq!(out, "http://пример.ru");
    }

    #[test]
    fn whitespace_is_preserved() {
        let (out, _) = correct("  wоrd\tпример ");
        assert_eq!(out, "  word\tпример ");
    }

    #[test]
    fn correction_converges_after_one_application() {
        // Retarget, split, and leave-alone outcomes all reach a fixed
        // point in one pass.
        for s in ["the аррӓ value", "wоrd пример", "windowпример here"] {
            let (once, _) = correct(s);
            let (twice, _) = correct(&once);
            assert_eq!(twice, once, "second pass moved {s:?}");
        }
    }
}
