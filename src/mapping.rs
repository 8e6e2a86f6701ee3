//! Mapping table store.
//!
//! Nine TSV tables map source strings (1 to 3 scalars) to normalized target
//! strings (0 to 5 scalars; empty means delete). The tables are embedded at
//! compile time; a data directory can override individual tables at run time.
//! Tables load in a fixed order and later tables win on key collisions.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::{error, warn};
use regex::{Captures, Regex};

use crate::charclass::CharClassIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    /// Ligatures, signs and symbols, punctuation families, script repairs.
    Baseline,
    /// Arabic presentation forms to standard letters.
    PresForm,
    /// CJK compatibility characters, fullwidth/halfwidth forms.
    CjkCompat,
    /// Precomposed/decomposed combining-mark pairs, both directions.
    Combining,
    /// NFKC-style core compatibility mappings.
    CoreCompat,
    /// Non-ASCII decimal digits to ASCII.
    Digit,
    /// Enclosed and circled characters.
    Enclosure,
    /// Windows-1252/Latin-1 mis-decodings, double UTF-8 encodings.
    EncodingRepair,
    /// Mathematical font variants, small forms, vertical forms.
    FontSmallVertical,
}

impl TableKind {
    /// Load order. Later tables override earlier ones on key collisions.
    pub const LOAD_ORDER: [TableKind; 9] = [
        TableKind::Baseline,
        TableKind::PresForm,
        TableKind::CjkCompat,
        TableKind::Combining,
        TableKind::CoreCompat,
        TableKind::Digit,
        TableKind::Enclosure,
        TableKind::EncodingRepair,
        TableKind::FontSmallVertical,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            TableKind::Baseline => "BaselineMapping.tsv",
            TableKind::PresForm => "ArabicPresentationFormMapping.tsv",
            TableKind::CjkCompat => "CJKCompatibilityMapping.tsv",
            TableKind::Combining => "CombiningModifierMapping.tsv",
            TableKind::CoreCompat => "CoreCompatibilityMapping.tsv",
            TableKind::Digit => "DigitMapping.tsv",
            TableKind::Enclosure => "EnclosureMapping.tsv",
            TableKind::EncodingRepair => "EncodingRepairMapping.tsv",
            TableKind::FontSmallVertical => "FontSmallVerticalMapping.tsv",
        }
    }

    fn embedded(self) -> &'static str {
        match self {
            TableKind::Baseline => include_str!("../data/BaselineMapping.tsv"),
            TableKind::PresForm => include_str!("../data/ArabicPresentationFormMapping.tsv"),
            TableKind::CjkCompat => include_str!("../data/CJKCompatibilityMapping.tsv"),
            TableKind::Combining => include_str!("../data/CombiningModifierMapping.tsv"),
            TableKind::CoreCompat => include_str!("../data/CoreCompatibilityMapping.tsv"),
            TableKind::Digit => include_str!("../data/DigitMapping.tsv"),
            TableKind::Enclosure => include_str!("../data/EnclosureMapping.tsv"),
            TableKind::EncodingRepair => include_str!("../data/EncodingRepairMapping.tsv"),
            TableKind::FontSmallVertical => include_str!("../data/FontSmallVerticalMapping.tsv"),
        }
    }
}

pub struct MappingStore {
    map: HashMap<String, String>,
}

impl MappingStore {
    /// Store built from the embedded tables. Infallible.
    pub fn builtin(index: &mut CharClassIndex) -> Self {
        let mut store = MappingStore {
            map: HashMap::with_capacity(8_192),
        };
        for kind in TableKind::LOAD_ORDER {
            store.load_table(kind, kind.embedded(), index);
        }
        store
    }

    /// Store built from TSV files in `dir`. A table missing from the
    /// directory falls back to the embedded copy with a warning.
    pub fn from_dir(dir: &Path, index: &mut CharClassIndex) -> Self {
        let mut store = MappingStore {
            map: HashMap::with_capacity(8_192),
        };
        for kind in TableKind::LOAD_ORDER {
            let path = dir.join(kind.file_name());
            match fs::read_to_string(&path) {
                Ok(text) => store.load_table(kind, &text, index),
                Err(e) => {
                    error!("could not open {}: {e}", path.display());
                    warn!("falling back to embedded {}", kind.file_name());
                    store.load_table(kind, kind.embedded(), index);
                }
            }
        }
        store
    }

    /// Header line first, then one `source<TAB>target` entry per line.
    /// Extra columns (annotations) are ignored; lines with fewer than two
    /// columns are skipped.
    fn load_table(&mut self, kind: TableKind, text: &str, index: &mut CharClassIndex) {
        for line in text.lines().skip(1) {
            let mut cols = line.split('\t');
            let source = cols.next().unwrap_or("");
            let target = match cols.next() {
                Some(t) => t,
                None => continue,
            };
            if source.is_empty() {
                continue;
            }
            index.note_mapping(kind, source, target);
            self.map.insert(source.to_string(), target.to_string());
        }
    }

    pub fn lookup(&self, source: &str) -> Option<&str> {
        self.map.get(source).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Replaces every match of `re` in `s` with its table target, leaving
    /// unmapped matches unchanged. The workhorse of the table-driven passes.
    pub fn sub_map<'a>(&self, re: &Regex, s: &'a str) -> std::borrow::Cow<'a, str> {
        re.replace_all(s, |caps: &Captures| {
            let m = caps.get(0).unwrap().as_str();
            match self.lookup(m) {
                Some(t) => t.to_string(),
                None => m.to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;

    static DIGIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\u{0660}-\u{0669}]").unwrap());

    fn store() -> (MappingStore, CharClassIndex) {
        let mut index = CharClassIndex::new();
        let store = MappingStore::builtin(&mut index);
        (store, index)
    }

    #[test]
    fn builtin_tables_load() {
        let (store, _) = store();
        assert!(store.len() > 6_000);
        assert_eq!(store.lookup("\u{0665}"), Some("5"));
        assert_eq!(store.lookup("\u{FB01}"), Some("fi"));
        assert_eq!(store.lookup("\u{2026}"), Some("..."));
        // Windows-1252 smart quote stand-in.
        assert_eq!(store.lookup("\u{0093}"), Some("\u{201C}"));
        // Unassigned Windows-1252 slots delete.
        assert_eq!(store.lookup("\u{0081}"), Some(""));
    }

    #[test]
    fn digit_sources_get_flagged() {
        use crate::charclass::CharFlags;
        let (_, index) = store();
        assert!(index.classify('\u{0665}').intersects(CharFlags::MAPPABLE_DIGIT));
        assert!(index.classify('\u{096F}').intersects(CharFlags::MAPPABLE_DIGIT));
        assert!(index.classify('\u{1E953}').intersects(CharFlags::ASTRAL_OF_INTEREST));
        assert!(index.classify('\u{FB01}').intersects(CharFlags::LIGATURE));
        assert!(index.classify('\u{2460}').intersects(CharFlags::ENCLOSURE));
    }

    #[test]
    fn sub_map_replaces_known_leaves_unknown() {
        let (store, _) = store();
        assert_eq!(store.sub_map(&DIGIT_RE, "\u{0661}\u{0662}\u{0663}"), "123");
        assert_eq!(store.sub_map(&DIGIT_RE, "abc"), "abc");
    }

    #[test]
    fn data_dir_overrides_one_table_and_falls_back_for_the_rest() {
        let dir = std::env::temp_dir().join("charwash-mapping-override-test");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("DigitMapping.tsv"),
            "source\ttarget\n\u{0661}\tONE\n",
        )
        .unwrap();
        let mut index = CharClassIndex::new();
        let store = MappingStore::from_dir(&dir, &mut index);
        assert_eq!(store.lookup("\u{0661}"), Some("ONE"));
        // Entries only in the embedded copy are gone from the overridden table.
        assert_eq!(store.lookup("\u{0662}"), None);
        // The other eight tables fall back to their embedded copies.
        assert_eq!(store.lookup("\u{FB01}"), Some("fi"));
        std::fs::remove_dir_all(&dir).ok();
    }
}
