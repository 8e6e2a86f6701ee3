//! Encoding repair: bytes misread as Windows-1252/Latin-1, double UTF-8
//! conversions, and stray undecodable bytes.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::mapping::MappingStore;

/// Decodes bytes as UTF-8 where well-formed; each undecodable byte becomes
/// its Latin-1 character, so a raw 0x93 surfaces as U+0093 and stays
/// addressable by the encoding-repair pass.
pub fn decode_lossy(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
        for &b in chunk.invalid() {
            out.push(char::from(b));
        }
    }
    out
}

// An 0xE2 lead byte misread as U+00E2, followed by two misread
// continuation bytes.
static UTF8_TRIPLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\u{E2}[\u{80}-\u{BF}][\u{80}-\u{BF}]").unwrap());
// Two-byte UTF-8 sequences whose bytes were each decoded separately,
// possibly with the continuation byte already Windows-1252-mapped.
static UTF8_DOUBLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\u{C2}-\u{C3}\u{C5}\u{C6}\u{CB}][\u{80}-\u{2FF}\u{2000}-\u{21FF}]").unwrap());
// Lone stand-in bytes: Windows-1252 section.
static C1_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\u{80}-\u{9F}]").unwrap());

/// Repairs missing, wrong, or double Windows-1252/Latin-1 to UTF-8
/// conversion. Longer misencoded sequences are repaired first so their
/// bytes are not consumed piecemeal.
pub fn repair_encoding_errors(store: &MappingStore, s: &str) -> String {
    let s = store.sub_map(&UTF8_TRIPLE_RE, s).into_owned();
    let s = store.sub_map(&UTF8_DOUBLE_RE, &s).into_owned();
    store.sub_map(&C1_RE, &s).into_owned()
}

static STRAY_BYTE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\u{80}-\u{9F}\u{FFFD}]").unwrap());

/// Backup to encoding repair: deletes C1 stand-ins and replacement
/// characters outright. Stand-ins are not printable as-is, so this pass
/// stays in the default set.
pub fn delete_stray_bytes(s: &str) -> String {
    STRAY_BYTE_RE.replace_all(s, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charclass::CharClassIndex;

    fn store() -> MappingStore {
        MappingStore::builtin(&mut CharClassIndex::new())
    }

    #[test]
    fn decode_lossy_keeps_utf8_and_maps_stray_bytes() {
        assert_eq!(decode_lossy("héllo".as_bytes()), "héllo");
        assert_eq!(decode_lossy(b"a\x93b"), "a\u{93}b");
        assert_eq!(decode_lossy(b"\xE9"), "\u{E9}");
    }

    #[test]
    fn windows1252_byte_becomes_smart_quote() {
        let s = decode_lossy(b"said \x93hi\x94.");
        assert_eq!(repair_encoding_errors(&store(), &s), "said \u{201C}hi\u{201D}.");
    }

    #[test]
    fn double_encoded_utf8_is_repaired() {
        // 'é' encoded as UTF-8 then each byte decoded as Latin-1.
        assert_eq!(repair_encoding_errors(&store(), "caf\u{C3}\u{A9}"), "café");
    }

    #[test]
    fn unassigned_windows1252_slots_are_deleted() {
        let s = decode_lossy(b"a\x81b");
        assert_eq!(repair_encoding_errors(&store(), &s), "ab");
    }

    #[test]
    fn stray_byte_deletion_is_a_backup() {
        assert_eq!(delete_stray_bytes("a\u{93}b\u{FFFD}c"), "abc");
    }
}
