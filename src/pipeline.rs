//! The normalization pipeline: per-unit classification, pass gating, and
//! line-oriented streaming.
//!
//! Each text unit is classified once into a character-class vector; a pass
//! only runs when it is both selected and its trigger classes appear in the
//! unit. On clean ASCII every pass is skipped and the unit passes through
//! unchanged.

use std::io::{BufRead, Write};

use fancy_regex::Regex as FancyRegex;
use once_cell::sync::Lazy;

use crate::charclass::CharFlags;
use crate::error::WashError;
use crate::lookalike::LookAlikeCorrector;
use crate::passes::{
    combining, compat, delete, digits, encoding, escapes, hangul, punct, script,
};
use crate::stats::NormStats;
use crate::steps::{NormStep, StepSet};
use crate::NormContext;

// Spaces before a tab or newline are an artifact of token detachment.
static TRAILING_SPACE_RE: Lazy<FancyRegex> =
    Lazy::new(|| FancyRegex::new(r" +(?=[\t\n])").unwrap());

pub struct Normalizer {
    ctx: NormContext,
}

impl Default for Normalizer {
    fn default() -> Self {
        Normalizer::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Normalizer {
            ctx: NormContext::new(),
        }
    }

    pub fn with_context(ctx: NormContext) -> Self {
        Normalizer { ctx }
    }

    pub fn context(&self) -> &NormContext {
        &self.ctx
    }

    fn apply(
        &self,
        step: NormStep,
        s: &mut String,
        active: StepSet,
        stats: &mut NormStats,
        loc: &str,
        f: impl FnOnce(&str) -> String,
    ) {
        if !active.contains(step) {
            return;
        }
        stats.record_call(step);
        let out = f(s);
        if out != *s {
            stats.record_change(step, loc);
            *s = out;
        }
    }

    /// Normalizes one text unit (typically a line). `lang_code` is an ISO
    /// 639-3 code selecting the Arabic-script letter profile; `loc` labels
    /// the unit in statistics examples.
    pub fn normalize_unit(
        &self,
        s: &str,
        active: StepSet,
        lang_code: &str,
        loc: &str,
        stats: &mut NormStats,
    ) -> String {
        stats.record_unit();
        let store = &self.ctx.store;
        let index = &self.ctx.index;
        let lv = index.unit_vector(s);
        let mut out = s.to_string();

        if lv.intersects(CharFlags::ENCODING_REPAIR) {
            self.apply(NormStep::RepairEncodingErrors, &mut out, active, stats, loc, |s| {
                encoding::repair_encoding_errors(store, s)
            });
        }
        if lv.intersects(CharFlags::STRAY_BYTE) {
            self.apply(NormStep::DelSurrogate, &mut out, active, stats, loc, |s| {
                encoding::delete_stray_bytes(s)
            });
        }
        if lv.intersects(CharFlags::DELETABLE_CONTROL) {
            self.apply(NormStep::DelCtrlChar, &mut out, active, stats, loc, |s| {
                delete::delete_control_characters(s)
            });
        }
        if lv.intersects(CharFlags::ZERO_WIDTH) {
            self.apply(NormStep::DelZeroWidth, &mut out, active, stats, loc, |s| {
                delete::delete_zero_width_characters(s)
            });
        }
        if lv.intersects(CharFlags::TATWEEL) {
            self.apply(NormStep::DelTatweel, &mut out, active, stats, loc, |s| {
                delete::delete_arabic_tatweel(s)
            });
        }
        if lv.intersects(CharFlags::ARABIC_DIACRITIC) {
            self.apply(NormStep::DelArabicDiacr, &mut out, active, stats, loc, |s| {
                delete::delete_arabic_diacritics(s)
            });
        }
        if lv.intersects(CharFlags::HEBREW_DIACRITIC) {
            self.apply(NormStep::DelHebrewDiacr, &mut out, active, stats, loc, |s| {
                delete::delete_hebrew_diacritics(s)
            });
        }
        if lv.intersects(CharFlags::CORE_COMPAT) {
            self.apply(NormStep::CoreCompat, &mut out, active, stats, loc, |s| {
                compat::normalize_core_compat_characters(store, s)
            });
        }
        if lv.intersects(CharFlags::ARABIC_PRESENTATION) {
            self.apply(NormStep::PresForm, &mut out, active, stats, loc, |s| {
                compat::normalize_arabic_pres_form_characters(store, s)
            });
        }
        if lv.intersects(CharFlags::LIGATURE) {
            self.apply(NormStep::Ligatures, &mut out, active, stats, loc, |s| {
                compat::normalize_ligatures(s)
            });
        }
        if lv.intersects(CharFlags::SIGN_SYMBOL) {
            self.apply(NormStep::SignsAndSymbols, &mut out, active, stats, loc, |s| {
                compat::normalize_signs_and_symbols(s)
            });
        }
        if lv.intersects(CharFlags::CJK_COMPAT) {
            self.apply(NormStep::Cjk, &mut out, active, stats, loc, |s| {
                compat::normalize_cjk(store, s)
            });
        }
        if lv.intersects(CharFlags::FULL_HALF_WIDTH) {
            self.apply(NormStep::Width, &mut out, active, stats, loc, |s| {
                compat::normalize_half_and_full_width_characters(store, s)
            });
        }
        if lv.intersects(CharFlags::FONT_SMALL_VERTICAL) {
            self.apply(NormStep::Font, &mut out, active, stats, loc, |s| {
                compat::normalize_font_characters(store, s)
            });
            self.apply(NormStep::Small, &mut out, active, stats, loc, |s| {
                compat::normalize_small_characters(store, s)
            });
            self.apply(NormStep::Vertical, &mut out, active, stats, loc, |s| {
                compat::normalize_vertical_characters(store, s)
            });
        }
        if lv.intersects(CharFlags::ENCLOSURE) {
            self.apply(NormStep::Enclosure, &mut out, active, stats, loc, |s| {
                compat::normalize_enclosure_characters(store, s)
            });
        }
        if lv.intersects(CharFlags::HANGUL_VOWEL) {
            self.apply(NormStep::Hangul, &mut out, active, stats, loc, hangul::normalize_hangul);
        }
        if lv.intersects(CharFlags::NUKTA) {
            self.apply(NormStep::RepairCombining, &mut out, active, stats, loc, |s| {
                combining::repair_combining_modifiers_with_nukta(s, lv)
            });
        }
        if lv.intersects(CharFlags::COMPOSE_ANCHOR) && lv.intersects(CharFlags::COMPOSE_DIACRITIC) {
            self.apply(NormStep::CombiningCompose, &mut out, active, stats, loc, |s| {
                combining::apply_combining_modifiers_compose(store, s)
            });
        }
        if lv.intersects(CharFlags::DECOMPOSABLE_COMBINING) {
            self.apply(NormStep::CombiningDecompose, &mut out, active, stats, loc, |s| {
                combining::apply_combining_modifiers_decompose(store, s)
            });
        }
        if lv.intersects(CharFlags::CORE_COMPAT) {
            self.apply(NormStep::Punct, &mut out, active, stats, loc, |s| {
                punct::normalize_punctuation(store, s)
            });
        }
        if lv.intersects(CharFlags::ARABIC_PUNCT) {
            self.apply(NormStep::PunctArabic, &mut out, active, stats, loc, |s| {
                punct::normalize_arabic_punctuation(s)
            });
        }
        if lv.intersects(CharFlags::CJK_PUNCT) {
            self.apply(NormStep::PunctCjk, &mut out, active, stats, loc, |s| {
                punct::normalize_cjk_punctuation(s)
            });
        }
        if lv.intersects(CharFlags::GREEK_PUNCT) {
            self.apply(NormStep::PunctGreek, &mut out, active, stats, loc, |s| {
                punct::normalize_greek_punctuation(s)
            });
        }
        if lv.intersects(CharFlags::MISC_F_PUNCT) {
            self.apply(NormStep::PunctMiscF, &mut out, active, stats, loc, |s| {
                punct::normalize_misc_f_punctuation(s)
            });
        }
        if lv.intersects(CharFlags::DASH) {
            self.apply(NormStep::PunctDash, &mut out, active, stats, loc, |s| {
                punct::normalize_dash_punctuation(s)
            });
        }
        if lv.intersects(CharFlags::NON_ZERO_SPACE) {
            self.apply(NormStep::Space, &mut out, active, stats, loc, |s| {
                punct::normalize_non_zero_spaces(s)
            });
        }
        if lv.intersects(CharFlags::MAPPABLE_DIGIT) {
            self.apply(NormStep::Digit, &mut out, active, stats, loc, |s| {
                digits::map_digits_to_ascii(store, s, lv)
            });
        }
        if lv.intersects(CharFlags::ARABIC) {
            // The letter profile follows the language when one is given;
            // presentation forms may decompose into profile-mappable
            // letters even when no profile character appears directly.
            let profiled =
                lv.intersects(CharFlags::ARABIC_PRESENTATION);
            match lang_code {
                "fas" => {
                    if profiled || lv.intersects(CharFlags::FARSI_PROFILE) {
                        self.apply(NormStep::FarsiChar, &mut out, active, stats, loc, |s| {
                            script::normalize_farsi_characters(s)
                        });
                    }
                }
                "pas" => {
                    if profiled || lv.intersects(CharFlags::PASHTO_PROFILE) {
                        self.apply(NormStep::PashtoChar, &mut out, active, stats, loc, |s| {
                            script::normalize_pashto_characters(s)
                        });
                    }
                }
                _ => {
                    if profiled || lv.intersects(CharFlags::ARABIC_PROFILE) {
                        self.apply(NormStep::ArabicChar, &mut out, active, stats, loc, |s| {
                            script::normalize_arabic_characters(s)
                        });
                    }
                }
            }
        }
        if lv.intersects(CharFlags::GEORGIAN) {
            self.apply(NormStep::GeorgianChar, &mut out, active, stats, loc, |s| {
                script::normalize_georgian_characters(s)
            });
        }
        let script_count = [CharFlags::LATIN, CharFlags::GREEK, CharFlags::CYRILLIC]
            .iter()
            .filter(|f| lv.intersects(**f))
            .count();
        if script_count >= 2 && active.contains(NormStep::LookAlike) {
            stats.record_call(NormStep::LookAlike);
            let corrector = LookAlikeCorrector {
                index,
                table: &self.ctx.look_alikes,
            };
            let corrected = corrector.correct(&out, lv, &mut stats.look_alike);
            if corrected != out {
                stats.record_change(NormStep::LookAlike, loc);
                out = corrected;
            }
        }
        if lv.intersects(CharFlags::AMPERSAND) && lv.intersects(CharFlags::SEMICOLON) {
            self.apply(NormStep::RepairXml, &mut out, active, stats, loc, |s| {
                escapes::repair_xml(s)
            });
        }
        if lv.intersects(CharFlags::PERCENT) {
            self.apply(NormStep::RepairUrlEscapes, &mut out, active, stats, loc, |s| {
                escapes::repair_url_escapes(s)
            });
        }
        if lv.intersects(CharFlags::ARABIC)
            && (lv.intersects(CharFlags::DETACHABLE) || lv.intersects(CharFlags::MAPPABLE_DIGIT))
        {
            self.apply(NormStep::RepairToken, &mut out, active, stats, loc, |s| {
                script::repair_arabic_tokenization(s)
            });
        }

        if out != s {
            stats.record_unit_change();
        }
        match TRAILING_SPACE_RE.replace_all(&out, "") {
            std::borrow::Cow::Borrowed(_) => out,
            std::borrow::Cow::Owned(stripped) => stripped,
        }
    }

    /// Streams `reader` to `writer` line by line. Input need not be valid
    /// UTF-8; undecodable bytes surface as Latin-1 stand-ins for the
    /// encoding-repair and stray-byte passes to deal with. Only trailing
    /// spaces and the line terminator are trimmed; tabs, NBSP, and other
    /// whitespace stay visible to the passes.
    pub fn normalize_lines<R: BufRead, W: Write>(
        &self,
        mut reader: R,
        writer: &mut W,
        active: StepSet,
        lang_code: &str,
        stats: &mut NormStats,
    ) -> Result<(), WashError> {
        let mut buf = Vec::new();
        let mut line_number: u64 = 0;
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_number += 1;
            let line = encoding::decode_lossy(&buf);
            let line = line.trim_end_matches([' ', '\n']);
            let out =
                self.normalize_unit(line, active, lang_code, &line_number.to_string(), stats);
            writeln!(writer, "{out}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steps::{resolve_active_steps, Base};

    fn run(s: &str, base: Base, lang: &str) -> String {
        let norm = Normalizer::new();
        let active = resolve_active_steps(base, &[], &[], &[]).unwrap();
        let mut stats = NormStats::new();
        norm.normalize_unit(s, active, lang, "1", &mut stats)
    }

    #[test]
    fn clean_ascii_is_untouched_and_uncounted() {
        let norm = Normalizer::new();
        let active = resolve_active_steps(Base::All, &[], &[], &[]).unwrap();
        let mut stats = NormStats::new();
        let out = norm.normalize_unit("Plain ASCII text.", active, "", "1", &mut stats);
        assert_eq!(out, "Plain ASCII text.");
        assert_eq!(stats.units, 1);
        assert_eq!(stats.changed_units, 0);
        // No pass should even have been called.
        for step in NormStep::ALL {
            assert!(stats.pass(step).is_none(), "{} was called", step.name());
        }
    }

    #[test]
    fn inactive_steps_leave_their_classes_alone() {
        // Digit mapping is not part of the default set.
        assert_eq!(run("\u{661}\u{662}", Base::Default, ""), "\u{661}\u{662}");
        assert_eq!(run("\u{661}\u{662}", Base::All, ""), "12");
    }

    #[test]
    fn language_selects_arabic_letter_profile() {
        // Arabic yeh stays under the generic profile, flips under Farsi.
        assert_eq!(run("\u{64A}\u{6A9}", Base::All, "fas"), "\u{6CC}\u{6A9}");
        assert_eq!(run("\u{6A9}\u{64A}", Base::All, ""), "\u{643}\u{64A}");
    }

    #[test]
    fn change_is_counted_once_per_unit() {
        let norm = Normalizer::new();
        let active = resolve_active_steps(Base::All, &[], &[], &[]).unwrap();
        let mut stats = NormStats::new();
        norm.normalize_unit("\u{FB01}le \u{661}", active, "", "7", &mut stats);
        assert_eq!(stats.changed_units, 1);
        let lig = stats.pass(NormStep::Ligatures).unwrap();
        assert_eq!(lig.changes, 1);
        assert_eq!(lig.examples, vec!["7"]);
    }

    #[test]
    fn spaces_before_tab_are_stripped() {
        assert_eq!(run("a  \tb", Base::Default, ""), "a\tb");
    }
}
