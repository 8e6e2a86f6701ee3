//! Normalization step names and the step selection policy.

use log::warn;

use crate::error::WashError;

/// One normalization/cleaning pass. The discriminant doubles as the bit
/// position in a [`StepSet`] and as the pipeline execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum NormStep {
    RepairEncodingErrors = 0,
    DelSurrogate,
    DelCtrlChar,
    DelZeroWidth,
    DelTatweel,
    DelArabicDiacr,
    DelHebrewDiacr,
    CoreCompat,
    PresForm,
    Ligatures,
    SignsAndSymbols,
    Cjk,
    Width,
    Font,
    Small,
    Vertical,
    Enclosure,
    Hangul,
    RepairCombining,
    CombiningCompose,
    CombiningDecompose,
    Punct,
    PunctArabic,
    PunctCjk,
    PunctGreek,
    PunctMiscF,
    PunctDash,
    Space,
    Digit,
    ArabicChar,
    FarsiChar,
    PashtoChar,
    GeorgianChar,
    LookAlike,
    RepairXml,
    RepairUrlEscapes,
    RepairToken,
}

impl NormStep {
    pub const ALL: [NormStep; 37] = [
        NormStep::RepairEncodingErrors,
        NormStep::DelSurrogate,
        NormStep::DelCtrlChar,
        NormStep::DelZeroWidth,
        NormStep::DelTatweel,
        NormStep::DelArabicDiacr,
        NormStep::DelHebrewDiacr,
        NormStep::CoreCompat,
        NormStep::PresForm,
        NormStep::Ligatures,
        NormStep::SignsAndSymbols,
        NormStep::Cjk,
        NormStep::Width,
        NormStep::Font,
        NormStep::Small,
        NormStep::Vertical,
        NormStep::Enclosure,
        NormStep::Hangul,
        NormStep::RepairCombining,
        NormStep::CombiningCompose,
        NormStep::CombiningDecompose,
        NormStep::Punct,
        NormStep::PunctArabic,
        NormStep::PunctCjk,
        NormStep::PunctGreek,
        NormStep::PunctMiscF,
        NormStep::PunctDash,
        NormStep::Space,
        NormStep::Digit,
        NormStep::ArabicChar,
        NormStep::FarsiChar,
        NormStep::PashtoChar,
        NormStep::GeorgianChar,
        NormStep::LookAlike,
        NormStep::RepairXml,
        NormStep::RepairUrlEscapes,
        NormStep::RepairToken,
    ];

    /// Conservative default: encoding and structural repairs, no
    /// orthography-changing substitutions.
    pub const DEFAULT: [NormStep; 12] = [
        NormStep::RepairEncodingErrors,
        NormStep::DelSurrogate,
        NormStep::DelCtrlChar,
        NormStep::DelTatweel,
        NormStep::CoreCompat,
        NormStep::PresForm,
        NormStep::Hangul,
        NormStep::RepairCombining,
        NormStep::CombiningCompose,
        NormStep::CombiningDecompose,
        NormStep::RepairXml,
        NormStep::RepairUrlEscapes,
    ];

    pub fn name(self) -> &'static str {
        match self {
            NormStep::RepairEncodingErrors => "repair-encoding-errors",
            NormStep::DelSurrogate => "del-surrogate",
            NormStep::DelCtrlChar => "del-ctrl-char",
            NormStep::DelZeroWidth => "del-zero-width",
            NormStep::DelTatweel => "del-tatweel",
            NormStep::DelArabicDiacr => "del-arabic-diacr",
            NormStep::DelHebrewDiacr => "del-hebrew-diacr",
            NormStep::CoreCompat => "core-compat",
            NormStep::PresForm => "pres-form",
            NormStep::Ligatures => "ligatures",
            NormStep::SignsAndSymbols => "signs-and-symbols",
            NormStep::Cjk => "cjk",
            NormStep::Width => "width",
            NormStep::Font => "font",
            NormStep::Small => "small",
            NormStep::Vertical => "vertical",
            NormStep::Enclosure => "enclosure",
            NormStep::Hangul => "hangul",
            NormStep::RepairCombining => "repair-combining",
            NormStep::CombiningCompose => "combining-compose",
            NormStep::CombiningDecompose => "combining-decompose",
            NormStep::Punct => "punct",
            NormStep::PunctArabic => "punct-arabic",
            NormStep::PunctCjk => "punct-cjk",
            NormStep::PunctGreek => "punct-greek",
            NormStep::PunctMiscF => "punct-misc-f",
            NormStep::PunctDash => "punct-dash",
            NormStep::Space => "space",
            NormStep::Digit => "digit",
            NormStep::ArabicChar => "arabic-char",
            NormStep::FarsiChar => "farsi-char",
            NormStep::PashtoChar => "pashto-char",
            NormStep::GeorgianChar => "georgian-char",
            NormStep::LookAlike => "look-alike",
            NormStep::RepairXml => "repair-xml",
            NormStep::RepairUrlEscapes => "repair-url-escapes",
            NormStep::RepairToken => "repair-token",
        }
    }

    pub fn from_name(name: &str) -> Option<NormStep> {
        NormStep::ALL.iter().copied().find(|s| s.name() == name)
    }
}

/// Immutable set of active steps, resolved once before any text flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepSet(u64);

impl StepSet {
    pub const EMPTY: StepSet = StepSet(0);

    pub fn contains(self, step: NormStep) -> bool {
        self.0 & (1 << step as u8) != 0
    }

    fn insert(&mut self, step: NormStep) {
        self.0 |= 1 << step as u8;
    }

    fn remove(&mut self, step: NormStep) {
        self.0 &= !(1 << step as u8);
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = NormStep> {
        NormStep::ALL.into_iter().filter(move |s| self.contains(*s))
    }
}

impl FromIterator<NormStep> for StepSet {
    fn from_iter<I: IntoIterator<Item = NormStep>>(iter: I) -> Self {
        let mut set = StepSet::EMPTY;
        for step in iter {
            set.insert(step);
        }
        set
    }
}

/// Base step selection before skip/add adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Base {
    None,
    #[default]
    Default,
    All,
}

fn parse_names(names: &[String]) -> Result<Vec<NormStep>, Vec<String>> {
    let mut steps = Vec::with_capacity(names.len());
    let mut unknown = Vec::new();
    for name in names {
        match NormStep::from_name(name) {
            Some(s) => steps.push(s),
            None => unknown.push(name.clone()),
        }
    }
    if unknown.is_empty() { Ok(steps) } else { Err(unknown) }
}

/// Resolves the active step set from a base selection plus skip/add lists.
/// `only` is shorthand for an empty base plus an add list. Unknown step names
/// are a configuration error naming every offender; a step in both skip and
/// add draws one warning and stays active.
pub fn resolve_active_steps(
    base: Base,
    skip: &[String],
    add: &[String],
    only: &[String],
) -> Result<StepSet, WashError> {
    let (base, add_names) = if only.is_empty() {
        (base, add.to_vec())
    } else {
        let mut add_names = add.to_vec();
        add_names.extend_from_slice(only);
        (Base::None, add_names)
    };
    let mut unknown = Vec::new();
    let skip_steps = parse_names(skip).unwrap_or_else(|u| {
        unknown.extend(u);
        Vec::new()
    });
    let add_steps = parse_names(&add_names).unwrap_or_else(|u| {
        unknown.extend(u);
        Vec::new()
    });
    if !unknown.is_empty() {
        let known = NormStep::ALL.map(NormStep::name).join(", ");
        return Err(WashError::Config(format!(
            "unknown normalization step(s): {}; known steps: {known}",
            unknown.join(", ")
        )));
    }
    let conflicts: Vec<&str> = skip_steps
        .iter()
        .filter(|s| add_steps.contains(s))
        .map(|s| s.name())
        .collect();
    if !conflicts.is_empty() {
        warn!(
            "step(s) listed under both skip and add: {}; keeping them active",
            conflicts.join(", ")
        );
    }
    let mut set: StepSet = match base {
        Base::None => StepSet::EMPTY,
        Base::Default => NormStep::DEFAULT.into_iter().collect(),
        Base::All => NormStep::ALL.into_iter().collect(),
    };
    for step in skip_steps {
        set.remove(step);
    }
    for step in add_steps {
        set.insert(step);
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn default_base_is_twelve_steps() {
        let set = resolve_active_steps(Base::Default, &[], &[], &[]).unwrap();
        assert_eq!(set.len(), 12);
        assert!(set.contains(NormStep::RepairEncodingErrors));
        assert!(set.contains(NormStep::Hangul));
        assert!(!set.contains(NormStep::Digit));
        assert!(!set.contains(NormStep::LookAlike));
    }

    #[test]
    fn all_base_covers_everything() {
        let set = resolve_active_steps(Base::All, &[], &[], &[]).unwrap();
        assert_eq!(set.len(), 37);
    }

    #[test]
    fn skip_and_add_adjust_base() {
        let set =
            resolve_active_steps(Base::Default, &names(&["hangul"]), &names(&["digit"]), &[])
                .unwrap();
        assert!(!set.contains(NormStep::Hangul));
        assert!(set.contains(NormStep::Digit));
        assert_eq!(set.len(), 12);
    }

    #[test]
    fn only_overrides_base() {
        let set = resolve_active_steps(Base::Default, &[], &[], &names(&["width", "digit"]))
            .unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains(NormStep::Width));
        assert!(set.contains(NormStep::Digit));
    }

    #[test]
    fn add_wins_over_skip() {
        let set = resolve_active_steps(
            Base::Default,
            &names(&["digit", "hangul"]),
            &names(&["digit"]),
            &[],
        )
        .unwrap();
        assert!(set.contains(NormStep::Digit));
        assert!(!set.contains(NormStep::Hangul));
    }

    #[test]
    fn unknown_names_are_config_errors() {
        let err =
            resolve_active_steps(Base::Default, &names(&["no-such-step"]), &[], &[]).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("no-such-step"));
        assert!(msg.contains("repair-encoding-errors"));
    }

    #[test]
    fn step_names_round_trip() {
        for step in NormStep::ALL {
            assert_eq!(NormStep::from_name(step.name()), Some(step));
        }
        assert_eq!(NormStep::from_name("bogus"), None);
    }
}
