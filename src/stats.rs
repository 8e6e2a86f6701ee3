//! Per-run normalization statistics.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::Serialize;

use crate::steps::NormStep;

const MAX_EXAMPLES: usize = 20;

#[derive(Debug, Default, Clone, Serialize)]
pub struct PassStats {
    /// Times the pass ran (active and gated in).
    pub calls: u64,
    /// Times the pass changed its input.
    pub changes: u64,
    /// Locations (line numbers) of the first changes, capped.
    pub examples: Vec<String>,
}

/// Outcome tally of the look-alike pass, per token.
#[derive(Debug, Default, Clone, Serialize)]
pub struct LookAlikeStats {
    pub to_latin: u64,
    pub to_greek: u64,
    pub to_cyrillic: u64,
    pub split: u64,
    pub unchanged: u64,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct NormStats {
    pub units: u64,
    /// Units changed by at least one pass.
    pub changed_units: u64,
    passes: BTreeMap<&'static str, PassStats>,
    pub look_alike: LookAlikeStats,
}

impl NormStats {
    pub fn new() -> Self {
        NormStats::default()
    }

    pub fn record_unit(&mut self) {
        self.units += 1;
    }

    pub fn record_unit_change(&mut self) {
        self.changed_units += 1;
    }

    pub fn record_call(&mut self, step: NormStep) {
        self.passes.entry(step.name()).or_default().calls += 1;
    }

    pub fn record_change(&mut self, step: NormStep, loc: &str) {
        let entry = self.passes.entry(step.name()).or_default();
        entry.changes += 1;
        if !loc.is_empty() && entry.examples.len() < MAX_EXAMPLES {
            entry.examples.push(loc.to_string());
        }
    }

    pub fn pass(&self, step: NormStep) -> Option<&PassStats> {
        self.passes.get(step.name())
    }

    /// Human-readable report, one line per pass that changed anything.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "processed {} unit(s), {} changed",
            self.units, self.changed_units
        );
        for step in NormStep::ALL {
            if let Some(p) = self.passes.get(step.name()) {
                if p.changes > 0 {
                    let mut line = format!(
                        "  {}: {} change(s) in {} call(s)",
                        step.name(),
                        p.changes,
                        p.calls
                    );
                    if !p.examples.is_empty() {
                        let _ = write!(line, " (e.g. line {})", p.examples.join(", "));
                    }
                    let _ = writeln!(out, "{line}");
                }
            }
        }
        let la = &self.look_alike;
        if la.to_latin + la.to_greek + la.to_cyrillic + la.split > 0 {
            let _ = writeln!(
                out,
                "  look-alike tokens: {} to Latin, {} to Cyrillic, {} to Greek, {} split, {} unchanged",
                la.to_latin, la.to_cyrillic, la.to_greek, la.split, la.unchanged
            );
        }
        out
    }
}
