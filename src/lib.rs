//! Character-level text normalization and repair for noisy multilingual
//! corpora.
//!
//! The library classifies every character of a text unit into trigger
//! classes, then runs a configurable sequence of normalization passes:
//! encoding repair, deletions, Unicode compatibility mappings, Hangul and
//! combining-mark normalization, punctuation and digit mapping, script
//! letter profiles, cross-script look-alike correction, and escape repairs.
//!
//! ```no_run
//! use charwash::{Base, Normalizer, NormStats, resolve_active_steps};
//!
//! let normalizer = Normalizer::new();
//! let active = resolve_active_steps(Base::Default, &[], &[], &[])?;
//! let mut stats = NormStats::new();
//! let clean = normalizer.normalize_unit("text", active, "", "1", &mut stats);
//! # Ok::<(), charwash::WashError>(())
//! ```

use std::path::Path;

pub mod charclass;
pub mod error;
pub mod lookalike;
pub mod mapping;
pub mod passes;
pub mod pipeline;
pub mod stats;
pub mod steps;

pub use charclass::{CharClassIndex, CharFlags};
pub use error::WashError;
pub use lookalike::{LookAlikeTable, Script};
pub use mapping::{MappingStore, TableKind};
pub use passes::encoding::decode_lossy;
pub use pipeline::Normalizer;
pub use stats::{LookAlikeStats, NormStats, PassStats};
pub use steps::{resolve_active_steps, Base, NormStep, StepSet};

/// Loaded normalization resources: the character-class index, the mapping
/// tables, and the look-alike table.
pub struct NormContext {
    pub index: CharClassIndex,
    pub store: MappingStore,
    pub look_alikes: LookAlikeTable,
}

impl Default for NormContext {
    fn default() -> Self {
        NormContext::new()
    }
}

impl NormContext {
    /// Builds the context from the embedded data tables.
    pub fn new() -> Self {
        let mut index = CharClassIndex::new();
        let store = MappingStore::builtin(&mut index);
        let look_alikes = LookAlikeTable::builtin(&index);
        NormContext {
            index,
            store,
            look_alikes,
        }
    }

    /// Builds the context from TSV tables in `dir`, falling back to the
    /// embedded copy of any table that fails to load.
    pub fn from_data_dir(dir: &Path) -> Self {
        let mut index = CharClassIndex::new();
        let store = MappingStore::from_dir(dir, &mut index);
        let look_alikes = LookAlikeTable::from_dir(dir, &index);
        NormContext {
            index,
            store,
            look_alikes,
        }
    }
}
