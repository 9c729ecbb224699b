//! Engine configuration: query flags and duplicate-detection rules.
//!
//! Flags are plain values threaded into every query call. Derivations never
//! read ambient globals, so the same analyzer answers queries for any flag
//! combination and stays trivially testable.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Toggles read by the analysis queries. All default to off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisFlags {
    /// Keep reason groups whose importing module id is absent, in addition
    /// to the resolvable ones.
    pub include_missing_module_id: bool,
    /// Sort module search results (and children listings) by recursive
    /// dependent size, largest first.
    pub sort_by_dependent_size: bool,
    /// Keep only modules whose upstream reason width is at most
    /// [`LOW_FAN_IN_THRESHOLD`].
    pub filter_low_fan_in: bool,
    /// Order duplicate groups by duplicated bytes instead of occurrence
    /// count.
    pub duplicates_sort_by_bytes: bool,
}

/// Fan-in width at or below which a module counts as "low fan-in" for the
/// search filter.
pub const LOW_FAN_IN_THRESHOLD: usize = 2;

impl AnalysisFlags {
    /// Flags with a single toggle enabled, for terse call sites.
    pub fn with_missing_module_id() -> Self {
        Self {
            include_missing_module_id: true,
            ..Self::default()
        }
    }

    pub fn with_sort_by_dependent_size() -> Self {
        Self {
            sort_by_dependent_size: true,
            ..Self::default()
        }
    }

    pub fn with_filter_low_fan_in() -> Self {
        Self {
            filter_low_fan_in: true,
            ..Self::default()
        }
    }
}

static DEFAULT_STRIP_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r".*workspace/web/").unwrap());

/// Inclusion and normalization rules for the duplicate detector.
///
/// A module participates when its identifier ends with `suffix`; its
/// identity key is the identifier with `strip_prefix` removed, so the same
/// file bundled into several chunks collapses onto one key.
#[derive(Debug, Clone)]
pub struct DuplicateConfig {
    /// Pattern stripped from the front of identifiers to form the key.
    pub strip_prefix: Regex,
    /// Required identifier suffix; everything else is ignored.
    pub suffix: String,
}

impl Default for DuplicateConfig {
    fn default() -> Self {
        Self {
            strip_prefix: DEFAULT_STRIP_PREFIX.clone(),
            suffix: ".js".to_string(),
        }
    }
}

impl DuplicateConfig {
    /// Normalize an identifier to its duplicate-detection key, or `None`
    /// when the identifier does not match the inclusion rule.
    pub fn key_for(&self, identifier: &str) -> Option<String> {
        let key = self.strip_prefix.replace_all(identifier, "").into_owned();
        key.ends_with(&self.suffix).then_some(key)
    }
}
