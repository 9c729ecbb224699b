//! Cross-chunk duplicate module detection and byte accounting.
//!
//! Scans every chunk in the report, normalizes matching module identifiers
//! to a canonical key ([`DuplicateConfig`]), and accumulates how many
//! chunks each key lands in. A key present in N chunks wastes
//! `size * (N - 1)` bytes. Size oddities (a later occurrence reporting a
//! different size, a fractional size) are warnings, not failures; the
//! first-seen size stays authoritative.

use std::collections::HashMap;

use crate::config::DuplicateConfig;
use crate::core::Report;
use crate::errors::{Diagnostic, DiagnosticKind};

/// Placeholder chunk id recorded for occurrences inside id-less chunks.
pub const UNKNOWN_CHUNK: &str = "<unknown chunk>";

/// One duplicated module identity across chunks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    /// Normalized identifier key.
    pub key: String,
    /// Ids of every chunk containing the module, in report order.
    pub chunk_ids: Vec<String>,
    /// First-seen byte size for the key, zero when never reported.
    pub size: u64,
    /// `size * (occurrences - 1)`.
    pub duplicate_bytes: u64,
}

impl DuplicateGroup {
    pub fn occurrences(&self) -> usize {
        self.chunk_ids.len()
    }
}

/// Full duplicate-detection output for a report snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DuplicateReport {
    /// Groups in the requested sort order.
    pub groups: Vec<DuplicateGroup>,
    /// Sum of `duplicate_bytes` over all keys.
    pub total_duplicated_bytes: u64,
    /// Sum of `size * occurrences` over all keys.
    pub total_bytes: u64,
    /// Structural anomalies found while scanning.
    pub diagnostics: Vec<Diagnostic>,
}

/// Scan the whole report for duplicated module identities.
///
/// Groups are sorted by occurrence count descending, or by duplicated
/// bytes descending when `sort_by_bytes` is set; ties keep first-seen key
/// order (stable sort).
pub fn detect_duplicates(
    report: &Report,
    config: &DuplicateConfig,
    sort_by_bytes: bool,
) -> DuplicateReport {
    let mut keys: Vec<String> = Vec::new();
    let mut chunk_ids_by_key: HashMap<String, Vec<String>> = HashMap::new();
    let mut size_by_key: HashMap<String, f64> = HashMap::new();
    let mut diagnostics = Vec::new();

    for chunk in &report.chunks {
        let chunk_id = chunk.id.as_deref().unwrap_or(UNKNOWN_CHUNK);
        for module in &chunk.modules {
            let Some(identifier) = module.identifier.as_deref() else {
                continue;
            };
            let Some(key) = config.key_for(identifier) else {
                continue;
            };
            let occurrences = chunk_ids_by_key.entry(key.clone()).or_insert_with(|| {
                keys.push(key.clone());
                Vec::new()
            });
            occurrences.push(chunk_id.to_string());

            let first_seen = size_by_key.get(&key).copied();
            match (first_seen, module.size) {
                (Some(first), Some(size)) if size != first => {
                    log::warn!("duplicate size mismatch for {key}: {size} != {first}");
                    diagnostics.push(Diagnostic {
                        kind: DiagnosticKind::SizeMismatch,
                        key: key.clone(),
                        detail: format!("saw {size} after {first}"),
                    });
                }
                (Some(_), _) => {}
                (None, Some(size)) => {
                    if size.fract() != 0.0 {
                        log::warn!("fractional module size for {key}: {size}");
                        diagnostics.push(Diagnostic {
                            kind: DiagnosticKind::FractionalSize,
                            key: key.clone(),
                            detail: format!("{size}"),
                        });
                    }
                    size_by_key.insert(key.clone(), size);
                }
                (None, None) => {}
            }
        }
    }

    let mut groups: Vec<DuplicateGroup> = keys
        .into_iter()
        .map(|key| {
            let chunk_ids = chunk_ids_by_key.remove(&key).unwrap_or_default();
            let size = size_by_key.get(&key).copied().unwrap_or(0.0).round() as u64;
            let duplicate_bytes = size * (chunk_ids.len().saturating_sub(1)) as u64;
            DuplicateGroup {
                key,
                chunk_ids,
                size,
                duplicate_bytes,
            }
        })
        .collect();

    let total_duplicated_bytes = groups.iter().map(|group| group.duplicate_bytes).sum();
    let total_bytes = groups
        .iter()
        .map(|group| group.size * group.occurrences() as u64)
        .sum();

    if sort_by_bytes {
        groups.sort_by(|a, b| b.duplicate_bytes.cmp(&a.duplicate_bytes));
    } else {
        groups.sort_by(|a, b| b.occurrences().cmp(&a.occurrences()));
    }

    DuplicateReport {
        groups,
        total_duplicated_bytes,
        total_bytes,
        diagnostics,
    }
}
