//! Grouping of raw reason records into per-import-site details.
//!
//! A module's raw reasons are an unstructured list of edge witnesses; the
//! same import site (`resolved_module` text) usually appears several times,
//! sometimes with the importer's module id and sometimes without. This pass
//! collapses them into one [`ReasonDetails`] per distinct resolved-module
//! text, in first-seen order, and applies the missing-id filter policy.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::index::ReportIndex;
use crate::core::{Reason, Report};

/// All raw reasons that share one resolved-module text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasonDetails {
    /// The import-site description the group was keyed on.
    pub resolved_module: String,
    /// Representative importer id: the first present `module_id` among the
    /// grouped raw reasons, absent when none of them carry one.
    pub module_id: Option<String>,
    /// The raw reasons in the group, in report order.
    pub reasons: Vec<Reason>,
}

/// Group a module's raw reasons by resolved-module text.
///
/// Groups appear in first-seen order of `resolved_module`; raw reasons
/// without a `resolved_module` are skipped. A group is kept when its
/// representative id resolves to a module in the same chunk, or, with
/// `include_missing` set, when it has no representative id at all.
/// A present id that does not resolve is dropped regardless of the flag.
///
/// Depends only on the module's own reasons, the flag, and chunk
/// membership; an unknown chunk or module id yields an empty list.
pub fn reason_details(
    report: &Report,
    index: &ReportIndex,
    chunk_id: &str,
    module_id: &str,
    include_missing: bool,
) -> Vec<ReasonDetails> {
    let Some(module) = index.module_by_id(report, chunk_id, module_id) else {
        return Vec::new();
    };

    let mut groups: Vec<ReasonDetails> = Vec::new();
    let mut group_pos: HashMap<&str, usize> = HashMap::new();

    for raw in &module.reasons {
        let Some(resolved_module) = raw.resolved_module.as_deref() else {
            continue;
        };
        let pos = *group_pos.entry(resolved_module).or_insert_with(|| {
            groups.push(ReasonDetails {
                resolved_module: resolved_module.to_string(),
                module_id: None,
                reasons: Vec::new(),
            });
            groups.len() - 1
        });
        let group = &mut groups[pos];
        if group.module_id.is_none() {
            group.module_id = raw.module_id.clone();
        }
        group.reasons.push(raw.clone());
    }

    groups
        .into_iter()
        .filter(|group| match group.module_id.as_deref() {
            Some(id) => index.module_by_id(report, chunk_id, id).is_some(),
            None => include_missing,
        })
        .collect()
}

/// Distinct representative module ids across a details list, in group
/// order. Groups without an id contribute nothing, so the result is the
/// same whichever flag value produced the details.
pub fn reason_module_ids(details: &[ReasonDetails]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    details
        .iter()
        .filter_map(|group| group.module_id.clone())
        .filter(|id| seen.insert(id.clone()))
        .collect()
}
