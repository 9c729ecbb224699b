//! Cycle-safe aggregate metrics over the per-chunk dependency graph.
//!
//! Two independent recursive metrics:
//!
//! - **max reasons up**: the largest number of distinct import reasons
//!   found at any point in the upstream (importer) chain reachable from a
//!   module.
//! - **dependent size**: a module's own byte size plus everything it
//!   transitively causes to be included, per the forward graph.
//!
//! Each top-level evaluation owns its seen-set. Revisiting an id inside
//! the same evaluation hits a sentinel instead of recursing: zero further
//! bytes for dependent size, the locally known reason count for width.
//! The truncation is a deliberate under-approximation that guarantees
//! termination on cyclic graphs; it is kept bit-for-bit rather than
//! "fixed" because the width undercount in deeply cyclic graphs is part
//! of the metric's definition.
//!
//! The `*_map` forms compute every module in a chunk by running each as
//! its own top-level query, so the map and single-query forms always
//! agree. Seen-sets are never shared between the two metrics or between
//! top-level evaluations.

use std::collections::HashSet;

use crate::analysis::graph::DependentGraph;
use crate::analysis::reasons::{reason_details, reason_module_ids};
use crate::core::index::ReportIndex;
use crate::core::{Module, Report};

/// Max upstream reason width for one module, `None` when the id is not in
/// the chunk.
pub fn max_reasons_up(
    report: &Report,
    index: &ReportIndex,
    chunk_id: &str,
    module_id: &str,
) -> Option<usize> {
    index.module_by_id(report, chunk_id, module_id)?;
    let mut seen = HashSet::new();
    Some(width_of(report, index, chunk_id, module_id, &mut seen))
}

/// Max upstream reason width for every module in a chunk.
pub fn max_reasons_map(
    report: &Report,
    index: &ReportIndex,
    chunk_id: &str,
) -> im::HashMap<String, usize> {
    let Some(chunk) = index.chunk_by_id(report, chunk_id) else {
        return im::HashMap::new();
    };

    let mut widths = im::HashMap::new();
    for module in &chunk.modules {
        let Some(module_id) = module.id.as_deref() else {
            continue;
        };
        if widths.contains_key(module_id) {
            continue;
        }
        let mut seen = HashSet::new();
        widths.insert(
            module_id.to_string(),
            width_of(report, index, chunk_id, module_id, &mut seen),
        );
    }
    widths
}

fn width_of(
    report: &Report,
    index: &ReportIndex,
    chunk_id: &str,
    module_id: &str,
    seen: &mut HashSet<String>,
) -> usize {
    // Width counts only resolvable reason ids, so grouping runs with the
    // missing-id flag off.
    let details = reason_details(report, index, chunk_id, module_id, false);
    let reason_ids = reason_module_ids(&details);
    if !seen.insert(module_id.to_string()) {
        // Cycle: the local count stands, no further recursion.
        return reason_ids.len();
    }

    let mut width = reason_ids.len();
    for reason_id in &reason_ids {
        width = width.max(width_of(report, index, chunk_id, reason_id, seen));
    }
    width
}

/// Recursive dependent size in bytes for one module, `None` when the id is
/// not in the chunk.
pub fn dependent_size(
    report: &Report,
    index: &ReportIndex,
    graph: &DependentGraph,
    chunk_id: &str,
    module_id: &str,
) -> Option<u64> {
    index.module_by_id(report, chunk_id, module_id)?;
    let mut seen = HashSet::new();
    Some(size_of(report, index, graph, chunk_id, module_id, &mut seen))
}

/// Recursive dependent size for every module in a chunk.
pub fn dependent_size_map(
    report: &Report,
    index: &ReportIndex,
    graph: &DependentGraph,
    chunk_id: &str,
) -> im::HashMap<String, u64> {
    let Some(chunk) = index.chunk_by_id(report, chunk_id) else {
        return im::HashMap::new();
    };

    let mut sizes = im::HashMap::new();
    for module in &chunk.modules {
        let Some(module_id) = module.id.as_deref() else {
            continue;
        };
        if sizes.contains_key(module_id) {
            continue;
        }
        let mut seen = HashSet::new();
        sizes.insert(
            module_id.to_string(),
            size_of(report, index, graph, chunk_id, module_id, &mut seen),
        );
    }
    sizes
}

fn size_of(
    report: &Report,
    index: &ReportIndex,
    graph: &DependentGraph,
    chunk_id: &str,
    module_id: &str,
    seen: &mut HashSet<String>,
) -> u64 {
    if !seen.insert(module_id.to_string()) {
        // Cycle or shared subtree already counted in this evaluation.
        return 0;
    }
    let own = index
        .module_by_id(report, chunk_id, module_id)
        .map(Module::size_bytes)
        .unwrap_or(0);
    own + graph
        .children_of(module_id)
        .iter()
        .map(|child| size_of(report, index, graph, chunk_id, child, seen))
        .sum::<u64>()
}
