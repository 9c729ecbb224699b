//! Forward dependency graph synthesized from reverse reason edges.
//!
//! The report only says which modules *caused* a module to be included
//! (its reasons). Inverting those edges once per chunk gives the forward
//! view, for each module the set of modules it pulled in, which both
//! aggregate metrics then traverse. The graph is built wholesale from a
//! chunk snapshot and treated as read-only afterwards.

use im::{HashMap, OrdSet};

use crate::analysis::reasons::{reason_details, reason_module_ids};
use crate::core::index::ReportIndex;
use crate::core::Report;

/// Per-chunk adjacency map: module id to the ordered set of module ids
/// that list it as a reason (its forward-dependency children).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DependentGraph {
    edges: HashMap<String, OrdSet<String>>,
}

impl DependentGraph {
    /// Invert a chunk's reason edges into a forward graph.
    ///
    /// Every module reachable from the chunk is visited exactly once,
    /// guarded by a seen-set, so shared subgraphs and cycles cost nothing
    /// extra and construction always terminates. Rebuilding from the same
    /// snapshot yields an identical graph. An unknown chunk id yields an
    /// empty graph.
    pub fn build(report: &Report, index: &ReportIndex, chunk_id: &str) -> Self {
        let Some(chunk) = index.chunk_by_id(report, chunk_id) else {
            return Self::default();
        };

        let mut edges: HashMap<String, OrdSet<String>> = HashMap::new();
        let mut seen = std::collections::HashSet::new();
        let mut worklist: Vec<String> = Vec::new();

        for module in &chunk.modules {
            let Some(module_id) = module.id.clone() else {
                continue;
            };
            worklist.push(module_id);

            while let Some(current) = worklist.pop() {
                if !seen.insert(current.clone()) {
                    continue;
                }
                // The missing-id flag cannot change which ids come back
                // here, so grouping runs with it off.
                let details = reason_details(report, index, chunk_id, &current, false);
                for reason_id in reason_module_ids(&details) {
                    edges
                        .entry(reason_id.clone())
                        .or_default()
                        .insert(current.clone());
                    if !seen.contains(&reason_id) {
                        worklist.push(reason_id);
                    }
                }
            }
        }

        Self { edges }
    }

    /// Forward children of a module, in lexical order. Unknown ids have no
    /// children.
    pub fn children_of(&self, module_id: &str) -> Vec<String> {
        self.edges
            .get(module_id)
            .map(|children| children.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Ids that have at least one child.
    pub fn parent_ids(&self) -> impl Iterator<Item = &String> {
        self.edges.keys()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(OrdSet::len).sum()
    }
}
