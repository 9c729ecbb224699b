//! Report Analysis Module
//!
//! This module provides the derivation passes over a report snapshot:
//! - Reason grouping into per-import-site details
//! - Forward dependency graph construction from reverse reason edges
//! - Cycle-safe aggregate metrics (reason width, dependent size)
//! - Substring search over chunk and module indices
//! - Cross-chunk duplicate detection with byte accounting
//!
//! Every pass is a pure function of `(report, parameters, flags)`.
//! [`ReportAnalyzer`] layers per-snapshot memoization on top and is the
//! query surface callers are expected to use.

pub mod duplicates;
pub mod graph;
pub mod metrics;
pub mod reasons;
pub mod search;

pub use duplicates::{detect_duplicates, DuplicateGroup, DuplicateReport, UNKNOWN_CHUNK};
pub use graph::DependentGraph;
pub use metrics::{dependent_size, dependent_size_map, max_reasons_map, max_reasons_up};
pub use reasons::{reason_details, reason_module_ids, ReasonDetails};
pub use search::SearchIndex;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::config::{AnalysisFlags, DuplicateConfig, LOW_FAN_IN_THRESHOLD};
use crate::core::index::ReportIndex;
use crate::core::{Chunk, Module, Report};

/// Memoizing query surface over one immutable report snapshot.
///
/// Derived artifacts (the per-chunk dependent graph, both metric maps,
/// the search indices, grouped reason details) are computed lazily on
/// first use and cached for the analyzer's lifetime. The model is
/// single-threaded and synchronous, so caches sit behind `RefCell` with
/// no locking. Replacing the report means building a new analyzer;
/// that is the wholesale cache invalidation the snapshot lifecycle calls
/// for. Flags arrive per call and are part of a cache key only where the
/// derivation actually reads them.
pub struct ReportAnalyzer {
    report: Report,
    index: ReportIndex,
    graphs: RefCell<HashMap<String, Rc<DependentGraph>>>,
    reason_cache: RefCell<HashMap<(String, String, bool), Rc<Vec<ReasonDetails>>>>,
    width_maps: RefCell<HashMap<String, im::HashMap<String, usize>>>,
    size_maps: RefCell<HashMap<String, im::HashMap<String, u64>>>,
    module_search: RefCell<HashMap<String, Rc<SearchIndex>>>,
    chunk_search: RefCell<Option<Rc<SearchIndex>>>,
}

impl ReportAnalyzer {
    /// Take ownership of a report snapshot and build its lookup index.
    pub fn new(report: Report) -> Self {
        let index = ReportIndex::build(&report);
        Self {
            report,
            index,
            graphs: RefCell::new(HashMap::new()),
            reason_cache: RefCell::new(HashMap::new()),
            width_maps: RefCell::new(HashMap::new()),
            size_maps: RefCell::new(HashMap::new()),
            module_search: RefCell::new(HashMap::new()),
            chunk_search: RefCell::new(None),
        }
    }

    pub fn report(&self) -> &Report {
        &self.report
    }

    /// Raw chunk lookup.
    pub fn chunk(&self, chunk_id: &str) -> Option<&Chunk> {
        self.index.chunk_by_id(&self.report, chunk_id)
    }

    /// Raw module lookup.
    pub fn module(&self, chunk_id: &str, module_id: &str) -> Option<&Module> {
        self.index.module_by_id(&self.report, chunk_id, module_id)
    }

    /// Initial chunks, largest first.
    pub fn top_chunks(&self) -> Vec<&Chunk> {
        self.index.top_chunks(&self.report)
    }

    /// Default chunk selection: the largest initial chunk's id.
    pub fn default_chunk_id(&self) -> Option<String> {
        self.index.default_chunk_id(&self.report)
    }

    /// Chunk ids matching a free-text query.
    pub fn search_chunks(&self, query: &str) -> Vec<String> {
        self.chunk_search_index().search(query)
    }

    /// Module ids in a chunk matching a free-text query, with the flag
    /// pipeline applied in fixed order: dependent-size sort first, then
    /// the low fan-in filter.
    pub fn search_modules(&self, chunk_id: &str, query: &str, flags: AnalysisFlags) -> Vec<String> {
        let mut found = self.module_search_index(chunk_id).search(query);

        if flags.sort_by_dependent_size {
            let sizes = self.dependent_size_map(chunk_id);
            found.sort_by(|a, b| {
                let size_of = |id: &str| sizes.get(id).copied().unwrap_or(0);
                size_of(b).cmp(&size_of(a))
            });
        }
        if flags.filter_low_fan_in {
            let widths = self.max_reasons_map(chunk_id);
            found.retain(|id| {
                widths
                    .get(id)
                    .is_some_and(|width| *width <= LOW_FAN_IN_THRESHOLD)
            });
        }
        found
    }

    /// Grouped reason details for a module, memoized per
    /// `(chunk, module, missing-id flag)`.
    pub fn reason_details(
        &self,
        chunk_id: &str,
        module_id: &str,
        flags: AnalysisFlags,
    ) -> Rc<Vec<ReasonDetails>> {
        let key = (
            chunk_id.to_string(),
            module_id.to_string(),
            flags.include_missing_module_id,
        );
        if let Some(details) = self.reason_cache.borrow().get(&key) {
            return Rc::clone(details);
        }
        let details = Rc::new(reason_details(
            &self.report,
            &self.index,
            chunk_id,
            module_id,
            flags.include_missing_module_id,
        ));
        self.reason_cache
            .borrow_mut()
            .insert(key, Rc::clone(&details));
        details
    }

    /// Forward-graph children of a module, sorted by dependent size
    /// descending when the sort flag is set.
    pub fn children_of(&self, chunk_id: &str, module_id: &str, flags: AnalysisFlags) -> Vec<String> {
        let mut children = self.graph(chunk_id).children_of(module_id);
        if flags.sort_by_dependent_size {
            let sizes = self.dependent_size_map(chunk_id);
            children.sort_by(|a, b| {
                let size_of = |id: &str| sizes.get(id).copied().unwrap_or(0);
                size_of(b).cmp(&size_of(a))
            });
        }
        children
    }

    /// Max upstream reason width, `None` for an id not in the chunk.
    pub fn max_reasons_up(&self, chunk_id: &str, module_id: &str) -> Option<usize> {
        self.max_reasons_map(chunk_id).get(module_id).copied()
    }

    /// Recursive dependent size in bytes, `None` for an id not in the
    /// chunk.
    pub fn dependent_size(&self, chunk_id: &str, module_id: &str) -> Option<u64> {
        self.dependent_size_map(chunk_id).get(module_id).copied()
    }

    /// Duplicate module groups across all chunks.
    pub fn duplicate_modules(
        &self,
        config: &DuplicateConfig,
        flags: AnalysisFlags,
    ) -> DuplicateReport {
        detect_duplicates(&self.report, config, flags.duplicates_sort_by_bytes)
    }

    fn graph(&self, chunk_id: &str) -> Rc<DependentGraph> {
        if let Some(graph) = self.graphs.borrow().get(chunk_id) {
            return Rc::clone(graph);
        }
        let graph = Rc::new(DependentGraph::build(&self.report, &self.index, chunk_id));
        self.graphs
            .borrow_mut()
            .insert(chunk_id.to_string(), Rc::clone(&graph));
        graph
    }

    fn max_reasons_map(&self, chunk_id: &str) -> im::HashMap<String, usize> {
        if let Some(widths) = self.width_maps.borrow().get(chunk_id) {
            return widths.clone();
        }
        let widths = max_reasons_map(&self.report, &self.index, chunk_id);
        self.width_maps
            .borrow_mut()
            .insert(chunk_id.to_string(), widths.clone());
        widths
    }

    fn dependent_size_map(&self, chunk_id: &str) -> im::HashMap<String, u64> {
        if let Some(sizes) = self.size_maps.borrow().get(chunk_id) {
            return sizes.clone();
        }
        let graph = self.graph(chunk_id);
        let sizes = dependent_size_map(&self.report, &self.index, &graph, chunk_id);
        self.size_maps
            .borrow_mut()
            .insert(chunk_id.to_string(), sizes.clone());
        sizes
    }

    fn chunk_search_index(&self) -> Rc<SearchIndex> {
        if let Some(search) = self.chunk_search.borrow().as_ref() {
            return Rc::clone(search);
        }
        let search = Rc::new(SearchIndex::for_chunks(&self.report));
        *self.chunk_search.borrow_mut() = Some(Rc::clone(&search));
        search
    }

    fn module_search_index(&self, chunk_id: &str) -> Rc<SearchIndex> {
        if let Some(search) = self.module_search.borrow().get(chunk_id) {
            return Rc::clone(search);
        }
        let search = Rc::new(SearchIndex::for_modules(&self.report, &self.index, chunk_id));
        self.module_search
            .borrow_mut()
            .insert(chunk_id.to_string(), Rc::clone(&search));
        search
    }
}
