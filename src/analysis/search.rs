//! Substring search over chunk and module name indices.
//!
//! Both chunk and module search share one mechanism: an ordered index of
//! `(normalized_key, value_id)` pairs matched by case-insensitive
//! substring containment. Results come back deduplicated in first-match
//! order; the composable post-filters (dependent-size sort, low fan-in
//! filter) live in the analyzer facade, which owns the metric maps they
//! read.

use crate::core::index::ReportIndex;
use crate::core::Report;

#[derive(Debug, Clone, PartialEq, Eq)]
struct SearchEntry {
    key: String,
    value_id: String,
}

/// Ordered lowercase search index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchIndex {
    entries: Vec<SearchEntry>,
}

impl SearchIndex {
    /// Index over all chunk ids in report order.
    pub fn for_chunks(report: &Report) -> Self {
        let entries = report
            .chunks
            .iter()
            .filter_map(|chunk| chunk.id.as_deref())
            .map(|id| SearchEntry {
                key: id.to_lowercase(),
                value_id: id.to_string(),
            })
            .collect();
        Self { entries }
    }

    /// Index over one chunk's modules in chunk order, keyed by display
    /// label. Modules without an id are not indexed; an unknown chunk
    /// yields an empty index.
    pub fn for_modules(report: &Report, index: &ReportIndex, chunk_id: &str) -> Self {
        let Some(chunk) = index.chunk_by_id(report, chunk_id) else {
            return Self::default();
        };
        let entries = chunk
            .modules
            .iter()
            .filter_map(|module| {
                module.id.as_deref().map(|id| SearchEntry {
                    key: module.display_label().to_lowercase(),
                    value_id: id.to_string(),
                })
            })
            .collect();
        Self { entries }
    }

    /// Case-insensitive substring match. The empty query matches every
    /// entry; results are deduplicated in first-match order.
    pub fn search(&self, query: &str) -> Vec<String> {
        let needle = query.to_lowercase();
        let mut seen = std::collections::HashSet::new();
        self.entries
            .iter()
            .filter(|entry| entry.key.contains(&needle))
            .filter(|entry| seen.insert(entry.value_id.clone()))
            .map(|entry| entry.value_id.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::{chunk, module, named_module, report};
    use pretty_assertions::assert_eq;

    fn fixture() -> (Report, ReportIndex) {
        let report = report(vec![
            chunk(
                Some("main"),
                100.0,
                true,
                vec![
                    named_module("m1", "/src/MyFooBar.ts", Some(10.0)),
                    named_module("m2", "/src/other/widget.ts", Some(20.0)),
                    module(Some("m3"), Some(5.0)),
                    module(None, Some(7.0)),
                ],
            ),
            chunk(Some("vendor-main"), 50.0, false, vec![]),
        ]);
        let index = ReportIndex::build(&report);
        (report, index)
    }

    #[test]
    fn module_search_is_case_insensitive_substring() {
        let (report, index) = fixture();
        let search = SearchIndex::for_modules(&report, &index, "main");

        assert_eq!(search.search("foo"), vec!["m1"]);
        assert_eq!(search.search("WIDGET"), vec!["m2"]);
        assert!(search.search("nothing-here").is_empty());
    }

    #[test]
    fn empty_query_matches_all_indexed_modules_in_order() {
        let (report, index) = fixture();
        let search = SearchIndex::for_modules(&report, &index, "main");

        // The id-less module is not indexed at all.
        assert_eq!(search.search(""), vec!["m1", "m2", "m3"]);
    }

    #[test]
    fn chunk_search_matches_on_chunk_ids() {
        let (report, _) = fixture();
        let search = SearchIndex::for_chunks(&report);

        assert_eq!(search.search("main"), vec!["main", "vendor-main"]);
        assert_eq!(search.search("vendor"), vec!["vendor-main"]);
        assert_eq!(search.search(""), vec!["main", "vendor-main"]);
    }

    #[test]
    fn unknown_chunk_yields_an_empty_index() {
        let (report, index) = fixture();
        let search = SearchIndex::for_modules(&report, &index, "ghost");
        assert!(search.is_empty());
        assert!(search.search("").is_empty());
    }

    #[test]
    fn results_are_deduplicated_in_first_match_order() {
        let report = report(vec![chunk(
            Some("main"),
            10.0,
            true,
            vec![
                named_module("m1", "/src/a.ts", None),
                named_module("m1", "/src/a-copy.ts", None),
            ],
        )]);
        let index = ReportIndex::build(&report);
        let search = SearchIndex::for_modules(&report, &index, "main");

        assert_eq!(search.search("a"), vec!["m1"]);
    }
}
