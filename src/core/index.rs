//! Lookup index over a report snapshot.
//!
//! Everything downstream resolves chunks and modules through this index:
//! chunk-by-id, module-by-(chunk, id), and the "top chunks" view (initial
//! chunks ordered by size). Chunks and modules without ids are simply left
//! out of the maps; looking them up yields `None`, never an error.

use std::collections::HashMap;

use crate::core::{Chunk, Module, Report};

/// Positional lookup maps built once per report snapshot.
///
/// The index stores positions into the report rather than clones, so it
/// stays cheap to build and callers borrow straight from the snapshot.
#[derive(Debug, Clone, Default)]
pub struct ReportIndex {
    chunk_pos: HashMap<String, usize>,
    module_pos: HashMap<String, HashMap<String, usize>>,
    top_chunk_pos: Vec<usize>,
}

impl ReportIndex {
    /// Build the index for a report. When two chunks share an id the later
    /// one wins, matching the behavior of the maps the report was designed
    /// to feed; same rule for duplicate module ids within a chunk.
    pub fn build(report: &Report) -> Self {
        let mut chunk_pos = HashMap::new();
        let mut module_pos = HashMap::new();

        for (chunk_idx, chunk) in report.chunks.iter().enumerate() {
            let Some(chunk_id) = chunk.id.as_deref() else {
                continue;
            };
            let modules: HashMap<String, usize> = chunk
                .modules
                .iter()
                .enumerate()
                .filter_map(|(module_idx, module)| {
                    module.id.as_deref().map(|id| (id.to_string(), module_idx))
                })
                .collect();
            chunk_pos.insert(chunk_id.to_string(), chunk_idx);
            module_pos.insert(chunk_id.to_string(), modules);
        }

        let mut top_chunk_pos: Vec<usize> = report
            .chunks
            .iter()
            .enumerate()
            .filter(|(_, chunk)| chunk.initial)
            .map(|(chunk_idx, _)| chunk_idx)
            .collect();
        // Vec::sort_by is stable, so equal sizes keep report order.
        top_chunk_pos.sort_by(|a, b| report.chunks[*b].size.total_cmp(&report.chunks[*a].size));

        Self {
            chunk_pos,
            module_pos,
            top_chunk_pos,
        }
    }

    /// Look up a chunk by id. Absent id or unknown id is a recoverable
    /// empty state.
    pub fn chunk_by_id<'r>(&self, report: &'r Report, chunk_id: &str) -> Option<&'r Chunk> {
        self.chunk_pos
            .get(chunk_id)
            .and_then(|&chunk_idx| report.chunks.get(chunk_idx))
    }

    /// Look up a module by chunk id and module id.
    pub fn module_by_id<'r>(
        &self,
        report: &'r Report,
        chunk_id: &str,
        module_id: &str,
    ) -> Option<&'r Module> {
        let chunk = self.chunk_by_id(report, chunk_id)?;
        let module_idx = self.module_pos.get(chunk_id)?.get(module_id)?;
        chunk.modules.get(*module_idx)
    }

    /// Initial chunks sorted by size descending, ties in report order.
    pub fn top_chunks<'r>(&self, report: &'r Report) -> Vec<&'r Chunk> {
        self.top_chunk_pos
            .iter()
            .filter_map(|&chunk_idx| report.chunks.get(chunk_idx))
            .collect()
    }

    /// Default chunk selection when a caller has none: the id of the
    /// largest initial chunk.
    pub fn default_chunk_id(&self, report: &Report) -> Option<String> {
        self.top_chunks(report)
            .into_iter()
            .find_map(|chunk| chunk.id.clone())
    }
}
