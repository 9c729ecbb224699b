//! Factory helpers for building report fixtures in tests.
//!
//! Compiled into the library so integration tests under `tests/` can share
//! the same builders as the unit tests.

use crate::core::{Chunk, Module, Reason, Report};

/// Build a report from chunks.
pub fn report(chunks: Vec<Chunk>) -> Report {
    Report { chunks }
}

/// Build a chunk with the given id, size, and modules.
pub fn chunk(id: Option<&str>, size: f64, initial: bool, modules: Vec<Module>) -> Chunk {
    Chunk {
        id: id.map(str::to_string),
        size,
        initial,
        modules,
    }
}

/// Build a module with no reasons.
pub fn module(id: Option<&str>, size: Option<f64>) -> Module {
    Module {
        id: id.map(str::to_string),
        identifier: id.map(str::to_string),
        name_for_condition: None,
        size,
        reasons: Vec::new(),
    }
}

/// Build a module with raw reasons given as
/// `(resolved_module, module_id)` pairs.
pub fn module_with_reasons(
    id: Option<&str>,
    size: Option<f64>,
    reasons: &[(Option<&str>, Option<&str>)],
) -> Module {
    Module {
        reasons: reasons
            .iter()
            .map(|(resolved_module, module_id)| reason(*resolved_module, *module_id))
            .collect(),
        ..module(id, size)
    }
}

/// Build a single raw reason record.
pub fn reason(resolved_module: Option<&str>, module_id: Option<&str>) -> Reason {
    Reason {
        module_id: module_id.map(str::to_string),
        resolved_module: resolved_module.map(str::to_string),
    }
}

/// Shorthand for a module whose display label differs from its id.
pub fn named_module(id: &str, label: &str, size: Option<f64>) -> Module {
    Module {
        name_for_condition: Some(label.to_string()),
        ..module(Some(id), size)
    }
}
