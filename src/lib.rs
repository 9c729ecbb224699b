// Export modules for library usage
pub mod analysis;
pub mod config;
pub mod core;
pub mod errors;
pub mod io;
pub mod testkit;

// Re-export commonly used types
pub use crate::core::{index::ReportIndex, Chunk, Module, Reason, Report};

pub use crate::analysis::{
    detect_duplicates, reason_details, reason_module_ids, DependentGraph, DuplicateGroup,
    DuplicateReport, ReasonDetails, ReportAnalyzer, SearchIndex,
};

pub use crate::analysis::metrics::{
    dependent_size, dependent_size_map, max_reasons_map, max_reasons_up,
};

pub use crate::config::{AnalysisFlags, DuplicateConfig, LOW_FAN_IN_THRESHOLD};

pub use crate::errors::{Diagnostic, DiagnosticKind, ReportError};

pub use crate::io::{load_report_from_path, load_report_from_reader, load_report_from_str};
