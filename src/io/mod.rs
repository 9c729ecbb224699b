//! Report load boundary.
//!
//! The engine itself never reads external state; callers obtain bytes
//! however they like and hand them to one of these decoders. Decode
//! failure is the only fatal error in the crate: once a [`Report`]
//! comes back `Ok` it is assumed well-formed for the rest of the
//! session. There is no retry here; a failed load is retried by the
//! caller re-supplying input.

use anyhow::{Context, Result};
use std::fs;
use std::io::Read;
use std::path::Path;

use crate::core::Report;

/// Decode a report from a JSON string.
pub fn load_report_from_str(raw: &str) -> Result<Report> {
    serde_json::from_str(raw).context("failed to decode build report JSON")
}

/// Decode a report from any reader.
pub fn load_report_from_reader(mut reader: impl Read) -> Result<Report> {
    let mut raw = String::new();
    reader
        .read_to_string(&mut raw)
        .context("failed to read build report")?;
    load_report_from_str(&raw)
}

/// Read and decode a report from a file on disk.
pub fn load_report_from_path(path: &Path) -> Result<Report> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read build report from {}", path.display()))?;
    load_report_from_str(&raw)
}
