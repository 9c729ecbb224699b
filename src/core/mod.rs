//! Typed record model for compiler build reports.
//!
//! A [`Report`] is the decoded form of a bundler's stats output: an ordered
//! sequence of chunks, each packing an ordered sequence of modules, each
//! module carrying the raw "reason" records that explain why it was pulled
//! into the build. The model is immutable once loaded; a re-load replaces
//! the whole value rather than merging into it.
//!
//! Ids are opaque strings. Stats files in the wild carry ids as either JSON
//! strings or numbers, so id fields go through a coercing serde adapter.
//! Unknown fields in the source JSON are ignored.

pub mod index;

use serde::{Deserialize, Serialize};

/// A whole build report: the ordered list of output chunks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Report {
    #[serde(default)]
    pub chunks: Vec<Chunk>,
}

/// One output chunk: a named bundle of modules with a byte size.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chunk {
    /// Chunk id. A chunk without an id stays in the report but is
    /// unaddressable through the index.
    #[serde(default, with = "opaque_id")]
    pub id: Option<String>,
    /// Chunk size in bytes as reported by the build tool.
    #[serde(default)]
    pub size: f64,
    /// Whether this chunk is loaded on initial page load.
    #[serde(default)]
    pub initial: bool,
    #[serde(default)]
    pub modules: Vec<Module>,
}

/// A single compiled unit inside a chunk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    /// Module id, unique within its chunk. The same identity may recur in
    /// other chunks; cross-chunk duplication is handled separately.
    #[serde(default, with = "opaque_id")]
    pub id: Option<String>,
    /// Full resolved identifier (typically a path with loader prefixes).
    #[serde(default)]
    pub identifier: Option<String>,
    /// Human-oriented display label, preferred over `identifier`.
    #[serde(default)]
    pub name_for_condition: Option<String>,
    /// Module size in bytes. Stats files sometimes emit fractional sizes.
    #[serde(default)]
    pub size: Option<f64>,
    #[serde(default)]
    pub reasons: Vec<Reason>,
}

impl Module {
    /// Display label used for search indexing: `nameForCondition`, falling
    /// back to `identifier`, falling back to the empty string.
    pub fn display_label(&self) -> &str {
        self.name_for_condition
            .as_deref()
            .or(self.identifier.as_deref())
            .unwrap_or("")
    }

    /// Size rounded to whole bytes, zero when absent.
    pub fn size_bytes(&self) -> u64 {
        self.size.map(|size| size.round() as u64).unwrap_or(0)
    }
}

/// One raw edge witness: a single import site that caused a module's
/// inclusion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reason {
    /// Id of the importing module, absent when the build tool could not
    /// attribute the import to a concrete module.
    #[serde(default, with = "opaque_id")]
    pub module_id: Option<String>,
    /// Textual description of the import site; grouping key for
    /// [`ReasonDetails`](crate::analysis::ReasonDetails).
    #[serde(default)]
    pub resolved_module: Option<String>,
}

// Stats ids arrive as strings, integers, or floats depending on the build
// tool's id strategy. Everything is coerced to a string so the rest of the
// crate can treat ids as opaque.
mod opaque_id {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
        Float(f64),
    }

    pub fn serialize<S>(id: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match id {
            Some(id) => serializer.serialize_str(id),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<RawId>::deserialize(deserializer)?;
        Ok(raw.map(|raw| match raw {
            RawId::Text(text) => text,
            RawId::Int(n) => n.to_string(),
            RawId::Float(n) => n.to_string(),
        }))
    }
}
