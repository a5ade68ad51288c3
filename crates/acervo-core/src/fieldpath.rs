//! Field-path mapper
//!
//! Multipart forms flatten nested documents into dot-separated field names
//! (`catalogacao.anexo.imagem`). This module rebuilds the nested structure:
//! [`FieldPath`] parses and validates a name, [`apply`] writes one value into
//! a document, and [`ArrayFieldPolicy`] decides which leaf names accumulate
//! into arrays instead of overwriting.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::document::Document;

/// Field-path parse errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("empty field path")]
    Empty,

    #[error("empty segment in field path '{0}'")]
    EmptySegment(String),
}

/// A parsed, validated dot-separated path into a document.
///
/// Parsing guarantees at least one segment and no empty segments, so `apply`
/// has no failure cases left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    parents: Vec<String>,
    leaf: String,
}

impl FieldPath {
    pub fn parse(raw: &str) -> Result<Self, PathError> {
        if raw.is_empty() {
            return Err(PathError::Empty);
        }
        let mut segments: Vec<String> = raw.split('.').map(str::to_owned).collect();
        if segments.iter().any(String::is_empty) {
            return Err(PathError::EmptySegment(raw.to_owned()));
        }
        // split() on a non-empty string yields at least one element
        let leaf = segments.pop().ok_or(PathError::Empty)?;
        Ok(Self {
            parents: segments,
            leaf,
        })
    }

    /// Terminal segment name, checked against the array-field policy.
    pub fn leaf(&self) -> &str {
        &self.leaf
    }

    /// Non-terminal segments, outermost first.
    pub fn parents(&self) -> &[String] {
        &self.parents
    }
}

impl FromStr for FieldPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for parent in &self.parents {
            write!(f, "{}.", parent)?;
        }
        f.write_str(&self.leaf)
    }
}

/// Write `value` into `doc` at `path`, creating intermediate objects on
/// demand.
///
/// A non-object value found at a non-terminal segment is replaced with a
/// fresh empty object; the form's field naming wins over whatever was there.
/// At the leaf, `is_array` appends to an array (created, or replacing a
/// non-array value) in arrival order; otherwise the key is set, overwriting
/// any prior value.
pub fn apply(doc: &mut Document, path: &FieldPath, value: Value, is_array: bool) {
    let mut cursor = doc;
    for segment in path.parents() {
        let slot = cursor
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        match slot {
            Value::Object(inner) => cursor = inner,
            // just forced to an object above
            _ => unreachable!("intermediate segment is always an object"),
        }
    }

    if is_array {
        let slot = cursor
            .entry(path.leaf().to_owned())
            .or_insert_with(|| Value::Array(Vec::new()));
        if !slot.is_array() {
            *slot = Value::Array(Vec::new());
        }
        if let Value::Array(items) = slot {
            items.push(value);
        }
    } else {
        cursor.insert(path.leaf().to_owned(), value);
    }
}

/// The set of leaf field names that are multi-valued.
///
/// Values submitted under such a leaf accumulate into an array in arrival
/// order instead of overwriting each other. The set comes from configuration,
/// not from the pipeline.
#[derive(Debug, Clone, Default)]
pub struct ArrayFieldPolicy {
    leaves: HashSet<String>,
}

impl ArrayFieldPolicy {
    pub fn new<I, S>(leaves: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            leaves: leaves.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_multi_valued(&self, leaf: &str) -> bool {
        self.leaves.contains(leaf)
    }
}
