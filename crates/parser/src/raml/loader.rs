//! Loading of parsed RAML documents
//!
//! The external RAML parser hands its tree over as a JSON or YAML dump.
//! Loading is a single blocking acquisition: it either yields a complete
//! document or fails, and is never retried.

use super::types::ApiDocument;
use raml_flatten_common::{FlattenError, Result};
use serde_json::{Map, Number, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// A fully loaded document: the typed tree plus the raw value it came from
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDocument {
    /// Typed resource tree
    pub api: ApiDocument,

    /// Raw parser output
    pub raw: Value,
}

/// Source of parsed RAML documents
#[cfg_attr(test, mockall::automock)]
pub trait DocumentLoader {
    /// Acquire the document, or fail
    fn load(&self) -> Result<LoadedDocument>;
}

/// Loads a parser dump from disk
///
/// Files ending in `.json` are read as JSON, anything else as YAML.
#[derive(Debug, Clone)]
pub struct FileLoader {
    path: PathBuf,
}

impl FileLoader {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_json(&self) -> bool {
        self.path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
    }
}

impl DocumentLoader for FileLoader {
    fn load(&self) -> Result<LoadedDocument> {
        let content = fs::read_to_string(&self.path).map_err(|source| FlattenError::Read {
            path: self.path.clone(),
            source,
        })?;

        if self.is_json() {
            from_json_str(&content)
        } else {
            from_yaml_str(&content)
        }
    }
}

/// Load a document from a JSON dump
pub fn from_json_str(json: &str) -> Result<LoadedDocument> {
    let raw: Value = serde_json::from_str(json)?;

    from_json_value(raw)
}

/// Load a document from a YAML dump
pub fn from_yaml_str(yaml: &str) -> Result<LoadedDocument> {
    let raw: serde_yaml::Value = serde_yaml::from_str(yaml)
        .map_err(|e| FlattenError::Parse(format!("Failed to parse RAML YAML: {}", e)))?;

    from_json_value(yaml_to_json(raw))
}

/// Load a document from an already decoded value
pub fn from_json_value(raw: Value) -> Result<LoadedDocument> {
    let api: ApiDocument = serde_json::from_value(raw.clone())
        .map_err(|e| FlattenError::Parse(format!("Unexpected RAML document shape: {}", e)))?;

    Ok(LoadedDocument { api, raw })
}

/// Convert YAML to JSON, stringifying non-string mapping keys
///
/// YAML dumps write status codes as integer keys (`200:`), which JSON
/// objects cannot hold.
fn yaml_to_json(value: serde_yaml::Value) -> Value {
    match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(i.into())
            } else if let Some(u) = n.as_u64() {
                Value::Number(u.into())
            } else {
                n.as_f64()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or(Value::Null)
            }
        }
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => {
            Value::Array(items.into_iter().map(yaml_to_json).collect())
        }
        serde_yaml::Value::Mapping(mapping) => {
            let mut object = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                object.insert(yaml_key(key), yaml_to_json(value));
            }
            Value::Object(object)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn yaml_key(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Null => "null".to_string(),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
