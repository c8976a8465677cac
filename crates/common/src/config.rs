//! Simplification settings loaded from YAML files
//!
//! Every field has a default, so an empty file (or no file at all) yields
//! the stock flattening behaviour.

use crate::{FlattenError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// How URI parameters are shared between resources during a walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterScope {
    /// One accumulator per top-level resource, shared by every node visited
    /// below it, including sibling branches
    #[default]
    Traversal,

    /// Each branch sees only the parameters declared by its own ancestors
    Branch,
}

/// Root structure for simplification config files
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SimplifyConfig {
    /// URI parameter inheritance mode
    pub parameter_scope: ParameterScope,

    /// Lowest status code recorded in the error index
    pub error_status_threshold: u16,

    /// Body media types whose schema is decoded as JSON
    /// Example: ["application/json", "application/vnd.api+json"]
    pub json_media_types: Vec<String>,
}

impl Default for SimplifyConfig {
    fn default() -> Self {
        Self {
            parameter_scope: ParameterScope::Traversal,
            error_status_threshold: 400,
            json_media_types: vec!["application/json".to_string()],
        }
    }
}

impl SimplifyConfig {
    /// Load config from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| FlattenError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_yaml(&content).map_err(|e| {
            FlattenError::Parse(format!("Failed to parse config YAML from {:?}: {}", path, e))
        })
    }

    /// Parse config from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // serde_yaml reads an empty document as unit, not as an empty mapping
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|e| FlattenError::Parse(e.to_string()))
    }

    /// Whether a body media type is treated as JSON
    pub fn is_json_media_type(&self, media_type: &str) -> bool {
        self.json_media_types
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(media_type))
    }

    /// Whether a response status belongs in the error index
    pub fn is_error_status(&self, status: &str) -> bool {
        status
            .trim()
            .parse::<u16>()
            .map(|code| code >= self.error_status_threshold)
            .unwrap_or(false)
    }
}
