//! Common types and utilities for raml-flatten
//!
//! This crate contains the simplified output model, the error taxonomy, and
//! the configuration shared by the parser and CLI components.

mod config;

pub use config::{ParameterScope, SimplifyConfig};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or simplifying a document
#[derive(Error, Debug)]
pub enum FlattenError {
    /// A relative URI carries no token a resource name can be derived from
    #[error("No resource name found in relative URI '{uri}'")]
    NoNameFound { uri: String },

    /// A top-level trait declaration does not have exactly one key
    #[error("Trait declaration #{index} must have exactly one key, found {keys}")]
    MalformedTraitDeclaration { index: usize, keys: usize },

    #[error("Parse error: {0}")]
    Parse(String),

    /// A document or config file could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A document is not syntactically valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for flattening operations
pub type Result<T> = std::result::Result<T, FlattenError>;

/// One flattened resource, with its children flattened recursively
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimplifiedNode {
    /// Short resource name (e.g. "users" for "/users")
    pub name: String,

    /// Relative URI exactly as declared
    pub relative_uri: String,

    /// Root-composed URI of this resource
    pub complete_uri: String,

    /// URI parameters visible at this resource
    #[serde(default)]
    pub uri_parameters: IndexMap<String, Value>,

    /// Method summaries in declaration order
    #[serde(default)]
    pub methods: Vec<MethodSummary>,

    /// Responses of every method on this resource, keyed by status
    #[serde(default)]
    pub responses: IndexMap<String, Value>,

    /// Child resources in declaration order
    #[serde(default)]
    pub children: Vec<SimplifiedNode>,
}

impl SimplifiedNode {
    /// Depth-first search for a node by its complete URI
    pub fn find(&self, complete_uri: &str) -> Option<&SimplifiedNode> {
        if self.complete_uri == complete_uri {
            return Some(self);
        }
        self.children
            .iter()
            .find_map(|child| child.find(complete_uri))
    }
}

/// Summary of a single HTTP method on a resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodSummary {
    /// HTTP verb as declared (e.g. "get")
    pub method: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_parameters: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Request body schema; only set for POST methods with a JSON body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,

    /// Names of the traits applied to this method
    #[serde(default)]
    pub traits: Vec<String>,
}

/// Document-wide index of error responses: verb -> status -> response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorIndex {
    entries: IndexMap<String, IndexMap<String, Value>>,
}

impl ErrorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a response under `verb`; a later write for the same status wins
    pub fn record(&mut self, verb: &str, status: &str, response: Value) {
        self.entries
            .entry(verb.to_string())
            .or_default()
            .insert(status.to_string(), response);
    }

    /// All error responses recorded for a verb
    pub fn get(&self, verb: &str) -> Option<&IndexMap<String, Value>> {
        self.entries.get(verb)
    }

    /// A single recorded response
    pub fn response(&self, verb: &str, status: &str) -> Option<&Value> {
        self.entries.get(verb).and_then(|by_status| by_status.get(status))
    }

    /// Verbs with at least one recorded error response
    pub fn verbs(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Total number of (verb, status) pairs
    pub fn len(&self) -> usize {
        self.entries.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// What kind of soft fault a diagnostic reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// JSON body without a `schema` field
    MissingSchema,
    /// `schema` field that is not JSON text
    InvalidSchema,
    /// Trait reference beyond the two supported slots
    IgnoredTraitSlot,
    /// `is` list or body map whose shape cannot be read
    UnrecognizedShape,
}

/// A recovered fault, reported while processing continued with a default
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Complete URI of the owning resource
    pub resource: String,
    /// HTTP verb of the owning method
    pub method: String,
    pub kind: DiagnosticKind,
    pub message: String,
}

/// Everything produced by flattening one document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Simplification {
    /// Simplified top-level resources
    pub resources: Vec<SimplifiedNode>,

    /// Error responses by verb and status
    pub errors: ErrorIndex,

    /// Trait name -> trait definition
    pub traits: IndexMap<String, Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}
