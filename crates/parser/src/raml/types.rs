//! RAML resource tree type definitions
//!
//! Only the fields the flattener reads are typed. Parameter, response and
//! trait bodies stay opaque JSON values.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Parsed RAML document root
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDocument {
    /// API title
    #[serde(default)]
    pub title: Option<String>,

    /// Top-level resources
    #[serde(default)]
    pub resources: Vec<Resource>,

    /// Trait declarations, one single-key mapping each
    #[serde(default)]
    pub traits: Vec<IndexMap<String, Value>>,

    /// Schema declarations
    #[serde(default)]
    pub schemas: Vec<Value>,
}

/// Resource node in the URI tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    /// URI template segment relative to the parent (e.g., "/{id}")
    pub relative_uri: String,

    /// URI parameters declared on this resource
    #[serde(default)]
    pub uri_parameters: Option<IndexMap<String, Value>>,

    /// HTTP methods
    #[serde(default)]
    pub methods: Vec<Method>,

    /// Nested resources
    #[serde(default)]
    pub resources: Vec<Resource>,
}

/// HTTP method on a resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Method {
    /// HTTP verb (e.g., "get", "post")
    pub method: String,

    /// Query parameters
    #[serde(default)]
    pub query_parameters: Option<Value>,

    /// Description
    #[serde(default)]
    pub description: Option<String>,

    /// Applied traits, validated when the method is summarized
    #[serde(default)]
    pub is: Option<Value>,

    /// Request bodies keyed by media type, validated when the method is
    /// summarized
    #[serde(default)]
    pub body: Option<Value>,

    /// Responses keyed by status code
    #[serde(default)]
    pub responses: Option<IndexMap<String, Value>>,
}

impl Method {
    /// Whether this is a POST method
    pub fn is_post(&self) -> bool {
        self.method.eq_ignore_ascii_case("post")
    }
}

/// Reference to a trait from a method's `is` list
///
/// The RAML parser emits the list in two positional slots: first a mapping
/// whose keys are trait names (with their parameters as values), then an
/// optional literal trait name.
#[derive(Debug, Clone, PartialEq)]
pub enum TraitRef {
    /// `{ "secured": { ... } }`
    Parameterized(IndexMap<String, Value>),

    /// `"paginated"`
    Named(String),
}

impl TraitRef {
    /// Trait names carried by this reference
    pub fn names(&self) -> Vec<String> {
        match self {
            TraitRef::Parameterized(traits) => traits.keys().cloned().collect(),
            TraitRef::Named(name) => vec![name.clone()],
        }
    }
}
