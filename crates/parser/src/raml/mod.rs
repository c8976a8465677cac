//! Parsed RAML document model
//!
//! The RAML source text itself is parsed by an external RAML parser. This
//! module models the resource tree that parser produces and loads dumps of
//! it from JSON or YAML.
//!
//! ## Document Shape
//!
//! - `resources`: ordered resource nodes, each with `relativeUri`,
//!   `uriParameters`, `methods` and nested `resources`
//! - `traits`: ordered single-key mappings (`[{ "secured": {...} }]`)
//! - `schemas`: passed through untouched
//!
//! ## Usage
//! ```rust,ignore
//! use raml_flatten_parser::raml::{DocumentLoader, FileLoader};
//!
//! let document = FileLoader::new("api.json").load()?;
//! println!("{} top-level resources", document.api.resources.len());
//! ```

mod loader;
mod types;

#[cfg(test)]
pub use loader::MockDocumentLoader;
pub use loader::{
    from_json_str, from_json_value, from_yaml_str, DocumentLoader, FileLoader, LoadedDocument,
};
pub use types::*;
