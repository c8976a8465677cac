//! RAML resource tree flattening
//!
//! This crate turns the resource tree produced by a RAML parser into
//! simplified, application-friendly nodes (`SimplifiedNode`).
//!
//! ## Flattening Strategy
//!
//! Each top-level resource is walked depth-first. At every node:
//! - the complete URI is composed from the parent's (`/users` + `/{id}`)
//! - the node's URI parameters are merged into the walk's accumulator
//! - methods are summarized and error responses (status >= 400) indexed
//!   by verb for the whole document
//! - the node name is derived from its relative URI
//!
//! Traits and schemas are exposed alongside the walk through
//! `RamlSimplifier`.

pub mod raml;
pub mod simplify;

mod simplifier;

pub use raml::{DocumentLoader, FileLoader, LoadedDocument};
pub use simplifier::RamlSimplifier;
pub use simplify::{extract_name, TreeWalker, WalkOutput};

use raml_flatten_common::{Result, Simplification, SimplifyConfig};

/// Flatten a parsed RAML document given as JSON
///
/// # Arguments
/// * `json` - JSON dump of the RAML parser's document tree
/// * `config` - Flattening settings
///
/// # Returns
/// * `Simplification` - Resources, error index, traits and diagnostics
pub fn simplify_json(json: &str, config: SimplifyConfig) -> Result<Simplification> {
    let document = raml::from_json_str(json)?;
    RamlSimplifier::new(document).with_config(config).simplify()
}
