//! Resource tree flattening
//!
//! Walks a parsed RAML resource tree depth-first and emits one
//! `SimplifiedNode` per resource.
//!
//! ## Walk State
//!
//! - **Complete URI**: threaded down each branch, `parent + relativeUri`
//! - **URI parameters**: one accumulator, reset before each top-level
//!   resource (or restored per branch with `ParameterScope::Branch`)
//! - **Error index**: one per document walk, never reset
//!
//! ## Usage
//! ```rust,ignore
//! use raml_flatten_parser::simplify::TreeWalker;
//!
//! let output = TreeWalker::new(&config).walk_top_level(&document.api.resources)?;
//! let not_found = output.errors.response("get", "404");
//! ```

mod methods;
mod name;
mod params;
mod traits;
mod uri;
mod walker;

pub use methods::{resolve_traits, MethodSummarizer, ResourceMethods};
pub use name::{extract_name, resource_name};
pub use params::ParameterAccumulator;
pub use traits::build_trait_dictionary;
pub use uri::compose_uri;
pub use walker::{walk_resources, TreeWalker, WalkOutput};

use raml_flatten_common::{Diagnostic, DiagnosticKind};

/// Log a recovered fault and keep it for the caller
fn report(
    diagnostics: &mut Vec<Diagnostic>,
    resource: &str,
    method: &str,
    kind: DiagnosticKind,
    message: String,
) {
    tracing::warn!(resource, method, ?kind, "{}", message);
    diagnostics.push(Diagnostic {
        resource: resource.to_string(),
        method: method.to_string(),
        kind,
        message,
    });
}
