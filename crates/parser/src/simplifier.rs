//! Document-level flattening entry point

use crate::raml::{ApiDocument, DocumentLoader, LoadedDocument};
use crate::simplify::{build_trait_dictionary, walk_resources};
use indexmap::IndexMap;
use raml_flatten_common::{
    Diagnostic, ErrorIndex, Result, SimplifiedNode, Simplification, SimplifyConfig,
};
use serde_json::Value;

/// Flattens one loaded RAML document
///
/// Holds the document plus the error index and diagnostics of the most
/// recent `resources()` walk.
pub struct RamlSimplifier {
    /// Loaded document
    document: LoadedDocument,

    /// Flattening settings
    config: SimplifyConfig,

    /// Error index of the last walk
    errors: ErrorIndex,

    /// Soft faults of the last walk
    diagnostics: Vec<Diagnostic>,
}

impl RamlSimplifier {
    pub fn new(document: LoadedDocument) -> Self {
        Self {
            document,
            config: SimplifyConfig::default(),
            errors: ErrorIndex::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Acquire a document from `loader`
    pub fn from_loader<L: DocumentLoader + ?Sized>(loader: &L) -> Result<Self> {
        Ok(Self::new(loader.load()?))
    }

    /// Replace the flattening settings
    pub fn with_config(mut self, config: SimplifyConfig) -> Self {
        self.config = config;
        self
    }

    /// Walk every top-level resource and return the simplified trees
    ///
    /// Refreshes `all_status_errors()` and `diagnostics()`. On failure both
    /// are cleared and no tree is returned.
    pub fn resources(&mut self) -> Result<Vec<SimplifiedNode>> {
        match walk_resources(&self.document.api.resources, &self.config) {
            Ok(output) => {
                tracing::debug!(
                    resources = output.resources.len(),
                    errors = output.errors.len(),
                    diagnostics = output.diagnostics.len(),
                    "Walked resource tree"
                );
                self.errors = output.errors;
                self.diagnostics = output.diagnostics;
                Ok(output.resources)
            }
            Err(e) => {
                self.errors = ErrorIndex::new();
                self.diagnostics.clear();
                Err(e)
            }
        }
    }

    /// Trait name -> trait definition
    pub fn get_traits(&self) -> Result<IndexMap<String, Value>> {
        build_trait_dictionary(&self.document.api.traits)
    }

    /// Error responses of the last `resources()` walk
    pub fn all_status_errors(&self) -> &ErrorIndex {
        &self.errors
    }

    /// Soft faults of the last `resources()` walk
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Schema declarations, unmodified
    pub fn schemas(&self) -> &[Value] {
        &self.document.api.schemas
    }

    /// Typed input document
    pub fn get_api(&self) -> &ApiDocument {
        &self.document.api
    }

    /// Raw parser output
    pub fn parsed_object(&self) -> &Value {
        &self.document.raw
    }

    /// Walk the resources and collect every output in one bundle
    pub fn simplify(&mut self) -> Result<Simplification> {
        let traits = self.get_traits()?;
        let resources = self.resources()?;

        Ok(Simplification {
            resources,
            errors: self.errors.clone(),
            traits,
            diagnostics: self.diagnostics.clone(),
        })
    }
}
