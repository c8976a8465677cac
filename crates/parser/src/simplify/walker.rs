//! Recursive resource tree walk

use super::methods::MethodSummarizer;
use super::name::resource_name;
use super::params::ParameterAccumulator;
use super::uri::compose_uri;
use crate::raml::Resource;
use raml_flatten_common::{
    Diagnostic, ErrorIndex, ParameterScope, Result, SimplifiedNode, SimplifyConfig,
};

/// Result of walking every top-level resource of a document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WalkOutput {
    /// One simplified tree per top-level resource
    pub resources: Vec<SimplifiedNode>,

    /// Error responses of the whole document
    pub errors: ErrorIndex,

    /// Soft faults recovered during the walk
    pub diagnostics: Vec<Diagnostic>,
}

/// Walks a resource tree, producing simplified nodes
///
/// A walker holds the state of one document walk and must not be shared
/// between documents.
pub struct TreeWalker<'a> {
    config: &'a SimplifyConfig,
    summarizer: MethodSummarizer<'a>,
    params: ParameterAccumulator,
    errors: ErrorIndex,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> TreeWalker<'a> {
    pub fn new(config: &'a SimplifyConfig) -> Self {
        Self {
            config,
            summarizer: MethodSummarizer::new(config),
            params: ParameterAccumulator::new(),
            errors: ErrorIndex::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Walk every top-level resource in order
    ///
    /// URI parameters are reset before each top-level resource; the error
    /// index is kept across all of them.
    pub fn walk_top_level(mut self, resources: &[Resource]) -> Result<WalkOutput> {
        let mut simplified = Vec::with_capacity(resources.len());

        for resource in resources {
            self.params.reset();
            simplified.push(self.walk(resource, None)?);
        }

        Ok(WalkOutput {
            resources: simplified,
            errors: self.errors,
            diagnostics: self.diagnostics,
        })
    }

    /// Simplify `resource` and its descendants
    ///
    /// `uri` is the parent's complete URI, `None` at the root.
    pub fn walk(&mut self, resource: &Resource, uri: Option<&str>) -> Result<SimplifiedNode> {
        let complete_uri = compose_uri(uri.unwrap_or_default(), &resource.relative_uri);
        tracing::debug!(uri = %complete_uri, "Simplifying resource");

        let uri_parameters = self.params.merge(resource.uri_parameters.as_ref());

        let summary = self.summarizer.summarize(
            &complete_uri,
            &resource.methods,
            &mut self.errors,
            &mut self.diagnostics,
        );

        let name = resource_name(&resource.relative_uri)?;

        let mut children = Vec::with_capacity(resource.resources.len());
        for child in &resource.resources {
            if self.config.parameter_scope == ParameterScope::Branch {
                self.params.restore(&uri_parameters);
            }
            children.push(self.walk(child, Some(&complete_uri))?);
        }

        Ok(SimplifiedNode {
            name,
            relative_uri: resource.relative_uri.clone(),
            complete_uri,
            uri_parameters,
            methods: summary.methods,
            responses: summary.responses,
            children,
        })
    }

    /// Error responses recorded so far
    pub fn errors(&self) -> &ErrorIndex {
        &self.errors
    }

    /// Soft faults recorded so far
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

/// Walk a document's top-level resources with a fresh walker
pub fn walk_resources(resources: &[Resource], config: &SimplifyConfig) -> Result<WalkOutput> {
    TreeWalker::new(config).walk_top_level(resources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use raml_flatten_common::FlattenError;
    use serde_json::{json, Value};

    fn resources(value: Value) -> Vec<Resource> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_single_resource() {
        let tree = resources(json!([{
            "relativeUri": "/orders",
            "methods": [{ "method": "get", "responses": { "200": {} } }]
        }]));

        let output = walk_resources(&tree, &SimplifyConfig::default()).unwrap();
        let node = &output.resources[0];

        assert_eq!(node.name, "orders");
        assert_eq!(node.relative_uri, "/orders");
        assert_eq!(node.complete_uri, "/orders");
        assert_eq!(node.methods.len(), 1);
        assert!(node.responses.contains_key("200"));
        assert!(node.children.is_empty());
        assert!(output.errors.is_empty());
    }

    #[test]
    fn test_walk_with_parent_uri() {
        let tree = resources(json!([{ "relativeUri": "/posts" }]));
        let config = SimplifyConfig::default();
        let mut walker = TreeWalker::new(&config);

        let node = walker.walk(&tree[0], Some("/users/{id}")).unwrap();
        assert_eq!(node.complete_uri, "/users/{id}/posts");
    }

    #[test]
    fn test_manual_walks_accumulate_errors_and_diagnostics() {
        let tree = resources(json!([
            {
                "relativeUri": "/users",
                "methods": [{ "method": "get", "responses": { "404": {} } }]
            },
            {
                "relativeUri": "/uploads",
                "methods": [{
                    "method": "post",
                    "body": { "application/json": {} },
                    "responses": { "413": {} }
                }]
            }
        ]));
        let config = SimplifyConfig::default();
        let mut walker = TreeWalker::new(&config);

        walker.walk(&tree[0], None).unwrap();
        assert_eq!(walker.errors().len(), 1);
        assert!(walker.diagnostics().is_empty());

        walker.walk(&tree[1], Some("/v1")).unwrap();
        assert_eq!(walker.errors().len(), 2);
        assert!(walker.errors().response("post", "413").is_some());
        assert_eq!(walker.diagnostics().len(), 1);
        assert_eq!(walker.diagnostics()[0].resource, "/v1/uploads");
    }

    #[test]
    fn test_template_child_named_by_variable() {
        let tree = resources(json!([{
            "relativeUri": "/users",
            "resources": [{ "relativeUri": "/{id}" }]
        }]));

        let output = walk_resources(&tree, &SimplifyConfig::default()).unwrap();
        assert_eq!(output.resources[0].children[0].name, "id");
    }

    #[test]
    fn test_nameless_descendant_fails_walk() {
        let tree = resources(json!([{
            "relativeUri": "/users",
            "resources": [{ "relativeUri": "/ok" }, { "relativeUri": "/" }]
        }]));

        let result = walk_resources(&tree, &SimplifyConfig::default());
        assert!(matches!(result, Err(FlattenError::NoNameFound { uri }) if uri == "/"));
    }

    #[test]
    fn test_branch_scope_isolates_siblings() {
        let tree = resources(json!([{
            "relativeUri": "/users",
            "resources": [
                { "relativeUri": "/{userId}", "uriParameters": { "userId": {} } },
                { "relativeUri": "/search" }
            ]
        }]));
        let config = SimplifyConfig {
            parameter_scope: ParameterScope::Branch,
            ..SimplifyConfig::default()
        };

        let output = walk_resources(&tree, &config).unwrap();
        let children = &output.resources[0].children;
        assert!(children[0].uri_parameters.contains_key("userId"));
        assert!(children[1].uri_parameters.is_empty());
    }

    #[test]
    fn test_traversal_scope_shares_siblings() {
        let tree = resources(json!([{
            "relativeUri": "/users",
            "resources": [
                { "relativeUri": "/{userId}", "uriParameters": { "userId": {} } },
                { "relativeUri": "/search" }
            ]
        }]));

        let output = walk_resources(&tree, &SimplifyConfig::default()).unwrap();
        assert!(output.resources[0].children[1]
            .uri_parameters
            .contains_key("userId"));
    }
}
