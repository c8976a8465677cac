//! Per-method summaries, request schemas and response collection

use super::report;
use crate::raml::{Method, TraitRef};
use indexmap::IndexMap;
use raml_flatten_common::{
    Diagnostic, DiagnosticKind, ErrorIndex, MethodSummary, SimplifyConfig,
};
use serde_json::{Map, Value};

/// Number of positional slots in a method's `is` list
const TRAIT_SLOTS: usize = 2;

/// Method summaries and merged responses of one resource
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceMethods {
    pub methods: Vec<MethodSummary>,

    /// Every response of every method, last write wins per status
    pub responses: IndexMap<String, Value>,
}

/// Builds method summaries for a resource
pub struct MethodSummarizer<'a> {
    config: &'a SimplifyConfig,
}

impl<'a> MethodSummarizer<'a> {
    pub fn new(config: &'a SimplifyConfig) -> Self {
        Self { config }
    }

    /// Summarize the methods of the resource at `resource_uri`
    ///
    /// Error responses go into `errors` under the method's verb; soft faults
    /// are appended to `diagnostics`.
    pub fn summarize(
        &self,
        resource_uri: &str,
        methods: &[Method],
        errors: &mut ErrorIndex,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> ResourceMethods {
        let mut summary = ResourceMethods::default();

        for method in methods {
            let mut record = MethodSummary {
                method: method.method.clone(),
                query_parameters: method.query_parameters.clone(),
                description: method.description.clone(),
                schema: None,
                traits: Vec::new(),
            };

            if method.is_post() {
                record.schema = self.request_schema(resource_uri, method, diagnostics);
            }

            if let Some(ref is) = method.is {
                record.traits = method_traits(resource_uri, method, is, diagnostics);
            }

            for (status, response) in method.responses.iter().flatten() {
                if self.config.is_error_status(status) {
                    errors.record(&method.method, status, response.clone());
                }
                summary.responses.insert(status.clone(), response.clone());
            }

            summary.methods.push(record);
        }

        summary
    }

    /// Decode the schema of a POST method's JSON body
    ///
    /// Returns `None` when the method has no JSON body. A JSON body whose
    /// schema is missing, not JSON text, or not a mapping at all yields an
    /// empty object.
    fn request_schema(
        &self,
        resource_uri: &str,
        method: &Method,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<Value> {
        let bodies = match method.body.as_ref()? {
            Value::Object(bodies) => bodies,
            other => {
                report(
                    diagnostics,
                    resource_uri,
                    &method.method,
                    DiagnosticKind::UnrecognizedShape,
                    format!("body must be a mapping of media types, found {}", shape(other)),
                );
                return None;
            }
        };

        let (media_type, entry) = bodies
            .iter()
            .find(|(media_type, _)| self.config.is_json_media_type(media_type))?;

        let (kind, message) = match entry {
            Value::Object(fields) => match fields.get("schema") {
                Some(Value::String(text)) => match serde_json::from_str::<Value>(text) {
                    Ok(schema) => return Some(schema),
                    Err(e) => (
                        DiagnosticKind::InvalidSchema,
                        format!("{} body schema is not valid JSON: {}", media_type, e),
                    ),
                },
                None | Some(Value::Null) => (
                    DiagnosticKind::MissingSchema,
                    format!("{} body declares no schema", media_type),
                ),
                Some(_) => (
                    DiagnosticKind::InvalidSchema,
                    format!("{} body schema is not JSON text", media_type),
                ),
            },
            Value::Null => (
                DiagnosticKind::MissingSchema,
                format!("{} body declares no schema", media_type),
            ),
            other => (
                DiagnosticKind::UnrecognizedShape,
                format!("{} body must be a mapping, found {}", media_type, shape(other)),
            ),
        };

        report(diagnostics, resource_uri, &method.method, kind, message);
        Some(Value::Object(Map::new()))
    }
}

/// Read a method's `is` list, reporting shapes that do not fit its slots
///
/// An unreadable list yields no traits.
fn method_traits(
    resource_uri: &str,
    method: &Method,
    is: &Value,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<String> {
    let Value::Array(slots) = is else {
        report(
            diagnostics,
            resource_uri,
            &method.method,
            DiagnosticKind::UnrecognizedShape,
            format!("trait list must be a sequence, found {}", shape(is)),
        );
        return Vec::new();
    };

    if slots.len() > TRAIT_SLOTS {
        report(
            diagnostics,
            resource_uri,
            &method.method,
            DiagnosticKind::IgnoredTraitSlot,
            format!(
                "{} trait references beyond the first {} were ignored",
                slots.len() - TRAIT_SLOTS,
                TRAIT_SLOTS
            ),
        );
    }

    match trait_refs(slots) {
        Ok(refs) => resolve_traits(&refs),
        Err(message) => {
            report(
                diagnostics,
                resource_uri,
                &method.method,
                DiagnosticKind::UnrecognizedShape,
                message,
            );
            Vec::new()
        }
    }
}

/// Type the two positional slots: a trait mapping, then a trait name
fn trait_refs(slots: &[Value]) -> Result<Vec<TraitRef>, String> {
    slots
        .iter()
        .take(TRAIT_SLOTS)
        .enumerate()
        .map(|(slot, value)| match (slot, value) {
            (0, Value::Object(traits)) => Ok(TraitRef::Parameterized(
                traits
                    .iter()
                    .map(|(name, params)| (name.clone(), params.clone()))
                    .collect(),
            )),
            (0, other) => Err(format!(
                "first trait slot must be a mapping of trait names, found {}",
                shape(other)
            )),
            (_, Value::String(name)) => Ok(TraitRef::Named(name.clone())),
            (_, other) => Err(format!(
                "second trait slot must be a trait name, found {}",
                shape(other)
            )),
        })
        .collect()
}

/// Flatten typed trait references into trait names, in slot order
pub fn resolve_traits(refs: &[TraitRef]) -> Vec<String> {
    refs.iter().flat_map(TraitRef::names).collect()
}

fn shape(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn method(value: Value) -> Method {
        serde_json::from_value(value).unwrap()
    }

    fn summarize(methods: &[Method]) -> (ResourceMethods, ErrorIndex, Vec<Diagnostic>) {
        let config = SimplifyConfig::default();
        let mut errors = ErrorIndex::new();
        let mut diagnostics = Vec::new();
        let summary =
            MethodSummarizer::new(&config).summarize("/users", methods, &mut errors, &mut diagnostics);
        (summary, errors, diagnostics)
    }

    #[test]
    fn test_basic_summary() {
        let (summary, _, diagnostics) = summarize(&[method(json!({
            "method": "get",
            "description": "List users",
            "queryParameters": { "page": { "type": "integer" } }
        }))]);

        let record = &summary.methods[0];
        assert_eq!(record.method, "get");
        assert_eq!(record.description.as_deref(), Some("List users"));
        assert_eq!(
            record.query_parameters,
            Some(json!({ "page": { "type": "integer" } }))
        );
        assert!(record.schema.is_none());
        assert!(record.traits.is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_post_schema_decoded() {
        let (summary, _, diagnostics) = summarize(&[method(json!({
            "method": "post",
            "body": { "application/json": { "schema": "{\"type\": \"object\"}" } }
        }))]);

        assert_eq!(summary.methods[0].schema, Some(json!({ "type": "object" })));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_post_without_schema_reports() {
        let (summary, _, diagnostics) = summarize(&[method(json!({
            "method": "post",
            "body": { "application/json": { "example": "{}" } }
        }))]);

        assert_eq!(summary.methods[0].schema, Some(json!({})));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].resource, "/users");
        assert_eq!(diagnostics[0].method, "post");
        assert_eq!(diagnostics[0].kind, DiagnosticKind::MissingSchema);
    }

    #[test]
    fn test_post_with_null_body_entry_reports() {
        let (summary, _, diagnostics) = summarize(&[method(json!({
            "method": "post",
            "body": { "application/json": null }
        }))]);

        assert_eq!(summary.methods[0].schema, Some(json!({})));
        assert_eq!(diagnostics[0].kind, DiagnosticKind::MissingSchema);
    }

    #[test]
    fn test_post_invalid_schema_reports() {
        let (summary, _, diagnostics) = summarize(&[
            method(json!({
                "method": "post",
                "body": { "application/json": { "schema": "User" } }
            })),
            method(json!({
                "method": "post",
                "body": { "application/json": { "schema": { "type": "object" } } }
            })),
        ]);

        assert_eq!(summary.methods[0].schema, Some(json!({})));
        assert_eq!(summary.methods[1].schema, Some(json!({})));
        assert!(diagnostics
            .iter()
            .all(|d| d.kind == DiagnosticKind::InvalidSchema));
        assert_eq!(diagnostics.len(), 2);
    }

    #[test]
    fn test_schema_only_for_post_with_json_body() {
        let (summary, _, diagnostics) = summarize(&[
            method(json!({
                "method": "put",
                "body": { "application/json": { "schema": "{}" } }
            })),
            method(json!({
                "method": "post",
                "body": { "application/xml": { "schema": "<xs:schema/>" } }
            })),
        ]);

        assert!(summary.methods.iter().all(|m| m.schema.is_none()));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_trait_resolution() {
        let refs = trait_refs(&[json!({ "secured": {} }), json!("paginated")]).unwrap();
        assert_eq!(resolve_traits(&refs), vec!["secured", "paginated"]);

        let refs = trait_refs(&[json!({ "secured": {}, "cached": { "ttl": 60 } })]).unwrap();
        assert_eq!(resolve_traits(&refs), vec!["secured", "cached"]);
    }

    #[test]
    fn test_swapped_trait_slots_reported() {
        let (summary, _, diagnostics) = summarize(&[method(json!({
            "method": "get",
            "is": ["paginated", { "secured": {} }]
        }))]);

        assert!(summary.methods[0].traits.is_empty());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::UnrecognizedShape);
        assert!(diagnostics[0].message.contains("first trait slot"));
    }

    #[test]
    fn test_unreadable_trait_lists_reported() {
        let (summary, _, diagnostics) = summarize(&[
            method(json!({ "method": "get", "is": [null] })),
            method(json!({ "method": "put", "is": "secured" })),
            method(json!({ "method": "patch", "is": [{ "secured": {} }, 7] })),
        ]);

        assert!(summary.methods.iter().all(|m| m.traits.is_empty()));
        let methods: Vec<&str> = diagnostics.iter().map(|d| d.method.as_str()).collect();
        assert_eq!(methods, vec!["get", "put", "patch"]);
        assert!(diagnostics
            .iter()
            .all(|d| d.kind == DiagnosticKind::UnrecognizedShape));
    }

    #[test]
    fn test_post_with_text_body_entry_reports() {
        let (summary, _, diagnostics) = summarize(&[method(json!({
            "method": "post",
            "body": { "application/json": "text" }
        }))]);

        assert_eq!(summary.methods[0].schema, Some(json!({})));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::UnrecognizedShape);
    }

    #[test]
    fn test_post_with_non_mapping_body_reports() {
        let (summary, _, diagnostics) = summarize(&[method(json!({
            "method": "post",
            "body": ["application/json"]
        }))]);

        assert!(summary.methods[0].schema.is_none());
        assert_eq!(diagnostics[0].kind, DiagnosticKind::UnrecognizedShape);
        assert_eq!(diagnostics[0].resource, "/users");
    }

    #[test]
    fn test_extra_trait_slots_ignored() {
        let (summary, _, diagnostics) = summarize(&[method(json!({
            "method": "get",
            "is": [{ "secured": {} }, "paginated", "searchable"]
        }))]);

        assert_eq!(summary.methods[0].traits, vec!["secured", "paginated"]);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::IgnoredTraitSlot);
    }

    #[test]
    fn test_responses_and_error_index() {
        let (summary, errors, _) = summarize(&[
            method(json!({
                "method": "get",
                "responses": {
                    "200": { "description": "OK" },
                    "404": { "description": "Not found" }
                }
            })),
            method(json!({
                "method": "delete",
                "responses": {
                    "204": null,
                    "404": { "description": "Already gone" }
                }
            })),
        ]);

        assert_eq!(
            summary.responses.keys().collect::<Vec<_>>(),
            vec!["200", "404", "204"]
        );
        assert_eq!(summary.responses["404"]["description"], "Already gone");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.response("get", "404").unwrap()["description"], "Not found");
        assert_eq!(
            errors.response("delete", "404").unwrap()["description"],
            "Already gone"
        );
        assert!(errors.response("get", "200").is_none());
    }
}
