//! Resource name extraction from relative URIs

use once_cell::sync::Lazy;
use raml_flatten_common::{FlattenError, Result};
use regex::Regex;

/// A template expression, or a word run optionally joined to further runs by
/// `-` or `_` ("users", "user-profile", "v1_beta"). Only the word run is
/// captured, so template variables are skipped.
static NAME_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{[^}]*\}|(\w+(?:[-_]\w+)*)").expect("name pattern is valid")
});

/// A URI template expression such as `{id}` or `{user-id}`
static TEMPLATE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(\w+(?:[-_]\w+)*)\}").expect("template pattern is valid"));

/// Extract the first name token from a relative URI
///
/// Template expressions are not names, so `"/{id}"` has no name token.
///
/// # Examples
/// ```rust,ignore
/// assert_eq!(extract_name("/user-profile")?, "user-profile");
/// assert!(extract_name("/{id}").is_err());
/// ```
pub fn extract_name(relative_uri: &str) -> Result<String> {
    NAME_TOKEN
        .captures_iter(relative_uri)
        .find_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| FlattenError::NoNameFound {
            uri: relative_uri.to_string(),
        })
}

/// Name a resource node
///
/// Uses `extract_name`, falling back to the template variable for segments
/// that consist only of a template expression (`"/{id}"` -> `"id"`).
pub fn resource_name(relative_uri: &str) -> Result<String> {
    extract_name(relative_uri).or_else(|err| {
        TEMPLATE_TOKEN
            .captures(relative_uri)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or(err)
    })
}
