//! Complete URI composition

/// Append a resource's relative URI to its parent's complete URI
///
/// No slashes are added or collapsed; the result is exactly
/// `parent + relative_uri`.
pub fn compose_uri(parent: &str, relative_uri: &str) -> String {
    let mut uri = String::with_capacity(parent.len() + relative_uri.len());
    uri.push_str(parent);
    uri.push_str(relative_uri);
    uri
}
