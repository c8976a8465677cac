//! Trait dictionary construction

use indexmap::IndexMap;
use raml_flatten_common::{FlattenError, Result};
use serde_json::Value;

/// Flatten top-level trait declarations into one name -> definition map
///
/// Each declaration must be a mapping with exactly one key. A name declared
/// twice keeps the later definition.
pub fn build_trait_dictionary(
    declarations: &[IndexMap<String, Value>],
) -> Result<IndexMap<String, Value>> {
    let mut dictionary = IndexMap::with_capacity(declarations.len());

    for (index, declaration) in declarations.iter().enumerate() {
        let mut entries = declaration.iter();
        match (entries.next(), entries.next()) {
            (Some((name, definition)), None) => {
                dictionary.insert(name.clone(), definition.clone());
            }
            _ => {
                return Err(FlattenError::MalformedTraitDeclaration {
                    index,
                    keys: declaration.len(),
                })
            }
        }
    }

    Ok(dictionary)
}
