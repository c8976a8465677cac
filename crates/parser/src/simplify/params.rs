//! URI parameter accumulation

use indexmap::IndexMap;
use serde_json::Value;

/// Running set of URI parameters seen during a walk
///
/// Parameters merge by name, so a later declaration replaces an earlier one
/// with the same name. The accumulator is not scoped to a branch: every
/// node visited after a declaration sees it until the next `reset`.
#[derive(Debug, Clone, Default)]
pub struct ParameterAccumulator {
    params: IndexMap<String, Value>,
}

impl ParameterAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every accumulated parameter
    pub fn reset(&mut self) {
        self.params.clear();
    }

    /// Merge a resource's own parameters and return the full set
    pub fn merge(&mut self, own: Option<&IndexMap<String, Value>>) -> IndexMap<String, Value> {
        if let Some(own) = own {
            for (name, spec) in own {
                self.params.insert(name.clone(), spec.clone());
            }
        }
        self.params.clone()
    }

    /// Replace the accumulated set with a previous snapshot
    pub fn restore(&mut self, snapshot: &IndexMap<String, Value>) {
        self.params.clone_from(snapshot);
    }

    pub fn snapshot(&self) -> &IndexMap<String, Value> {
        &self.params
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}
