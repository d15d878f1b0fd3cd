//! Classifying changes between two variable-schema snapshots.

use serde::Serialize;
use tracing::debug;

use super::schema::VariablesSchema;

/// Keys whose availability or definition changed between two snapshots.
///
/// A key lands in at most one list. Keys unused in both snapshots are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VariableSchemaDiff {
    /// Unused (or absent) before, in use after.
    pub added: Vec<String>,
    /// In use before, unused (or absent) after.
    pub deleted: Vec<String>,
    /// In use in both, definition differs.
    pub changed: Vec<String>,
}

impl VariableSchemaDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty() && self.changed.is_empty()
    }
}

/// Compare two snapshots. Keys are visited in `after`'s display order, then
/// the keys only present in `before` in its display order.
pub fn diff_variable_schema(after: &VariablesSchema, before: &VariablesSchema) -> VariableSchemaDiff {
    let mut diff = VariableSchemaDiff::default();

    let union = after.ordered_keys().into_iter().chain(
        before
            .ordered_keys()
            .into_iter()
            .filter(|k| !after.properties.contains_key(*k)),
    );

    for key in union {
        let now = after.available(key);
        let was = before.available(key);
        match (now, was) {
            (None, None) => {}
            (Some(a), Some(b)) => {
                if a != b {
                    diff.changed.push(key.to_string());
                }
            }
            (Some(_), None) => diff.added.push(key.to_string()),
            (None, Some(_)) => diff.deleted.push(key.to_string()),
        }
    }

    debug!(
        added = diff.added.len(),
        deleted = diff.deleted.len(),
        changed = diff.changed.len(),
        "variable schema diff"
    );
    diff
}
