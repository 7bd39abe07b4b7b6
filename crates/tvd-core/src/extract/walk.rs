//! Depth-first walker over a parsed JSON document.
//!
//! Each pass is a `Visitor` that owns its accumulator. The walker hands it
//! every object node together with the scope inherited from the parent
//! object, and recurses into every value of every object and array.

use serde_json::{Map, Value};

pub(crate) trait Visitor<'doc> {
    /// State propagated from ancestors to descendants.
    type Scope: Clone;

    /// Visit one object node; returns the scope its children inherit.
    fn visit_object(&mut self, obj: &'doc Map<String, Value>, scope: &Self::Scope)
        -> Self::Scope;
}

/// Walk `value` and everything beneath it. Scalars are leaves.
///
/// Recursive, with no depth limit of its own. Documents deeper than
/// `serde_json`'s parser limit (128 levels) never reach the walker: they fail
/// in `parse_document`.
pub(crate) fn walk<'doc, V: Visitor<'doc>>(value: &'doc Value, visitor: &mut V, scope: &V::Scope) {
    match value {
        Value::Object(obj) => {
            let child_scope = visitor.visit_object(obj, scope);
            for child in obj.values() {
                walk(child, visitor, &child_scope);
            }
        }
        Value::Array(items) => {
            for item in items {
                walk(item, visitor, scope);
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
    }
}
