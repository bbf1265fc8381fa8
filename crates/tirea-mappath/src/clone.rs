//! Deep copy of a tree.

use serde_json::Value;

/// Recursively duplicate `node`.
///
/// Mappings and sequences are rebuilt with every child cloned, so the copy
/// shares no container with the original. Scalars are copied by value.
///
/// # Examples
///
/// ```
/// use tirea_mappath::{clone_node, put_in_place};
/// use serde_json::json;
///
/// let original = json!({"fizz": ["buzz"]});
/// let mut copy = clone_node(&original);
/// put_in_place(&mut copy, "fizz.0", json!("bizz")).unwrap();
///
/// assert_eq!(original["fizz"][0], "buzz");
/// assert_eq!(copy["fizz"][0], "bizz");
/// ```
pub fn clone_node(node: &Value) -> Value {
    match node {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, child)| (key.clone(), clone_node(child)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(clone_node).collect()),
        scalar => scalar.clone(),
    }
}
