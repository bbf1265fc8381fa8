//! Stateful wrapper that commits a mutation only when it succeeds.

use crate::{clone_node, ops, MapPathResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Holds one tree and applies path operations to it.
///
/// `put` and `delete` either succeed completely or leave the held tree
/// exactly as it was before the call.
///
/// # Examples
///
/// ```
/// use tirea_mappath::Container;
/// use serde_json::json;
///
/// let mut c = Container::new();
/// c.put("fizz.1", "bizz").unwrap();
/// assert_eq!(c.data(), &json!({"fizz": [null, "bizz"]}));
///
/// // a failed write does not touch the tree
/// assert!(c.put("fizz.name", 1).is_err());
/// assert_eq!(c.data(), &json!({"fizz": [null, "bizz"]}));
/// ```
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Container {
    data: Value,
}

impl Container {
    /// Create a container holding no tree (`null`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a container around an existing tree.
    pub fn from_value(value: Value) -> Self {
        Self { data: value }
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn into_inner(self) -> Value {
        self.data
    }

    /// True when no tree is held.
    pub fn is_empty(&self) -> bool {
        self.data.is_null()
    }

    /// Read the value at `path`.
    pub fn get(&self, path: &str) -> MapPathResult<&Value> {
        ops::get(&self.data, path)
    }

    /// Write `value` at `path`.
    pub fn put(&mut self, path: &str, value: impl Into<Value>) -> MapPathResult<()> {
        ops::put_in_place(&mut self.data, path, value.into()).inspect_err(|err| {
            debug!(path, error = %err, "put rejected, container unchanged");
        })
    }

    /// Remove the entry at `path`, returning it.
    pub fn delete(&mut self, path: &str) -> MapPathResult<Value> {
        ops::delete_in_place(&mut self.data, path).inspect_err(|err| {
            debug!(path, error = %err, "delete rejected, container unchanged");
        })
    }
}

impl Clone for Container {
    fn clone(&self) -> Self {
        Self {
            data: clone_node(&self.data),
        }
    }
}

impl From<Value> for Container {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

impl From<Container> for Value {
    fn from(container: Container) -> Self {
        container.into_inner()
    }
}
