//! Dot-path access into dynamically typed trees.
//!
//! `tirea-mappath` reads, writes and deletes values inside a
//! [`serde_json::Value`] tree addressed by dot-delimited paths such as
//! `"users.0.name"`. Mappings are addressed by key and sequences by integer
//! index, with negative indices counting from the end.
//!
//! # Core Concepts
//!
//! - **Path**: `"a.b.2.c"`, parsed into a [`DotPath`]. The path `"."` is the
//!   root itself; the empty string and a leading dot are rejected.
//! - **Get**: walks the path and borrows the value found there.
//! - **Put**: writes a value, creating missing mappings/sequences on the way
//!   and growing sequences with `null` padding. `"."` merges into the root.
//! - **Delete**: removes one entry, shifting later sequence elements down.
//! - **Container**: owns a tree and keeps it unchanged when a mutation fails.
//!
//! # Errors
//!
//! Every failure is one of two kinds, see [`MapPathError`]:
//!
//! - `InvalidPath`: malformed path, or a step the tree's shape can never
//!   satisfy (descending into a scalar, a word used as a sequence index)
//! - `NotFound`: the path is fine but the entry is not there
//!
//! `get` reports every walk failure as `NotFound`.
//!
//! # Quick Start
//!
//! ```
//! use tirea_mappath::{delete, get, put};
//! use serde_json::json;
//!
//! let root = json!({"foo": "bar", "fizz": ["buzz", "bizz"]});
//!
//! assert_eq!(get(&root, "fizz.1").unwrap(), "bizz");
//!
//! let root = put(root, "fizz.3", json!(1337)).unwrap();
//! assert_eq!(root, json!({"foo": "bar", "fizz": ["buzz", "bizz", null, 1337]}));
//!
//! let root = delete(root, "fizz.-1").unwrap();
//! assert_eq!(root["fizz"], json!(["buzz", "bizz", null]));
//! ```
//!
//! # Using Container
//!
//! ```
//! use tirea_mappath::Container;
//! use serde_json::json;
//!
//! let mut c = Container::from_value(json!({"fizz": ["buzz", "bizz"]}));
//! assert!(c.put("fizz.buzz", 1337).unwrap_err().is_invalid_path());
//! assert_eq!(c.data(), &json!({"fizz": ["buzz", "bizz"]}));
//! ```

mod clone;
mod container;
mod error;
mod node;
mod ops;
mod path;

pub use clone::clone_node;
pub use container::Container;
pub use error::{value_type_name, ErrorKind, MapPathError, MapPathResult};
pub use node::{new_container, resolve, NodeKind};
pub use ops::{delete, delete_in_place, get, put, put_in_place};
pub use path::{DotPath, Seg, ROOT};

// Re-export serde_json::Value for convenience
pub use serde_json::Value;
