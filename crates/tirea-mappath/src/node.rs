//! Single-segment access into one tree node.
//!
//! Everything here looks at exactly one node and one segment. Errors carry
//! only the segment as their path; the walker in `ops` adds the prefix.

use crate::error::{value_type_name, MapPathError, MapPathResult};
use crate::path::Seg;
use serde_json::{Map, Value};
use std::alloc::Layout;

const NOT_AN_INDEX: &str = "node is a sequence, but segment is not an integer";
const TOO_LARGE: &str = "index too large";

/// Runtime shape of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// String-keyed object.
    Mapping,
    /// Ordered array.
    Sequence,
    /// `null`, treated as "nothing here yet".
    Absent,
    /// Any other leaf. Never introspected.
    Scalar,
}

impl NodeKind {
    pub fn of(node: &Value) -> Self {
        match node {
            Value::Object(_) => NodeKind::Mapping,
            Value::Array(_) => NodeKind::Sequence,
            Value::Null => NodeKind::Absent,
            Value::Bool(_) | Value::Number(_) | Value::String(_) => NodeKind::Scalar,
        }
    }

    #[inline]
    pub fn is_container(self) -> bool {
        matches!(self, NodeKind::Mapping | NodeKind::Sequence)
    }
}

/// Resolved position of a segment inside a container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Slot {
    Key(String),
    /// Always non-negative. May point past the end for writes that grow.
    Index(usize),
}

/// Resolve `seg` against `node` without modifying anything.
///
/// - mapping: key lookup; a missing key is `NotFound`
/// - sequence: the segment must be an integer, negative counts from the end;
///   a non-integer or out-of-range index is `NotFound`
/// - anything else cannot be descended into and is `InvalidPath`
///
/// # Examples
///
/// ```
/// use tirea_mappath::{resolve, Seg};
/// use serde_json::json;
///
/// let node = json!(["buzz", "bizz"]);
/// assert_eq!(resolve(&node, &Seg::new("-1")).unwrap(), "bizz");
/// assert!(resolve(&node, &Seg::new("2")).unwrap_err().is_not_found());
/// assert!(resolve(&json!(1), &Seg::new("0")).unwrap_err().is_invalid_path());
/// ```
pub fn resolve<'a>(node: &'a Value, seg: &Seg) -> MapPathResult<&'a Value> {
    let slot = locate(node, seg)?;
    child(node, &slot).ok_or_else(|| MapPathError::not_found(seg.as_str(), "no such entry"))
}

/// Build an empty container suited to hold `seg`.
///
/// A non-negative index yields a sequence of `index + 1` nulls, anything
/// else an empty mapping. An index whose sequence cannot be allocated is
/// `InvalidPath`.
///
/// # Examples
///
/// ```
/// use tirea_mappath::{new_container, Seg};
/// use serde_json::json;
///
/// assert_eq!(new_container(&Seg::new("1")).unwrap(), json!([null, null]));
/// assert_eq!(new_container(&Seg::new("name")).unwrap(), json!({}));
/// assert!(new_container(&Seg::new("9223372036854775807")).is_err());
/// ```
pub fn new_container(seg: &Seg) -> MapPathResult<Value> {
    match seg.as_new_index() {
        Some(index) => {
            let mut node = Value::Array(Vec::new());
            reserve_slot(&mut node, seg, &growable(seg, index)?)?;
            Ok(node)
        }
        None => Ok(Value::Object(Map::new())),
    }
}

/// Read-side classification of `seg` in `node`.
pub(crate) fn locate(node: &Value, seg: &Seg) -> MapPathResult<Slot> {
    match node {
        Value::Object(map) => {
            if map.contains_key(seg.as_str()) {
                Ok(Slot::Key(seg.as_str().to_owned()))
            } else {
                Err(MapPathError::not_found(seg.as_str(), "no such key in mapping"))
            }
        }
        Value::Array(items) => {
            let index = seg
                .as_index()
                .ok_or_else(|| MapPathError::not_found(seg.as_str(), NOT_AN_INDEX))?;
            normalize_index(index, items.len())
                .map(Slot::Index)
                .ok_or_else(|| {
                    MapPathError::not_found(seg.as_str(), out_of_range(index, items.len()))
                })
        }
        other => Err(MapPathError::invalid_path(
            seg.as_str(),
            format!("cannot descend into {} node", value_type_name(other)),
        )),
    }
}

/// Write-side classification of `seg` in `node`.
///
/// A `null` node is answered as if it were already the container
/// [`new_container`] would build for `seg`. Positive indices past the end
/// are accepted (the sequence grows); negative ones never are.
pub(crate) fn write_slot(node: &Value, seg: &Seg) -> MapPathResult<Slot> {
    match node {
        Value::Null => match seg.as_new_index() {
            Some(index) => growable(seg, index),
            None => Ok(Slot::Key(seg.as_str().to_owned())),
        },
        Value::Object(_) => Ok(Slot::Key(seg.as_str().to_owned())),
        Value::Array(items) => {
            let index = seg
                .as_index()
                .ok_or_else(|| MapPathError::invalid_path(seg.as_str(), NOT_AN_INDEX))?;
            if let Ok(index) = usize::try_from(index) {
                return growable(seg, index);
            }
            normalize_index(index, items.len())
                .map(Slot::Index)
                .ok_or_else(|| {
                    MapPathError::invalid_path(seg.as_str(), out_of_range(index, items.len()))
                })
        }
        other => Err(MapPathError::invalid_path(
            seg.as_str(),
            format!("cannot write into {} node", value_type_name(other)),
        )),
    }
}

/// Delete-side classification of `seg` in `node`.
pub(crate) fn remove_slot(node: &Value, seg: &Seg) -> MapPathResult<Slot> {
    match node {
        Value::Object(_) => locate(node, seg),
        Value::Array(items) => {
            let index = seg
                .as_index()
                .ok_or_else(|| MapPathError::invalid_path(seg.as_str(), NOT_AN_INDEX))?;
            normalize_index(index, items.len())
                .map(Slot::Index)
                .ok_or_else(|| {
                    MapPathError::not_found(seg.as_str(), out_of_range(index, items.len()))
                })
        }
        Value::Null => Err(MapPathError::not_found(
            seg.as_str(),
            "node is null, nothing to delete",
        )),
        other => Err(MapPathError::invalid_path(
            seg.as_str(),
            format!("cannot delete from {} node", value_type_name(other)),
        )),
    }
}

pub(crate) fn child<'a>(node: &'a Value, slot: &Slot) -> Option<&'a Value> {
    match slot {
        Slot::Key(key) => node.as_object()?.get(key),
        Slot::Index(index) => node.as_array()?.get(*index),
    }
}

pub(crate) fn child_mut<'a>(node: &'a mut Value, slot: &Slot) -> Option<&'a mut Value> {
    match slot {
        Slot::Key(key) => node.as_object_mut()?.get_mut(key),
        Slot::Index(index) => node.as_array_mut()?.get_mut(*index),
    }
}

/// Pad a sequence with `null` so that `slot` is in range.
///
/// The memory is reserved before anything is written, so on error `node`
/// is unchanged.
pub(crate) fn reserve_slot(node: &mut Value, seg: &Seg, slot: &Slot) -> MapPathResult<()> {
    let (Value::Array(items), Slot::Index(index)) = (node, slot) else {
        return Ok(());
    };
    let len = index
        .checked_add(1)
        .ok_or_else(|| MapPathError::invalid_path(seg.as_str(), TOO_LARGE))?;
    if len > items.len() {
        items
            .try_reserve_exact(len - items.len())
            .map_err(|_| MapPathError::invalid_path(seg.as_str(), TOO_LARGE))?;
        items.resize(len, Value::Null);
    }
    Ok(())
}

/// Like [`child_mut`], but inserts a missing key. Sequences must already
/// be long enough, see [`reserve_slot`].
pub(crate) fn open_slot<'a>(node: &'a mut Value, slot: &Slot) -> Option<&'a mut Value> {
    match slot {
        Slot::Key(key) => Some(node.as_object_mut()?.entry(key.clone()).or_insert(Value::Null)),
        Slot::Index(index) => node.as_array_mut()?.get_mut(*index),
    }
}

/// Remove the entry at `slot`, shifting later sequence elements down.
pub(crate) fn take_slot(node: &mut Value, slot: &Slot) -> Option<Value> {
    match slot {
        Slot::Key(key) => node.as_object_mut()?.remove(key),
        Slot::Index(index) => {
            let items = node.as_array_mut()?;
            (*index < items.len()).then(|| items.remove(*index))
        }
    }
}

/// Map a possibly negative index onto `[0, len)`.
fn normalize_index(index: i64, len: usize) -> Option<usize> {
    if index >= 0 {
        usize::try_from(index).ok().filter(|i| *i < len)
    } else {
        let back = usize::try_from(index.unsigned_abs()).ok()?;
        len.checked_sub(back)
    }
}

/// Accept `index` as a write target only if a sequence of `index + 1`
/// elements is representable.
fn growable(seg: &Seg, index: usize) -> MapPathResult<Slot> {
    let fits = index
        .checked_add(1)
        .is_some_and(|len| Layout::array::<Value>(len).is_ok());
    if fits {
        Ok(Slot::Index(index))
    } else {
        Err(MapPathError::invalid_path(seg.as_str(), TOO_LARGE))
    }
}

fn out_of_range(index: i64, len: usize) -> String {
    format!("index {index} out of range (len: {len})")
}
