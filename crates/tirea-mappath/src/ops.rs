//! Whole-path get, put and delete.
//!
//! Mutations run in two phases. The plan phase walks the tree read-only,
//! checks every segment and records where each step lands. The apply phase
//! replays that plan with mutable access. Nothing is touched until the
//! entire path is known to succeed, so a failed `put` or `delete` leaves the
//! tree exactly as it was.
//!
//! A put touches the existing tree at exactly one slot: where the walk leaves
//! it. Containers below that slot are built off to the side first, so an
//! allocation failure is still reported before anything is written.

use crate::error::{value_type_name, MapPathError, MapPathResult};
use crate::node::{self, Slot};
use crate::path::{DotPath, Seg, ROOT};
use serde_json::Value;
use tracing::trace;

static ABSENT: Value = Value::Null;

/// One step of a planned put.
#[derive(Debug)]
struct PutStep<'p> {
    depth: usize,
    seg: &'p Seg,
    /// The node at this level is `null` and must be replaced by a fresh
    /// container before `slot` can be opened.
    create: bool,
    slot: Slot,
}

/// Read the value at `path`.
///
/// `"."` returns `root`. Every failure while walking, including trying to
/// descend into a scalar, is reported as `NotFound`. Only a malformed path
/// string is `InvalidPath`.
///
/// # Examples
///
/// ```
/// use tirea_mappath::get;
/// use serde_json::json;
///
/// let root = json!({"foo": "bar", "fizz": ["buzz", "bizz"]});
/// assert_eq!(get(&root, "fizz.1").unwrap(), "bizz");
/// assert_eq!(get(&root, "fizz.-2").unwrap(), "buzz");
/// assert!(get(&root, "foo.0").unwrap_err().is_not_found());
/// ```
pub fn get<'a>(root: &'a Value, path: &str) -> MapPathResult<&'a Value> {
    DotPath::parse(path)?.get_in(root)
}

/// Write `value` at `path` and return the updated root.
///
/// Missing intermediate nodes are created: a sequence when the segment is a
/// non-negative integer, a mapping otherwise. Writing past the end of a
/// sequence pads it with `null`.
///
/// `"."` merges instead of addressing a child: a `null` root becomes
/// `value`, two mappings merge shallowly, two sequences concatenate. Any
/// other combination is `InvalidPath`.
///
/// # Examples
///
/// ```
/// use tirea_mappath::put;
/// use serde_json::{json, Value};
///
/// let root = put(Value::Null, "0.fizz.3.buzz", json!(1337)).unwrap();
/// assert_eq!(root, json!([{"fizz": [null, null, null, {"buzz": 1337}]}]));
/// ```
pub fn put(mut root: Value, path: &str, value: Value) -> MapPathResult<Value> {
    put_in_place(&mut root, path, value)?;
    Ok(root)
}

/// Remove the entry at `path` and return the updated root.
///
/// `"."` drops the whole tree and returns `null`.
///
/// # Examples
///
/// ```
/// use tirea_mappath::delete;
/// use serde_json::json;
///
/// let root = json!({"fizz": ["buzz", "bizz", null, {"leet": 1337}]});
/// let root = delete(root, "fizz.3.leet").unwrap();
/// assert_eq!(root, json!({"fizz": ["buzz", "bizz", null, {}]}));
/// ```
pub fn delete(mut root: Value, path: &str) -> MapPathResult<Value> {
    delete_in_place(&mut root, path)?;
    Ok(root)
}

/// [`put`] through a mutable reference. On error `root` is unchanged.
pub fn put_in_place(root: &mut Value, path: &str, value: Value) -> MapPathResult<()> {
    DotPath::parse(path)?.put_in(root, value)
}

/// [`delete`] through a mutable reference, returning the removed value.
/// On error `root` is unchanged.
pub fn delete_in_place(root: &mut Value, path: &str) -> MapPathResult<Value> {
    DotPath::parse(path)?.delete_in(root)
}

impl DotPath {
    /// Read the value this path addresses in `root`.
    pub fn get_in<'a>(&self, root: &'a Value) -> MapPathResult<&'a Value> {
        self.validate()?;
        let mut current = root;
        for (depth, seg) in self.iter().enumerate() {
            current = node::resolve(current, seg)
                .map_err(|err| err.with_prefix(&self.prefix(depth)).into_not_found())?;
        }
        Ok(current)
    }

    /// Write `value` at this path in `root`. On error `root` is unchanged.
    pub fn put_in(&self, root: &mut Value, mut value: Value) -> MapPathResult<()> {
        self.validate()?;
        if self.is_root() {
            return merge_root(root, value);
        }

        let mut existing = self.plan_put(root)?;
        let split = existing
            .iter()
            .position(|step| step.create)
            .unwrap_or(existing.len());
        let fresh = existing.split_off(split);
        trace!(path = %self, existing = existing.len(), fresh = fresh.len(), "applying put");

        for PutStep { depth, seg, slot, .. } in fresh.into_iter().rev() {
            let mut container =
                node::new_container(seg).map_err(|err| err.with_prefix(&self.prefix(depth)))?;
            *node::open_slot(&mut container, &slot).ok_or_else(|| self.drifted(seg))? = value;
            value = container;
        }

        let Some((last, parents)) = existing.split_last() else {
            *root = value;
            return Ok(());
        };
        let mut current = root;
        for step in parents {
            current =
                node::child_mut(current, &step.slot).ok_or_else(|| self.drifted(step.seg))?;
        }
        node::reserve_slot(current, last.seg, &last.slot)
            .map_err(|err| err.with_prefix(&self.prefix(last.depth)))?;
        *node::open_slot(current, &last.slot).ok_or_else(|| self.drifted(last.seg))? = value;
        Ok(())
    }

    /// Remove the entry at this path in `root` and return it.
    /// On error `root` is unchanged.
    pub fn delete_in(&self, root: &mut Value) -> MapPathResult<Value> {
        self.validate()?;
        let Some((last, parents)) = self.segments().split_last() else {
            return Ok(std::mem::take(root));
        };

        let mut slots = Vec::with_capacity(parents.len());
        let mut current: &Value = root;
        for (depth, seg) in parents.iter().enumerate() {
            let slot =
                node::locate(current, seg).map_err(|err| err.with_prefix(&self.prefix(depth)))?;
            current = node::child(current, &slot).ok_or_else(|| self.drifted(seg))?;
            slots.push(slot);
        }
        let target = node::remove_slot(current, last)
            .map_err(|err| err.with_prefix(&self.prefix(parents.len())))?;
        trace!(path = %self, "applying delete");

        let mut current = root;
        for (seg, slot) in parents.iter().zip(&slots) {
            current = node::child_mut(current, slot).ok_or_else(|| self.drifted(seg))?;
        }
        node::take_slot(current, &target).ok_or_else(|| self.drifted(last))
    }

    /// Validate the whole path against `root` and record each step.
    fn plan_put<'p>(&'p self, root: &Value) -> MapPathResult<Vec<PutStep<'p>>> {
        let mut steps = Vec::with_capacity(self.len());
        // `None` once the walk has left the existing tree.
        let mut current = Some(root);
        for (depth, seg) in self.iter().enumerate() {
            let here = current.unwrap_or(&ABSENT);
            let slot =
                node::write_slot(here, seg).map_err(|err| err.with_prefix(&self.prefix(depth)))?;
            current = current.and_then(|parent| node::child(parent, &slot));
            steps.push(PutStep {
                depth,
                seg,
                create: here.is_null(),
                slot,
            });
        }
        Ok(steps)
    }

    /// The apply phase found a different tree than the plan phase saw.
    /// Planning and applying happen under one exclusive borrow, so this is
    /// a bug rather than a caller error.
    fn drifted(&self, seg: &Seg) -> MapPathError {
        MapPathError::invalid_path(
            self.to_string(),
            format!("tree changed between planning and applying at `{seg}`"),
        )
    }
}

fn merge_root(root: &mut Value, value: Value) -> MapPathResult<()> {
    if root.is_null() {
        *root = value;
        return Ok(());
    }
    match (root, value) {
        (Value::Object(target), Value::Object(source)) => {
            target.extend(source);
            Ok(())
        }
        (Value::Array(target), Value::Array(source)) => {
            target.extend(source);
            Ok(())
        }
        (root, value) => Err(MapPathError::invalid_path(
            ROOT,
            format!(
                "dot merge needs two mappings or two sequences, got {} and {}",
                value_type_name(root),
                value_type_name(&value)
            ),
        )),
    }
}
