//! Error types for tirea-mappath operations.

use crate::DotPath;
use thiserror::Error;

/// Result type alias for tirea-mappath operations.
pub type MapPathResult<T> = Result<T, MapPathError>;

/// Errors that can occur while resolving or mutating a path.
///
/// There are exactly two kinds. `InvalidPath` means the call itself is wrong
/// (bad syntax, or a step that can never succeed against this tree shape).
/// `NotFound` means the path is fine but nothing lives there right now.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MapPathError {
    /// The path is malformed or cannot be applied to the tree's shape.
    #[error("invalid path {path}: {reason}")]
    InvalidPath {
        /// Path up to and including the failing segment.
        path: String,
        /// What went wrong.
        reason: String,
    },

    /// The path is well-formed but the addressed entry does not exist.
    #[error("path not found {path}: {reason}")]
    NotFound {
        /// Path up to and including the failing segment.
        path: String,
        /// What went wrong.
        reason: String,
    },
}

/// Discriminant of a [`MapPathError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`MapPathError::InvalidPath`].
    InvalidPath,
    /// See [`MapPathError::NotFound`].
    NotFound,
}

impl MapPathError {
    /// Create an invalid path error.
    #[inline]
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        MapPathError::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a not found error.
    #[inline]
    pub fn not_found(path: impl Into<String>, reason: impl Into<String>) -> Self {
        MapPathError::NotFound {
            path: path.into(),
            reason: reason.into(),
        }
    }

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        match self {
            MapPathError::InvalidPath { .. } => ErrorKind::InvalidPath,
            MapPathError::NotFound { .. } => ErrorKind::NotFound,
        }
    }

    #[inline]
    pub fn is_invalid_path(&self) -> bool {
        self.kind() == ErrorKind::InvalidPath
    }

    #[inline]
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// The path the error refers to.
    pub fn path(&self) -> &str {
        match self {
            MapPathError::InvalidPath { path, .. } | MapPathError::NotFound { path, .. } => path,
        }
    }

    /// Human-readable cause.
    pub fn reason(&self) -> &str {
        match self {
            MapPathError::InvalidPath { reason, .. } | MapPathError::NotFound { reason, .. } => {
                reason
            }
        }
    }

    /// Add a path prefix to this error.
    ///
    /// Node-level failures only know the segment they were looking at. The
    /// walker prepends the segments it has already consumed so the error
    /// reports the full location, e.g. `fizz` + `buzz` becomes `fizz.buzz`.
    pub fn with_prefix(self, prefix: &DotPath) -> Self {
        if prefix.is_root() {
            return self;
        }
        match self {
            MapPathError::InvalidPath { path, reason } => MapPathError::InvalidPath {
                path: format!("{prefix}.{path}"),
                reason,
            },
            MapPathError::NotFound { path, reason } => MapPathError::NotFound {
                path: format!("{prefix}.{path}"),
                reason,
            },
        }
    }

    /// Reclassify as `NotFound`, keeping path and reason.
    pub(crate) fn into_not_found(self) -> Self {
        match self {
            MapPathError::InvalidPath { path, reason } => MapPathError::NotFound { path, reason },
            not_found => not_found,
        }
    }
}

/// Get the type name of a JSON value.
#[inline]
pub fn value_type_name(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "sequence",
        serde_json::Value::Object(_) => "mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dot_path;

    #[test]
    fn test_error_display() {
        let err = MapPathError::not_found("users.0.name", "no such key in mapping");
        assert_eq!(
            err.to_string(),
            "path not found users.0.name: no such key in mapping"
        );

        let err = MapPathError::invalid_path("", "path cannot be empty");
        assert!(err.to_string().starts_with("invalid path"));
    }

    #[test]
    fn test_kind_predicates() {
        let invalid = MapPathError::invalid_path("a", "x");
        assert_eq!(invalid.kind(), ErrorKind::InvalidPath);
        assert!(invalid.is_invalid_path());
        assert!(!invalid.is_not_found());

        let missing = MapPathError::not_found("a", "x");
        assert_eq!(missing.kind(), ErrorKind::NotFound);
        assert!(missing.is_not_found());
    }

    #[test]
    fn test_with_prefix() {
        let err =
            MapPathError::invalid_path("buzz", "not an index").with_prefix(&dot_path!("fizz"));
        assert_eq!(err.path(), "fizz.buzz");
        assert_eq!(err.reason(), "not an index");

        // root prefix leaves the path alone
        let err = MapPathError::not_found("fizz", "missing").with_prefix(&DotPath::root());
        assert_eq!(err.path(), "fizz");
    }

    #[test]
    fn test_into_not_found_keeps_details() {
        let err =
            MapPathError::invalid_path("a.b", "cannot descend into string node").into_not_found();
        assert!(err.is_not_found());
        assert_eq!(err.path(), "a.b");
        assert_eq!(err.reason(), "cannot descend into string node");
    }

    #[test]
    fn test_value_type_name() {
        use serde_json::json;

        assert_eq!(value_type_name(&json!(null)), "null");
        assert_eq!(value_type_name(&json!(true)), "boolean");
        assert_eq!(value_type_name(&json!(42)), "number");
        assert_eq!(value_type_name(&json!("hello")), "string");
        assert_eq!(value_type_name(&json!([1, 2, 3])), "sequence");
        assert_eq!(value_type_name(&json!({"a": 1})), "mapping");
    }
}
