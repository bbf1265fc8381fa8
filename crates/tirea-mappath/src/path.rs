//! Dot-delimited path representation.
//!
//! A path such as `"fizz.3.buzz"` is a sequence of segments separated by `.`.
//! Segments are plain strings: whether `3` is a mapping key or a sequence
//! index is decided only when it is resolved against a node.

use crate::error::{MapPathError, MapPathResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The reserved path that addresses the root node itself.
pub const ROOT: &str = ".";

/// A single segment in a dot path.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Seg(String);

impl Seg {
    /// Create a segment from raw text.
    #[inline]
    pub fn new(s: impl Into<String>) -> Self {
        Seg(s.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the segment as a signed sequence index.
    ///
    /// Only an optional `-` followed by ASCII digits counts; `+1` or ` 1`
    /// are plain keys. Negative values count from the end of a sequence.
    #[inline]
    pub fn as_index(&self) -> Option<i64> {
        let digits = self.0.strip_prefix('-').unwrap_or(&self.0);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        self.0.parse().ok()
    }

    /// Parse the segment as a non-negative index.
    ///
    /// This decides whether a missing node is created as a sequence or a mapping.
    #[inline]
    pub fn as_new_index(&self) -> Option<usize> {
        self.as_index().and_then(|i| usize::try_from(i).ok())
    }
}

impl fmt::Display for Seg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Seg {
    fn from(s: String) -> Self {
        Seg(s)
    }
}

impl From<&str> for Seg {
    fn from(s: &str) -> Self {
        Seg(s.to_owned())
    }
}

impl From<usize> for Seg {
    fn from(i: usize) -> Self {
        Seg(i.to_string())
    }
}

impl From<i64> for Seg {
    fn from(i: i64) -> Self {
        Seg(i.to_string())
    }
}

impl From<i32> for Seg {
    fn from(i: i32) -> Self {
        Seg(i.to_string())
    }
}

/// A parsed dot path.
///
/// An empty segment list is the root path, written `"."`.
///
/// # Examples
///
/// ```
/// use tirea_mappath::DotPath;
///
/// let path: DotPath = "users.0.name".parse().unwrap();
/// assert_eq!(path.len(), 3);
/// assert_eq!(path.to_string(), "users.0.name");
///
/// assert!(DotPath::parse(".").unwrap().is_root());
/// assert!(DotPath::parse(".users").is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DotPath(Vec<Seg>);

impl DotPath {
    /// The root path.
    #[inline]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Parse a dot-delimited path string.
    ///
    /// The empty string and any path starting with a dot (other than `"."`
    /// itself) are rejected. Empty segments after the first are kept as
    /// empty mapping keys.
    pub fn parse(raw: &str) -> MapPathResult<Self> {
        if raw.is_empty() {
            return Err(MapPathError::invalid_path(raw, "path cannot be empty"));
        }
        if raw == ROOT {
            return Ok(Self::root());
        }
        if raw.starts_with('.') {
            return Err(MapPathError::invalid_path(raw, "path cannot start with a dot"));
        }
        Ok(Self(raw.split('.').map(Seg::from).collect()))
    }

    /// Create a path from segments without validating them.
    ///
    /// Operations call [`DotPath::validate`] before walking, so a path built
    /// this way is checked at use.
    #[inline]
    pub fn from_segments(segments: Vec<Seg>) -> Self {
        Self(segments)
    }

    /// Append a segment and return self (builder pattern).
    #[inline]
    pub fn seg(mut self, seg: impl Into<Seg>) -> Self {
        self.0.push(seg.into());
        self
    }

    /// Push a segment onto the path (mutating).
    #[inline]
    pub fn push(&mut self, seg: impl Into<Seg>) {
        self.0.push(seg.into());
    }

    /// Check that the path could have come out of [`DotPath::parse`].
    pub fn validate(&self) -> MapPathResult<()> {
        if self.0.first().is_some_and(|seg| seg.as_str().is_empty()) {
            return Err(MapPathError::invalid_path(
                self.to_string(),
                "path cannot start with a dot",
            ));
        }
        if let Some(seg) = self.0.iter().find(|seg| seg.as_str().contains('.')) {
            return Err(MapPathError::invalid_path(
                self.to_string(),
                format!("segment `{seg}` cannot contain a dot"),
            ));
        }
        Ok(())
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn segments(&self) -> &[Seg] {
        &self.0
    }

    /// The first `len` segments as a new path.
    #[inline]
    pub fn prefix(&self, len: usize) -> DotPath {
        DotPath(self.0[..len.min(self.0.len())].to_vec())
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Seg> {
        self.0.iter()
    }
}

impl fmt::Display for DotPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some((first, rest)) = self.0.split_first() else {
            return f.write_str(ROOT);
        };
        write!(f, "{first}")?;
        for seg in rest {
            write!(f, ".{seg}")?;
        }
        Ok(())
    }
}

impl FromStr for DotPath {
    type Err = MapPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DotPath::parse(s)
    }
}

impl FromIterator<Seg> for DotPath {
    fn from_iter<I: IntoIterator<Item = Seg>>(iter: I) -> Self {
        DotPath(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a DotPath {
    type Item = &'a Seg;
    type IntoIter = std::slice::Iter<'a, Seg>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::ops::Index<usize> for DotPath {
    type Output = Seg;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl Serialize for DotPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DotPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DotPath::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Construct a `DotPath` from a sequence of segments.
///
/// # Examples
///
/// ```
/// use tirea_mappath::dot_path;
///
/// let p = dot_path!("fizz", 3, "buzz");
/// assert_eq!(p.to_string(), "fizz.3.buzz");
///
/// let root = dot_path!();
/// assert!(root.is_root());
/// ```
#[macro_export]
macro_rules! dot_path {
    () => {
        $crate::DotPath::root()
    };
    ($($seg:expr),+ $(,)?) => {{
        let mut p = $crate::DotPath::root();
        $(
            p.push($crate::Seg::from($seg));
        )+
        p
    }};
}
