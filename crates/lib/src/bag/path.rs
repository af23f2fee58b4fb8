//! Path types for addressing values inside a [`Bag`](super::Bag).
//!
//! A [`Path`] is an ordered sequence of keys. It can be written two ways:
//!
//! - a string whose keys are joined by `.` (`"user.profile.name"`)
//! - an explicit key sequence (`["user", "profile", "name"]`), which is the only way to
//!   address keys that themselves contain a `.`
//!
//! Both forms resolve to the same [`Path`]. Every bag operation accepts anything implementing
//! [`IntoPath`], so resolution failures surface from the operation itself.
//!
//! # Usage
//!
//! ```rust
//! use parambag::{Path, path};
//! use std::str::FromStr;
//!
//! let dotted = Path::from_str("user.profile.name").unwrap();
//! let keyed = path!("user", "profile", "name");
//! assert_eq!(dotted, keyed);
//!
//! // Keys keep their dots when given as a sequence.
//! let literal = path!("hosts", "db.internal");
//! assert_eq!(literal.len(), 2);
//! ```

use std::{fmt, str::FromStr};

use thiserror::Error;

use super::Value;
use crate::constants::{EMPTY_PATH, SEPARATOR};

/// Error type for path resolution failures.
#[non_exhaustive]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PathError {
    /// The path was absent (`None` or a null value).
    #[error("Invalid path: parameter paths must not be absent")]
    Absent,

    /// The path was a structured value rather than a string or key sequence.
    #[error("Invalid path: parameter paths must not be structured values, found {found}")]
    Structured { found: &'static str },

    /// A key sequence contained an element that cannot act as a key.
    #[error("Invalid path: key {index} is a {found}, expected a scalar")]
    InvalidKey { index: usize, found: &'static str },

    /// The operation needs at least one key.
    #[error("Invalid path: {operation} requires at least one key")]
    Empty { operation: &'static str },
}

impl PathError {
    /// Check if the path was absent
    pub fn is_absent(&self) -> bool {
        matches!(self, PathError::Absent)
    }

    /// Check if the path was a structured value or contained one
    pub fn is_structured(&self) -> bool {
        matches!(
            self,
            PathError::Structured { .. } | PathError::InvalidKey { .. }
        )
    }

    /// Check if the path had no keys where one was required
    pub fn is_empty(&self) -> bool {
        matches!(self, PathError::Empty { .. })
    }
}

impl From<PathError> for crate::Error {
    fn from(err: PathError) -> Self {
        crate::Error::Path(err)
    }
}

/// An owned, resolved path.
///
/// Keys are stored exactly as resolved; empty keys produced by consecutive separators are kept
/// and matched literally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    keys: Vec<String>,
}

impl Path {
    /// Creates a new path with no keys.
    ///
    /// Reads through an empty path address the whole bag; writes reject it.
    pub fn new() -> Self {
        Self { keys: Vec::new() }
    }

    /// Splits a dotted string into keys.
    ///
    /// ```rust
    /// # use parambag::Path;
    /// let path = Path::parse("a..b");
    /// assert_eq!(path.keys(), ["a", "", "b"]);
    /// ```
    pub fn parse(input: &str) -> Self {
        Self {
            keys: input.split(SEPARATOR).map(str::to_owned).collect(),
        }
    }

    /// Adds a key to the end of this path, taken literally.
    pub fn push(mut self, key: impl Into<String>) -> Self {
        self.keys.push(key.into());
        self
    }

    /// Appends the keys of another path.
    pub fn join(mut self, other: &Path) -> Self {
        self.keys.extend(other.keys.iter().cloned());
        self
    }

    /// Returns the keys of this path.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Returns an iterator over the keys as string slices.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// Returns the number of keys in the path.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if the path has no keys.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns the last key and the keys leading up to it.
    pub fn split_last(&self) -> Option<(&String, &[String])> {
        self.keys.split_last()
    }

    /// Returns the path without its last key, or `None` if empty.
    pub fn parent(&self) -> Option<Path> {
        self.split_last().map(|(_, parents)| Path {
            keys: parents.to_vec(),
        })
    }

    /// Returns the last key, or `None` if empty.
    pub fn last(&self) -> Option<&str> {
        self.keys.last().map(String::as_str)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.keys.is_empty() {
            return f.write_str(EMPTY_PATH);
        }
        for (i, key) in self.keys.iter().enumerate() {
            if i > 0 {
                write!(f, "{SEPARATOR}")?;
            }
            f.write_str(key)?;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl<K: Into<String>> FromIterator<K> for Path {
    fn from_iter<T: IntoIterator<Item = K>>(iter: T) -> Self {
        Self {
            keys: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Conversion into a resolved [`Path`].
///
/// Implemented for strings (split on `.`), key sequences (taken verbatim), [`Option`] (where
/// `None` is the absent path) and dynamic [`Value`]s.
pub trait IntoPath {
    /// Resolves `self` into a path.
    fn into_path(self) -> Result<Path, PathError>;
}

impl IntoPath for Path {
    fn into_path(self) -> Result<Path, PathError> {
        Ok(self)
    }
}

impl IntoPath for &Path {
    fn into_path(self) -> Result<Path, PathError> {
        Ok(self.clone())
    }
}

impl IntoPath for &str {
    fn into_path(self) -> Result<Path, PathError> {
        Ok(Path::parse(self))
    }
}

impl IntoPath for String {
    fn into_path(self) -> Result<Path, PathError> {
        Ok(Path::parse(&self))
    }
}

impl IntoPath for &String {
    fn into_path(self) -> Result<Path, PathError> {
        Ok(Path::parse(self))
    }
}

impl<K: AsRef<str>> IntoPath for &[K] {
    fn into_path(self) -> Result<Path, PathError> {
        Ok(self.iter().map(|key| key.as_ref().to_owned()).collect())
    }
}

impl<K: AsRef<str>, const N: usize> IntoPath for [K; N] {
    fn into_path(self) -> Result<Path, PathError> {
        Ok(self.iter().map(|key| key.as_ref().to_owned()).collect())
    }
}

impl<K: AsRef<str>> IntoPath for Vec<K> {
    fn into_path(self) -> Result<Path, PathError> {
        self.as_slice().into_path()
    }
}

impl<T: IntoPath> IntoPath for Option<T> {
    fn into_path(self) -> Result<Path, PathError> {
        self.ok_or(PathError::Absent)?.into_path()
    }
}

impl IntoPath for &Value {
    fn into_path(self) -> Result<Path, PathError> {
        match self {
            Value::Null => Err(PathError::Absent),
            Value::Text(text) => Ok(Path::parse(text)),
            Value::List(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    scalar_key(item).ok_or(PathError::InvalidKey {
                        index,
                        found: item.type_name(),
                    })
                })
                .collect(),
            Value::Map(_) | Value::Blob(_) => Err(PathError::Structured {
                found: self.type_name(),
            }),
            scalar => Ok(scalar_key(scalar).into_iter().collect()),
        }
    }
}

impl IntoPath for Value {
    fn into_path(self) -> Result<Path, PathError> {
        (&self).into_path()
    }
}

/// Key form of a scalar value, `None` for anything that cannot name a key.
fn scalar_key(value: &Value) -> Option<String> {
    match value {
        Value::Text(text) => Some(text.clone()),
        Value::Int(n) => Some(n.to_string()),
        Value::Float(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Blob(_) | Value::List(_) | Value::Map(_) => None,
    }
}

/// Constructs a [`Path`] from explicit keys.
///
/// Each argument is one key, taken literally, so keys may contain `.`.
///
/// # Syntax
///
/// - `path!()` - Empty path
/// - `path!("user", "profile")` - Literal keys
/// - `path!(base, "profile")` - Mix runtime values and literals
///
/// # Examples
///
/// ```rust
/// # use parambag::path;
/// let path = path!("servers", "db.internal", "port");
/// assert_eq!(path.keys(), ["servers", "db.internal", "port"]);
///
/// let empty = path!();
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! path {
    () => {
        $crate::bag::Path::new()
    };

    ($($key:expr),+ $(,)?) => {{
        let path = $crate::bag::Path::new();
        $(
            let path = path.push($key.to_string());
        )+
        path
    }};
}
