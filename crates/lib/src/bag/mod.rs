//! Path-addressable parameter bags.
//!
//! This module provides [`Bag`], the main entry point of the crate. A bag is a handle to an
//! insertion-ordered mapping of string keys to [`Value`]s that can be read and written by
//! [`Path`].
//!
//! # Handles and sharing
//!
//! A `Bag` is a reference-counted handle. Cloning it (or calling [`Handle::handle`]) yields a
//! second handle on the same storage, and nested mappings read out of a bag are handles into
//! that same storage:
//!
//! ```
//! use parambag::Bag;
//!
//! let params = Bag::new();
//! params.set("a.b", 1)?;
//!
//! let a = params.get_as_values("a")?;
//! a.set("b", 2)?;
//! assert_eq!(params.get("a.b")?, 2);
//! # Ok::<(), parambag::Error>(())
//! ```
//!
//! Values written *into* a bag are copied in (see [`Value::detached`]), so storing a bag under
//! a key never aliases the handle that was passed in.
//!
//! # Reads
//!
//! - [`Bag::get`] / [`Bag::get_or`]: lenient lookup with default substitution. A stored null is
//!   treated the same as a missing key.
//! - [`Bag::has`]: `get(path)` is not null.
//! - [`Bag::lookup`] / [`Bag::contains`]: strict lookup that reports a stored null as present.
//! - [`Bag::get_as_values`]: always returns a bag, for chaining through uncertain paths.
//!
//! # Writes
//!
//! - [`Bag::set`]: creates intermediate mappings as needed and refuses to write through a leaf.
//! - [`Bag::merge`]: recursive deep merge where the incoming side wins on conflicts.

use std::{
    cell::{Ref, RefCell, RefMut},
    fmt,
    rc::Rc,
};

use handle_trait::Handle;
use indexmap::IndexMap;

use crate::Result;

// Submodules
pub mod errors;
pub mod iter;
pub mod json;
pub mod path;
pub mod value;

// Convenience re-exports for core Bag types
pub use errors::BagError;
pub use iter::Iter;
pub use path::{IntoPath, Path, PathError};
pub use value::Value;

/// The insertion-ordered mapping held by every bag.
pub type Entries = IndexMap<String, Value>;

/// A path-addressable container of nested parameters.
///
/// `Bag` is a cheap handle; every clone refers to the same storage. Use [`Bag::deep_clone`]
/// for an independent copy.
///
/// # Examples
///
/// ## Basic Operations
/// ```
/// # use parambag::Bag;
/// let params = Bag::new();
/// params.set("name", "Alice")?.set("limits.connections", 10)?;
///
/// assert_eq!(params.get("name")?, "Alice");
/// assert_eq!(params.get("limits.connections")?, 10);
/// assert_eq!(params.get_or("limits.timeout", 30)?, 30);
/// # Ok::<(), parambag::Error>(())
/// ```
///
/// ## Merging
/// ```
/// # use parambag::Bag;
/// let defaults = Bag::from_json(r#"{"db": {"host": "localhost", "port": 5432}}"#)?;
/// let overrides = Bag::from_json(r#"{"db": {"host": "db.internal"}}"#)?;
///
/// defaults.merge(&overrides);
/// assert_eq!(defaults.get("db.host")?, "db.internal");
/// assert_eq!(defaults.get("db.port")?, 5432);
/// # Ok::<(), parambag::Error>(())
/// ```
#[derive(Clone, Default, Handle)]
pub struct Bag {
    entries: Rc<RefCell<Entries>>,
}

impl Bag {
    /// Creates a new empty bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a bag that takes ownership of `parameters`.
    pub fn create(parameters: Entries) -> Self {
        Self {
            entries: Rc::new(RefCell::new(parameters)),
        }
    }

    /// Returns true if both handles refer to the same storage.
    pub fn shares_storage(&self, other: &Bag) -> bool {
        Rc::ptr_eq(&self.entries, &other.entries)
    }

    /// Returns an independent copy of this bag, including every nested mapping.
    pub fn deep_clone(&self) -> Bag {
        self.entries
            .borrow()
            .iter()
            .map(|(key, value)| (key.clone(), value.detached()))
            .collect::<Entries>()
            .into()
    }

    /// Borrows the raw underlying mapping.
    ///
    /// No copy is made; nested mappings in the result are handles into this bag.
    ///
    /// # Panics
    ///
    /// Panics if the mapping is currently borrowed mutably through [`Bag::all_mut`].
    pub fn all(&self) -> Ref<'_, Entries> {
        self.entries.borrow()
    }

    /// Mutably borrows the raw underlying mapping.
    ///
    /// Changes are visible through every handle on this bag. Values inserted here bypass the
    /// copy-in performed by [`Bag::set`].
    ///
    /// # Panics
    ///
    /// Panics if the mapping is currently borrowed.
    pub fn all_mut(&self) -> RefMut<'_, Entries> {
        self.entries.borrow_mut()
    }

    /// Returns the top-level keys in insertion order.
    pub fn keys(&self) -> Vec<String> {
        self.entries.borrow().keys().cloned().collect()
    }

    /// Returns the number of top-level entries.
    pub fn count(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Returns the number of top-level entries.
    pub fn len(&self) -> usize {
        self.count()
    }

    /// Returns true if the bag has no top-level entries.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Returns a cursor over the top-level entries, starting at the first one.
    ///
    /// Nested mappings are yielded as handles, the same way [`Bag::get`] returns them.
    pub fn iter(&self) -> Iter {
        Iter::new(self.handle())
    }

    /// Gets the value at `path`, or [`Value::Null`] when nothing is there.
    ///
    /// See [`Bag::get_or`].
    pub fn get(&self, path: impl IntoPath) -> Result<Value> {
        self.get_or(path, Value::Null)
    }

    /// Gets the value at `path`, or `default` when any key along the path is missing.
    ///
    /// The walk descends through nested mappings and, for numeric keys, into lists. A key whose
    /// stored value is null counts as missing. Nested mappings are returned as [`Value::Map`]
    /// handles sharing storage with this bag. An empty path returns a handle on this bag.
    ///
    /// # Errors
    ///
    /// Returns [`PathError`] if the path cannot be resolved.
    ///
    /// # Examples
    ///
    /// ```
    /// # use parambag::Bag;
    /// let params = Bag::from_json(r#"{"servers": [{"host": "a"}, {"host": "b"}]}"#)?;
    /// assert_eq!(params.get("servers.1.host")?, "b");
    /// assert_eq!(params.get_or("servers.2.host", "none")?, "none");
    /// # Ok::<(), parambag::Error>(())
    /// ```
    pub fn get_or(&self, path: impl IntoPath, default: impl Into<Value>) -> Result<Value> {
        let path = path.into_path()?;
        Ok(self
            .walk(&path, true)
            .unwrap_or_else(|| default.into()))
    }

    /// Gets the value at `path` converted to `T`.
    ///
    /// Returns `Ok(None)` when [`Bag::get`] would return null.
    ///
    /// # Errors
    ///
    /// Returns [`PathError`] for an invalid path and [`BagError::TypeMismatch`] when the value
    /// is of another kind.
    pub fn get_as<T>(&self, path: impl IntoPath) -> Result<Option<T>>
    where
        T: TryFrom<Value, Error = BagError>,
    {
        match self.get(path)? {
            Value::Null => Ok(None),
            value => Ok(Some(T::try_from(value)?)),
        }
    }

    /// Gets the mapping at `path` as a bag, or an empty bag.
    ///
    /// When the path resolves to a mapping the result shares storage with this bag. When it is
    /// missing, null, or holds a leaf, a fresh empty bag is returned, which makes this safe for
    /// chaining through paths that may not exist.
    pub fn get_as_values(&self, path: impl IntoPath) -> Result<Bag> {
        Ok(self.get_or(path, Bag::new())?.into_map().unwrap_or_default())
    }

    /// Returns true if `get(path)` is not null.
    ///
    /// A key that exists but holds [`Value::Null`] reports `false`, exactly like a key that was
    /// never set. Use [`Bag::contains`] to tell the two apart.
    pub fn has(&self, path: impl IntoPath) -> Result<bool> {
        Ok(!self.get(path)?.is_null())
    }

    /// Gets the value stored at `path` without default substitution.
    ///
    /// Unlike [`Bag::get`], a stored null is returned as `Some(Value::Null)`.
    pub fn lookup(&self, path: impl IntoPath) -> Result<Option<Value>> {
        let path = path.into_path()?;
        Ok(self.walk(&path, false))
    }

    /// Returns true if a value, including null, is stored at `path`.
    pub fn contains(&self, path: impl IntoPath) -> Result<bool> {
        Ok(self.lookup(path)?.is_some())
    }

    /// Sets `value` at `path`, creating intermediate mappings as needed.
    ///
    /// Missing or null intermediate keys are replaced by empty mappings. The write is atomic:
    /// the path is checked before anything is created, so a failed `set` leaves the bag
    /// untouched. Mapping values are copied in rather than aliased.
    ///
    /// # Errors
    ///
    /// - [`PathError`] if the path cannot be resolved or has no keys.
    /// - [`BagError::NotContainer`] if a key along the path holds a leaf or list.
    ///
    /// # Examples
    ///
    /// ```
    /// # use parambag::Bag;
    /// let params = Bag::new();
    /// params.set("a", 1)?;
    ///
    /// let err = params.set("a.b", 2).unwrap_err();
    /// assert!(err.is_not_container());
    /// assert_eq!(params.get("a")?, 1);
    /// # Ok::<(), parambag::Error>(())
    /// ```
    pub fn set(&self, path: impl IntoPath, value: impl Into<Value>) -> Result<&Self> {
        let path = path.into_path()?;
        let Some((last, parents)) = path.split_last() else {
            return Err(PathError::Empty { operation: "set" }.into());
        };

        self.check_writable(&path, parents)?;
        let value = value.into().detached();

        tracing::trace!(path = %path, kind = value.type_name(), "Setting parameter");
        let target = self.descend_creating(parents);
        target.entries.borrow_mut().insert(last.clone(), value);
        Ok(self)
    }

    /// Removes the value at `path`, returning it if it was present.
    ///
    /// Remaining entries keep their relative order.
    pub fn remove(&self, path: impl IntoPath) -> Result<Option<Value>> {
        let path = path.into_path()?;
        let Some((last, parents)) = path.split_last() else {
            return Err(PathError::Empty {
                operation: "remove",
            }
            .into());
        };

        let mut current = self.handle();
        for key in parents {
            let next = match current.entries.borrow().get(key) {
                Some(Value::Map(child)) => child.handle(),
                _ => return Ok(None),
            };
            current = next;
        }

        let removed = current.entries.borrow_mut().shift_remove(last.as_str());
        Ok(removed)
    }

    /// Removes every top-level entry.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    /// Deep-merges `other` into this bag in place.
    ///
    /// For each key of `other`: when both sides hold mappings they are merged recursively,
    /// otherwise the incoming value replaces the existing one. New keys are appended in
    /// `other`'s order; existing keys keep their position. `other` is copied first, so merging a
    /// bag with itself or with one of its own handles is allowed.
    pub fn merge(&self, other: &Bag) -> &Self {
        let incoming = other.deep_clone();
        tracing::debug!(keys = incoming.count(), "Merging parameters");
        merge_into(self, incoming);
        self
    }

    /// Walks `path` from this bag. With `skip_null`, a stored null ends the walk as missing.
    fn walk(&self, path: &Path, skip_null: bool) -> Option<Value> {
        let mut current = Value::Map(self.handle());

        for key in path.components() {
            let next = match &current {
                Value::Map(bag) => bag.entries.borrow().get(key).cloned(),
                Value::List(items) => key
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| items.get(index).cloned()),
                _ => None,
            };

            match next {
                Some(Value::Null) if skip_null => return None,
                Some(value) => current = value,
                None => return None,
            }
        }

        Some(current)
    }

    /// Checks that every parent key is missing, null, or a mapping.
    fn check_writable(&self, path: &Path, parents: &[String]) -> Result<()> {
        let mut current = self.handle();

        for key in parents {
            let next = match current.entries.borrow().get(key) {
                None | Some(Value::Null) => return Ok(()),
                Some(Value::Map(child)) => child.handle(),
                Some(other) => {
                    tracing::debug!(
                        path = %path,
                        key = %key,
                        found = other.type_name(),
                        "Refusing to write through a leaf"
                    );
                    return Err(BagError::NotContainer {
                        path: path.to_string(),
                        key: key.clone(),
                        found: other.type_name(),
                    }
                    .into());
                }
            };
            current = next;
        }

        Ok(())
    }

    /// Descends through `parents`, turning missing and null slots into empty mappings.
    fn descend_creating(&self, parents: &[String]) -> Bag {
        let mut current = self.handle();

        for key in parents {
            let next = {
                let mut entries = current.entries.borrow_mut();
                let slot = entries.entry(key.clone()).or_insert(Value::Null);
                match slot {
                    Value::Map(child) => child.handle(),
                    _ => {
                        let child = Bag::new();
                        *slot = Value::Map(child.handle());
                        child
                    }
                }
            };
            current = next;
        }

        current
    }

    /// Takes the entries out of a bag that no other handle refers to.
    fn into_entries(self) -> Entries {
        std::mem::take(&mut *self.entries.borrow_mut())
    }
}

/// Merges `incoming` (already detached) into `target`.
fn merge_into(target: &Bag, incoming: Bag) {
    for (key, value) in incoming.into_entries() {
        let existing = match target.entries.borrow().get(&key) {
            Some(Value::Map(child)) => Some(child.handle()),
            _ => None,
        };

        match (existing, value) {
            (Some(child), Value::Map(nested)) => merge_into(&child, nested),
            (_, value) => {
                target.entries.borrow_mut().insert(key, value);
            }
        }
    }
}

impl PartialEq for Bag {
    /// Structural equality: same keys mapped to equal values, ignoring order.
    fn eq(&self, other: &Self) -> bool {
        self.shares_storage(other) || *self.entries.borrow() == *other.entries.borrow()
    }
}

impl fmt::Debug for Bag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.borrow().iter()).finish()
    }
}

impl fmt::Display for Bag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.entries.borrow().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        write!(f, "}}")
    }
}

impl From<Entries> for Bag {
    fn from(parameters: Entries) -> Self {
        Bag::create(parameters)
    }
}

impl<K, V> FromIterator<(K, V)> for Bag
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        iter.into_iter()
            .map(|(key, value)| (key.into(), value.into().detached()))
            .collect::<Entries>()
            .into()
    }
}

impl IntoIterator for &Bag {
    type Item = (String, Value);
    type IntoIter = Iter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// Builder pattern methods
impl Bag {
    /// Builder method to set a value and return self
    ///
    /// # Errors
    ///
    /// Fails the same way as [`Bag::set`].
    pub fn with(self, path: impl IntoPath, value: impl Into<Value>) -> Result<Self> {
        self.set(path, value)?;
        Ok(self)
    }
}
