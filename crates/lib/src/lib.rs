//!
//! Parambag: a path-addressable container for nested parameters.
//! This library provides [`Bag`], a mapping of string keys to values that can be read and
//! written through dotted paths such as `"database.pool.size"`.
//!
//! ## Core Concepts
//!
//! * **Bags (`bag::Bag`)**: A handle to an insertion-ordered mapping. Cloning a handle shares
//!   the underlying storage; nested mappings read out of a bag are handles into the same storage.
//! * **Values (`bag::Value`)**: The closed set of things a bag can hold: null, booleans, numbers,
//!   text, opaque blobs, lists and nested mappings.
//! * **Paths (`bag::Path`)**: An ordered sequence of keys. Strings are split on `.`; key
//!   sequences are used verbatim so keys may contain dots.
//! * **Deep merge (`Bag::merge`)**: Recursive union of two bags where the incoming side wins on
//!   conflicting leaves.
//!
//! ```
//! use parambag::Bag;
//!
//! let params = Bag::new();
//! params.set("database.pool.size", 8)?.set("database.host", "localhost")?;
//!
//! let database = params.get_as_values("database")?;
//! assert_eq!(database.get("pool.size")?, 8);
//!
//! // Writes through the nested handle land in the original bag.
//! database.set("host", "db.internal")?;
//! assert_eq!(params.get("database.host")?, "db.internal");
//! # Ok::<(), parambag::Error>(())
//! ```

pub mod bag;
pub mod constants;

pub use bag::{Bag, BagError, Entries, IntoPath, Iter, Path, PathError, Value};

/// Re-exported so callers can take explicit shared handles with `bag.handle()`.
pub use handle_trait::Handle;

/// Result type used throughout the Parambag library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Parambag library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structured path errors from path resolution
    #[error(transparent)]
    Path(bag::PathError),

    /// Structured bag errors from reads, writes and serialization
    #[error(transparent)]
    Bag(bag::BagError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Path(_) => "path",
            Error::Bag(_) => "bag",
        }
    }

    /// Check if this error is an invalid path (absent, structured or empty).
    pub fn is_invalid_path(&self) -> bool {
        matches!(self, Error::Path(_))
    }

    /// Check if this error is a write through a non-mapping value.
    pub fn is_not_container(&self) -> bool {
        match self {
            Error::Bag(bag_err) => bag_err.is_not_container(),
            _ => false,
        }
    }

    /// Check if this error is a serialization failure.
    pub fn is_unserializable(&self) -> bool {
        match self {
            Error::Bag(bag_err) => bag_err.is_unserializable(),
            _ => false,
        }
    }

    /// Check if this error is a malformed input document.
    pub fn is_malformed(&self) -> bool {
        match self {
            Error::Bag(bag_err) => bag_err.is_malformed(),
            _ => false,
        }
    }

    /// Check if this error is a type mismatch on a typed read.
    pub fn is_type_error(&self) -> bool {
        match self {
            Error::Bag(bag_err) => bag_err.is_type_error(),
            _ => false,
        }
    }
}
