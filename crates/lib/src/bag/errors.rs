//! Error types for bag operations.
//!
//! Path resolution failures live in [`PathError`](super::PathError); this module covers what
//! can go wrong once a path is known: writing through a leaf, typed reads of the wrong kind,
//! and moving a bag in and out of JSON.

use thiserror::Error;

/// Structured error types for bag operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum BagError {
    /// A `set` walked into a segment that holds a leaf instead of a mapping
    #[error("Cannot set value at path '{path}': '{key}' holds a {found}, not a mapping")]
    NotContainer {
        path: String,
        key: String,
        found: &'static str,
    },

    /// The structure holds a value that JSON cannot represent
    #[error("Parameters cannot be serialized: {reason}")]
    Unserializable { reason: String },

    /// Input text was not a JSON object
    #[error("Malformed parameter document: {reason}")]
    Malformed { reason: String },

    /// Typed read found a value of another kind
    #[error("Parameter type mismatch: expected {expected}, found {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },
}

impl BagError {
    /// Check if this error is a write through a non-mapping value
    pub fn is_not_container(&self) -> bool {
        matches!(self, BagError::NotContainer { .. })
    }

    /// Check if this error is a serialization failure
    pub fn is_unserializable(&self) -> bool {
        matches!(self, BagError::Unserializable { .. })
    }

    /// Check if this error is a malformed input document
    pub fn is_malformed(&self) -> bool {
        matches!(self, BagError::Malformed { .. })
    }

    /// Check if this error is a type mismatch
    pub fn is_type_error(&self) -> bool {
        matches!(self, BagError::TypeMismatch { .. })
    }

    /// Get the path if this is a path-related error
    pub fn path(&self) -> Option<&str> {
        match self {
            BagError::NotContainer { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Get the offending key if this is a key-related error
    pub fn key(&self) -> Option<&str> {
        match self {
            BagError::NotContainer { key, .. } => Some(key),
            _ => None,
        }
    }
}

// Conversion from BagError to the main Error type
impl From<BagError> for crate::Error {
    fn from(err: BagError) -> Self {
        crate::Error::Bag(err)
    }
}
