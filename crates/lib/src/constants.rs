//! Constants used throughout the Parambag library.

/// Separator between keys in a string path.
pub const SEPARATOR: char = '.';

/// Display form of a path with no keys.
pub const EMPTY_PATH: &str = "(empty path)";
