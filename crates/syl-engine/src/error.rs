//! Engine error types.

use thiserror::Error;

/// A raw name that cannot be a person's full name.
///
/// Per-name and recoverable: the caller skips the name and keeps going.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed name {raw:?}: expected at least two name tokens, found {tokens}")]
pub struct MalformedName {
    pub raw: String,
    pub tokens: usize,
}

/// The raw staff directory is inconsistent. Fatal for index construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    /// The same alias appears on two different directory entries.
    #[error("alias {alias:?} is claimed by both {first:?} and {second:?}")]
    AmbiguousAlias {
        alias: String,
        first: String,
        second: String,
    },

    /// A directory entry carries no names at all.
    #[error("directory entry #{position} has no names")]
    EmptyIdentity { position: usize },
}
