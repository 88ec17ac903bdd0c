//! Error types for the nested list engine.

use std::path::PathBuf;

use crate::node::{GroupId, ItemId, RowKind};

/// Result type alias for nested list operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or querying a nested list.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A row position outside `[0, size)` was queried.
    #[error("Row position {position} is out of range (size {size})")]
    IndexOutOfRange { position: usize, size: usize },

    /// A row was queried as the wrong kind (e.g. an item row as a group).
    #[error("Row {position} has the wrong kind (expected {expected})")]
    RowKind { position: usize, expected: RowKind },

    /// The tree is nested deeper than the configured limit.
    #[error("Group {group} exceeds the maximum nesting depth of {limit}")]
    RecursionLimit { group: GroupId, limit: usize },

    /// A group appears on its own ancestor path.
    #[error("Group {group} is its own ancestor")]
    Cycle { group: GroupId },

    /// A group is reachable from more than one parent.
    #[error("Group {group} appears more than once in the tree")]
    DuplicateGroup { group: GroupId },

    /// An item id is listed under more than one group, or twice in one.
    #[error("Item {item} appears more than once in the tree")]
    DuplicateItem { item: ItemId },

    /// Configuration file I/O error.
    #[error("Failed to read configuration '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration parse error.
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

impl Error {
    /// Create an out-of-range error.
    pub fn out_of_range(position: usize, size: usize) -> Self {
        Self::IndexOutOfRange { position, size }
    }

    /// Create a wrong-row-kind error.
    pub fn row_kind(position: usize, expected: RowKind) -> Self {
        Self::RowKind { position, expected }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` for errors raised while flattening a malformed tree.
    ///
    /// A structural error aborts the rebuild and leaves the previously built
    /// sequences in place.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::RecursionLimit { .. }
                | Self::Cycle { .. }
                | Self::DuplicateGroup { .. }
                | Self::DuplicateItem { .. }
        )
    }
}
