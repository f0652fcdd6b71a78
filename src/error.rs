use alloc::string::String;

/// Errors reported by [`ChainedHashTable`](crate::ChainedHashTable)
/// operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// No entry in the chain at `index` has the requested key.
    #[error("no entry with key {key:?} (bucket {index})")]
    KeyNotFound {
        /// The key that was looked up.
        key: String,
        /// The bucket the key hashed to.
        index: usize,
    },

    /// The bucket array for a table of `capacity` slots could not be
    /// allocated.
    #[error("failed to allocate {capacity} buckets")]
    AllocationFailure {
        /// The requested number of buckets.
        capacity: usize,
    },

    /// A table was requested with zero buckets.
    #[error("capacity must be greater than zero")]
    ZeroCapacity,
}

impl TableError {
    /// Returns `true` if this is a [`TableError::KeyNotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, TableError::KeyNotFound { .. })
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, TableError>;
