#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod chain;

/// The djb2 string hash and its [`BuildHasher`](core::hash::BuildHasher)
/// adapter.
pub mod djb2;

mod error;

/// A fixed-capacity hash table using separate chaining.
///
/// This module provides [`ChainedHashTable`], which maps string keys to
/// string values and keeps colliding keys in per-bucket linked chains.
pub mod hash_table;

/// Chain-length statistics.
///
/// Available with the `stats` feature.
#[cfg(any(test, feature = "stats"))]
pub mod stats;

pub use chain::ChainIter;
pub use error::Result;
pub use error::TableError;
pub use hash_table::ChainedHashTable;
#[cfg(any(test, feature = "stats"))]
pub use stats::DebugStats;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// A general-purpose hasher builder for tables that do not need djb2
        /// bucket indices.
        pub type FastHashBuilder = foldhash::fast::FixedState;
    } else if #[cfg(feature = "std")] {
        /// A general-purpose hasher builder for tables that do not need djb2
        /// bucket indices.
        pub type FastHashBuilder = std::hash::RandomState;
    }
}

#[cfg(test)]
mod tests {
    #[cfg(any(feature = "foldhash", feature = "std"))]
    #[test]
    fn fast_hash_builder_round_trip() {
        use alloc::format;

        use super::ChainedHashTable;
        use super::FastHashBuilder;

        let mut table = ChainedHashTable::with_capacity_and_hasher(8, FastHashBuilder::default());
        for i in 0..64 {
            table.insert(&format!("key-{i}"), format!("val-{i}"));
        }
        assert_eq!(table.len(), 64);
        for i in 0..64 {
            assert_eq!(
                table.retrieve(&format!("key-{i}")),
                Ok(format!("val-{i}").as_str())
            );
        }
    }
}
