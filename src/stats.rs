use alloc::vec::Vec;

use crate::chain::ChainIter;
use crate::hash_table::ChainedHashTable;

/// Chain-length statistics for a [`ChainedHashTable`].
#[derive(Debug, Clone, PartialEq)]
pub struct DebugStats {
    /// Number of entries currently in the table
    pub populated: usize,
    /// Number of buckets
    pub capacity: usize,
    /// Buckets holding at least one entry
    pub occupied_buckets: usize,
    /// Length of the longest chain
    pub longest_chain: usize,
    /// Entries sharing a bucket with an earlier entry (`populated -
    /// occupied_buckets`)
    pub collisions: usize,
    /// Entries per bucket (populated / capacity)
    pub load_factor: f64,
}

impl DebugStats {
    /// Pretty-print the statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Chained Hash Table Statistics ===");
        println!(
            "Population: {} entries in {} buckets ({:.2} load factor)",
            self.populated, self.capacity, self.load_factor
        );
        println!(
            "Bucket Usage: {}/{} ({:.2}% occupied)",
            self.occupied_buckets,
            self.capacity,
            self.occupied_buckets as f64 / self.capacity as f64 * 100.0
        );
        println!("Collisions: {}", self.collisions);
        println!("Longest Chain: {}", self.longest_chain);
    }
}

impl<S> ChainedHashTable<S> {
    /// Computes a histogram of chain lengths.
    ///
    /// Index `n` of the returned vector holds the number of buckets whose
    /// chain has exactly `n` entries; index 0 counts empty buckets. The
    /// vector is `longest_chain + 1` long.
    pub fn chain_histogram(&self) -> Vec<usize> {
        let mut hist = alloc::vec![0usize; 1];
        for head in &self.buckets {
            let length = ChainIter::new(head).count();
            if length >= hist.len() {
                hist.resize(length + 1, 0);
            }
            hist[length] += 1;
        }
        hist
    }

    /// Returns a snapshot of the table's chain statistics.
    pub fn debug_stats(&self) -> DebugStats {
        let hist = self.chain_histogram();
        let occupied_buckets = self.capacity() - hist[0];

        DebugStats {
            populated: self.populated,
            capacity: self.capacity(),
            occupied_buckets,
            longest_chain: hist.len() - 1,
            collisions: self.populated - occupied_buckets,
            load_factor: self.populated as f64 / self.capacity() as f64,
        }
    }

    /// Pretty-prints the chain-length histogram horizontally using stdout.
    #[cfg(feature = "std")]
    pub fn print_chain_histogram(&self) {
        let hist = self.chain_histogram();
        let max = hist.iter().copied().max().unwrap_or(0);
        let max_bar = 60usize;

        println!("chain histogram ({} entries):", self.populated);
        for (length, &count) in hist.iter().enumerate() {
            let width = if max == 0 { 0 } else { (count * max_bar).div_ceil(max) };
            println!("{:>3} | {} ({})", length, "█".repeat(width), count);
        }
    }
}
