use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hasher;

use log::debug;
use log::trace;

use crate::chain;
use crate::chain::ChainIter;
use crate::chain::Entry;
use crate::chain::Link;
use crate::djb2::BuildDjb2;
use crate::error::Result;
use crate::error::TableError;

/// A fixed-capacity string-to-string hash table using separate chaining.
///
/// The bucket array is sized once at construction and never grows. Keys that
/// hash to the same bucket are kept in a singly linked chain in insertion
/// order; arbitrarily long chains are allowed while other buckets stay empty.
///
/// By default bucket indices are `djb2(key) % capacity` (see
/// [`crate::djb2`]). Any other [`BuildHasher`] can be supplied; the table
/// feeds it the raw key bytes.
///
/// ## Example
///
/// ```rust
/// use chain_hash::ChainedHashTable;
///
/// let mut table = ChainedHashTable::with_capacity(8);
/// table.insert("line_1", "Tiny hash table");
/// table.insert("line_2", "Filled beyond capacity");
///
/// assert_eq!(table.retrieve("line_1"), Ok("Tiny hash table"));
/// assert!(table.retrieve("line_3").unwrap_err().is_not_found());
///
/// table.destroy();
/// ```
pub struct ChainedHashTable<S = BuildDjb2> {
    pub(crate) buckets: Vec<Link>,
    pub(crate) populated: usize,
    hash_builder: S,
}

impl<S> Debug for ChainedHashTable<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<S> Clone for ChainedHashTable<S>
where
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets.iter().map(chain::duplicate).collect(),
            populated: self.populated,
            hash_builder: self.hash_builder.clone(),
        }
    }
}

impl<S> Drop for ChainedHashTable<S> {
    fn drop(&mut self) {
        self.release_all();
    }
}

impl ChainedHashTable<BuildDjb2> {
    /// Creates a table with `capacity` empty buckets, hashing with djb2.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::ChainedHashTable;
    /// #
    /// let table = ChainedHashTable::with_capacity(16);
    /// assert_eq!(table.capacity(), 16);
    /// assert!(table.is_empty());
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, BuildDjb2)
    }

    /// Fallible counterpart of [`with_capacity`](Self::with_capacity).
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::ChainedHashTable;
    /// # use chain_hash::TableError;
    /// #
    /// assert!(ChainedHashTable::try_with_capacity(4).is_ok());
    /// assert_eq!(
    ///     ChainedHashTable::try_with_capacity(0).unwrap_err(),
    ///     TableError::ZeroCapacity
    /// );
    /// ```
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        Self::try_with_capacity_and_hasher(capacity, BuildDjb2)
    }
}

impl<S> ChainedHashTable<S> {
    /// Returns the number of buckets. Fixed for the lifetime of the table.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the number of entries in the table.
    pub fn len(&self) -> usize {
        self.populated
    }

    /// Returns `true` if the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.populated == 0
    }

    /// Returns a reference to the table's hasher builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Returns an iterator over all `(key, value)` pairs.
    ///
    /// Buckets are visited in index order and each chain from head to tail,
    /// so colliding keys come out in insertion order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::ChainedHashTable;
    /// #
    /// let mut table = ChainedHashTable::with_capacity(1);
    /// table.insert("b", "2");
    /// table.insert("a", "1");
    ///
    /// let pairs: Vec<_> = table.iter().collect();
    /// assert_eq!(pairs, [("b", "2"), ("a", "1")]);
    /// ```
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            buckets: self.buckets.iter(),
            chain: None,
            remaining: self.populated,
        }
    }

    /// Returns an iterator over the chain stored in bucket `index`, or `None`
    /// if `index` is not below [`capacity`](Self::capacity).
    pub fn chain(&self, index: usize) -> Option<ChainIter<'_>> {
        self.buckets.get(index).map(ChainIter::new)
    }

    /// Releases every entry while keeping the bucket array.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::ChainedHashTable;
    /// #
    /// let mut table = ChainedHashTable::with_capacity(4);
    /// table.insert("a", "1");
    /// table.clear();
    /// assert!(table.is_empty());
    /// assert_eq!(table.capacity(), 4);
    /// ```
    pub fn clear(&mut self) {
        self.release_all();
    }

    /// Tears the table down: every chain is released entry by entry, then the
    /// bucket array itself.
    ///
    /// Dropping the table does the same; this method only makes the teardown
    /// explicit at the call site.
    pub fn destroy(mut self) {
        let capacity = self.capacity();
        let released = self.release_all();
        debug!("destroyed table: released {released} entries from {capacity} buckets");
    }

    fn release_all(&mut self) -> usize {
        let released: usize = self.buckets.iter_mut().map(chain::release).sum();
        debug_assert_eq!(released, self.populated);
        self.populated = 0;
        released
    }
}

impl<S> ChainedHashTable<S>
where
    S: BuildHasher,
{
    /// Creates a table with `capacity` empty buckets and the given hasher
    /// builder.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        assert!(capacity > 0, "capacity must be greater than zero");

        let mut buckets = Vec::with_capacity(capacity);
        buckets.resize_with(capacity, || None);

        Self {
            buckets,
            populated: 0,
            hash_builder,
        }
    }

    /// Fallible counterpart of
    /// [`with_capacity_and_hasher`](Self::with_capacity_and_hasher).
    ///
    /// Returns [`TableError::ZeroCapacity`] for a zero capacity and
    /// [`TableError::AllocationFailure`] if the bucket array cannot be
    /// allocated.
    pub fn try_with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Result<Self> {
        if capacity == 0 {
            return Err(TableError::ZeroCapacity);
        }

        let mut buckets = Vec::new();
        buckets
            .try_reserve_exact(capacity)
            .map_err(|_| TableError::AllocationFailure { capacity })?;
        buckets.resize_with(capacity, || None);

        Ok(Self {
            buckets,
            populated: 0,
            hash_builder,
        })
    }

    /// Returns the bucket index `key` maps to.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::ChainedHashTable;
    /// # use chain_hash::djb2::bucket_index;
    /// #
    /// let table = ChainedHashTable::with_capacity(8);
    /// assert_eq!(table.bucket_of("key-0"), bucket_index(b"key-0", 8));
    /// ```
    pub fn bucket_of(&self, key: &str) -> usize {
        let mut hasher = self.hash_builder.build_hasher();
        hasher.write(key.as_bytes());
        (hasher.finish() % self.buckets.len() as u64) as usize
    }

    /// Inserts `value` under `key`.
    ///
    /// If the key is already present its value is replaced in place and the
    /// previous value is returned; the entry keeps its chain position.
    /// Otherwise a new entry is appended to the tail of the key's chain and
    /// `None` is returned. Collisions are absorbed by the chain and never
    /// grow the table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::ChainedHashTable;
    /// #
    /// let mut table = ChainedHashTable::with_capacity(8);
    /// assert_eq!(table.insert("key-0", "val-0"), None);
    /// assert_eq!(table.insert("key-0", "new-val-0"), Some("val-0".to_string()));
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn insert(&mut self, key: &str, value: impl Into<String>) -> Option<String> {
        let index = self.bucket_of(key);
        let previous = chain::upsert(&mut self.buckets[index], key, value.into());
        if previous.is_some() {
            trace!("overwrote {key:?} in bucket {index}");
        } else {
            self.populated += 1;
            trace!("appended {key:?} to bucket {index}");
        }
        previous
    }

    /// Returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::KeyNotFound`] if the key's bucket is empty or
    /// its chain holds no matching entry. An entry whose value is the empty
    /// string is found normally.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::ChainedHashTable;
    /// #
    /// let mut table = ChainedHashTable::with_capacity(8);
    /// table.insert("empty", "");
    /// assert_eq!(table.retrieve("empty"), Ok(""));
    /// assert!(table.retrieve("missing").is_err());
    /// ```
    pub fn retrieve(&self, key: &str) -> Result<&str> {
        let index = self.bucket_of(key);
        match chain::find(&self.buckets[index], key) {
            Some(entry) => Ok(entry.value.as_str()),
            None => Err(self.not_found(key, index)),
        }
    }

    /// Returns the value stored under `key`, or `None`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.find(key).map(|entry| entry.value.as_str())
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut String> {
        let index = self.bucket_of(key);
        chain::find_mut(&mut self.buckets[index], key).map(|entry| &mut entry.value)
    }

    /// Returns `true` if the table holds an entry for `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Removes the entry for `key` and returns its value.
    ///
    /// The removed entry's successor takes its place in the chain, whether it
    /// was the head or further down. All other entries keep their relative
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::KeyNotFound`] if no entry matches. The table is
    /// left unchanged in that case.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::ChainedHashTable;
    /// #
    /// let mut table = ChainedHashTable::with_capacity(8);
    /// table.insert("key", "value");
    /// assert_eq!(table.remove("key"), Ok("value".to_string()));
    /// assert!(table.remove("key").unwrap_err().is_not_found());
    /// ```
    pub fn remove(&mut self, key: &str) -> Result<String> {
        let index = self.bucket_of(key);
        match chain::unlink(&mut self.buckets[index], key) {
            Some(entry) => {
                self.populated -= 1;
                trace!("removed {key:?} from bucket {index}");
                Ok(entry.value)
            }
            None => Err(self.not_found(key, index)),
        }
    }

    fn find(&self, key: &str) -> Option<&Entry> {
        chain::find(&self.buckets[self.bucket_of(key)], key)
    }

    fn not_found(&self, key: &str, index: usize) -> TableError {
        if self.buckets[index].is_none() {
            debug!("nothing at bucket {index} for key {key:?}");
        } else {
            debug!("no entry with key {key:?} in bucket {index}");
        }
        TableError::KeyNotFound {
            key: key.into(),
            index,
        }
    }
}

impl<K, V, S> Extend<(K, V)> for ChainedHashTable<S>
where
    K: AsRef<str>,
    V: Into<String>,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key.as_ref(), value);
        }
    }
}

impl<'a, S> IntoIterator for &'a ChainedHashTable<S> {
    type IntoIter = Iter<'a>;
    type Item = (&'a str, &'a str);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over every `(key, value)` pair of a [`ChainedHashTable`].
///
/// Created by [`ChainedHashTable::iter`].
pub struct Iter<'a> {
    buckets: core::slice::Iter<'a, Link>,
    chain: Option<ChainIter<'a>>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(pair) = self.chain.as_mut().and_then(Iterator::next) {
                self.remaining -= 1;
                return Some(pair);
            }
            self.chain = Some(ChainIter::new(self.buckets.next()?));
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl core::iter::FusedIterator for Iter<'_> {}
