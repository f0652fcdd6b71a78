//! Singly linked bucket chains.
//!
//! Every bucket slot is a [`Link`]: either empty or the owning head of a
//! chain. Each entry owns its successor, so removing a node is a matter of
//! moving its `next` link into whichever link pointed at it. The head slot
//! and an entry's `next` field have the same type, which lets a single
//! cursor over `&mut Link` handle head and mid-chain removal alike.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::string::ToString;

/// An owning link to the next entry of a chain, `None` at the tail.
pub(crate) type Link = Option<Box<Entry>>;

/// One key/value binding and its position in a collision chain.
#[derive(Debug)]
pub(crate) struct Entry {
    pub(crate) key: String,
    pub(crate) value: String,
    pub(crate) next: Link,
}

impl Entry {
    fn new(key: &str, value: String) -> Self {
        Self {
            key: key.to_string(),
            value,
            next: None,
        }
    }
}

/// Returns the first entry of the chain whose key equals `key`.
pub(crate) fn find<'a>(head: &'a Link, key: &str) -> Option<&'a Entry> {
    let mut cursor = head.as_deref();
    while let Some(entry) = cursor {
        if entry.key == key {
            return Some(entry);
        }
        cursor = entry.next.as_deref();
    }
    None
}

/// Mutable counterpart of [`find`].
pub(crate) fn find_mut<'a>(head: &'a mut Link, key: &str) -> Option<&'a mut Entry> {
    let mut cursor = head.as_deref_mut();
    while let Some(entry) = cursor {
        if entry.key == key {
            return Some(entry);
        }
        cursor = entry.next.as_deref_mut();
    }
    None
}

/// Overwrites the value of `key` in place, or appends a new tail entry.
///
/// Returns the previous value when the key was already present. An existing
/// entry keeps its position and no allocation happens in that case.
pub(crate) fn upsert(head: &mut Link, key: &str, value: String) -> Option<String> {
    let mut link = head;
    loop {
        match link {
            Some(entry) if entry.key == key => {
                return Some(core::mem::replace(&mut entry.value, value));
            }
            Some(entry) => link = &mut entry.next,
            None => {
                *link = Some(Box::new(Entry::new(key, value)));
                return None;
            }
        }
    }
}

/// Detaches the entry holding `key`, splicing its successor into the link
/// that pointed at it.
///
/// The returned entry has no successor. Relative order of the remaining
/// entries is unchanged.
pub(crate) fn unlink(head: &mut Link, key: &str) -> Link {
    let mut link = head;
    loop {
        match link {
            None => return None,
            Some(entry) if entry.key == key => {
                let next = entry.next.take();
                return core::mem::replace(link, next);
            }
            Some(entry) => link = &mut entry.next,
        }
    }
}

/// Releases every entry of the chain front to back and returns how many were
/// released. The slot is left empty.
///
/// Iterative so that long chains do not recurse through `Box` drops.
pub(crate) fn release(head: &mut Link) -> usize {
    let mut released = 0;
    let mut cursor = head.take();
    while let Some(mut entry) = cursor {
        cursor = entry.next.take();
        released += 1;
    }
    released
}

/// Deep-copies a chain, preserving order.
pub(crate) fn duplicate(head: &Link) -> Link {
    let mut copy: Link = None;
    let mut tail = &mut copy;
    for (key, value) in ChainIter::new(head) {
        tail = &mut tail.insert(Box::new(Entry::new(key, value.to_string()))).next;
    }
    copy
}

/// Iterator over the `(key, value)` pairs of one chain, head first.
#[derive(Clone)]
pub struct ChainIter<'a> {
    next: Option<&'a Entry>,
}

impl<'a> ChainIter<'a> {
    pub(crate) fn new(head: &'a Link) -> Self {
        Self {
            next: head.as_deref(),
        }
    }
}

impl<'a> Iterator for ChainIter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.next?;
        self.next = entry.next.as_deref();
        Some((entry.key.as_str(), entry.value.as_str()))
    }
}

impl core::iter::FusedIterator for ChainIter<'_> {}
