//! Allocation parity for table teardown.
//!
//! The global allocator below keeps a per-thread count of live allocations.
//! Each test only looks at its own thread's counter, so tests running in
//! parallel do not disturb each other.

use std::alloc::GlobalAlloc;
use std::alloc::Layout;
use std::alloc::System;
use std::cell::Cell;

use chain_hash::ChainedHashTable;

struct CountingAlloc;

thread_local! {
    static LIVE: Cell<isize> = const { Cell::new(0) };
}

fn adjust(delta: isize) {
    // Ignore threads whose TLS is already torn down.
    let _ = LIVE.try_with(|live| live.set(live.get() + delta));
}

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        // SAFETY: forwarded unchanged to the system allocator.
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            adjust(1);
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        // SAFETY: `ptr` was returned by `alloc` with the same layout.
        unsafe { System.dealloc(ptr, layout) };
        adjust(-1);
    }
}

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

fn live() -> isize {
    LIVE.with(Cell::get)
}

/// Runs `f` and returns how many allocations it leaked on this thread.
fn leaked(f: impl FnOnce()) -> isize {
    let before = live();
    f();
    live() - before
}

fn fill(table: &mut ChainedHashTable, count: usize) {
    for i in 0..count {
        table.insert(&format!("key-{i}"), format!("val-{i}"));
    }
}

#[test]
fn destroy_empty_table() {
    assert_eq!(leaked(|| ChainedHashTable::with_capacity(8).destroy()), 0);
}

#[test]
fn destroy_single_entry() {
    let leak = leaked(|| {
        let mut table = ChainedHashTable::with_capacity(8);
        fill(&mut table, 1);
        table.destroy();
    });
    assert_eq!(leak, 0);
}

#[test]
fn destroy_chained_entries() {
    let leak = leaked(|| {
        let mut table = ChainedHashTable::with_capacity(8);
        fill(&mut table, 500);
        assert_eq!(table.len(), 500);
        table.destroy();
    });
    assert_eq!(leak, 0);
}

#[test]
fn entries_allocate_and_release() {
    let mut table = ChainedHashTable::with_capacity(4);
    let key = String::from("key");
    let value = String::from("value");

    let before = live();
    table.insert(&key, value.as_str());
    let after_insert = live();
    // entry node + key copy + value copy
    assert_eq!(after_insert - before, 3);

    table.insert(&key, value.as_str());
    // overwrite allocates the new value and frees the old one
    assert_eq!(live(), after_insert);

    let removed = table.remove(&key).expect("present");
    drop(removed);
    assert_eq!(live(), before);

    table.destroy();
}

#[test]
fn drop_releases_like_destroy() {
    let leak = leaked(|| {
        let mut table = ChainedHashTable::with_capacity(3);
        fill(&mut table, 100);
        for i in (0..100).step_by(3) {
            table.remove(&format!("key-{i}")).expect("present");
        }
        drop(table);
    });
    assert_eq!(leak, 0);
}

#[test]
fn clear_then_reuse() {
    let mut table = ChainedHashTable::with_capacity(5);
    let baseline = live();

    fill(&mut table, 50);
    table.clear();
    assert_eq!(live(), baseline);

    fill(&mut table, 10);
    table.clear();
    assert_eq!(live(), baseline);
}

#[test]
fn removing_missing_key_frees_error() {
    let mut table = ChainedHashTable::with_capacity(5);
    fill(&mut table, 5);
    let leak = leaked(|| {
        assert!(table.remove("absent").is_err());
        assert!(table.retrieve("absent").is_err());
    });
    assert_eq!(leak, 0);
    assert_eq!(table.len(), 5);
}
