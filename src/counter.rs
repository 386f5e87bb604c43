//! Process-wide trade counter.
//!
//! The original engine keeps this as a `static` member of `LimitOrderBook` shared
//! across every instrument's book. Since the core rules out any concurrent access
//! by design (see the crate-level docs on `book`), a `thread_local` gives the same
//! "one counter for the whole process" semantics without reaching for an atomic.

use std::cell::Cell;

thread_local! {
    static TOTAL_TRADES: Cell<u64> = const { Cell::new(0) };
}

pub fn increment() -> u64 {
    TOTAL_TRADES.with(|c| {
        let next = c.get() + 1;
        c.set(next);
        next
    })
}

pub fn total() -> u64 {
    TOTAL_TRADES.with(Cell::get)
}

pub fn reset() {
    TOTAL_TRADES.with(|c| c.set(0));
}
