//! Fixed-identity order storage.
//!
//! Backed by [`slab::Slab`] rather than a `Vec<Option<Order>>`: `Slab` already
//! gives the arena contract this module needs for free — O(1) allocate/deallocate,
//! a stable integer key until the slot is freed, and implicit reuse of freed slots
//! without the caller having to track a free list.

use slab::Slab;

use crate::error::BookError;
use crate::order::Order;

/// Stable handle into an [`OrderArena`]. Valid from the moment `allocate` returns
/// it until the matching `deallocate` call; reused handles are never handed out
/// while still live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderHandle(usize);

/// Slab-backed pool of [`Order`] records.
pub struct OrderArena {
    slots: Slab<Order>,
    capacity: Option<usize>,
}

impl OrderArena {
    /// An arena with no hard capacity: `allocate` only fails if the process runs
    /// out of memory.
    pub fn new() -> Self {
        Self::with_capacity_hint(0)
    }

    /// Pre-reserves `hint` slots as a throughput optimization; still unbounded.
    pub fn with_capacity_hint(hint: usize) -> Self {
        Self {
            slots: Slab::with_capacity(hint),
            capacity: None,
        }
    }

    /// An arena that refuses to grow past `limit` live orders, returning
    /// [`BookError::ArenaExhausted`] instead.
    pub fn with_capacity_limit(hint: usize, limit: usize) -> Self {
        Self {
            slots: Slab::with_capacity(hint.min(limit)),
            capacity: Some(limit),
        }
    }

    pub fn allocate(&mut self, order: Order) -> Result<OrderHandle, BookError> {
        if let Some(capacity) = self.capacity {
            if self.slots.len() >= capacity {
                return Err(BookError::ArenaExhausted { capacity });
            }
        }
        Ok(OrderHandle(self.slots.insert(order)))
    }

    pub fn deallocate(&mut self, handle: OrderHandle) -> Order {
        self.slots.remove(handle.0)
    }

    pub fn get(&self, handle: OrderHandle) -> &Order {
        &self.slots[handle.0]
    }

    pub fn get_mut(&mut self, handle: OrderHandle) -> &mut Order {
        &mut self.slots[handle.0]
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Default for OrderArena {
    fn default() -> Self {
        Self::new()
    }
}
