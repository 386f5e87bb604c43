//! Maps external `order_id`s onto arena handles so cancel/reduce/replace are O(1)
//! instead of a ladder scan.

use std::collections::HashMap;

use crate::arena::OrderHandle;
use crate::order::OrderId;

#[derive(Default)]
pub struct OrderRegistry {
    handles: HashMap<OrderId, OrderHandle>,
}

impl OrderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` without mutating anything if `order_id` is already live.
    pub fn insert(&mut self, order_id: OrderId, handle: OrderHandle) -> bool {
        use std::collections::hash_map::Entry;
        match self.handles.entry(order_id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(handle);
                true
            }
        }
    }

    pub fn get(&self, order_id: OrderId) -> Option<OrderHandle> {
        self.handles.get(&order_id).copied()
    }

    pub fn contains(&self, order_id: OrderId) -> bool {
        self.handles.contains_key(&order_id)
    }

    pub fn remove(&mut self, order_id: OrderId) -> Option<OrderHandle> {
        self.handles.remove(&order_id)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}
