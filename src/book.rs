//! The façade a caller actually drives: one [`OrderBook`] per instrument,
//! assembling the arena, ladder, registry, trade counter and trade sink behind
//! `submit_limit`/`cancel`/`reduce`/`replace`/`best_bid`/`best_ask`.
//!
//! The core is deliberately single-threaded: no lock, atomic, or concurrent
//! collection appears anywhere below this module. An `OrderBook` is driven from
//! exactly one thread at a time, matching the original engine's design.

use tracing::trace;

use crate::arena::{OrderArena, OrderHandle};
use crate::counter;
use crate::error::BookError;
use crate::ladder::PriceLadder;
use crate::matching;
use crate::order::{Order, OrderId, Side};
use crate::registry::OrderRegistry;
use crate::trade::{TradeEvent, TradeSink};

/// Snapshot of one side's best price and resting quantity. `valid` is `false`
/// when that side of the book is empty, in which case `price`/`qty` are zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestLevel {
    pub price: f64,
    pub qty: i64,
    pub valid: bool,
}

impl BestLevel {
    fn empty() -> Self {
        Self {
            price: 0.0,
            qty: 0,
            valid: false,
        }
    }
}

/// A single instrument's limit order book.
pub struct OrderBook {
    arena: OrderArena,
    ladder: PriceLadder,
    registry: OrderRegistry,
    sink: Option<TradeSink>,
    out_of_range_admits: u64,
}

impl OrderBook {
    pub fn new(min_price: f64, max_price: f64) -> Self {
        Self {
            arena: OrderArena::new(),
            ladder: PriceLadder::new(min_price, max_price),
            registry: OrderRegistry::new(),
            sink: None,
            out_of_range_admits: 0,
        }
    }

    /// Pre-sizes the arena for `capacity_hint` orders; still grows unbounded.
    pub fn with_capacity(min_price: f64, max_price: f64, capacity_hint: usize) -> Self {
        Self {
            arena: OrderArena::with_capacity_hint(capacity_hint),
            ladder: PriceLadder::new(min_price, max_price),
            registry: OrderRegistry::new(),
            sink: None,
            out_of_range_admits: 0,
        }
    }

    /// As [`OrderBook::with_capacity`], but `submit_limit` fails with
    /// [`BookError::ArenaExhausted`] once `limit` live orders are reached.
    pub fn with_capacity_limit(min_price: f64, max_price: f64, capacity_hint: usize, limit: usize) -> Self {
        Self {
            arena: OrderArena::with_capacity_limit(capacity_hint, limit),
            ladder: PriceLadder::new(min_price, max_price),
            registry: OrderRegistry::new(),
            sink: None,
            out_of_range_admits: 0,
        }
    }

    /// Installs the trade listener. Replaces any previously set sink.
    pub fn set_trade_sink(&mut self, sink: TradeSink) {
        self.sink = Some(sink);
    }

    /// Submits a new limit order, matching it against the opposite side before
    /// resting whatever quantity remains.
    pub fn submit_limit(&mut self, order_id: OrderId, side: Side, price: f64, qty: i32) -> Result<(), BookError> {
        if self.registry.contains(order_id) {
            return Err(BookError::DuplicateId { order_id });
        }

        let (price_tick, clamped) = self.ladder.price_to_index(price);
        if clamped {
            self.out_of_range_admits += 1;
        }

        let handle = self.arena.allocate(Order {
            order_id,
            side,
            price_tick,
            remaining_qty: qty,
        })?;
        trace!(order_id, %side, price_tick, qty, "order accepted");
        self.registry.insert(order_id, handle);

        matching::match_incoming(self, handle);

        let remaining = self.arena.get(handle).remaining_qty;
        if remaining > 0 {
            self.ladder.level_mut(price_tick).append(handle, remaining);
            self.ladder.mark_active(side, price_tick);
            trace!(order_id, remaining, "order resting");
        } else {
            self.registry.remove(order_id);
            self.arena.deallocate(handle);
        }
        Ok(())
    }

    /// Removes a live order outright. A no-op if `order_id` is not resting or
    /// in-flight.
    pub fn cancel(&mut self, order_id: OrderId) {
        let Some(handle) = self.registry.get(order_id) else {
            return;
        };
        let order = *self.arena.get(handle);
        self.ladder.level_mut(order.price_tick).remove(handle, order.remaining_qty);
        if self.ladder.level(order.price_tick).is_empty() {
            self.ladder.mark_inactive(order.side, order.price_tick);
        }
        self.registry.remove(order_id);
        self.arena.deallocate(handle);
        trace!(order_id, "order cancelled");
    }

    /// Reduces a live order's remaining quantity by `shares`. Cancels it outright
    /// if `shares` would take it to zero or below; a no-op for `shares <= 0`.
    pub fn reduce(&mut self, order_id: OrderId, shares: i32) {
        if shares <= 0 {
            return;
        }
        let Some(handle) = self.registry.get(order_id) else {
            return;
        };
        let remaining = self.arena.get(handle).remaining_qty;
        if shares >= remaining {
            self.cancel(order_id);
            return;
        }
        self.arena.get_mut(handle).remaining_qty -= shares;
        let price_tick = self.arena.get(handle).price_tick;
        self.ladder.level_mut(price_tick).shrink(shares);
        trace!(order_id, shares, "order reduced");
    }

    /// Cancels `old_id` and submits `new_id` as a fresh order at `price`/`qty`.
    /// The replacement order loses time priority — this is a cancel-replace, not
    /// an in-place amend.
    pub fn replace(&mut self, old_id: OrderId, new_id: OrderId, price: f64, qty: i32) -> Result<(), BookError> {
        let Some(handle) = self.registry.get(old_id) else {
            return Ok(());
        };
        let side = self.arena.get(handle).side;
        self.cancel(old_id);
        self.submit_limit(new_id, side, price, qty)
    }

    pub fn best_bid(&self) -> BestLevel {
        self.best(self.ladder.best_bid_index())
    }

    pub fn best_ask(&self) -> BestLevel {
        self.best(self.ladder.best_ask_index())
    }

    fn best(&self, index: Option<u32>) -> BestLevel {
        match index {
            Some(index) => BestLevel {
                price: self.ladder.index_to_price(index),
                qty: self.ladder.level(index).total_qty(),
                valid: true,
            },
            None => BestLevel::empty(),
        }
    }

    /// Process-wide count of trades produced since the last `reset_trade_counter`.
    pub fn total_trades(&self) -> u64 {
        counter::total()
    }

    pub fn reset_trade_counter(&self) {
        counter::reset();
    }

    /// Number of `submit_limit` calls whose price fell outside `[min_price,
    /// max_price]` and was clamped to the nearest boundary tick. Not part of the
    /// external contract — an operability counter.
    pub fn out_of_range_admits(&self) -> u64 {
        self.out_of_range_admits
    }

    pub fn order_count(&self) -> usize {
        self.registry.len()
    }

    pub(crate) fn arena(&self) -> &OrderArena {
        &self.arena
    }

    pub(crate) fn arena_mut(&mut self) -> &mut OrderArena {
        &mut self.arena
    }

    pub(crate) fn ladder(&self) -> &PriceLadder {
        &self.ladder
    }

    pub(crate) fn ladder_mut(&mut self) -> &mut PriceLadder {
        &mut self.ladder
    }

    pub(crate) fn registry_mut(&mut self) -> &mut OrderRegistry {
        &mut self.registry
    }

    pub(crate) fn notify_trade(&mut self, event: &TradeEvent) {
        if let Some(mut sink) = self.sink.take() {
            sink(event);
            self.sink = Some(sink);
        }
    }
}
