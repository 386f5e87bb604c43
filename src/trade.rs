//! The trade sink contract: an owned, immutable snapshot handed to a callback
//! synchronously as each match is produced.

use crate::order::OrderId;

/// One match between an incoming (taker) order and a resting (maker) order.
/// Carries no reference back into the book — by the time a listener sees it the
/// level that produced it may already have been mutated further.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TradeEvent {
    pub taker_id: OrderId,
    pub maker_id: OrderId,
    pub price: f64,
    pub qty: i32,
}

/// A trade listener. Boxed rather than generic so [`crate::book::OrderBook`] can
/// hold one without becoming generic itself; plain `FnMut`, not `Send`/`Sync`,
/// since the core never crosses a thread boundary.
pub type TradeSink = Box<dyn FnMut(&TradeEvent)>;
