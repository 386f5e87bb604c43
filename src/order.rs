//! The order record and the small value types it is built from.

use std::fmt;

/// Externally assigned order identity, signed 64-bit. NASDAQ ITCH reference
/// numbers are unsigned 64-bit; values are cast down with `as i64`, which
/// preserves the bit pattern.
pub type OrderId = i64;

/// Index of a price level inside a [`crate::ladder::PriceLadder`]. Doubles as the
/// order's resting price once it has been snapped to a tick.
pub type PriceTick = u32;

/// Which side of the book an order rests on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// The side an order on `self` matches against.
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "buy"),
            Side::Sell => write!(f, "sell"),
        }
    }
}

/// An order's lifecycle. Not stored as a field on [`Order`] — membership in the
/// arena, registry and ladder queue is what actually encodes the state — but kept
/// here to document the transitions the rest of the core relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderState {
    /// Allocated in the arena and registered, but not yet placed on the ladder:
    /// it is being matched against the opposite side.
    InFlight,
    /// Has a partial or full remaining quantity resting in a ladder queue.
    Resting,
    /// Fully filled or cancelled: deallocated from the arena, removed from the
    /// registry. No live handle refers to it any longer.
    Destroyed,
}

/// A single resting or in-flight order.
#[derive(Debug, Clone, Copy)]
pub struct Order {
    pub order_id: OrderId,
    pub side: Side,
    pub price_tick: PriceTick,
    /// Strictly positive while the order is live; an order whose remaining
    /// quantity reaches zero is deallocated immediately, never stored as zero.
    pub remaining_qty: i32,
}
