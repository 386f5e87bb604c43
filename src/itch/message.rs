//! Decoded ITCH message bodies relevant to order-book maintenance.

use crate::order::{OrderId, Side};

/// `stock_locate`: the per-session integer every subsequent message for an
/// instrument carries, in place of repeating its ticker symbol.
pub type StockLocate = u16;

/// The subset of ITCH 5.0 message types the matching core needs. Message types
/// that don't affect book state (trade-break, market participant state, ...)
/// are not modeled — the parser simply skips them.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// `'R'` — Stock Directory. Establishes the `stock_locate -> symbol` mapping
    /// and whether the instrument should be tracked at all.
    StockDirectory {
        stock_locate: StockLocate,
        symbol: String,
        financial_status_indicator: u8,
        issue_classification: u8,
        authenticity: u8,
    },
    /// `'A'` — Add Order (no MPID attribution needed for matching).
    AddOrder {
        stock_locate: StockLocate,
        order_id: OrderId,
        side: Side,
        shares: u32,
        price: f64,
    },
    /// `'D'` — Order Delete.
    Delete {
        stock_locate: StockLocate,
        order_id: OrderId,
    },
    /// `'X'` — Order Cancel (partial).
    Cancel {
        stock_locate: StockLocate,
        order_id: OrderId,
        cancelled_shares: u32,
    },
    /// `'E'` — Order Executed. Treated as a reduce by `executed_shares`, same as
    /// the original engine.
    Executed {
        stock_locate: StockLocate,
        order_id: OrderId,
        executed_shares: u32,
    },
    /// `'U'` — Order Replace.
    Replace {
        stock_locate: StockLocate,
        old_order_id: OrderId,
        new_order_id: OrderId,
        shares: u32,
        price: f64,
    },
}

impl Message {
    pub fn stock_locate(&self) -> StockLocate {
        match *self {
            Message::StockDirectory { stock_locate, .. }
            | Message::AddOrder { stock_locate, .. }
            | Message::Delete { stock_locate, .. }
            | Message::Cancel { stock_locate, .. }
            | Message::Executed { stock_locate, .. }
            | Message::Replace { stock_locate, .. } => stock_locate,
        }
    }
}
