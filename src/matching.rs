//! The price-time-priority crossing algorithm.
//!
//! `match_incoming` walks price levels against an incoming order; `fill_one`
//! executes a single maker/taker pair against the head of a level's queue.

use tracing::info;

use crate::arena::OrderHandle;
use crate::book::OrderBook;
use crate::counter;
use crate::order::Side;
use crate::trade::TradeEvent;

/// Matches `taker` against the opposite side of the book until either it is
/// fully filled or the best opposite level no longer crosses its price.
///
/// Mirrors the original engine's `match()`: repeatedly takes the best opposite
/// level, drains resting orders from its head one at a time, and stops crossing
/// once price no longer allows it.
pub(crate) fn match_incoming(book: &mut OrderBook, taker: OrderHandle) {
    loop {
        if book.arena().get(taker).remaining_qty == 0 {
            break;
        }

        let side = book.arena().get(taker).side;
        let best_index = match side {
            Side::Buy => book.ladder().best_ask_index(),
            Side::Sell => book.ladder().best_bid_index(),
        };
        let Some(level_index) = best_index else {
            break;
        };

        let taker_tick = book.arena().get(taker).price_tick;
        let crosses = match side {
            Side::Buy => taker_tick >= level_index,
            Side::Sell => taker_tick <= level_index,
        };
        if !crosses {
            break;
        }

        let Some(maker) = book.ladder().level(level_index).front() else {
            // An active tick with an empty queue should not happen, but if it
            // does there is nothing to match against at this level.
            book.ladder_mut().mark_inactive(side.opposite(), level_index);
            continue;
        };

        fill_one(book, taker, maker, level_index);

        if book.ladder().level(level_index).is_empty() {
            book.ladder_mut().mark_inactive(side.opposite(), level_index);
        }
    }
}

/// Executes one trade between `taker` and the resting `maker` at `level_index`,
/// shrinking both orders' remaining quantity by `min(taker_qty, maker_qty)`,
/// destroying the maker if it is now fully filled, and notifying the trade sink.
fn fill_one(book: &mut OrderBook, taker: OrderHandle, maker: OrderHandle, level_index: u32) {
    let taker_qty = book.arena().get(taker).remaining_qty;
    let maker_qty = book.arena().get(maker).remaining_qty;
    let traded_qty = taker_qty.min(maker_qty);

    book.arena_mut().get_mut(taker).remaining_qty -= traded_qty;
    book.arena_mut().get_mut(maker).remaining_qty -= traded_qty;
    book.ladder_mut().level_mut(level_index).shrink(traded_qty);

    let price = book.ladder().index_to_price(level_index);
    let taker_id = book.arena().get(taker).order_id;
    let maker_id = book.arena().get(maker).order_id;
    let trade_seq = counter::increment();

    info!(target: "trade", trade_seq, taker_id, maker_id, price, traded_qty, "matched");

    let event = TradeEvent {
        taker_id,
        maker_id,
        price,
        qty: traded_qty,
    };
    book.notify_trade(&event);

    if book.arena().get(maker).remaining_qty == 0 {
        book.ladder_mut().level_mut(level_index).pop_front();
        book.registry_mut().remove(maker_id);
        book.arena_mut().deallocate(maker);
    }
}
