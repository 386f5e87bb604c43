//! Fans out decoded messages to one [`OrderBook`] per `stock_locate`.
//!
//! Mirrors `main.cpp`'s handling of the `'R'` message: a `stock_locate` only gets
//! a book once its Stock Directory entry names a tracked, regular, active,
//! common-stock instrument. Everything addressed to an unregistered locate is
//! dropped, same as the original.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use tracing::{debug, trace};

use crate::itch::message::{Message, StockLocate};
use crate::trade::TradeEvent;
use crate::OrderBook;

/// A trade, attributed to its symbol by the router (the core itself has no
/// notion of which instrument it belongs to).
#[derive(Debug, Clone, PartialEq)]
pub struct RoutedTrade {
    pub symbol: String,
    pub event: TradeEvent,
}

struct TrackedBook {
    symbol: String,
    book: OrderBook,
    trades: Rc<RefCell<Vec<TradeEvent>>>,
}

/// Price range every routed book is constructed with.
#[derive(Debug, Clone, Copy)]
pub struct BookRange {
    pub min_price: f64,
    pub max_price: f64,
}

pub struct Router {
    tracked_symbols: HashSet<String>,
    range: BookRange,
    books: HashMap<StockLocate, TrackedBook>,
}

impl Router {
    pub fn new(tracked_symbols: HashSet<String>, range: BookRange) -> Self {
        Self {
            tracked_symbols,
            range,
            books: HashMap::new(),
        }
    }

    /// Applies one decoded message, returning any trades it produced (empty for
    /// non-order messages, or for a locate with no registered book).
    pub fn dispatch(&mut self, message: Message) -> Vec<RoutedTrade> {
        match message {
            Message::StockDirectory {
                stock_locate,
                symbol,
                financial_status_indicator,
                issue_classification,
                authenticity,
            } => {
                self.maybe_register(stock_locate, symbol, financial_status_indicator, issue_classification, authenticity);
                Vec::new()
            }
            Message::AddOrder {
                stock_locate,
                order_id,
                side,
                shares,
                price,
            } => self.with_book(stock_locate, |book| {
                if let Err(err) = book.submit_limit(order_id, side, price, shares as i32) {
                    trace!(%err, order_id, "add order rejected");
                }
            }),
            Message::Delete { stock_locate, order_id } => {
                self.with_book(stock_locate, |book| book.cancel(order_id))
            }
            Message::Cancel {
                stock_locate,
                order_id,
                cancelled_shares,
            } => self.with_book(stock_locate, |book| book.reduce(order_id, cancelled_shares as i32)),
            Message::Executed {
                stock_locate,
                order_id,
                executed_shares,
            } => self.with_book(stock_locate, |book| book.reduce(order_id, executed_shares as i32)),
            Message::Replace {
                stock_locate,
                old_order_id,
                new_order_id,
                shares,
                price,
            } => self.with_book(stock_locate, |book| {
                if let Err(err) = book.replace(old_order_id, new_order_id, price, shares as i32) {
                    trace!(%err, old_order_id, new_order_id, "replace rejected");
                }
            }),
        }
    }

    fn maybe_register(
        &mut self,
        stock_locate: StockLocate,
        symbol: String,
        financial_status_indicator: u8,
        issue_classification: u8,
        authenticity: u8,
    ) {
        let admitted = self.tracked_symbols.contains(&symbol)
            && authenticity == b'P'
            && issue_classification == b'C'
            && matches!(financial_status_indicator, b'N' | b' ');
        if !admitted {
            return;
        }
        // A stock_locate is only ever assigned once per session; a repeated
        // directory entry for one already registered is ignored rather than
        // replacing the book and discarding every order resting in it.
        if self.books.contains_key(&stock_locate) {
            return;
        }

        let trades = Rc::new(RefCell::new(Vec::new()));
        let sink_trades = Rc::clone(&trades);
        let mut book = OrderBook::new(self.range.min_price, self.range.max_price);
        book.set_trade_sink(Box::new(move |event| sink_trades.borrow_mut().push(*event)));
        debug!(stock_locate, %symbol, "instrument registered");

        self.books.insert(
            stock_locate,
            TrackedBook {
                symbol,
                book,
                trades,
            },
        );
    }

    fn with_book(&mut self, stock_locate: StockLocate, op: impl FnOnce(&mut OrderBook)) -> Vec<RoutedTrade> {
        let Some(tracked) = self.books.get_mut(&stock_locate) else {
            return Vec::new();
        };
        op(&mut tracked.book);
        tracked
            .trades
            .borrow_mut()
            .drain(..)
            .map(|event| RoutedTrade {
                symbol: tracked.symbol.clone(),
                event,
            })
            .collect()
    }

    pub fn book(&self, stock_locate: StockLocate) -> Option<&OrderBook> {
        self.books.get(&stock_locate).map(|t| &t.book)
    }

    pub fn symbol(&self, stock_locate: StockLocate) -> Option<&str> {
        self.books.get(&stock_locate).map(|t| t.symbol.as_str())
    }

    /// Process-wide trade count. Any registered book's counter reads the same
    /// value since the counter lives in a single `thread_local`.
    pub fn total_trades(&self) -> u64 {
        self.books.values().next().map_or(0, |t| t.book.total_trades())
    }
}
