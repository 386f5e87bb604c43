//! Terminal order-book dashboard: a fixed-width, ANSI-redrawn table of best
//! bid/ask/last-trade per tracked symbol.
//!
//! A line-for-line port of the original `TerminalDashboard`, with `std::io::Write`
//! in place of `std::cout` so it can be rendered into a buffer under test.

use std::collections::HashMap;
use std::io::{self, Write};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

#[derive(Debug, Clone, Copy, Default)]
struct InstrumentView {
    best_bid: Option<(f64, i64)>,
    best_ask: Option<(f64, i64)>,
    last_trade: Option<(f64, i32)>,
}

/// Renders one row per symbol, in the order the symbols were registered.
pub struct TerminalDashboard<W: Write> {
    order: Vec<String>,
    views: HashMap<String, InstrumentView>,
    out: W,
}

impl<W: Write> TerminalDashboard<W> {
    pub fn new(out: W) -> Self {
        Self {
            order: Vec::new(),
            views: HashMap::new(),
            out,
        }
    }

    fn view_mut(&mut self, symbol: &str) -> &mut InstrumentView {
        if !self.views.contains_key(symbol) {
            self.order.push(symbol.to_string());
            self.views.insert(symbol.to_string(), InstrumentView::default());
        }
        self.views.get_mut(symbol).unwrap()
    }

    pub fn update_book(&mut self, symbol: &str, best_bid: Option<(f64, i64)>, best_ask: Option<(f64, i64)>) {
        let view = self.view_mut(symbol);
        view.best_bid = best_bid;
        view.best_ask = best_ask;
    }

    pub fn update_trade(&mut self, symbol: &str, price: f64, qty: i32) {
        self.view_mut(symbol).last_trade = Some((price, qty));
    }

    pub fn render(&mut self) -> io::Result<()> {
        write!(self.out, "{CLEAR_SCREEN}")?;
        writeln!(
            self.out,
            "{:<8}{:<22}{:<22}{:<22}",
            "SYMBOL", "BID", "ASK", "LAST"
        )?;
        for symbol in &self.order {
            let view = self.views[symbol];
            writeln!(
                self.out,
                "{:<8}{:<22}{:<22}{:<22}",
                symbol,
                format_level(view.best_bid),
                format_level(view.best_ask),
                format_trade(view.last_trade),
            )?;
        }
        self.out.flush()
    }
}

fn format_level(level: Option<(f64, i64)>) -> String {
    match level {
        Some((price, qty)) => format!("{price:.2} x {qty}"),
        None => "-".to_string(),
    }
}

fn format_trade(trade: Option<(f64, i32)>) -> String {
    match trade {
        Some((price, qty)) => format!("{price:.2} x {qty}"),
        None => "-".to_string(),
    }
}
