//! Replay configuration: the instrument universe and price range every routed
//! book is constructed with.

use std::collections::HashSet;

/// Tracked symbols from the original replay engine's hardcoded `tracked_symbols`
/// set, used whenever `--symbols` isn't given.
pub const DEFAULT_TRACKED_SYMBOLS: &[&str] = &[
    "AAPL", "MSFT", "AMZN", "GOOGL", "META", "NVDA", "TSLA", "JPM", "V", "UNH",
    "HD", "PG", "MA", "DIS", "BAC", "XOM", "INTC", "CSCO", "PFE", "KO",
];

pub fn default_tracked_symbols() -> HashSet<String> {
    DEFAULT_TRACKED_SYMBOLS.iter().map(|s| s.to_string()).collect()
}
