//! Downstream consumers of routed trades: a CSV ledger and a terminal dashboard.
//! Neither is part of the matching core — both are driven from the replay
//! binary's loop, fed from [`crate::itch::RoutedTrade`]s.

pub mod csv_sink;
pub mod dashboard;

pub use csv_sink::CsvTradeSink;
pub use dashboard::TerminalDashboard;
