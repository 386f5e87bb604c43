//! Appends one row per trade to a CSV ledger, matching the original replay
//! engine's `trade_file` output column-for-column.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::order::OrderId;
use crate::trade::TradeEvent;

#[derive(Serialize)]
struct TradeRow {
    seq: u64,
    symbol: String,
    taker: OrderId,
    maker: OrderId,
    price: f64,
    quantity: i32,
}

/// Writes `seq,symbol,taker,maker,price,quantity` rows, one per trade.
pub struct CsvTradeSink<W: Write> {
    writer: csv::Writer<W>,
    seq: u64,
}

impl CsvTradeSink<File> {
    pub fn create(path: impl AsRef<Path>) -> csv::Result<Self> {
        Self::new(File::create(path)?)
    }
}

impl<W: Write> CsvTradeSink<W> {
    pub fn new(writer: W) -> csv::Result<Self> {
        Ok(Self {
            writer: csv::WriterBuilder::new().has_headers(true).from_writer(writer),
            seq: 0,
        })
    }

    /// Records one trade under `symbol`, assigning it the next sequence number.
    pub fn record(&mut self, symbol: &str, event: &TradeEvent) -> csv::Result<()> {
        self.seq += 1;
        self.writer.serialize(TradeRow {
            seq: self.seq,
            symbol: symbol.to_string(),
            taker: event.taker_id,
            maker: event.maker_id,
            price: event.price,
            quantity: event.qty,
        })?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_writes_to_a_real_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trades.csv");
        {
            let mut sink = CsvTradeSink::create(&path).unwrap();
            sink.record(
                "ACME",
                &TradeEvent {
                    taker_id: 1,
                    maker_id: 2,
                    price: 5.0,
                    qty: 10,
                },
            )
            .unwrap();
        }
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("ACME"));
    }

    #[test]
    fn writes_header_then_one_row_per_trade() {
        let mut buf = Vec::new();
        {
            let mut sink = CsvTradeSink::new(&mut buf).unwrap();
            sink.record(
                "ACME",
                &TradeEvent {
                    taker_id: 2,
                    maker_id: 1,
                    price: 10.5,
                    qty: 60,
                },
            )
            .unwrap();
        }
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("seq,symbol,taker,maker,price,quantity"));
        assert_eq!(lines.next(), Some("1,ACME,2,1,10.5,60"));
    }
}
