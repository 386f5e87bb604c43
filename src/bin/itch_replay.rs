//! Replays an ITCH 5.0 message stream through the matching core, writing every
//! trade to a CSV ledger and, optionally, a live terminal dashboard.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use itchbook::config::default_tracked_symbols;
use itchbook::itch::{self, BookRange, FrameReader, Router};
use itchbook::sinks::{CsvTradeSink, TerminalDashboard};

/// Replay a NASDAQ ITCH 5.0 message stream against the matching core.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to the raw ITCH message stream.
    #[arg(long)]
    input: PathBuf,

    /// Path to write the trade ledger to.
    #[arg(long, default_value = "trades.csv")]
    trades_csv: PathBuf,

    /// Newline-separated file of symbols to track. Defaults to a built-in list.
    #[arg(long)]
    symbols: Option<PathBuf>,

    #[arg(long, default_value_t = 0.0)]
    min_price: f64,

    #[arg(long, default_value_t = 10_000.0)]
    max_price: f64,

    /// Render a live best-bid/ask/last dashboard after each trade.
    #[arg(long)]
    dashboard: bool,

    /// Increase log verbosity (repeatable).
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease log verbosity (repeatable).
    #[arg(short = 'q', action = clap::ArgAction::Count)]
    quiet: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose, args.quiet);

    let tracked_symbols = match &args.symbols {
        Some(path) => read_symbols(path)?,
        None => default_tracked_symbols(),
    };

    let mut router = Router::new(
        tracked_symbols,
        BookRange {
            min_price: args.min_price,
            max_price: args.max_price,
        },
    );

    let mut csv_sink = CsvTradeSink::create(&args.trades_csv)?;
    let mut dashboard = args.dashboard.then(|| TerminalDashboard::new(std::io::stdout()));

    let file = File::open(&args.input)?;
    let mut reader = FrameReader::new(BufReader::new(file));

    let mut frames_read = 0u64;
    while let Some(frame) = reader.read_frame()? {
        frames_read += 1;
        let message = match itch::parser::decode(&frame) {
            Ok(Some(message)) => message,
            Ok(None) => continue,
            Err(err) => {
                warn!(%err, "skipping malformed frame");
                continue;
            }
        };

        let stock_locate = message.stock_locate();
        for routed in router.dispatch(message) {
            info!(target: "trade", symbol = %routed.symbol, taker = routed.event.taker_id, maker = routed.event.maker_id, price = routed.event.price, qty = routed.event.qty, "trade");
            if let Err(err) = csv_sink.record(&routed.symbol, &routed.event) {
                error!(%err, "failed to write trade to csv");
            }
            if let Some(dashboard) = dashboard.as_mut() {
                dashboard.update_trade(&routed.symbol, routed.event.price, routed.event.qty);
            }
        }

        if let Some(dashboard) = dashboard.as_mut() {
            if let Some(symbol) = router.symbol(stock_locate) {
                let symbol = symbol.to_string();
                if let Some(book) = router.book(stock_locate) {
                    let bid = book.best_bid();
                    let ask = book.best_ask();
                    dashboard.update_book(
                        &symbol,
                        bid.valid.then_some((bid.price, bid.qty)),
                        ask.valid.then_some((ask.price, ask.qty)),
                    );
                }
                dashboard.render()?;
            }
        }
    }

    info!(frames_read, total_trades = router.total_trades(), "replay complete");
    Ok(())
}

fn read_symbols(path: &PathBuf) -> anyhow::Result<HashSet<String>> {
    let text = fs::read_to_string(path)?;
    Ok(text.lines().map(str::trim).filter(|l| !l.is_empty()).map(str::to_string).collect())
}

fn init_tracing(verbose: u8, quiet: u8) {
    let level = match (verbose as i8) - (quiet as i8) {
        i8::MIN..=-1 => "error",
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
