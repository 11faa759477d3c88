mod actors;
mod balance;
mod engine;
mod guard;
mod models;
mod reconcile;
mod storage;
mod types;

use std::io::{stderr, stdout, BufWriter, Write};
use std::process::exit;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::engine::ReplayEngine;
use crate::models::Card;
use crate::storage::{LedgerStore, MemoryLedger, ReminderBook, TransactionFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: card-ledger-engine [cards].csv [ledger].csv [reminders.csv:optional] [log_level:optional] > [output].csv");
        eprintln!("Available log levels: error, warn, info, debug, trace (default: error)");
        exit(1);
    }

    let cards_path = &args[1];
    let ledger_path = &args[2];
    let reminders_path = args.get(3).map(String::as_str);
    let log_level = args.get(4)
        .map(|s| parse_log_level(s)).unwrap_or_else(|| LevelFilter::ERROR);

    setup_logging(log_level);

    let store = Arc::new(MemoryLedger::new());
    let book = Arc::new(ReminderBook::new());
    let engine = ReplayEngine::new(store.clone(), book.clone());

    let timer = Instant::now();
    let cards = engine.run(cards_path, ledger_path, reminders_path).await?;
    let duration = timer.elapsed();

    info!("Replayed ledger in: {duration:?}");

    write_results_to_stdout(&cards, store, book, reminders_path.is_some())?;

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    // Stdout carries the summary CSV, so logging goes to stderr.
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_results_to_stdout(
    cards: &[Card],
    store: Arc<MemoryLedger>,
    book: Arc<ReminderBook>,
    with_reminders: bool,
) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    writeln!(output, "card,limit,balance,available,usage_percent")?;

    for card in cards {
        let history = store.fetch(TransactionFilter::ByCard(card.id));
        let sheet = balance::balance_sheet(card, &history);

        writeln!(
            output,
            "{},{},{},{},{}",
            card.id,
            card.limit,
            sheet.balance,
            sheet.available,
            sheet.usage_percent.round_dp(2)
        )?;
    }

    if with_reminders {
        writeln!(output)?;
        writeln!(output, "reminder,kind,remaining,active")?;

        for reminder in book.snapshot() {
            writeln!(
                output,
                "{},{},{},{}",
                reminder.id,
                reminder.kind.label(),
                reminder.remaining_count,
                reminder.active
            )?;
        }

        info!("Appended {} reconciliation log entries", book.log_entries().len());
    }

    output.flush()?;

    Ok(())
}
