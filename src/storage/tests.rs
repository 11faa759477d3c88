use super::{LedgerStore, MemoryLedger, ReminderBook, TransactionFilter};

use std::str::FromStr;

use anyhow::{anyhow, Result};
use rust_decimal::Decimal;

use crate::models::{PaymentMethod, ReconciliationLogEntry, Reminder, ReminderKind, Transaction, TransactionKind};

fn entry(card: Option<u32>, counterpart: Option<u32>, amount: &str, occurred_on: &str) -> Result<Transaction> {
    Ok(Transaction {
        id: 0,
        kind: TransactionKind::Charge,
        card_ref: card,
        counterpart_ref: counterpart,
        amount: Decimal::from_str(amount)?,
        occurred_on: occurred_on.parse()?,
        due_on: None,
        method: PaymentMethod::Cash,
    })
}

#[test]
fn test_ledger_assigns_monotonic_ids_and_fetches_in_insertion_order() -> Result<()> {
    let ledger = MemoryLedger::new();

    let first = ledger.insert(entry(Some(1), None, "10", "2026-03-02")?);
    let second = ledger.insert(entry(Some(1), None, "20", "2026-03-01")?);

    assert!(second > first);

    let fetched = ledger.fetch(TransactionFilter::All);
    assert_eq!(fetched.len(), 2);
    assert_eq!(fetched[0].id, first);
    assert_eq!(fetched[1].id, second);

    Ok(())
}

#[test]
fn test_ledger_filters_by_card_and_counterpart() -> Result<()> {
    let ledger = MemoryLedger::new();

    ledger.insert(entry(Some(1), None, "10", "2026-03-01")?);
    ledger.insert(entry(Some(2), None, "20", "2026-03-01")?);
    ledger.insert(entry(None, Some(7), "30", "2026-03-01")?);

    assert_eq!(ledger.fetch(TransactionFilter::ByCard(1)).len(), 1);
    assert_eq!(ledger.fetch(TransactionFilter::ByCard(3)).len(), 0);
    assert_eq!(ledger.fetch(TransactionFilter::ByCounterpart(7)).len(), 1);
    assert_eq!(ledger.fetch(TransactionFilter::All).len(), 3);

    Ok(())
}

#[test]
fn test_ledger_update_keeps_id_and_delete_removes() -> Result<()> {
    let ledger = MemoryLedger::new();

    let id = ledger.insert(entry(Some(1), None, "10", "2026-03-01")?);

    let mut corrected = entry(Some(1), None, "15", "2026-03-01")?;
    corrected.id = 999;
    assert!(ledger.update(id, corrected));

    let fetched = ledger.fetch(TransactionFilter::ByCard(1));
    assert_eq!(fetched[0].id, id);
    assert_eq!(fetched[0].amount, Decimal::from(15));

    assert!(!ledger.update(12345, entry(Some(1), None, "1", "2026-03-01")?));
    assert!(ledger.delete(id));
    assert!(!ledger.delete(id));
    assert!(ledger.is_empty());

    Ok(())
}

#[test]
fn test_reminder_book_snapshot_is_id_ordered() {
    let book = ReminderBook::new();

    book.load(Reminder::new(3, ReminderKind::General, false, false, Some(1)));
    book.load(Reminder::new(1, ReminderKind::General, false, false, Some(1)));
    book.load(Reminder::new(2, ReminderKind::General, false, false, Some(1)));

    let ids: Vec<u32> = book.snapshot().iter().map(|reminder| reminder.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn test_reminder_book_apply_overwrites_and_appends_log() -> Result<()> {
    let book = ReminderBook::new();
    book.load(Reminder::new(1, ReminderKind::General, false, false, Some(2)));

    let mut updated = book.get(1).ok_or_else(|| anyhow!("reminder 1 missing"))?;
    updated.remaining_count = 1;

    let log_entry = ReconciliationLogEntry {
        reminder_id: 1,
        reminder_kind: "general".to_string(),
        transaction_id: 10,
        transaction_date: "2026-03-05".parse()?,
        transaction_amount: Decimal::from(100),
    };

    book.apply(vec![updated], vec![log_entry]);

    let stored = book.get(1).ok_or_else(|| anyhow!("reminder 1 missing after apply"))?;
    assert_eq!(stored.remaining_count, 1);
    assert_eq!(book.log_entries().len(), 1);

    Ok(())
}
