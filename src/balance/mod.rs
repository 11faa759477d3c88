//! Running-balance computation over a single card's transaction history.
//!
//! Pure compute: no I/O, deterministic, one left-to-right scan. Negative
//! balance means "amount owed"; a CarryOver entry anywhere in the sequence
//! discards accumulated history and reanchors the balance at `-amount`, so
//! an operator can record a later opening-balance correction without
//! deleting what came before.


use rust_decimal::Decimal;

use crate::models::{Card, Transaction, TransactionKind};

/// Point-in-time view of a card derived from its ledger; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceSheet {
    pub balance: Decimal,
    /// Spendable headroom: `card.limit + balance`.
    pub available: Decimal,
    /// `|balance| / limit * 100` while owing, otherwise 0.
    pub usage_percent: Decimal,
}

/// Per-position balances in chronological order (stable sort on
/// `occurred_on`; ties keep the input's insertion order).
pub fn running_balances(history: &[Transaction]) -> Vec<Decimal> {
    let mut ordered: Vec<&Transaction> = history.iter().collect();
    ordered.sort_by_key(|tx| tx.occurred_on);

    let mut balances = Vec::with_capacity(ordered.len());
    let mut balance = Decimal::ZERO;

    for (index, tx) in ordered.iter().enumerate() {
        balance = match tx.kind {
            TransactionKind::CarryOver => -tx.amount,
            // The earliest entry's own effect is deliberately ignored when it
            // is not a CarryOver. Balances already shown to operators depend
            // on this; do not change it without migrating stored data.
            _ if index == 0 => Decimal::ZERO,
            TransactionKind::Charge => balance - tx.amount,
            TransactionKind::Settlement => balance + tx.amount,
        };

        balances.push(balance);
    }

    balances
}

/// The card's current balance: the last entry of [`running_balances`], or 0
/// for an empty history.
pub fn running_balance(history: &[Transaction]) -> Decimal {
    running_balances(history).last().copied().unwrap_or(Decimal::ZERO)
}

/// Current balance plus the derived limit figures for one card.
pub fn balance_sheet(card: &Card, history: &[Transaction]) -> BalanceSheet {
    let balance = running_balance(history);
    let available = card.limit + balance;

    let usage_percent = if balance < Decimal::ZERO && !card.limit.is_zero() {
        balance.abs() / card.limit * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };

    BalanceSheet {
        balance,
        available,
        usage_percent,
    }
}
