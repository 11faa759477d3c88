mod memory_ledger;
mod reminder_book;
#[cfg(test)]
mod tests;

use crate::models::Transaction;
use crate::types::{CardId, CounterpartId, TransactionId};

pub use memory_ledger::MemoryLedger;
pub use reminder_book::ReminderBook;

/// Scan filter for the ledger store.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TransactionFilter {
    All,
    ByCard(CardId),
    ByCounterpart(CounterpartId),
}

/// The document store the core consumes, reduced to the four calls it
/// actually makes. No atomic multi-document writes are assumed; fetch
/// returns entries in insertion (id) order.
pub trait LedgerStore: Send + Sync + 'static {
    fn fetch(&self, filter: TransactionFilter) -> Vec<Transaction>;
    fn insert(&self, transaction: Transaction) -> TransactionId;
    fn update(&self, id: TransactionId, transaction: Transaction) -> bool;
    fn delete(&self, id: TransactionId) -> bool;
}
