use std::sync::atomic::{AtomicU32, Ordering};

use dashmap::DashMap;

use crate::models::Transaction;
use crate::storage::{LedgerStore, TransactionFilter};
use crate::types::TransactionId;

/// In-memory ledger backing the replay pipeline. Ids are assigned
/// monotonically on insert, so id order is insertion order.
pub struct MemoryLedger {
    entries: DashMap<TransactionId, Transaction>,
    next_id: AtomicU32,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            next_id: AtomicU32::new(1),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerStore for MemoryLedger {
    fn fetch(&self, filter: TransactionFilter) -> Vec<Transaction> {
        let mut matched: Vec<Transaction> = self
            .entries
            .iter()
            .filter(|entry| match filter {
                TransactionFilter::All => true,
                TransactionFilter::ByCard(card) => entry.card_ref == Some(card),
                TransactionFilter::ByCounterpart(counterpart) => {
                    entry.counterpart_ref == Some(counterpart)
                }
            })
            .map(|entry| entry.value().clone())
            .collect();

        matched.sort_by_key(|tx| tx.id);
        matched
    }

    fn insert(&self, mut transaction: Transaction) -> TransactionId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        transaction.id = id;
        self.entries.insert(id, transaction);
        id
    }

    fn update(&self, id: TransactionId, mut transaction: Transaction) -> bool {
        if !self.entries.contains_key(&id) {
            return false;
        }

        transaction.id = id;
        self.entries.insert(id, transaction);
        true
    }

    fn delete(&self, id: TransactionId) -> bool {
        self.entries.remove(&id).is_some()
    }
}
