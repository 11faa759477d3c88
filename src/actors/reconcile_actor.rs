use std::sync::Arc;

use tokio::spawn;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};
use tracing::debug;

use crate::models::{Card, Transaction};
use crate::reconcile;
use crate::storage::{LedgerStore, ReminderBook, TransactionFilter};

/// Single consumer of committed transactions: runs the reconciliation pass
/// and applies its outcome to the reminder book. One actor for the whole
/// pipeline, so reminder updates never race across cards.
pub struct ReconcileActor {
    sender: mpsc::UnboundedSender<Transaction>,
    handle: JoinHandle<()>,
}

impl ReconcileActor {
    pub fn new<S: LedgerStore>(store: Arc<S>, book: Arc<ReminderBook>, cards: Vec<Card>) -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel::<Transaction>();

        let handle = spawn(async move {
            while let Some(committed) = receiver.recv().await {
                let reminders = book.snapshot();
                let history = store.fetch(TransactionFilter::All);

                let outcome = reconcile::reconcile(&committed, &reminders, &cards, &history);

                for entry in &outcome.log_entries {
                    debug!(
                        "Reminder [{}] ({}) reconciled against transaction [{}] of {} on {}",
                        entry.reminder_id,
                        entry.reminder_kind,
                        entry.transaction_id,
                        entry.transaction_amount,
                        entry.transaction_date
                    );
                }

                book.apply(outcome.updated, outcome.log_entries);
            }
        });

        Self { sender, handle }
    }

    /// A sender the ledger actors use to hand over committed entries.
    pub fn queue(&self) -> mpsc::UnboundedSender<Transaction> {
        self.sender.clone()
    }

    /// Closes the actor's own end of the queue and drains what is left.
    /// Callers must drop every cloned sender first.
    pub async fn despawn(self) -> Result<(), JoinError> {
        drop(self.sender);
        self.handle.await
    }
}
