use std::sync::Arc;

use tokio::spawn;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, warn};

use crate::guard::{self, GuardResult};
use crate::models::{Card, Transaction};
use crate::storage::{LedgerStore, TransactionFilter};

/// Serializes all ledger-affecting work for one card: no balance evaluation
/// for the card can interleave with a write to that card's history. A single
/// card-less lane handles entries that target no card.
///
/// Per entry the order is strictly guard -> commit -> reconcile; a rejected
/// entry never reaches the reconcile queue.
pub struct LedgerActor {
    sender: mpsc::UnboundedSender<Transaction>,
    handle: JoinHandle<()>,
}

impl LedgerActor {
    pub fn new<S: LedgerStore>(
        card: Option<Card>,
        store: Arc<S>,
        reconcile_queue: mpsc::UnboundedSender<Transaction>,
    ) -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel::<Transaction>();

        let handle = spawn(async move {
            while let Some(proposed) = receiver.recv().await {
                if let Err(error) = proposed.validate() {
                    warn!("{error}");
                    continue;
                }

                let history = match proposed.card_ref {
                    Some(card_id) => store.fetch(TransactionFilter::ByCard(card_id)),
                    None => Vec::new(),
                };

                match guard::evaluate_limit(&proposed, card.as_ref(), &history) {
                    GuardResult::LimitExceeded(report) => {
                        warn!(
                            "Limit exceeded on card [{}]: requested {} against {} available, rejecting",
                            report.card_name, report.requested, report.available
                        );
                        continue;
                    }
                    GuardResult::Overpayment(report) => {
                        // Non-blocking: the replay driver stands in for the
                        // operator's explicit confirmation.
                        warn!(
                            "Overpayment on card [{}]: requested {} exceeds the owed amount by {}",
                            report.card_name, report.requested, report.excess
                        );
                    }
                    GuardResult::SkippedMissingCard => {
                        debug!("Card reference could not be resolved, guard skipped");
                    }
                    GuardResult::Normal => {}
                }

                let mut committed = proposed;
                committed.id = store.insert(committed.clone());

                debug!("Transaction [{}] committed", committed.id);

                if reconcile_queue.send(committed).is_err() {
                    warn!("Reconcile queue closed, committed entry was not reconciled");
                }
            }
        });

        Self { sender, handle }
    }

    /// Queues a proposed entry; false when the actor has already shut down.
    pub fn accept(&self, transaction: &Transaction) -> bool {
        self.sender.send(transaction.clone()).is_ok()
    }

    /// Closes the queue and waits for the remaining entries to drain.
    pub async fn despawn(self) -> Result<(), JoinError> {
        drop(self.sender);
        self.handle.await
    }
}
