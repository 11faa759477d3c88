use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;

use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use tokio::sync::mpsc;
use tokio::task::{spawn_blocking, JoinHandle};
use tracing::{error, warn};

use crate::actors::{LedgerActor, ReconcileActor};
use crate::models::{Card, PaymentMethod, Reminder, ReminderKind, Transaction, ValidationError};
use crate::storage::{MemoryLedger, ReminderBook};
use crate::types::{CardId, CounterpartId, DayWindow, ReminderId};

/// Flat reminder row as it appears in the replay CSV; the free-string kind
/// and per-kind optional columns become a typed [`ReminderKind`] here.
#[derive(Debug, Deserialize)]
struct ReminderRow {
    id: ReminderId,
    kind: String,
    #[serde(default)]
    card: Option<CardId>,
    #[serde(default)]
    counterpart: Option<CounterpartId>,
    #[serde(default)]
    method_filter: Option<PaymentMethod>,
    #[serde(default)]
    day_start: Option<u8>,
    #[serde(default)]
    day_end: Option<u8>,
    #[serde(default)]
    repeats_monthly: bool,
    #[serde(default)]
    auto_close_on_settle: bool,
    #[serde(default)]
    target_count: Option<u32>,
}

impl ReminderRow {
    fn into_reminder(self) -> Result<Reminder, ValidationError> {
        // A window needs both bounds; a lone bound is ignored.
        let window = match (self.day_start, self.day_end) {
            (Some(start), Some(end)) => Some(DayWindow::new(start, end)?),
            _ => None,
        };

        let kind = match self.kind.as_str() {
            "general" => ReminderKind::General,
            "card_due" => ReminderKind::CardDue {
                card: self.card.ok_or_else(|| {
                    ValidationError::missing_reminder_reference(self.id, "card_due", "card")
                })?,
                window,
            },
            "counterpart_due" => ReminderKind::CounterpartDue {
                counterpart: self.counterpart.ok_or_else(|| {
                    ValidationError::missing_reminder_reference(self.id, "counterpart_due", "counterpart")
                })?,
                method_filter: self.method_filter,
                window,
            },
            other => return Err(ValidationError::UnknownReminderKind(other.to_string())),
        };

        Ok(Reminder::new(
            self.id,
            kind,
            self.repeats_monthly,
            self.auto_close_on_settle,
            self.target_count,
        ))
    }
}

/// Replays a ledger CSV through the full pipeline: per-card actors run
/// guard -> commit, a single reconcile actor updates the reminder book.
pub struct ReplayEngine {
    store: Arc<MemoryLedger>,
    book: Arc<ReminderBook>,
    backpressure: usize,
}

impl ReplayEngine {
    pub fn new(store: Arc<MemoryLedger>, book: Arc<ReminderBook>) -> Self {
        Self {
            store,
            book,
            backpressure: 256,
        }
    }

    /// Runs the end-to-end replay and returns the card registry, in id
    /// order, for the caller's summary output.
    pub async fn run(
        &self,
        cards_path: &str,
        ledger_path: &str,
        reminders_path: Option<&str>,
    ) -> anyhow::Result<Vec<Card>> {
        let cards = load_cards(cards_path.to_string()).await?;

        if let Some(path) = reminders_path {
            for reminder in load_reminders(path.to_string()).await? {
                self.book.load(reminder);
            }
        }

        let mut registry: Vec<Card> = cards.values().cloned().collect();
        registry.sort_by_key(|card| card.id);

        let reconciler = ReconcileActor::new(self.store.clone(), self.book.clone(), registry.clone());

        let (sender, receiver) = mpsc::channel::<Transaction>(self.backpressure);
        let csv_handle = spawn_ledger_reader(ledger_path.to_string(), sender);

        self.route_transactions(receiver, &cards, reconciler.queue()).await;

        if let Err(error) = csv_handle.await {
            error!("Ledger ingestion failed: {error}");
        }

        reconciler.despawn().await?;

        Ok(registry)
    }

    async fn route_transactions(
        &self,
        mut receiver: mpsc::Receiver<Transaction>,
        cards: &HashMap<CardId, Card>,
        reconcile_queue: mpsc::UnboundedSender<Transaction>,
    ) {
        let mut actors = HashMap::<Option<CardId>, LedgerActor>::new();

        // Partitioning by card id gives strict per-card ordering while
        // unrelated cards proceed in parallel.
        while let Some(transaction) = receiver.recv().await {
            let key = transaction.card_ref;
            let actor = actors.entry(key).or_insert_with(|| {
                let card = key.and_then(|id| cards.get(&id).cloned());
                LedgerActor::new(card, self.store.clone(), reconcile_queue.clone())
            });

            if !actor.accept(&transaction) {
                error!("Ledger actor for card [{key:?}] could not accept a transaction");
            }
        }

        drop(reconcile_queue);

        for actor in actors.into_values() {
            if let Err(error) = actor.despawn().await {
                error!("A ledger actor did not despawn gracefully: {error:?}");
            }
        }
    }
}

fn spawn_ledger_reader(path: String, sender: mpsc::Sender<Transaction>) -> JoinHandle<()> {
    spawn_blocking(move || {
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(error) => {
                error!("Error opening ledger CSV at path: {path} | {error}");
                return;
            }
        };

        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(BufReader::new(file));

        for result in reader.deserialize::<Transaction>() {
            match result {
                Ok(transaction) => {
                    if sender.blocking_send(transaction).is_err() {
                        break;
                    }
                }
                Err(error) => {
                    error!("Ledger CSV deserialization error: {error}");
                }
            }
        }
    })
}

async fn load_cards(path: String) -> anyhow::Result<HashMap<CardId, Card>> {
    spawn_blocking(move || {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .from_reader(BufReader::new(File::open(&path)?));

        let mut cards = HashMap::new();
        for result in reader.deserialize::<Card>() {
            match result {
                Ok(card) => {
                    cards.insert(card.id, card);
                }
                Err(error) => {
                    error!("Card CSV deserialization error: {error}");
                }
            }
        }

        Ok(cards)
    })
    .await?
}

async fn load_reminders(path: String) -> anyhow::Result<Vec<Reminder>> {
    spawn_blocking(move || {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .from_reader(BufReader::new(File::open(&path)?));

        let mut reminders = Vec::new();
        for result in reader.deserialize::<ReminderRow>() {
            match result {
                Ok(row) => match row.into_reminder() {
                    Ok(reminder) => reminders.push(reminder),
                    Err(error) => warn!("Skipping reminder row: {error}"),
                },
                Err(error) => {
                    error!("Reminder CSV deserialization error: {error}");
                }
            }
        }

        Ok(reminders)
    })
    .await?
}
