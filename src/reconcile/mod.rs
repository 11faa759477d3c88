//! Post-commit reminder reconciliation.
//!
//! Runs once after every committed transaction, over the full reminder set
//! and the full transaction history — satisfaction depends on "is there any
//! matching entry in this calendar month inside the reminder's day window",
//! not merely on the triggering write. Pure compute; the caller owns
//! persistence of the updated reminders and the appended log entries.


use crate::models::{Card, ReconciliationLogEntry, Reminder, ReminderKind, Transaction};
use crate::types::{CardId, DayWindow};

/// Result of one reconciliation pass: the reminders that changed and one
/// log entry per applied change.
#[derive(Debug, Clone, Default)]
pub struct ReconcileOutcome {
    pub updated: Vec<Reminder>,
    pub log_entries: Vec<ReconciliationLogEntry>,
}

/// Re-evaluates every active reminder against the just-committed
/// transaction.
///
/// `history` is the full ledger including `committed`; `cards` is the card
/// registry used to resolve `CardDue` references. A reminder whose card
/// cannot be resolved is skipped without failing the rest of the pass.
pub fn reconcile(
    committed: &Transaction,
    reminders: &[Reminder],
    cards: &[Card],
    history: &[Transaction],
) -> ReconcileOutcome {
    let mut outcome = ReconcileOutcome::default();

    for reminder in reminders.iter().filter(|reminder| reminder.active) {
        if !matches(reminder, committed, cards, history) {
            continue;
        }

        let mut updated = reminder.clone();

        if updated.repeats_monthly {
            // Counts occurrences this cycle; deliberately uncapped by
            // target_count, and never auto-closed.
            updated.remaining_count += 1;
        } else {
            updated.remaining_count = updated.remaining_count.saturating_sub(1);
            if updated.remaining_count == 0 {
                // Terminal, whatever auto_close_on_settle says. Also covers
                // a one-shot created with no target, which would otherwise
                // stay open forever.
                updated.active = false;
            }
        }

        outcome.log_entries.push(ReconciliationLogEntry {
            reminder_id: updated.id,
            reminder_kind: updated.kind.label().to_string(),
            transaction_id: committed.id,
            transaction_date: committed.occurred_on,
            transaction_amount: committed.amount,
        });
        outcome.updated.push(updated);
    }

    outcome
}

fn matches(
    reminder: &Reminder,
    committed: &Transaction,
    cards: &[Card],
    history: &[Transaction],
) -> bool {
    match &reminder.kind {
        ReminderKind::General => false,
        ReminderKind::CardDue { card, window } => {
            if resolve_card(cards, *card).is_none() {
                return false;
            }

            if committed.is_card_settlement() && committed.card_ref == Some(*card) {
                // Paying the card bill directly.
                return window_satisfied(*window, committed, history, |tx| {
                    tx.is_card_settlement() && tx.card_ref == committed.card_ref
                });
            }

            if committed.is_counterpart_entry()
                && committed.is_paid_by_card()
                && committed.card_ref == Some(*card)
            {
                // Cross-link: a counterpart bill charged to this card counts
                // toward the same reminder; here the month scan is keyed on
                // the settlement method rather than the flow.
                return window_satisfied(*window, committed, history, |tx| {
                    tx.is_paid_by_card() && tx.card_ref == committed.card_ref
                });
            }

            false
        }
        ReminderKind::CounterpartDue {
            counterpart,
            method_filter,
            window,
        } => {
            if committed.counterpart_ref != Some(*counterpart) {
                return false;
            }

            if let Some(filter) = method_filter {
                if committed.method != *filter {
                    return false;
                }
            }

            window_satisfied(*window, committed, history, |tx| {
                tx.counterpart_ref == Some(*counterpart)
                    && method_filter.map_or(true, |filter| tx.method == filter)
            })
        }
    }
}

fn resolve_card(cards: &[Card], id: CardId) -> Option<&Card> {
    cards.iter().find(|card| card.id == id)
}

/// With no window the trigger alone satisfies the reminder; with one, at
/// least one same-flow entry must exist in the committed transaction's
/// calendar month with a day-of-month inside the (possibly wrapping) window.
fn window_satisfied(
    window: Option<DayWindow>,
    committed: &Transaction,
    history: &[Transaction],
    flow: impl Fn(&Transaction) -> bool,
) -> bool {
    let Some(window) = window else {
        return true;
    };

    let month = committed.month_key();

    history.iter().any(|tx| {
        flow(tx) && tx.month_key() == month && window.contains(tx.day_of_month())
    })
}
