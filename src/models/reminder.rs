use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::PaymentMethod;
use crate::types::{CardId, CounterpartId, DayWindow, ReminderId, TransactionId};

/// What a reminder is watching for. Each variant carries only the fields
/// that its matching rule reads, replacing the source system's free-string
/// `type` with per-type optional columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderKind {
    /// Free-form note; never touched by the reconciliation engine.
    General,
    /// A card bill falling due, optionally inside a day-of-month window.
    CardDue {
        card: CardId,
        window: Option<DayWindow>,
    },
    /// A counterpart obligation, optionally gated by settlement method.
    CounterpartDue {
        counterpart: CounterpartId,
        method_filter: Option<PaymentMethod>,
        window: Option<DayWindow>,
    },
}

impl ReminderKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::CardDue { .. } => "card_due",
            Self::CounterpartDue { .. } => "counterpart_due",
        }
    }
}

/// A recurring or one-shot obligation tracked against the ledger.
///
/// Mutated only by the reconciliation pass: repeating reminders count
/// occurrences upward per cycle, one-shot reminders count down from
/// `target_count` and close (terminally) on reaching zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: ReminderId,
    pub kind: ReminderKind,
    pub repeats_monthly: bool,
    /// Accepted input; informational only. Both settings close a one-shot
    /// reminder once its count is exhausted (preserved source behavior,
    /// flagged to product owners).
    pub auto_close_on_settle: bool,
    pub target_count: Option<u32>,
    pub remaining_count: u32,
    pub active: bool,
}

impl Reminder {
    /// A freshly created reminder: active, with the counter at 0 for
    /// repeating reminders and at `target_count` for one-shot ones.
    pub fn new(
        id: ReminderId,
        kind: ReminderKind,
        repeats_monthly: bool,
        auto_close_on_settle: bool,
        target_count: Option<u32>,
    ) -> Self {
        let remaining_count = if repeats_monthly {
            0
        } else {
            target_count.unwrap_or(0)
        };

        Self {
            id,
            kind,
            repeats_monthly,
            auto_close_on_settle,
            target_count,
            remaining_count,
            active: true,
        }
    }
}

/// Immutable record of one reminder transition, kept for history and audit
/// views. Text formatting for display lives outside the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationLogEntry {
    pub reminder_id: ReminderId,
    pub reminder_kind: String,
    pub transaction_id: TransactionId,
    pub transaction_date: NaiveDate,
    pub transaction_amount: Decimal,
}
