use thiserror::Error;

use crate::models::{Transaction, TransactionKind};
use crate::types::{DayWindowError, ReminderId, TransactionId};

/// Rejections raised before a proposed entry reaches the limit guard.
///
/// Every variant is per-operation and recoverable; the caller retries with
/// corrected input.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Amount must be positive for transaction [{transaction_id}]:[{kind:?}]")]
    NonPositiveAmount {
        transaction_id: TransactionId,
        kind: TransactionKind,
    },
    #[error("Transaction [{transaction_id}]:[{kind:?}] names neither a card nor a counterpart")]
    MissingReference {
        transaction_id: TransactionId,
        kind: TransactionKind,
    },
    #[error("Unknown reminder kind [{0}]")]
    UnknownReminderKind(String),
    #[error("Reminder [{reminder_id}] of kind [{kind}] is missing its {field} reference")]
    MissingReminderReference {
        reminder_id: ReminderId,
        kind: &'static str,
        field: &'static str,
    },
    #[error(transparent)]
    Window(#[from] DayWindowError),
}

impl ValidationError {
    pub fn non_positive_amount(tx: &Transaction) -> Self {
        Self::NonPositiveAmount {
            transaction_id: tx.id,
            kind: tx.kind,
        }
    }

    pub fn missing_reference(tx: &Transaction) -> Self {
        Self::MissingReference {
            transaction_id: tx.id,
            kind: tx.kind,
        }
    }

    pub fn missing_reminder_reference(
        reminder_id: ReminderId,
        kind: &'static str,
        field: &'static str,
    ) -> Self {
        Self::MissingReminderReference {
            reminder_id,
            kind,
            field,
        }
    }
}
