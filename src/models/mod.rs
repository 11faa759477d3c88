mod card;
mod errors;
mod reminder;
mod transaction;

use serde::{Deserialize, Serialize};

pub use card::Card;
pub use errors::ValidationError;
pub use reminder::{ReconciliationLogEntry, Reminder, ReminderKind};
pub use transaction::Transaction;

/// Effect of a ledger entry on the owning card's balance.
///
/// Replaces the source system's free-string `payment_type`/`payment_method`
/// pair: the effect is derived from the kind, never stored as a signed amount.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Raises what is owed on the card.
    Charge,
    /// Lowers what is owed on the card.
    Settlement,
    /// Establishes or resets the opening balance.
    CarryOver,
}

/// How a transaction was settled. `Card` is the method that links a
/// counterpart payment back to a credit card.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Card,
    Cash,
    Transfer,
    Check,
}
