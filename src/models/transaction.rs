use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::errors::ValidationError;
use crate::models::{PaymentMethod, TransactionKind};
use crate::types::{CardId, CounterpartId, TransactionId};

/// A single ledger entry, tagged with a card and/or counterpart reference.
///
/// `amount` is always positive; the direction of its effect on a card's
/// balance is derived from `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Store-assigned id; 0 until the ledger accepts the entry.
    #[serde(default)]
    pub id: TransactionId,
    pub kind: TransactionKind,
    /// The card this entry charges or settles, if any.
    #[serde(rename = "card", default)]
    pub card_ref: Option<CardId>,
    /// The counterpart ("cari") this entry pays, if any.
    #[serde(rename = "counterpart", default)]
    pub counterpart_ref: Option<CounterpartId>,
    pub amount: Decimal,
    pub occurred_on: NaiveDate,
    #[serde(default)]
    pub due_on: Option<NaiveDate>,
    pub method: PaymentMethod,
}

impl Transaction {
    /// Rejects entries that must never reach the guard or the ledger.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.amount <= Decimal::ZERO {
            return Err(ValidationError::non_positive_amount(self));
        }

        if self.card_ref.is_none() && self.counterpart_ref.is_none() {
            return Err(ValidationError::missing_reference(self));
        }

        Ok(())
    }

    /// The "pay down my card from a bank source" flow: a settlement recorded
    /// directly against the card, outside any counterpart payment.
    pub fn is_card_settlement(&self) -> bool {
        self.kind == TransactionKind::Settlement
            && self.card_ref.is_some()
            && self.counterpart_ref.is_none()
    }

    pub fn is_counterpart_entry(&self) -> bool {
        self.counterpart_ref.is_some()
    }

    /// A charge that reached the card through another flow, settled by card.
    /// CarryOver rows carry a method field but never count as card spend.
    pub fn is_paid_by_card(&self) -> bool {
        self.method == PaymentMethod::Card
            && self.card_ref.is_some()
            && self.kind != TransactionKind::CarryOver
    }

    pub fn month_key(&self) -> (i32, u32) {
        (self.occurred_on.year(), self.occurred_on.month())
    }

    pub fn day_of_month(&self) -> u32 {
        self.occurred_on.day()
    }
}
