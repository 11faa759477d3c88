//! Pre-commit limit and overpayment check for card-bound transactions.
//!
//! Pure function of the proposed entry, the card, and the card's history:
//! evaluating twice with the same inputs yields the same classification.


use rust_decimal::Decimal;

use crate::balance;
use crate::models::{Card, Transaction};

/// Figures shown to the operator when the guard flags a proposed entry.
#[derive(Debug, Clone, PartialEq)]
pub struct GuardReport {
    pub card_name: String,
    pub limit: Decimal,
    pub current_balance: Decimal,
    pub available: Decimal,
    pub requested: Decimal,
    pub excess: Decimal,
}

/// Classification of a proposed transaction before it is committed.
#[derive(Debug, Clone, PartialEq)]
pub enum GuardResult {
    /// Nothing to flag; commit proceeds.
    Normal,
    /// The referenced card could not be resolved. The check is skipped and
    /// the commit proceeds; a dedicated variant keeps this pass explicit
    /// and testable instead of a null-check fallthrough.
    SkippedMissingCard,
    /// Settling more than is owed on the card. Non-blocking; the caller
    /// decides whether to proceed.
    Overpayment(GuardReport),
    /// Charging past the available limit. Blocks the commit; there is no
    /// confirm-anyway path.
    LimitExceeded(GuardReport),
}

impl GuardResult {
    pub fn blocks_commit(&self) -> bool {
        matches!(self, Self::LimitExceeded(_))
    }
}

/// Classifies `proposed` against the card's current balance.
///
/// `history` is the card's own transaction list; the proposed entry must not
/// be part of it yet. Entries that do not target a card are always `Normal`.
pub fn evaluate_limit(
    proposed: &Transaction,
    card: Option<&Card>,
    history: &[Transaction],
) -> GuardResult {
    if proposed.card_ref.is_none() {
        return GuardResult::Normal;
    }

    let Some(card) = card else {
        return GuardResult::SkippedMissingCard;
    };

    let current_balance = balance::running_balance(history);
    let available = card.limit + current_balance;

    let report = |excess: Decimal| GuardReport {
        card_name: card.name.clone(),
        limit: card.limit,
        current_balance,
        available,
        requested: proposed.amount,
        excess,
    };

    if proposed.is_card_settlement() {
        // Paying down the card from a bank source: warn when the payment
        // exceeds what is actually owed.
        let max_settlement = -current_balance;
        if proposed.amount > max_settlement {
            return GuardResult::Overpayment(report(proposed.amount - max_settlement));
        }
    } else if proposed.is_counterpart_entry() && proposed.is_paid_by_card() {
        // A third-party bill charged to the card: reject when it does not
        // fit inside the remaining headroom.
        if proposed.amount > available {
            return GuardResult::LimitExceeded(report(proposed.amount - available));
        }
    }

    GuardResult::Normal
}
