use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::CardId;

/// A credit card as the reconciliation core sees it: read-only, owned and
/// mutated elsewhere in the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub name: String,
    /// Spending limit; `available = limit + balance`.
    pub limit: Decimal,
    /// Soft-deactivation flag; inactive cards keep their history.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}
