use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::account::AccountNumber;

pub type TransactionId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    Deposit,
    Withdraw,
    TransferOut,
    TransferIn,
}

/// Immutable log record. `amount` is always positive, `kind` gives the direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub id: TransactionId,
    pub account: AccountNumber,
    pub amount: Decimal,
    pub kind: TransactionKind,
    pub note: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        account: impl Into<AccountNumber>,
        amount: Decimal,
        kind: TransactionKind,
        note: Option<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            account: account.into(),
            amount,
            kind,
            note,
            timestamp,
        }
    }
}
