use std::fmt;

use rust_decimal::{Decimal, prelude::Zero};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

pub type AccountNumber = String;
pub type CustomerId = Uuid;

/// Formats the `n`-th account number: `AC` followed by at least six zero-padded digits.
pub fn account_number(sequence: usize) -> AccountNumber {
    format!("AC{sequence:06}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountType {
    Savings,
    Current,
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountType::Savings => f.write_str("SAVINGS"),
            AccountType::Current => f.write_str("CURRENT"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
}

impl Customer {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceAction {
    Credit,
    Debit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceEventKind {
    Credited,
    Debited,
}

/// Checked balance change, produced by [`Account::handle`] and consumed by [`Account::apply`].
#[derive(Debug, Clone)]
pub struct BalanceEvent {
    amount: Decimal,
    kind: BalanceEventKind,
}

impl BalanceEvent {
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn kind(&self) -> BalanceEventKind {
        self.kind
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    #[error("Insufficient Balance")]
    InsufficientFunds {
        account: AccountNumber,
        balance: Decimal,
        requested: Decimal,
    },
    #[error("Balance of {account} cannot hold another {amount}")]
    BalanceOverflow {
        account: AccountNumber,
        amount: Decimal,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    number: AccountNumber,
    account_type: AccountType,
    balance: Decimal,
    customer_id: CustomerId,
}

impl Account {
    pub fn new(number: AccountNumber, account_type: AccountType, customer_id: CustomerId) -> Self {
        Self {
            number,
            account_type,
            balance: Decimal::zero(),
            customer_id,
        }
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn account_type(&self) -> AccountType {
        self.account_type
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn apply(&mut self, event: &BalanceEvent) {
        match event.kind {
            BalanceEventKind::Credited => {
                self.balance += event.amount;
            }
            BalanceEventKind::Debited => {
                self.balance -= event.amount;
            }
        }
    }

    /// Checks that `amount` can be moved in the given direction without breaking the
    /// balance invariants. Nothing changes until the returned event is applied.
    pub fn handle(
        &self,
        action: BalanceAction,
        amount: Decimal,
    ) -> Result<BalanceEvent, AccountError> {
        match action {
            BalanceAction::Credit => {
                if self.balance.checked_add(amount).is_none() {
                    return Err(AccountError::BalanceOverflow {
                        account: self.number.clone(),
                        amount,
                    });
                }
                Ok(BalanceEvent {
                    amount,
                    kind: BalanceEventKind::Credited,
                })
            }
            BalanceAction::Debit => {
                // withdrawing the whole balance is fine
                if self.balance < amount {
                    return Err(AccountError::InsufficientFunds {
                        account: self.number.clone(),
                        balance: self.balance,
                        requested: amount,
                    });
                }
                Ok(BalanceEvent {
                    amount,
                    kind: BalanceEventKind::Debited,
                })
            }
        }
    }
}
