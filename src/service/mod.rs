use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    account::{Account, AccountError, AccountNumber},
    transaction::Transaction,
    validation::ValidationError,
};

pub mod ledger_service;
pub mod shared;

pub use ledger_service::LedgerService;
pub use shared::SharedLedger;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Account not found: {0}")]
    AccountNotFound(AccountNumber),
    #[error(transparent)]
    Account(#[from] AccountError),
}

impl LedgerError {
    pub fn is_insufficient_funds(&self) -> bool {
        matches!(
            self,
            LedgerError::Account(AccountError::InsufficientFunds { .. })
        )
    }
}

/// Banking operations over accounts, customers and their transaction history.
///
/// Every mutating call either applies its whole effect, including all transaction
/// records it produces, or fails without changing anything.
pub trait Bank {
    /// Registers a new customer and opens their account, returning its number.
    fn open_account(
        &mut self,
        name: &str,
        email: &str,
        account_type: &str,
    ) -> Result<AccountNumber, LedgerError>;

    /// All accounts, ordered by account number.
    fn list_accounts(&self) -> Vec<Account>;

    fn find_account(&self, number: &str) -> Result<Account, LedgerError>;

    fn deposit(
        &mut self,
        number: &str,
        amount: Option<Decimal>,
        note: Option<&str>,
    ) -> Result<(), LedgerError>;

    fn withdraw(
        &mut self,
        number: &str,
        amount: Option<Decimal>,
        note: Option<&str>,
    ) -> Result<(), LedgerError>;

    fn transfer(
        &mut self,
        from: &str,
        to: &str,
        amount: Option<Decimal>,
        note: Option<&str>,
    ) -> Result<(), LedgerError>;

    /// Transactions of `number` ordered by time. Unknown accounts yield an empty statement.
    fn statement(&self, number: &str) -> Vec<Transaction>;

    /// Accounts of every customer whose name contains `query`, ignoring case.
    /// `None` matches everyone.
    fn search_accounts_by_customer_name(&self, query: Option<&str>) -> Vec<Account>;
}
