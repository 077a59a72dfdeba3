use parking_lot::Mutex;
use rust_decimal::Decimal;

use crate::{
    account::{Account, AccountNumber},
    transaction::Transaction,
};

use super::{Bank, LedgerError, LedgerService};

/// Serializes every operation of the wrapped [`Bank`] behind a single lock, so it
/// can be shared between threads. Reads take the lock too and never see a
/// transfer half applied.
///
/// Account numbers stay unique under concurrent openings, since they are derived from
/// the account count at the time the account is opened.
pub struct SharedLedger<B = LedgerService> {
    inner: Mutex<B>,
}

impl<B: Bank> SharedLedger<B> {
    pub fn new(bank: B) -> Self {
        Self {
            inner: Mutex::new(bank),
        }
    }

    pub fn into_inner(self) -> B {
        self.inner.into_inner()
    }

    pub fn open_account(
        &self,
        name: &str,
        email: &str,
        account_type: &str,
    ) -> Result<AccountNumber, LedgerError> {
        self.inner.lock().open_account(name, email, account_type)
    }

    pub fn list_accounts(&self) -> Vec<Account> {
        self.inner.lock().list_accounts()
    }

    pub fn find_account(&self, number: &str) -> Result<Account, LedgerError> {
        self.inner.lock().find_account(number)
    }

    pub fn deposit(
        &self,
        number: &str,
        amount: Option<Decimal>,
        note: Option<&str>,
    ) -> Result<(), LedgerError> {
        self.inner.lock().deposit(number, amount, note)
    }

    pub fn withdraw(
        &self,
        number: &str,
        amount: Option<Decimal>,
        note: Option<&str>,
    ) -> Result<(), LedgerError> {
        self.inner.lock().withdraw(number, amount, note)
    }

    pub fn transfer(
        &self,
        from: &str,
        to: &str,
        amount: Option<Decimal>,
        note: Option<&str>,
    ) -> Result<(), LedgerError> {
        self.inner.lock().transfer(from, to, amount, note)
    }

    pub fn statement(&self, number: &str) -> Vec<Transaction> {
        self.inner.lock().statement(number)
    }

    pub fn search_accounts_by_customer_name(&self, query: Option<&str>) -> Vec<Account> {
        self.inner.lock().search_accounts_by_customer_name(query)
    }
}

impl Default for SharedLedger {
    fn default() -> Self {
        Self::new(LedgerService::new())
    }
}
