use crate::{
    account::{Account, Customer, CustomerId},
    transaction::Transaction,
};

pub mod in_memory;

/// Accounts keyed by account number, indexed by owning customer.
pub trait AccountStore {
    /// Inserts the account, or replaces the one with the same number.
    fn save(&mut self, account: Account);

    fn find_all(&self) -> Vec<Account>;

    fn find_by_number(&self, number: &str) -> Option<Account>;

    fn find_by_customer_id(&self, customer_id: &CustomerId) -> Vec<Account>;

    fn count(&self) -> usize {
        self.find_all().len()
    }
}

pub trait CustomerStore {
    /// Inserts the customer, or replaces the one with the same id.
    fn save(&mut self, customer: Customer);

    fn find_all(&self) -> Vec<Customer>;

    fn find_by_id(&self, id: &CustomerId) -> Option<Customer>;
}

/// Append-only record of every balance change.
pub trait TransactionLog {
    fn add(&mut self, transaction: Transaction);

    /// Records for `account`, in insertion order.
    fn find_by_account(&self, account: &str) -> Vec<Transaction>;
}
