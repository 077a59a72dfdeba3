use std::collections::{BTreeSet, HashMap};

use crate::{
    account::{Account, AccountNumber, Customer, CustomerId},
    transaction::Transaction,
};

use super::{AccountStore, CustomerStore, TransactionLog};

#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    accounts: HashMap<AccountNumber, Account>,
    by_customer: HashMap<CustomerId, BTreeSet<AccountNumber>>,
}

impl AccountStore for InMemoryAccountStore {
    fn save(&mut self, account: Account) {
        if let Some(previous) = self.accounts.get(account.number()) {
            if previous.customer_id() != account.customer_id() {
                if let Some(numbers) = self.by_customer.get_mut(&previous.customer_id()) {
                    numbers.remove(account.number());
                }
            }
        }
        self.by_customer
            .entry(account.customer_id())
            .or_default()
            .insert(account.number().to_string());
        self.accounts.insert(account.number().to_string(), account);
    }

    fn find_all(&self) -> Vec<Account> {
        self.accounts.values().cloned().collect()
    }

    fn find_by_number(&self, number: &str) -> Option<Account> {
        self.accounts.get(number).cloned()
    }

    fn find_by_customer_id(&self, customer_id: &CustomerId) -> Vec<Account> {
        self.by_customer
            .get(customer_id)
            .into_iter()
            .flatten()
            .filter_map(|number| self.accounts.get(number).cloned())
            .collect()
    }

    fn count(&self) -> usize {
        self.accounts.len()
    }
}

#[derive(Debug, Default)]
pub struct InMemoryCustomerStore {
    customers: HashMap<CustomerId, Customer>,
}

impl CustomerStore for InMemoryCustomerStore {
    fn save(&mut self, customer: Customer) {
        self.customers.insert(customer.id, customer);
    }

    fn find_all(&self) -> Vec<Customer> {
        self.customers.values().cloned().collect()
    }

    fn find_by_id(&self, id: &CustomerId) -> Option<Customer> {
        self.customers.get(id).cloned()
    }
}

#[derive(Debug, Default)]
pub struct InMemoryTransactionLog {
    transactions: Vec<Transaction>,
}

impl TransactionLog for InMemoryTransactionLog {
    fn add(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    fn find_by_account(&self, account: &str) -> Vec<Transaction> {
        self.transactions
            .iter()
            .filter(|tx| tx.account == account)
            .cloned()
            .collect()
    }
}
