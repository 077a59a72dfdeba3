use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info, instrument, warn};

use crate::{
    account::{
        Account, AccountNumber, BalanceAction, BalanceEventKind, Customer, account_number,
    },
    store::{
        AccountStore, CustomerStore, TransactionLog,
        in_memory::{InMemoryAccountStore, InMemoryCustomerStore, InMemoryTransactionLog},
    },
    transaction::{Transaction, TransactionKind},
    validation::{
        ValidationError, validate_account_type, validate_amount, validate_email, validate_name,
    },
};

use super::{Bank, LedgerError};

/// [`Bank`] implementation over injected stores.
///
/// Account numbers are derived from the number of stored accounts, so accounts
/// must never be removed from the account store.
pub struct LedgerService<
    A = InMemoryAccountStore,
    C = InMemoryCustomerStore,
    T = InMemoryTransactionLog,
> {
    accounts: A,
    customers: C,
    log: T,
    last_timestamp: Option<DateTime<Utc>>,
}

impl LedgerService {
    /// Ledger backed by in-memory stores.
    pub fn new() -> Self {
        Self::with_stores(
            InMemoryAccountStore::default(),
            InMemoryCustomerStore::default(),
            InMemoryTransactionLog::default(),
        )
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, C, T> LedgerService<A, C, T>
where
    A: AccountStore,
    C: CustomerStore,
    T: TransactionLog,
{
    pub fn with_stores(accounts: A, customers: C, log: T) -> Self {
        Self {
            accounts,
            customers,
            log,
            last_timestamp: None,
        }
    }

    fn get_account(&self, number: &str) -> Result<Account, LedgerError> {
        self.accounts
            .find_by_number(number)
            .ok_or_else(|| LedgerError::AccountNotFound(number.to_string()))
    }

    /// Wall clock time, clamped so it never goes backwards between records.
    fn next_timestamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let timestamp = match self.last_timestamp {
            Some(last) if last > now => last,
            _ => now,
        };
        self.last_timestamp = Some(timestamp);
        timestamp
    }

    fn record(
        &mut self,
        account: &str,
        amount: Decimal,
        kind: TransactionKind,
        note: Option<&str>,
    ) {
        let timestamp = self.next_timestamp();
        let transaction =
            Transaction::new(account, amount, kind, note.map(str::to_owned), timestamp);
        info!(
            account,
            amount = %amount,
            kind = ?kind,
            transaction_id = %transaction.id,
            "Transaction recorded"
        );
        self.log.add(transaction);
    }

    fn change_balance(
        &mut self,
        number: &str,
        amount: Option<Decimal>,
        note: Option<&str>,
        action: BalanceAction,
    ) -> Result<(), LedgerError> {
        let amount = validate_amount(amount)?;
        let mut account = self.get_account(number)?;
        let evt = account.handle(action, amount).inspect_err(|err| {
            warn!(account = number, amount = %amount, error = %err, "Balance change rejected");
        })?;
        account.apply(&evt);
        self.accounts.save(account);

        let kind = match evt.kind() {
            BalanceEventKind::Credited => TransactionKind::Deposit,
            BalanceEventKind::Debited => TransactionKind::Withdraw,
        };
        self.record(number, evt.amount(), kind, note);
        Ok(())
    }
}

impl<A, C, T> Bank for LedgerService<A, C, T>
where
    A: AccountStore,
    C: CustomerStore,
    T: TransactionLog,
{
    #[instrument(skip(self))]
    fn open_account(
        &mut self,
        name: &str,
        email: &str,
        account_type: &str,
    ) -> Result<AccountNumber, LedgerError> {
        validate_name(name)?;
        validate_email(email)?;
        let account_type = validate_account_type(account_type)?;

        let customer = Customer::new(name, email);
        let customer_id = customer.id;
        self.customers.save(customer);

        let number = account_number(self.accounts.count() + 1);
        self.accounts
            .save(Account::new(number.clone(), account_type, customer_id));
        info!(account = %number, customer_id = %customer_id, %account_type, "Account opened");
        Ok(number)
    }

    fn list_accounts(&self) -> Vec<Account> {
        let mut accounts = self.accounts.find_all();
        accounts.sort_by(|a, b| a.number().cmp(b.number()));
        debug!(count = accounts.len(), "Listing accounts");
        accounts
    }

    fn find_account(&self, number: &str) -> Result<Account, LedgerError> {
        self.get_account(number)
    }

    #[instrument(skip(self))]
    fn deposit(
        &mut self,
        number: &str,
        amount: Option<Decimal>,
        note: Option<&str>,
    ) -> Result<(), LedgerError> {
        self.change_balance(number, amount, note, BalanceAction::Credit)
    }

    #[instrument(skip(self))]
    fn withdraw(
        &mut self,
        number: &str,
        amount: Option<Decimal>,
        note: Option<&str>,
    ) -> Result<(), LedgerError> {
        self.change_balance(number, amount, note, BalanceAction::Debit)
    }

    #[instrument(skip(self))]
    fn transfer(
        &mut self,
        from: &str,
        to: &str,
        amount: Option<Decimal>,
        note: Option<&str>,
    ) -> Result<(), LedgerError> {
        let amount = validate_amount(amount)?;
        if from == to {
            return Err(ValidationError::SelfTransfer.into());
        }
        let mut source = self.get_account(from)?;
        let mut destination = self.get_account(to)?;

        // both sides are checked before either balance moves
        let debit = source
            .handle(BalanceAction::Debit, amount)
            .inspect_err(|err| {
                warn!(from, to, amount = %amount, error = %err, "Transfer rejected");
            })?;
        let credit = destination.handle(BalanceAction::Credit, amount)?;

        source.apply(&debit);
        destination.apply(&credit);
        self.accounts.save(source);
        self.accounts.save(destination);

        self.record(from, debit.amount(), TransactionKind::TransferOut, note);
        self.record(to, credit.amount(), TransactionKind::TransferIn, note);
        Ok(())
    }

    fn statement(&self, number: &str) -> Vec<Transaction> {
        let mut transactions = self.log.find_by_account(number);
        // stable, so records sharing a timestamp keep log order
        transactions.sort_by_key(|tx| tx.timestamp);
        debug!(account = number, count = transactions.len(), "Statement built");
        transactions
    }

    fn search_accounts_by_customer_name(&self, query: Option<&str>) -> Vec<Account> {
        let query = query.unwrap_or_default().to_lowercase();
        let mut accounts: Vec<Account> = self
            .customers
            .find_all()
            .into_iter()
            .filter(|customer| customer.name.to_lowercase().contains(&query))
            .flat_map(|customer| self.accounts.find_by_customer_id(&customer.id))
            .collect();
        accounts.sort_by(|a, b| a.number().cmp(b.number()));
        debug!(query = %query, count = accounts.len(), "Searched accounts");
        accounts
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::prelude::{FromPrimitive, Zero};

    use crate::account::{AccountError, AccountType};

    use super::*;

    fn amount(value: u32) -> Option<Decimal> {
        Decimal::from_u32(value)
    }

    #[test]
    fn open_account_assigns_sequential_numbers() {
        let mut ledger = LedgerService::new();
        let first = ledger.open_account("Alice", "a@x.com", "savings").unwrap();
        let second = ledger.open_account("Bob", "b@x.com", "Current").unwrap();
        assert_eq!(first, "AC000001");
        assert_eq!(second, "AC000002");

        let acc = ledger.find_account(&first).unwrap();
        assert_eq!(acc.balance(), Decimal::zero());
        assert_eq!(acc.account_type(), AccountType::Savings);
        assert_eq!(
            ledger.find_account(&second).unwrap().account_type(),
            AccountType::Current
        );
    }

    #[test]
    fn open_account_checks_name_then_email_then_type() {
        let mut ledger = LedgerService::new();
        assert_eq!(
            ledger.open_account("", "bad", "bad").unwrap_err(),
            LedgerError::Validation(ValidationError::NameRequired)
        );
        assert_eq!(
            ledger.open_account("Alice", "bad", "bad").unwrap_err(),
            LedgerError::Validation(ValidationError::EmailRequired)
        );
        assert_eq!(
            ledger.open_account("Alice", "a@x.com", "bad").unwrap_err(),
            LedgerError::Validation(ValidationError::InvalidAccountType)
        );
        assert!(ledger.list_accounts().is_empty());
        assert!(ledger.search_accounts_by_customer_name(None).is_empty());
    }

    #[test]
    fn deposit_and_withdraw() {
        let mut ledger = LedgerService::new();
        let number = ledger.open_account("Alice", "a@x.com", "savings").unwrap();
        ledger.deposit(&number, amount(100), Some("salary")).unwrap();
        assert_eq!(ledger.find_account(&number).unwrap().balance(), amount(100).unwrap());

        let err = ledger.withdraw(&number, amount(150), None).unwrap_err();
        assert!(err.is_insufficient_funds());
        assert_eq!(err.to_string(), "Insufficient Balance");
        assert_eq!(ledger.find_account(&number).unwrap().balance(), amount(100).unwrap());

        ledger.withdraw(&number, amount(100), None).unwrap();
        assert_eq!(ledger.find_account(&number).unwrap().balance(), Decimal::zero());

        let statement = ledger.statement(&number);
        assert_eq!(statement.len(), 2);
        assert_eq!(statement[0].kind, TransactionKind::Deposit);
        assert_eq!(statement[0].note.as_deref(), Some("salary"));
        assert_eq!(statement[1].kind, TransactionKind::Withdraw);
        assert_eq!(statement[1].note, None);
        assert!(statement[0].timestamp <= statement[1].timestamp);
    }

    #[test]
    fn amount_is_validated_before_lookup() {
        let mut ledger = LedgerService::new();
        assert_eq!(
            ledger.deposit("AC999999", amount(0), None).unwrap_err(),
            LedgerError::Validation(ValidationError::InvalidAmount)
        );
        assert_eq!(
            ledger.withdraw("AC999999", None, None).unwrap_err(),
            LedgerError::Validation(ValidationError::InvalidAmount)
        );
        assert_eq!(
            ledger.deposit("AC999999", amount(10), Some("x")).unwrap_err(),
            LedgerError::AccountNotFound("AC999999".to_string())
        );
    }

    #[test]
    fn transfer_moves_money_and_logs_both_sides() {
        let mut ledger = LedgerService::new();
        let alice = ledger.open_account("Alice", "a@x.com", "savings").unwrap();
        let bob = ledger.open_account("Bob", "b@x.com", "current").unwrap();
        ledger.deposit(&alice, amount(50), None).unwrap();

        ledger.transfer(&alice, &bob, amount(20), Some("lunch")).unwrap();
        assert_eq!(ledger.find_account(&alice).unwrap().balance(), amount(30).unwrap());
        assert_eq!(ledger.find_account(&bob).unwrap().balance(), amount(20).unwrap());

        let out = ledger.statement(&alice);
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].kind, TransactionKind::TransferOut);
        assert_eq!(out[1].amount, amount(20).unwrap());
        assert_eq!(out[1].note.as_deref(), Some("lunch"));

        let incoming = ledger.statement(&bob);
        assert_eq!(incoming.len(), 1);
        assert_eq!(incoming[0].kind, TransactionKind::TransferIn);
        assert_eq!(incoming[0].note.as_deref(), Some("lunch"));
        assert_ne!(incoming[0].id, out[1].id);
        assert!(out[1].timestamp <= incoming[0].timestamp);
    }

    #[test]
    fn transfer_failures_leave_balances_untouched() {
        let mut ledger = LedgerService::new();
        let alice = ledger.open_account("Alice", "a@x.com", "savings").unwrap();
        let bob = ledger.open_account("Bob", "b@x.com", "current").unwrap();
        ledger.deposit(&alice, amount(10), None).unwrap();

        assert_eq!(
            ledger.transfer(&alice, &alice, amount(1), None).unwrap_err(),
            LedgerError::Validation(ValidationError::SelfTransfer)
        );
        // self transfer is rejected before lookup
        assert_eq!(
            ledger.transfer("AC999999", "AC999999", amount(1), None).unwrap_err(),
            LedgerError::Validation(ValidationError::SelfTransfer)
        );
        assert_eq!(
            ledger.transfer("AC999998", "AC999999", amount(1), None).unwrap_err(),
            LedgerError::AccountNotFound("AC999998".to_string())
        );
        assert_eq!(
            ledger.transfer(&alice, "AC999999", amount(1), None).unwrap_err(),
            LedgerError::AccountNotFound("AC999999".to_string())
        );
        let err = ledger.transfer(&alice, &bob, amount(11), None).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Account(AccountError::InsufficientFunds { .. })
        ));

        assert_eq!(ledger.find_account(&alice).unwrap().balance(), amount(10).unwrap());
        assert_eq!(ledger.find_account(&bob).unwrap().balance(), Decimal::zero());
        assert_eq!(ledger.statement(&alice).len(), 1);
        assert!(ledger.statement(&bob).is_empty());
    }

    #[test]
    fn transfer_rejects_destination_overflow() {
        let mut ledger = LedgerService::new();
        let alice = ledger.open_account("Alice", "a@x.com", "savings").unwrap();
        let bob = ledger.open_account("Bob", "b@x.com", "current").unwrap();
        ledger.deposit(&alice, amount(10), None).unwrap();
        ledger.deposit(&bob, Some(Decimal::MAX), None).unwrap();

        let err = ledger.transfer(&alice, &bob, amount(5), None).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Account(AccountError::BalanceOverflow { .. })
        ));
        assert_eq!(ledger.find_account(&alice).unwrap().balance(), amount(10).unwrap());
        assert_eq!(ledger.statement(&alice).len(), 1);
    }

    #[test]
    fn search_by_customer_name() {
        let mut ledger = LedgerService::new();
        ledger.open_account("Alice Smith", "a@x.com", "savings").unwrap();
        ledger.open_account("Bob", "b@x.com", "current").unwrap();
        ledger.open_account("alice jones", "aj@x.com", "current").unwrap();

        let numbers = |accounts: Vec<Account>| -> Vec<String> {
            accounts.iter().map(|acc| acc.number().to_string()).collect()
        };
        assert_eq!(
            numbers(ledger.search_accounts_by_customer_name(Some("ALICE"))),
            ["AC000001", "AC000003"]
        );
        assert_eq!(
            numbers(ledger.search_accounts_by_customer_name(Some("ob"))),
            ["AC000002"]
        );
        assert_eq!(ledger.search_accounts_by_customer_name(None).len(), 3);
        assert_eq!(ledger.search_accounts_by_customer_name(Some("")).len(), 3);
        assert!(ledger.search_accounts_by_customer_name(Some("carol")).is_empty());
    }

    #[test]
    fn statement_of_unknown_account_is_empty() {
        let ledger = LedgerService::new();
        assert!(ledger.statement("AC000001").is_empty());
    }
}
