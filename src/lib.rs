/// Customers, accounts and the balance rules they enforce.
/// Balances change only through events produced by handling a credit or debit.
pub mod account;

/// Immutable transaction records.
pub mod transaction;

/// Input checks for names, emails, account types and amounts.
pub mod validation;

/// Storage contracts the ledger depends on, plus "in memory" implementations.
pub mod store;

/// The [`service::Bank`] interface and its [`service::LedgerService`] implementation.
/// Coordinates validation, balance changes and the transaction log.
///
/// [`service::SharedLedger`] wraps any bank behind a lock for use across threads.
pub mod service;

/// CSV batch driver used by the binary and by integration tests.
pub mod bin_utils;
