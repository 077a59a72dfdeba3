//! Batch driver that replays a CSV of ledger commands against a fresh
//! [`LedgerService`] and prints the resulting accounts as CSV.

use std::io::{Read, Write};

use anyhow::Result;
use thiserror::Error;
use tracing::info;

use crate::service::{Bank, LedgerError, LedgerService};
use csv_parser::{CommandKind, CommandRow, CsvCommandParser};
use csv_printer::{AccountRow, print_accounts};
pub mod csv_parser;
pub mod csv_printer;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Malformed command: {0}")]
    Parse(#[from] csv::Error),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

pub struct Service<'w, R, W: 'w> {
    pub input: R,
    pub output: &'w mut W,
    pub error_printer: Box<dyn FnMut(u64, CommandError)>,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: Read,
    W: Write + 'w,
{
    pub fn run(mut self) -> Result<()> {
        let parser = CsvCommandParser::new(self.input);

        let mut ledger = LedgerService::new();
        let mut processed = 0usize;

        for (line, row) in parser {
            processed += 1;
            let outcome = row
                .map_err(CommandError::from)
                .and_then(|row| execute(&mut ledger, row).map_err(CommandError::from));
            if let Err(err) = outcome {
                (self.error_printer)(line, err);
            }
        }
        info!(processed, "Command batch finished");

        print_accounts(
            self.output,
            ledger.list_accounts().into_iter().map(|acc| AccountRow {
                account: acc.number().to_string(),
                account_type: acc.account_type(),
                balance: acc.balance(),
            }),
        )
    }
}

pub fn execute(ledger: &mut impl Bank, row: CommandRow) -> Result<(), LedgerError> {
    let account = row.account.as_deref().unwrap_or_default();
    let note = row.note.as_deref();
    match row.kind {
        CommandKind::Open => ledger
            .open_account(
                row.name.as_deref().unwrap_or_default(),
                row.email.as_deref().unwrap_or_default(),
                row.account_type.as_deref().unwrap_or_default(),
            )
            .map(|_| ()),
        CommandKind::Deposit => ledger.deposit(account, row.amount, note),
        CommandKind::Withdraw => ledger.withdraw(account, row.amount, note),
        CommandKind::Transfer => ledger.transfer(
            account,
            row.to.as_deref().unwrap_or_default(),
            row.amount,
            note,
        ),
    }
}
