use std::{io::Read, str::FromStr};

use csv::{DeserializeRecordsIntoIter, Trim};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, de::Error};

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    Open,
    Deposit,
    Withdraw,
    Transfer,
}

/// One ledger command. Columns a command doesn't use are left empty.
#[derive(Debug, Deserialize)]
pub struct CommandRow {
    #[serde(rename = "op")]
    pub kind: CommandKind,
    pub account: Option<String>,
    pub to: Option<String>,
    #[serde(default, deserialize_with = "exact_decimal")]
    pub amount: Option<Decimal>,
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "type")]
    pub account_type: Option<String>,
    pub note: Option<String>,
}

/// Reads the column as text so amounts never pass through `f64`.
fn exact_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|raw| Decimal::from_str_exact(&raw))
        .transpose()
        .map_err(D::Error::custom)
}

/// Parses ledger commands in CSV format, yielding each row with its line number.
pub struct CsvCommandParser<R> {
    iter: DeserializeRecordsIntoIter<R, CommandRow>,
}

impl<R> CsvCommandParser<R>
where
    R: Read,
{
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);

        Self {
            iter: reader.into_deserialize(),
        }
    }
}

impl<R> Iterator for CsvCommandParser<R>
where
    R: Read,
{
    type Item = (u64, Result<CommandRow, csv::Error>);

    fn next(&mut self) -> Option<Self::Item> {
        let curr_line = self.iter.reader().position().line();
        self.iter.next().map(|row| (curr_line, row))
    }
}
