use std::io::Write;

use csv::Writer;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::account::AccountType;

#[derive(Debug, Serialize)]
pub struct AccountRow {
    pub account: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub balance: Decimal,
}

pub fn print_accounts<W>(
    output: &mut W,
    accounts: impl Iterator<Item = AccountRow>,
) -> anyhow::Result<()>
where
    W: Write,
{
    let mut writer = Writer::from_writer(output);
    for acc in accounts {
        if let Err(err) = writer.serialize(acc) {
            anyhow::bail!("Failed to write to CSV: {err}")
        }
    }
    if let Err(err) = writer.flush() {
        anyhow::bail!("Failed to flush CSV writer: {err}")
    }
    Ok(())
}
