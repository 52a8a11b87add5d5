//! Balance provider adapter.
//!
//! Converts the aggregator's loosely typed balance payload into [`Account`]
//! snapshots. Two input shapes are accepted:
//!
//! - JSON, as returned by the aggregator's balance endpoint: an object with an
//!   `accounts` array, or a bare array of account objects. Unknown fields are
//!   ignored.
//! - CSV with header `account_id,name,available`.
//!
//! A `null` or missing available balance is valid and yields `None`. A record
//! without an id, a name or a `balances` object is rejected with
//! [`SweepError::MalformedAccount`].

use crate::account::Account;
use crate::error::{Result, SweepError};
use crate::money::Money;
use csv::{ReaderBuilder, Trim};
use log::debug;
use serde::Deserialize;
use std::io::Read;
use std::str::FromStr;

/// Balance figures attached to one provider account.
#[derive(Debug, Deserialize)]
pub struct ProviderBalances {
    #[serde(default)]
    pub available: Option<Money>,
}

/// One account record as sent by the provider.
#[derive(Debug, Deserialize)]
pub struct ProviderAccount {
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub balances: Option<ProviderBalances>,
}

impl ProviderAccount {
    /// Converts the record, naming it by id (or position) when a field is missing.
    pub fn into_account(self, index: usize) -> Result<Account> {
        let label = match self.account_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => format!("#{}", index),
        };
        let id = non_blank(self.account_id)
            .ok_or_else(|| SweepError::malformed(&label, "missing account_id"))?;
        let name =
            non_blank(self.name).ok_or_else(|| SweepError::malformed(&label, "missing name"))?;
        let balances = self
            .balances
            .ok_or_else(|| SweepError::malformed(&label, "missing balances"))?;

        Ok(Account::new(id, name, balances.available))
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BalancePayload {
    Response { accounts: Vec<serde_json::Value> },
    Bare(Vec<serde_json::Value>),
}

/// Reads accounts from a provider JSON document.
pub fn read_json<R: Read>(reader: R) -> Result<Vec<Account>> {
    let records = match serde_json::from_reader::<_, BalancePayload>(reader)? {
        BalancePayload::Response { accounts } => accounts,
        BalancePayload::Bare(accounts) => accounts,
    };

    let accounts = records
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            let label = value
                .get("account_id")
                .and_then(|v| v.as_str())
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("#{}", index));
            serde_json::from_value::<ProviderAccount>(value)
                .map_err(|e| SweepError::malformed(label, e.to_string()))?
                .into_account(index)
        })
        .collect::<Result<Vec<_>>>()?;

    debug!("Read {} accounts from JSON", accounts.len());
    Ok(accounts)
}

/// Raw CSV row: `account_id,name,available`.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default)]
    account_id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    available: Option<String>,
}

/// Reads accounts from a CSV export. An empty `available` cell means the
/// provider reported no available balance.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<Account>> {
    let mut csv_reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut accounts = Vec::new();
    for (index, result) in csv_reader.deserialize::<CsvRow>().enumerate() {
        let row = result?;
        let label = match row.account_id.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => format!("#{}", index),
        };
        let available = match row.available.as_deref() {
            None | Some("") => None,
            Some(raw) => Some(Money::from_str(raw).map_err(|e| {
                SweepError::malformed(&label, format!("available {:?}: {}", raw, e))
            })?),
        };
        let record = ProviderAccount {
            account_id: row.account_id,
            name: row.name,
            balances: Some(ProviderBalances { available }),
        };
        accounts.push(record.into_account(index)?);
    }

    debug!("Read {} accounts from CSV", accounts.len());
    Ok(accounts)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
