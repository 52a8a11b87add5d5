//! Account balance snapshot as seen by the sweep engine.

use crate::money::Money;

/// A linked account's balance at the time of one simulation request.
///
/// Snapshots are read-only and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Provider-assigned account identifier.
    pub id: String,

    /// Display name shown to the user, e.g. "Plaid Checking".
    pub name: String,

    /// Spendable balance. `None` when the provider reports no available
    /// balance (typical for credit accounts); such accounts are never swept.
    pub available_balance: Option<Money>,
}

impl Account {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        available_balance: Option<Money>,
    ) -> Self {
        Account {
            id: id.into(),
            name: name.into(),
            available_balance,
        }
    }

    /// Label used to name this account in errors: its id, or its position
    /// in the input when the id is blank.
    pub(crate) fn label(&self, index: usize) -> String {
        if self.id.trim().is_empty() {
            format!("#{}", index)
        } else {
            self.id.clone()
        }
    }

    /// Returns the name of the first required field that is blank.
    pub(crate) fn missing_field(&self) -> Option<&'static str> {
        if self.id.trim().is_empty() {
            Some("id")
        } else if self.name.trim().is_empty() {
            Some("name")
        } else {
            None
        }
    }
}
