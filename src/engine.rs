//! Sweep simulation engine.
//!
//! Given account snapshots and the active rule, decides which accounts are
//! sweep-eligible and how much would be swept from each. The engine performs
//! no I/O and never mutates its inputs; identical inputs always produce an
//! identical, order-preserving result.

use crate::account::Account;
use crate::error::{Result, SweepError};
use crate::money::Money;
use crate::rule::SweepRule;
use log::{debug, info};
use serde::Serialize;

/// One account that would be swept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SweepResult {
    #[serde(rename = "name")]
    pub account_name: String,
    pub available_balance: Money,
    pub sweep_amount: Money,
}

/// Response envelope handed to the consumer of a simulation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SweepSummary {
    pub sweep_summary: Vec<SweepResult>,
}

impl SweepSummary {
    /// Sum of all sweep amounts in the summary, or `None` if the sum is too
    /// large to hold at 2 decimal places.
    pub fn total_swept(&self) -> Option<Money> {
        self.sweep_summary
            .iter()
            .try_fold(Money::ZERO, |acc, r| acc.checked_add(r.sweep_amount))
    }

    pub fn is_empty(&self) -> bool {
        self.sweep_summary.is_empty()
    }
}

/// The sweep simulation engine.
///
/// # Sweep Amount
///
/// Every eligible account is swept by the same fixed amount regardless of
/// how far its balance exceeds the threshold. The amount defaults to
/// [`SweepEngine::DEFAULT_SWEEP_AMOUNT`] and can be changed with
/// [`SweepEngine::with_sweep_amount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepEngine {
    sweep_amount: Money,
}

impl SweepEngine {
    pub const DEFAULT_SWEEP_AMOUNT: Money = Money::from_unsigned_cents(500);

    /// Creates an engine with the default sweep amount.
    pub fn new() -> Self {
        SweepEngine {
            sweep_amount: Self::DEFAULT_SWEEP_AMOUNT,
        }
    }

    /// Creates an engine that sweeps `sweep_amount` from each eligible account.
    pub fn with_sweep_amount(sweep_amount: Money) -> Self {
        SweepEngine { sweep_amount }
    }

    pub fn sweep_amount(&self) -> Money {
        self.sweep_amount
    }

    /// Runs the simulation.
    ///
    /// An account is included when its available balance is present and
    /// strictly greater than `rule.threshold`. Accounts with no available
    /// balance are skipped. Results keep the input order.
    ///
    /// Fails with [`SweepError::MalformedAccount`] if any account has a blank
    /// id or name; no partial result is returned in that case.
    pub fn simulate(&self, accounts: &[Account], rule: &SweepRule) -> Result<Vec<SweepResult>> {
        let mut results = Vec::new();

        for (index, account) in accounts.iter().enumerate() {
            if let Some(field) = account.missing_field() {
                return Err(SweepError::malformed(
                    account.label(index),
                    format!("missing {}", field),
                ));
            }

            let available = match account.available_balance {
                Some(available) => available,
                None => {
                    debug!("Account {}: no available balance, skipping", account.id);
                    continue;
                }
            };

            if available > rule.threshold {
                debug!(
                    "Account {}: available {} exceeds threshold {}, sweeping {}",
                    account.id, available, rule.threshold, self.sweep_amount
                );
                results.push(SweepResult {
                    account_name: account.name.clone(),
                    available_balance: available,
                    sweep_amount: self.sweep_amount,
                });
            } else {
                debug!(
                    "Account {}: available {} does not exceed threshold {}",
                    account.id, available, rule.threshold
                );
            }
        }

        info!(
            "Simulated sweep over {} accounts: {} eligible at threshold {}",
            accounts.len(),
            results.len(),
            rule.threshold
        );
        Ok(results)
    }

    /// Runs the simulation and wraps the result in the response envelope.
    pub fn summarize(&self, accounts: &[Account], rule: &SweepRule) -> Result<SweepSummary> {
        Ok(SweepSummary {
            sweep_summary: self.simulate(accounts, rule)?,
        })
    }
}

impl Default for SweepEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs the simulation with the default sweep amount.
pub fn simulate(accounts: &[Account], rule: &SweepRule) -> Result<Vec<SweepResult>> {
    SweepEngine::new().simulate(accounts, rule)
}
