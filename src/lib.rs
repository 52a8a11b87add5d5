//! # BankSweep
//!
//! Simulates a rule-based sweep of surplus funds from linked bank accounts.
//! Account balances come from a financial-data aggregator; a per-session rule
//! sets the threshold above which an account becomes eligible.
//!
//! ## Design Principles
//!
//! - **Fixed-point arithmetic**: Uses 2 decimal places via `rust_decimal`
//! - **Pure engine**: No I/O and no mutation inside the simulation
//! - **Strict threshold**: A balance equal to the threshold is not swept
//! - **Deterministic output**: Results keep the provider's account order
//!
//! ## Example
//!
//! ```
//! use banksweep::{Account, Money, RuleStore, SweepEngine};
//!
//! let store = RuleStore::new();
//! store.set_rule("20.00", "weekly").unwrap();
//!
//! let accounts = vec![
//!     Account::new("a1", "Checking", Some(Money::from_cents(2500))),
//!     Account::new("a2", "Credit", None),
//! ];
//! let results = SweepEngine::new()
//!     .simulate(&accounts, &store.get_active_rule())
//!     .unwrap();
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].sweep_amount.to_string(), "5.00");
//! ```

pub mod account;
pub mod config;
pub mod engine;
pub mod error;
pub mod money;
pub mod provider;
pub mod rule;
pub mod store;

pub use account::Account;
pub use config::{CliConfig, InputFormat};
pub use engine::{simulate, SweepEngine, SweepResult, SweepSummary};
pub use error::{Result, SweepError};
pub use money::Money;
pub use rule::{Frequency, RuleSubmission, SweepRule};
pub use store::{RuleStore, SessionRules};
