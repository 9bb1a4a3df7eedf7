//! Banking module: accounts, their transaction logs, and the ledger registry.
//!
//! Pure domain logic only: no IO, no persistence concerns.

pub mod account;
pub mod command;
pub mod config;
pub mod ledger;
pub mod summary;
pub mod transaction;

pub use account::{Account, AccountKind, AccountTerms, Capabilities, InterestOutcome};
pub use command::{CommandOutcome, LedgerCommand};
pub use config::LedgerConfig;
pub use ledger::Ledger;
pub use summary::AccountSummary;
pub use transaction::{Transaction, TransactionKind};

pub use bankledger_core::{AccountNumber, LedgerError, LedgerResult};
