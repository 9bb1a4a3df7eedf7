//! `bankledger-core`: ledger foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no IO).

pub mod error;
pub mod id;

pub use error::{LedgerError, LedgerResult};
pub use id::AccountNumber;
