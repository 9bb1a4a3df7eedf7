//! Ledger configuration.

use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Environment variable holding the highest interest rate a savings account may open with.
pub const MAX_INTEREST_RATE_ENV: &str = "BANKLEDGER_MAX_INTEREST_RATE";

/// Environment variable holding the highest overdraft limit a checking account may open with.
pub const MAX_OVERDRAFT_LIMIT_ENV: &str = "BANKLEDGER_MAX_OVERDRAFT_LIMIT";

/// Creation-time limits applied by the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Fraction, `1` means 100%.
    pub max_interest_rate: Decimal,
    /// `None` leaves overdraft limits uncapped.
    pub max_overdraft_limit: Option<Decimal>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            max_interest_rate: Decimal::ONE,
            max_overdraft_limit: None,
        }
    }
}

impl LedgerConfig {
    /// Build a config from the process environment.
    ///
    /// Unset variables keep their default; unparsable values are logged and
    /// ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup (used by tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(rate) = parse_decimal(MAX_INTEREST_RATE_ENV, lookup(MAX_INTEREST_RATE_ENV)) {
            config.max_interest_rate = rate;
        }
        if let Some(limit) = parse_decimal(MAX_OVERDRAFT_LIMIT_ENV, lookup(MAX_OVERDRAFT_LIMIT_ENV)) {
            config.max_overdraft_limit = Some(limit);
        }

        config
    }
}

fn parse_decimal(key: &str, raw: Option<String>) -> Option<Decimal> {
    let raw = raw?;
    match Decimal::from_str(raw.trim()) {
        Ok(value) if value >= Decimal::ZERO => Some(value),
        Ok(value) => {
            tracing::warn!(key, %value, "negative value ignored; using default");
            None
        }
        Err(e) => {
            tracing::warn!(key, value = %raw, error = %e, "unparsable value ignored; using default");
            None
        }
    }
}
