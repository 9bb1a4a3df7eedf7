use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bankledger_core::AccountNumber;

use crate::account::{Account, AccountKind};

/// Point-in-time snapshot of an account, tagged with its variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub kind: AccountKind,
    pub number: AccountNumber,
    pub holder: String,
    pub balance: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overdraft_limit: Option<Decimal>,
    pub transaction_count: usize,
}

impl AccountSummary {
    pub(crate) fn of(account: &Account) -> Self {
        Self {
            kind: account.kind(),
            number: account.number(),
            holder: account.holder().to_string(),
            balance: account.balance(),
            interest_rate: account.terms().interest_rate(),
            overdraft_limit: account.terms().overdraft_limit(),
            transaction_count: account.history().len(),
        }
    }
}

impl core::fmt::Display for AccountSummary {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let banner = match self.kind {
            AccountKind::Basic => "------ BASIC ACCOUNT ------",
            AccountKind::Savings => "----- SAVINGS ACCOUNT -----",
            AccountKind::Checking => "---- CHECKING ACCOUNT ----",
        };
        writeln!(f, "{banner}")?;
        writeln!(f, "Account Holder  : {}", self.holder)?;
        writeln!(f, "Account Number  : {}", self.number)?;
        write!(f, "Current Balance : {:.2}", self.balance)?;
        if let Some(rate) = self.interest_rate {
            match rate.checked_mul(Decimal::ONE_HUNDRED) {
                Some(percent) => write!(f, "\nInterest Rate   : {}%", percent.normalize())?,
                None => write!(f, "\nInterest Rate   : {rate} (fraction)")?,
            }
        }
        if let Some(limit) = self.overdraft_limit {
            write!(f, "\nOverdraft Limit : {limit:.2}")?;
        }
        Ok(())
    }
}
