//! Ledger commands: every externally callable operation as one serializable value.
//!
//! Front ends (the batch replay driver, a future interactive menu) build a
//! [`LedgerCommand`], hand it to [`Ledger::execute`], and present the
//! returned [`CommandOutcome`] or error. The ledger itself performs no IO.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bankledger_core::{AccountNumber, LedgerResult};

use crate::account::InterestOutcome;
use crate::ledger::Ledger;
use crate::summary::AccountSummary;
use crate::transaction::Transaction;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum LedgerCommand {
    OpenBasic {
        holder: String,
        number: AccountNumber,
        initial_balance: Decimal,
    },
    OpenSavings {
        holder: String,
        number: AccountNumber,
        initial_balance: Decimal,
        interest_rate: Decimal,
    },
    OpenChecking {
        holder: String,
        number: AccountNumber,
        initial_balance: Decimal,
        overdraft_limit: Decimal,
    },
    Deposit {
        number: AccountNumber,
        amount: Decimal,
    },
    Withdraw {
        number: AccountNumber,
        amount: Decimal,
    },
    Summary {
        number: AccountNumber,
    },
    History {
        number: AccountNumber,
    },
    ApplyInterest {
        number: AccountNumber,
    },
    ListAll,
}

impl LedgerCommand {
    /// Stable command name (matches the serialized `op` tag).
    pub fn name(&self) -> &'static str {
        match self {
            LedgerCommand::OpenBasic { .. } => "open_basic",
            LedgerCommand::OpenSavings { .. } => "open_savings",
            LedgerCommand::OpenChecking { .. } => "open_checking",
            LedgerCommand::Deposit { .. } => "deposit",
            LedgerCommand::Withdraw { .. } => "withdraw",
            LedgerCommand::Summary { .. } => "summary",
            LedgerCommand::History { .. } => "history",
            LedgerCommand::ApplyInterest { .. } => "apply_interest",
            LedgerCommand::ListAll => "list_all",
        }
    }
}

/// Successful result of a [`LedgerCommand`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", content = "data", rename_all = "snake_case")]
pub enum CommandOutcome {
    Opened(AccountSummary),
    Recorded(Transaction),
    Summary(AccountSummary),
    History(Vec<Transaction>),
    Interest(InterestOutcome),
    Listing(Vec<AccountSummary>),
}

impl Ledger {
    /// Run one command against the ledger.
    ///
    /// Errors are returned unchanged from the underlying operation.
    pub fn execute(&mut self, command: &LedgerCommand) -> LedgerResult<CommandOutcome> {
        match command {
            LedgerCommand::OpenBasic {
                holder,
                number,
                initial_balance,
            } => self
                .create_basic_account(holder.as_str(), *number, *initial_balance)
                .map(|account| CommandOutcome::Opened(account.summary())),
            LedgerCommand::OpenSavings {
                holder,
                number,
                initial_balance,
                interest_rate,
            } => self
                .create_savings_account(holder.as_str(), *number, *initial_balance, *interest_rate)
                .map(|account| CommandOutcome::Opened(account.summary())),
            LedgerCommand::OpenChecking {
                holder,
                number,
                initial_balance,
                overdraft_limit,
            } => self
                .create_checking_account(holder.as_str(), *number, *initial_balance, *overdraft_limit)
                .map(|account| CommandOutcome::Opened(account.summary())),
            LedgerCommand::Deposit { number, amount } => {
                self.deposit(*number, *amount).map(CommandOutcome::Recorded)
            }
            LedgerCommand::Withdraw { number, amount } => {
                self.withdraw(*number, *amount).map(CommandOutcome::Recorded)
            }
            LedgerCommand::Summary { number } => self.summary(*number).map(CommandOutcome::Summary),
            LedgerCommand::History { number } => self
                .history(*number)
                .map(|log| CommandOutcome::History(log.to_vec())),
            LedgerCommand::ApplyInterest { number } => {
                self.apply_interest(*number).map(CommandOutcome::Interest)
            }
            LedgerCommand::ListAll => Ok(CommandOutcome::Listing(self.list_all().collect())),
        }
    }
}
