use std::collections::HashMap;

use rust_decimal::Decimal;

use bankledger_core::{AccountNumber, LedgerError, LedgerResult};

use crate::account::{Account, AccountTerms, InterestOutcome};
use crate::config::LedgerConfig;
use crate::summary::AccountSummary;
use crate::transaction::Transaction;

/// Registry owning every account, keyed by account number.
///
/// Accounts are kept in creation order; `index` maps a number to its slot.
/// Accounts are never removed, so slots stay valid for the ledger's lifetime.
///
/// Concurrency: single writer, no external aliasing. Mutations take
/// `&mut self` and no `&mut Account` escapes a method call. Serving
/// concurrent callers would need per-account locks or one mutation queue in
/// front of the ledger.
#[derive(Debug, Default)]
pub struct Ledger {
    config: LedgerConfig,
    accounts: Vec<Account>,
    index: HashMap<AccountNumber, usize>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: LedgerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn contains(&self, number: AccountNumber) -> bool {
        self.index.contains_key(&number)
    }

    pub fn create_basic_account(
        &mut self,
        holder: impl Into<String>,
        number: AccountNumber,
        initial_balance: Decimal,
    ) -> LedgerResult<&Account> {
        self.create(holder, number, initial_balance, AccountTerms::Basic)
    }

    pub fn create_savings_account(
        &mut self,
        holder: impl Into<String>,
        number: AccountNumber,
        initial_balance: Decimal,
        interest_rate: Decimal,
    ) -> LedgerResult<&Account> {
        self.create(
            holder,
            number,
            initial_balance,
            AccountTerms::Savings { interest_rate },
        )
    }

    pub fn create_checking_account(
        &mut self,
        holder: impl Into<String>,
        number: AccountNumber,
        initial_balance: Decimal,
        overdraft_limit: Decimal,
    ) -> LedgerResult<&Account> {
        self.create(
            holder,
            number,
            initial_balance,
            AccountTerms::Checking { overdraft_limit },
        )
    }

    /// Open an account with the given terms and register it under `number`.
    pub fn create(
        &mut self,
        holder: impl Into<String>,
        number: AccountNumber,
        initial_balance: Decimal,
        terms: AccountTerms,
    ) -> LedgerResult<&Account> {
        if self.contains(number) {
            tracing::warn!(number = %number, "account number already registered");
            return Err(LedgerError::duplicate(number));
        }

        let account = Account::open(number, holder, initial_balance, terms, &self.config)
            .inspect_err(|e| tracing::warn!(number = %number, error = %e, "account rejected"))?;

        tracing::info!(
            number = %number,
            kind = %account.kind(),
            holder = account.holder(),
            balance = %initial_balance,
            "account created"
        );

        let slot = self.accounts.len();
        self.accounts.push(account);
        self.index.insert(number, slot);
        Ok(&self.accounts[slot])
    }

    pub fn find(&self, number: AccountNumber) -> LedgerResult<&Account> {
        match self.index.get(&number) {
            Some(&slot) => Ok(&self.accounts[slot]),
            None => {
                tracing::warn!(number = %number, "account not found");
                Err(LedgerError::not_found(number))
            }
        }
    }

    fn find_mut(&mut self, number: AccountNumber) -> LedgerResult<&mut Account> {
        match self.index.get(&number) {
            Some(&slot) => Ok(&mut self.accounts[slot]),
            None => {
                tracing::warn!(number = %number, "account not found");
                Err(LedgerError::not_found(number))
            }
        }
    }

    pub fn deposit(&mut self, number: AccountNumber, amount: Decimal) -> LedgerResult<Transaction> {
        self.find_mut(number)?
            .deposit(amount)
            .inspect_err(|e| tracing::warn!(number = %number, error = %e, "deposit rejected"))
    }

    pub fn withdraw(&mut self, number: AccountNumber, amount: Decimal) -> LedgerResult<Transaction> {
        self.find_mut(number)?
            .withdraw(amount)
            .inspect_err(|e| tracing::warn!(number = %number, error = %e, "withdrawal rejected"))
    }

    pub fn summary(&self, number: AccountNumber) -> LedgerResult<AccountSummary> {
        self.find(number).map(Account::summary)
    }

    pub fn history(&self, number: AccountNumber) -> LedgerResult<&[Transaction]> {
        self.find(number).map(Account::history)
    }

    /// Apply interest to an account that declares the interest capability.
    pub fn apply_interest(&mut self, number: AccountNumber) -> LedgerResult<InterestOutcome> {
        let account = self.find_mut(number)?;
        if !account.capabilities().interest {
            tracing::warn!(number = %number, kind = %account.kind(), "interest not supported");
            return Err(LedgerError::unsupported(number, "interest"));
        }

        let outcome = account.apply_interest()?;
        match &outcome {
            InterestOutcome::Applied(tx) => tracing::info!(
                number = %number,
                interest = %tx.amount(),
                balance = %tx.resulting_balance(),
                "interest applied"
            ),
            InterestOutcome::NotApplied => {
                tracing::info!(number = %number, "no interest to apply")
            }
        }
        Ok(outcome)
    }

    /// Accounts in creation order.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> + '_ {
        self.accounts.iter()
    }

    /// Summaries of every account in creation order.
    ///
    /// Lazy: each summary is built when the iterator reaches it. Call again to
    /// restart from the first account.
    pub fn list_all(&self) -> impl Iterator<Item = AccountSummary> + '_ {
        self.accounts.iter().map(Account::summary)
    }
}
