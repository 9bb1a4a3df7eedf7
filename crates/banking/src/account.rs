use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bankledger_core::{AccountNumber, LedgerError, LedgerResult};

use crate::config::LedgerConfig;
use crate::summary::AccountSummary;
use crate::transaction::{Transaction, TransactionKind};

/// Account variant tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Basic,
    Savings,
    Checking,
}

impl core::fmt::Display for AccountKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AccountKind::Basic => f.write_str("basic"),
            AccountKind::Savings => f.write_str("savings"),
            AccountKind::Checking => f.write_str("checking"),
        }
    }
}

/// Operations a variant declares beyond deposit/withdraw.
///
/// Callers holding a generic `&Account` dispatch kind-specific operations on
/// these flags instead of inspecting the concrete variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Capabilities {
    /// `apply_interest` is available.
    pub interest: bool,
    /// Withdrawals may take the balance below zero.
    pub overdraft: bool,
}

/// Variant-specific terms of an account (closed set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AccountTerms {
    Basic,
    Savings {
        /// Non-negative fraction, e.g. `0.03`.
        interest_rate: Decimal,
    },
    Checking {
        /// Non-negative magnitude the balance may go below zero by.
        overdraft_limit: Decimal,
    },
}

impl AccountTerms {
    pub fn kind(&self) -> AccountKind {
        match self {
            AccountTerms::Basic => AccountKind::Basic,
            AccountTerms::Savings { .. } => AccountKind::Savings,
            AccountTerms::Checking { .. } => AccountKind::Checking,
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        match self {
            AccountTerms::Basic => Capabilities::default(),
            AccountTerms::Savings { .. } => Capabilities {
                interest: true,
                overdraft: false,
            },
            AccountTerms::Checking { .. } => Capabilities {
                interest: false,
                overdraft: true,
            },
        }
    }

    /// Lowest balance a withdrawal may leave behind.
    pub fn floor(&self) -> Decimal {
        match self {
            AccountTerms::Basic | AccountTerms::Savings { .. } => Decimal::ZERO,
            AccountTerms::Checking { overdraft_limit } => -*overdraft_limit,
        }
    }

    pub fn interest_rate(&self) -> Option<Decimal> {
        match self {
            AccountTerms::Savings { interest_rate } => Some(*interest_rate),
            _ => None,
        }
    }

    pub fn overdraft_limit(&self) -> Option<Decimal> {
        match self {
            AccountTerms::Checking { overdraft_limit } => Some(*overdraft_limit),
            _ => None,
        }
    }

    fn validate(&self, config: &LedgerConfig) -> LedgerResult<()> {
        match self {
            AccountTerms::Basic => Ok(()),
            AccountTerms::Savings { interest_rate } => {
                if *interest_rate < Decimal::ZERO {
                    return Err(LedgerError::validation("interest rate cannot be negative"));
                }
                if *interest_rate > config.max_interest_rate {
                    return Err(LedgerError::validation(format!(
                        "interest rate {interest_rate} exceeds maximum {}",
                        config.max_interest_rate
                    )));
                }
                Ok(())
            }
            AccountTerms::Checking { overdraft_limit } => {
                if *overdraft_limit < Decimal::ZERO {
                    return Err(LedgerError::validation("overdraft limit cannot be negative"));
                }
                if let Some(max) = config.max_overdraft_limit {
                    if *overdraft_limit > max {
                        return Err(LedgerError::validation(format!(
                            "overdraft limit {overdraft_limit} exceeds maximum {max}"
                        )));
                    }
                }
                Ok(())
            }
        }
    }
}

/// Result of applying interest to a savings account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InterestOutcome {
    /// Interest was credited and logged.
    Applied(Transaction),
    /// Computed interest was zero or negative; nothing changed.
    NotApplied,
}

/// A bank account: balance plus its append-only transaction log.
///
/// Invariant: `balance` equals the resulting balance of the last log entry,
/// or the opening balance while the log is empty. The only code path that
/// changes `balance` is [`Account::record`], which appends the matching entry
/// in the same step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    number: AccountNumber,
    holder: String,
    terms: AccountTerms,
    opening_balance: Decimal,
    balance: Decimal,
    log: Vec<Transaction>,
}

impl Account {
    /// Validate the parameters and build an account with an empty log.
    pub(crate) fn open(
        number: AccountNumber,
        holder: impl Into<String>,
        opening_balance: Decimal,
        terms: AccountTerms,
        config: &LedgerConfig,
    ) -> LedgerResult<Self> {
        let holder = holder.into();
        if holder.trim().is_empty() {
            return Err(LedgerError::validation("holder cannot be empty"));
        }
        terms.validate(config)?;
        if opening_balance < terms.floor() {
            return Err(LedgerError::validation(format!(
                "initial balance {opening_balance} is below the {} floor {}",
                terms.kind(),
                terms.floor()
            )));
        }

        Ok(Self {
            number,
            holder,
            terms,
            opening_balance,
            balance: opening_balance,
            log: Vec::new(),
        })
    }

    pub fn number(&self) -> AccountNumber {
        self.number
    }

    pub fn holder(&self) -> &str {
        &self.holder
    }

    pub fn kind(&self) -> AccountKind {
        self.terms.kind()
    }

    pub fn terms(&self) -> &AccountTerms {
        &self.terms
    }

    pub fn capabilities(&self) -> Capabilities {
        self.terms.capabilities()
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn opening_balance(&self) -> Decimal {
        self.opening_balance
    }

    /// Maximum amount a single withdrawal may take right now.
    ///
    /// `balance` for basic and savings accounts, `balance + overdraft_limit`
    /// for checking accounts. Never negative. Saturates at `Decimal::MAX`
    /// when the sum is not representable.
    pub fn allowed_withdrawal(&self) -> Decimal {
        self.balance
            .checked_sub(self.terms.floor())
            .unwrap_or(Decimal::MAX)
            .max(Decimal::ZERO)
    }

    /// Logged transactions, oldest first. Empty is a valid state.
    pub fn history(&self) -> &[Transaction] {
        &self.log
    }

    pub fn summary(&self) -> AccountSummary {
        AccountSummary::of(self)
    }

    pub fn deposit(&mut self, amount: Decimal) -> LedgerResult<Transaction> {
        ensure_positive(amount)?;
        let new_balance = self
            .balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::validation("deposit overflows the balance"))?;
        Ok(self.record(TransactionKind::Deposit, amount, new_balance))
    }

    /// Withdraw `amount` if the variant's allowed withdrawal covers it.
    ///
    /// One path for every variant: only the floor differs.
    pub fn withdraw(&mut self, amount: Decimal) -> LedgerResult<Transaction> {
        ensure_positive(amount)?;
        let allowed = self.allowed_withdrawal();
        if amount > allowed {
            return Err(LedgerError::insufficient_funds(amount, allowed));
        }
        let new_balance = self.balance - amount;
        Ok(self.record(TransactionKind::Withdrawal, amount, new_balance))
    }

    /// Credit `balance * interest_rate` as a single Interest entry.
    ///
    /// Fails with `UnsupportedOperation` unless the account declares the
    /// interest capability. Zero or negative interest is a no-op.
    pub fn apply_interest(&mut self) -> LedgerResult<InterestOutcome> {
        let Some(rate) = self.terms.interest_rate() else {
            return Err(LedgerError::unsupported(self.number, "interest"));
        };

        let interest = self
            .balance
            .checked_mul(rate)
            .ok_or_else(|| LedgerError::validation("interest overflows the balance"))?;
        if interest <= Decimal::ZERO {
            return Ok(InterestOutcome::NotApplied);
        }
        let new_balance = self
            .balance
            .checked_add(interest)
            .ok_or_else(|| LedgerError::validation("interest overflows the balance"))?;

        Ok(InterestOutcome::Applied(self.record(
            TransactionKind::Interest,
            interest,
            new_balance,
        )))
    }

    /// Append one entry and move the balance to match it.
    fn record(&mut self, kind: TransactionKind, amount: Decimal, new_balance: Decimal) -> Transaction {
        let sequence = self.log.len() as u64 + 1;
        let tx = Transaction::new(sequence, kind, amount, new_balance, Utc::now());
        self.balance = new_balance;
        self.log.push(tx.clone());

        tracing::debug!(
            number = %self.number,
            kind = %kind,
            amount = %amount,
            balance = %new_balance,
            "transaction recorded"
        );
        tx
    }
}

fn ensure_positive(amount: Decimal) -> LedgerResult<()> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::validation("amount must be positive"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn config() -> LedgerConfig {
        LedgerConfig::default()
    }

    fn savings(balance: Decimal, rate: Decimal) -> Account {
        Account::open(
            AccountNumber::new(1),
            "Ada",
            balance,
            AccountTerms::Savings { interest_rate: rate },
            &config(),
        )
        .unwrap()
    }

    fn checking(balance: Decimal, limit: Decimal) -> Account {
        Account::open(
            AccountNumber::new(2),
            "Grace",
            balance,
            AccountTerms::Checking {
                overdraft_limit: limit,
            },
            &config(),
        )
        .unwrap()
    }

    fn basic(balance: Decimal) -> Account {
        Account::open(
            AccountNumber::new(3),
            "Linus",
            balance,
            AccountTerms::Basic,
            &config(),
        )
        .unwrap()
    }

    fn assert_balance_matches_log(account: &Account) {
        let expected = account
            .history()
            .last()
            .map(Transaction::resulting_balance)
            .unwrap_or(account.opening_balance());
        assert_eq!(account.balance(), expected);
    }

    #[test]
    fn deposit_appends_one_entry() {
        let mut account = basic(dec!(10));
        let tx = account.deposit(dec!(5.50)).unwrap();

        assert_eq!(tx.kind(), TransactionKind::Deposit);
        assert_eq!(tx.amount(), dec!(5.50));
        assert_eq!(tx.resulting_balance(), dec!(15.50));
        assert_eq!(tx.sequence(), 1);
        assert_eq!(account.balance(), dec!(15.50));
        assert_eq!(account.history(), &[tx]);
    }

    #[test]
    fn identity_is_the_account_number() {
        let mut account = checking(dec!(0), dec!(10));
        account.withdraw(dec!(10)).unwrap();
        assert_eq!(account.number(), AccountNumber::new(2));
        assert_eq!(account.holder(), "Grace");
        assert!(account.capabilities().overdraft);
    }

    #[test]
    fn deposit_overflow_is_rejected_without_trace() {
        let mut account = basic(Decimal::MAX);
        let err = account.deposit(Decimal::ONE).unwrap_err();

        assert!(matches!(err, LedgerError::Validation(_)));
        assert_eq!(account.balance(), Decimal::MAX);
        assert!(account.history().is_empty());
    }

    #[test]
    fn huge_checking_allowance_saturates() {
        let mut account = checking(Decimal::MAX, Decimal::ONE);
        assert_eq!(account.allowed_withdrawal(), Decimal::MAX);

        let tx = account.withdraw(Decimal::ONE).unwrap();
        assert_eq!(tx.resulting_balance(), Decimal::MAX - Decimal::ONE);
        assert_eq!(account.history().len(), 1);
    }

    #[test]
    fn non_positive_deposit_is_rejected_without_trace() {
        let mut account = basic(dec!(10));
        for amount in [dec!(0), dec!(-1)] {
            let err = account.deposit(amount).unwrap_err();
            assert!(matches!(err, LedgerError::Validation(_)));
        }
        assert_eq!(account.balance(), dec!(10));
        assert!(account.history().is_empty());
    }

    #[test]
    fn savings_withdrawal_stops_at_zero() {
        let mut account = savings(dec!(100), dec!(0.03));
        let err = account.withdraw(dec!(100.01)).unwrap_err();
        assert_eq!(err, LedgerError::insufficient_funds(dec!(100.01), dec!(100)));
        assert!(account.history().is_empty());

        account.withdraw(dec!(100)).unwrap();
        assert_eq!(account.balance(), Decimal::ZERO);
        assert_eq!(account.allowed_withdrawal(), Decimal::ZERO);
    }

    #[test]
    fn checking_withdrawal_reaches_negative_floor() {
        let mut account = checking(dec!(100), dec!(50));
        assert_eq!(account.allowed_withdrawal(), dec!(150));

        let tx = account.withdraw(dec!(150)).unwrap();
        assert_eq!(tx.kind(), TransactionKind::Withdrawal);
        assert_eq!(account.balance(), dec!(-50));
        assert_eq!(account.history().len(), 1);

        let err = account.withdraw(dec!(0.01)).unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientFunds { .. }));
        assert_eq!(account.balance(), dec!(-50));
    }

    #[test]
    fn interest_is_logged_once_as_interest() {
        let mut account = savings(dec!(100), dec!(0.03));
        let outcome = account.apply_interest().unwrap();

        let InterestOutcome::Applied(tx) = outcome else {
            panic!("expected interest to be applied");
        };
        assert_eq!(tx.kind(), TransactionKind::Interest);
        assert_eq!(tx.amount(), dec!(3));
        assert_eq!(account.balance(), dec!(103));
        assert_eq!(account.history().len(), 1);
    }

    #[test]
    fn interest_compounds() {
        let mut account = savings(dec!(100), dec!(0.03));
        account.apply_interest().unwrap();
        account.apply_interest().unwrap();

        assert_eq!(account.balance(), dec!(106.09));
        assert_eq!(account.history()[1].amount(), dec!(3.09));
        assert_balance_matches_log(&account);
    }

    #[test]
    fn zero_interest_is_a_no_op() {
        let mut zero_rate = savings(dec!(100), dec!(0));
        assert_eq!(zero_rate.apply_interest().unwrap(), InterestOutcome::NotApplied);
        assert!(zero_rate.history().is_empty());

        let mut empty = savings(dec!(0), dec!(0.05));
        assert_eq!(empty.apply_interest().unwrap(), InterestOutcome::NotApplied);
        assert_eq!(empty.balance(), Decimal::ZERO);
    }

    #[test]
    fn interest_requires_capability() {
        let mut account = checking(dec!(100), dec!(50));
        assert!(!account.capabilities().interest);

        let err = account.apply_interest().unwrap_err();
        assert_eq!(err, LedgerError::unsupported(AccountNumber::new(2), "interest"));
        assert_eq!(account.balance(), dec!(100));
        assert!(account.history().is_empty());
    }

    #[test]
    fn open_rejects_bad_parameters() {
        let cfg = config();
        let number = AccountNumber::new(9);

        let empty_holder = Account::open(number, "  ", dec!(1), AccountTerms::Basic, &cfg);
        assert!(matches!(empty_holder, Err(LedgerError::Validation(_))));

        let negative_rate = Account::open(
            number,
            "Ada",
            dec!(1),
            AccountTerms::Savings {
                interest_rate: dec!(-0.01),
            },
            &cfg,
        );
        assert!(matches!(negative_rate, Err(LedgerError::Validation(_))));

        let negative_limit = Account::open(
            number,
            "Ada",
            dec!(1),
            AccountTerms::Checking {
                overdraft_limit: dec!(-5),
            },
            &cfg,
        );
        assert!(matches!(negative_limit, Err(LedgerError::Validation(_))));

        let below_floor = Account::open(
            number,
            "Ada",
            dec!(-10),
            AccountTerms::Checking {
                overdraft_limit: dec!(5),
            },
            &cfg,
        );
        assert!(matches!(below_floor, Err(LedgerError::Validation(_))));
    }

    #[test]
    fn open_honours_configured_caps() {
        let cfg = LedgerConfig {
            max_interest_rate: dec!(0.10),
            max_overdraft_limit: Some(dec!(500)),
        };
        let number = AccountNumber::new(9);

        let high_rate = Account::open(
            number,
            "Ada",
            dec!(1),
            AccountTerms::Savings {
                interest_rate: dec!(0.11),
            },
            &cfg,
        );
        assert!(matches!(high_rate, Err(LedgerError::Validation(_))));

        let high_limit = Account::open(
            number,
            "Ada",
            dec!(1),
            AccountTerms::Checking {
                overdraft_limit: dec!(501),
            },
            &cfg,
        );
        assert!(matches!(high_limit, Err(LedgerError::Validation(_))));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Deposit(i64),
        Withdraw(i64),
        Interest,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (-500i64..5_000i64).prop_map(Op::Deposit),
            (-500i64..5_000i64).prop_map(Op::Withdraw),
            Just(Op::Interest),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: after any sequence of operations on any variant, the
        /// balance equals the last logged resulting balance, successful
        /// operations append exactly one entry and failed ones append none.
        #[test]
        fn balance_always_matches_log(
            variant in 0u8..3,
            opening_cents in 0i64..100_000i64,
            ops in prop::collection::vec(op_strategy(), 0..40)
        ) {
            let opening = Decimal::new(opening_cents, 2);
            let mut account = match variant {
                0 => basic(opening),
                1 => savings(opening, dec!(0.015)),
                _ => checking(opening, dec!(250)),
            };

            for op in ops {
                let before_len = account.history().len();
                let before_balance = account.balance();

                let changed = match op {
                    Op::Deposit(cents) => account.deposit(Decimal::new(cents, 2)).is_ok(),
                    Op::Withdraw(cents) => account.withdraw(Decimal::new(cents, 2)).is_ok(),
                    Op::Interest => matches!(account.apply_interest(), Ok(InterestOutcome::Applied(_))),
                };

                if changed {
                    prop_assert_eq!(account.history().len(), before_len + 1);
                } else {
                    prop_assert_eq!(account.history().len(), before_len);
                    prop_assert_eq!(account.balance(), before_balance);
                }
                prop_assert!(account.balance() >= account.terms().floor());

                let expected = account
                    .history()
                    .last()
                    .map(Transaction::resulting_balance)
                    .unwrap_or(account.opening_balance());
                prop_assert_eq!(account.balance(), expected);
            }
        }
    }
}
