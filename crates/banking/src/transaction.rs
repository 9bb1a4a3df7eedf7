use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of balance-affecting event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
    Interest,
}

impl TransactionKind {
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "Deposit",
            TransactionKind::Withdrawal => "Withdrawal",
            TransactionKind::Interest => "Interest",
        }
    }
}

impl core::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// One immutable entry of an account's transaction log.
///
/// Fields are private: a record is only ever built by the owning account at
/// the moment its balance changes, and never edited afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// 1-based position in the owning account's log.
    sequence: u64,
    kind: TransactionKind,
    /// Positive magnitude of the event.
    amount: Decimal,
    /// Account balance immediately after the event.
    resulting_balance: Decimal,
    occurred_at: DateTime<Utc>,
}

impl Transaction {
    pub(crate) fn new(
        sequence: u64,
        kind: TransactionKind,
        amount: Decimal,
        resulting_balance: Decimal,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            sequence,
            kind,
            amount,
            resulting_balance,
            occurred_at,
        }
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn resulting_balance(&self) -> Decimal {
        self.resulting_balance
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

impl core::fmt::Display for Transaction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "[{}]  Amount: {:.2}  => Balance After: {:.2}",
            self.kind, self.amount, self.resulting_balance
        )
    }
}
