use chrono::{Local, NaiveDateTime, Timelike};
use std::fmt;

use crate::common::money::Money;

/// Timestamp layout used both for display and in persisted customer files.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxKind {
    Deposit,
    Withdrawal,
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxKind::Deposit => f.write_str("Deposit"),
            TxKind::Withdrawal => f.write_str("Withdrawal"),
        }
    }
}

impl std::str::FromStr for TxKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deposit" => Ok(TxKind::Deposit),
            "withdrawal" => Ok(TxKind::Withdrawal),
            other => Err(format!("unknown transaction type: {other}")),
        }
    }
}

/// One monetary movement on an account. Immutable once created; transactions
/// re-hydrated from a customer file are indistinguishable from live ones.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    id: u32,
    amount: Money,
    kind: TxKind,
    timestamp: NaiveDateTime,
}

impl Transaction {
    /// Stamps the current local time, truncated to whole seconds so the value
    /// survives a trip through the persisted text form.
    pub(crate) fn new(id: u32, amount: Money, kind: TxKind) -> Self {
        let now = Local::now().naive_local();
        Self {
            id,
            amount,
            kind,
            timestamp: now.with_nanosecond(0).unwrap_or(now),
        }
    }

    /// Rebuilds a previously persisted transaction.
    pub(crate) fn from_parts(id: u32, amount: Money, kind: TxKind, timestamp: NaiveDateTime) -> Self {
        Self {
            id,
            amount,
            kind,
            timestamp,
        }
    }

    /// Copy of this transaction under a different sequence id, used when a
    /// merged file is renumbered on save.
    pub(crate) fn renumbered(&self, id: u32) -> Self {
        Self { id, ..self.clone() }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn kind(&self) -> TxKind {
        self.kind
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }
}

impl fmt::Display for Transaction {
    /// The display line doubles as the persisted record format; parsing in
    /// `io::store_file` relies on this exact shape.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Transaction ID: {}, Type: {}, Amount: {}, Date: {}",
            self.id,
            self.kind,
            self.amount,
            self.timestamp.format(TIMESTAMP_FORMAT)
        )
    }
}
