use crate::common::money::Money;

/// Failure conditions surfaced by the ledger core.
///
/// Domain guards (`InvalidAmount`, `InsufficientBalance`, the lookup misses)
/// leave prior state untouched. Persistence problems never escape the save
/// path; `Persistence` exists for the file helpers that report them.
#[derive(thiserror::Error, Debug)]
pub enum BankError {
    #[error("invalid amount: {0}")]
    InvalidAmount(Money),
    #[error("insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: Money, available: Money },
    #[error("account {0} not found")]
    AccountNotFound(u32),
    #[error("no customer named {0:?}")]
    NameNotFound(String),
    #[error("customer name must not be empty")]
    InvalidName,
    #[error("a customer named {0:?} already exists")]
    DuplicateName(String),
    #[error("persistence failed: {0}")]
    Persistence(#[from] std::io::Error),
}
