//! Single-operator bank ledger: customer accounts, timestamped deposit and
//! withdrawal transactions, and per-account flat-file persistence with
//! merge-on-save reconciliation.

pub mod app;
pub mod common;
pub mod domain;
pub mod io;

pub use common::error::BankError;
pub use common::money::Money;
pub use domain::bank::Bank;
pub use domain::customer::Customer;
pub use domain::transaction::{Transaction, TxKind};
