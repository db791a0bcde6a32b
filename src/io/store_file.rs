//! Per-customer flat-file codec.
//!
//! One file per account, header fields followed by one line per transaction.
//! The transaction line is the `Display` form of [`Transaction`]:
//!
//! ```text
//! Name: Alice
//! Age: 30
//! AccountID: 100
//! Balance: 300.0000
//! Transactions:
//! Transaction ID: 1, Type: Deposit, Amount: 500.0000, Date: 2026-08-07 10:30:00
//! ```
//!
//! Parsing is lenient: a line that does not match its expected shape is
//! skipped, never an error.

use chrono::NaiveDateTime;
use std::fmt::Write as _;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::common::error::BankError;
use crate::common::money::Money;
use crate::domain::customer::Customer;
use crate::domain::transaction::{TIMESTAMP_FORMAT, Transaction, TxKind};

const TX_LINE_PREFIX: &str = "Transaction ID:";

/// Header fields and transactions read back from a customer file.
#[derive(Debug, Default, PartialEq)]
pub struct PersistedCustomer {
    pub name: String,
    pub age: u32,
    pub account_id: u32,
    pub balance: Money,
    pub transactions: Vec<Transaction>,
}

pub fn customer_file(customers_dir: &Path, account_id: u32) -> PathBuf {
    customers_dir.join(format!("{account_id}.txt"))
}

/// Merge-saves a customer: transactions already in the file are parsed back,
/// the in-memory sequence is appended after them, and the file is rewritten
/// whole. The merged list is renumbered densely from 1 so ids in a written
/// file are always unique and ordered, no matter how many saves happened this
/// session.
pub fn save(customer: &Customer, customers_dir: &Path) -> Result<(), BankError> {
    fs::create_dir_all(customers_dir)?;
    let path = customer_file(customers_dir, customer.account_id());

    let mut transactions = match fs::read_to_string(&path) {
        Ok(text) => parse(&text).transactions,
        Err(err) if err.kind() == ErrorKind::NotFound => Vec::new(),
        Err(err) => return Err(err.into()),
    };
    transactions.extend(customer.account().transactions().iter().cloned());

    fs::write(&path, render(customer, &transactions))?;
    Ok(())
}

/// Renders the full file body: header fields, then every transaction
/// renumbered to its position in the merged list.
pub fn render(customer: &Customer, transactions: &[Transaction]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Name: {}", customer.name());
    let _ = writeln!(out, "Age: {}", customer.age());
    let _ = writeln!(out, "AccountID: {}", customer.account_id());
    let _ = writeln!(out, "Balance: {}", customer.balance());
    let _ = writeln!(out, "Transactions:");
    for (index, tx) in transactions.iter().enumerate() {
        let _ = writeln!(out, "{}", tx.renumbered(index as u32 + 1));
    }
    out
}

/// Reads a customer file back. Missing or malformed header fields fall back
/// to defaults; malformed transaction lines are ignored.
pub fn parse(text: &str) -> PersistedCustomer {
    let mut persisted = PersistedCustomer::default();

    for line in text.lines() {
        let line = line.trim();
        if line.starts_with(TX_LINE_PREFIX) {
            if let Some(tx) = parse_transaction_line(line) {
                persisted.transactions.push(tx);
            }
        } else if let Some(value) = labeled(line, "Name") {
            persisted.name = value.to_string();
        } else if let Some(value) = labeled(line, "Age") {
            persisted.age = value.parse().unwrap_or_default();
        } else if let Some(value) = labeled(line, "AccountID") {
            persisted.account_id = value.parse().unwrap_or_default();
        } else if let Some(value) = labeled(line, "Balance") {
            persisted.balance = value.parse().unwrap_or_default();
        }
    }

    persisted
}

/// Splits one transaction line into its four labeled, comma-separated fields.
/// Returns `None` for anything that does not match the shape exactly.
fn parse_transaction_line(line: &str) -> Option<Transaction> {
    let parts: Vec<&str> = line.splitn(4, ',').collect();
    if parts.len() != 4 {
        return None;
    }

    let id: u32 = labeled(parts[0], "Transaction ID")?.parse().ok()?;
    let kind: TxKind = labeled(parts[1], "Type")?.parse().ok()?;
    let amount: Money = labeled(parts[2], "Amount")?.parse().ok()?;
    if !amount.is_positive() {
        return None;
    }
    let timestamp =
        NaiveDateTime::parse_from_str(labeled(parts[3], "Date")?, TIMESTAMP_FORMAT).ok()?;

    Some(Transaction::from_parts(id, amount, kind, timestamp))
}

/// `" Label: value"` -> `"value"`, splitting on the first colon only so
/// timestamps keep theirs.
fn labeled<'a>(part: &'a str, label: &str) -> Option<&'a str> {
    let (key, value) = part.split_once(':')?;
    if key.trim() != label {
        return None;
    }
    Some(value.trim())
}
