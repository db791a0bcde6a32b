use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::common::error::BankError;
use crate::domain::customer::Customer;

const DEFAULT_FIRST_ACCOUNT_ID: u32 = 100;
const COUNTER_FILE: &str = "next_account_id.txt";
const CUSTOMERS_DIR: &str = "customers";

/// Process-wide registry of customers: id and name lookup plus the durable
/// account-id allocator.
///
/// Opening a bank reads only the counter file. Customer files are not
/// re-indexed at startup, so lookups find customers created in the current
/// run; cross-run durability lives in the per-customer files themselves.
#[derive(Debug)]
pub struct Bank {
    by_id: HashMap<u32, Customer>,
    by_name: HashMap<String, u32>,
    next_account_id: u32,
    data_dir: PathBuf,
}

impl Bank {
    pub fn open(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let next_account_id = load_counter(&data_dir.join(COUNTER_FILE));
        Self {
            by_id: HashMap::new(),
            by_name: HashMap::new(),
            next_account_id,
            data_dir,
        }
    }

    /// Opens an account for a new customer and returns the assigned id.
    ///
    /// Rejects empty and already-taken names (compared case-insensitively)
    /// before any id is consumed. The counter and the new customer file are
    /// saved best-effort.
    pub fn create_customer(&mut self, name: &str, age: u32) -> Result<u32, BankError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BankError::InvalidName);
        }
        let key = name.to_lowercase();
        if self.by_name.contains_key(&key) {
            return Err(BankError::DuplicateName(name.to_string()));
        }

        let account_id = self.next_account_id;
        self.next_account_id += 1;

        self.by_name.insert(key, account_id);
        self.by_id.insert(account_id, Customer::new(name, age, account_id));
        info!(account_id, name, "created customer account");

        self.save_counter();
        self.persist_customer(account_id);

        Ok(account_id)
    }

    pub fn customer(&self, account_id: u32) -> Result<&Customer, BankError> {
        self.by_id
            .get(&account_id)
            .ok_or(BankError::AccountNotFound(account_id))
    }

    pub fn customer_mut(&mut self, account_id: u32) -> Result<&mut Customer, BankError> {
        self.by_id
            .get_mut(&account_id)
            .ok_or(BankError::AccountNotFound(account_id))
    }

    /// Case-insensitive name lookup.
    pub fn customer_by_name(&self, name: &str) -> Result<&Customer, BankError> {
        let id = self
            .by_name
            .get(&name.trim().to_lowercase())
            .ok_or_else(|| BankError::NameNotFound(name.to_string()))?;
        self.customer(*id)
    }

    /// Snapshot of all known customers, sorted by account id for stable
    /// display order.
    pub fn customers(&self) -> Vec<&Customer> {
        let mut all: Vec<&Customer> = self.by_id.values().collect();
        all.sort_by_key(|c| c.account_id());
        all
    }

    pub fn customers_dir(&self) -> PathBuf {
        self.data_dir.join(CUSTOMERS_DIR)
    }

    /// Merge-saves one customer's file. Unknown ids and I/O failures are
    /// reported through logging only.
    pub fn persist_customer(&self, account_id: u32) {
        match self.by_id.get(&account_id) {
            Some(customer) => customer.persist(&self.customers_dir()),
            None => warn!(account_id, "asked to persist an unknown account"),
        }
    }

    fn save_counter(&self) {
        let path = self.data_dir.join(COUNTER_FILE);
        if let Err(err) = write_counter(&path, self.next_account_id) {
            warn!(error = %err, "account id counter save failed");
        }
    }
}

fn load_counter(path: &Path) -> u32 {
    let Ok(text) = fs::read_to_string(path) else {
        return DEFAULT_FIRST_ACCOUNT_ID;
    };
    match text.trim().parse() {
        Ok(id) => id,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "unreadable account id counter, using default");
            DEFAULT_FIRST_ACCOUNT_ID
        }
    }
}

fn write_counter(path: &Path, next_account_id: u32) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, next_account_id.to_string())
}
