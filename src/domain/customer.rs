use std::path::Path;
use tracing::warn;

use crate::common::error::BankError;
use crate::common::money::Money;
use crate::domain::account::Account;
use crate::io::store_file;

/// A customer and their single account. The balance mirrors the net effect of
/// every transaction recorded since the account was opened in this process.
#[derive(Debug, Clone)]
pub struct Customer {
    name: String,
    age: u32,
    account_id: u32,
    balance: Money,
    account: Account,
}

impl Customer {
    pub(crate) fn new(name: impl Into<String>, age: u32, account_id: u32) -> Self {
        Self {
            name: name.into(),
            age,
            account_id,
            balance: Money::ZERO,
            account: Account::new(account_id),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn account_id(&self) -> u32 {
        self.account_id
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    /// Adds `amount` to the balance and records a deposit transaction.
    pub fn deposit_money(&mut self, amount: Money) -> Result<(), BankError> {
        if !amount.is_positive() {
            return Err(BankError::InvalidAmount(amount));
        }
        self.balance += amount;
        self.account.deposit(amount);
        Ok(())
    }

    /// Subtracts `amount` from the balance and records a withdrawal.
    /// Overdrafts are rejected here; the account log itself does not check.
    pub fn withdraw_money(&mut self, amount: Money) -> Result<(), BankError> {
        if !amount.is_positive() {
            return Err(BankError::InvalidAmount(amount));
        }
        if amount > self.balance {
            return Err(BankError::InsufficientBalance {
                requested: amount,
                available: self.balance,
            });
        }
        self.balance -= amount;
        self.account.withdraw(amount);
        Ok(())
    }

    /// Merge-saves this customer to `<customers_dir>/<account_id>.txt`.
    ///
    /// Persistence is best effort: a failed save is logged and swallowed, and
    /// the in-memory state is never rolled back.
    pub fn persist(&self, customers_dir: &Path) {
        if let Err(err) = store_file::save(self, customers_dir) {
            warn!(
                account_id = self.account_id,
                error = %err,
                "customer file save failed; in-memory state unchanged"
            );
        }
    }
}
