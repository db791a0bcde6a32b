use crate::common::money::Money;
use crate::domain::transaction::{Transaction, TxKind};

/// Append-only transaction log for one customer. Entry order is
/// chronological; ids are dense (`len + 1` at append time).
#[derive(Debug, Clone)]
pub struct Account {
    account_id: u32,
    transactions: Vec<Transaction>,
}

impl Account {
    pub(crate) fn new(account_id: u32) -> Self {
        Self {
            account_id,
            transactions: Vec::new(),
        }
    }

    pub fn account_id(&self) -> u32 {
        self.account_id
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Records a deposit. Non-positive amounts leave the log untouched.
    pub(crate) fn deposit(&mut self, amount: Money) {
        if !amount.is_positive() {
            return;
        }
        self.push(amount, TxKind::Deposit);
    }

    /// Records a withdrawal movement and reports whether one was written.
    /// The log does not consult any balance; overdraft enforcement belongs to
    /// the owning customer.
    pub(crate) fn withdraw(&mut self, amount: Money) -> bool {
        if !amount.is_positive() {
            return false;
        }
        self.push(amount, TxKind::Withdrawal);
        true
    }

    fn push(&mut self, amount: Money, kind: TxKind) {
        let id = self.transactions.len() as u32 + 1;
        self.transactions.push(Transaction::new(id, amount, kind));
    }
}
