use serde::{Deserialize, Serialize};

use super::transaction::Transaction;

/// Ordered sequence of ledger entries. The ledger exclusively owns its
/// records: loading preserves file line order, new records append at the
/// end, and queries hand out read-only copies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    pub(crate) transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            transactions: Vec::new(),
        }
    }

    /// Adds to the end of the sequence. Append order is preserved; nothing
    /// is sorted implicitly.
    pub fn append(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
