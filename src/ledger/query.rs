use std::{cmp::Ordering, str::FromStr};

use super::{
    ledger::Ledger,
    transaction::{EntryKind, Transaction},
};
use crate::errors::LedgerError;

/// Projection the ledger can be ordered by. A closed set: adding a criterion
/// forces every match below to handle it at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Date,
    Time,
    Amount,
    Vendor,
    Description,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Date,
        SortKey::Time,
        SortKey::Amount,
        SortKey::Vendor,
        SortKey::Description,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Date => "Date",
            SortKey::Time => "Time",
            SortKey::Amount => "Amount",
            SortKey::Vendor => "Vendor",
            SortKey::Description => "Description",
        }
    }

    /// Date and time order chronologically; amount numerically; vendor and
    /// description as plain text.
    fn compare(&self, a: &Transaction, b: &Transaction) -> Ordering {
        match self {
            SortKey::Date => a.date().cmp(&b.date()),
            SortKey::Time => a.time().cmp(&b.time()),
            SortKey::Amount => a
                .amount()
                .partial_cmp(&b.amount())
                .unwrap_or(Ordering::Equal),
            SortKey::Vendor => a.vendor().cmp(b.vendor()),
            SortKey::Description => a.description().cmp(b.description()),
        }
    }
}

impl FromStr for SortKey {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "date" => Ok(SortKey::Date),
            "time" => Ok(SortKey::Time),
            "amount" => Ok(SortKey::Amount),
            "vendor" => Ok(SortKey::Vendor),
            "description" => Ok(SortKey::Description),
            other => Err(LedgerError::Validation(format!(
                "unknown sort key `{other}`"
            ))),
        }
    }
}

impl Ledger {
    /// Stable in-memory sort by the chosen projection. Does not persist;
    /// flushing the new order to disk is an explicit save.
    pub fn sort_by(&mut self, key: SortKey) {
        self.transactions.sort_by(|a, b| key.compare(a, b));
    }

    /// Every record matching `term`, in original relative order.
    pub fn search(&self, term: &str, case_sensitive: bool) -> Vec<Transaction> {
        self.transactions
            .iter()
            .filter(|txn| txn.matches(term, case_sensitive))
            .cloned()
            .collect()
    }

    /// Splits into (income, expense) per the sign convention, each side
    /// preserving original order.
    pub fn partition_by_kind(&self) -> (Vec<Transaction>, Vec<Transaction>) {
        self.transactions
            .iter()
            .cloned()
            .partition(|txn| txn.kind() == EntryKind::Deposit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(date: &str, time: &str, vendor: &str, amount: f64) -> Transaction {
        Transaction::new(date, time, "Entry", vendor, amount).expect("valid record")
    }

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.append(entry("2024-02-01", "10:00:00", "Acme", -50.0));
        ledger.append(entry("2024-01-15", "09:00:00", "Bistro", 20.0));
        ledger.append(entry("2024-03-01", "08:00:00", "Cafe", -5.0));
        ledger
    }

    #[test]
    fn sort_by_amount_is_numeric() {
        let mut ledger = sample_ledger();
        ledger.sort_by(SortKey::Amount);
        let amounts: Vec<f64> = ledger
            .transactions()
            .iter()
            .map(|txn| txn.amount())
            .collect();
        assert_eq!(amounts, [-50.0, -5.0, 20.0]);
    }

    #[test]
    fn sort_by_date_is_chronological() {
        let mut ledger = sample_ledger();
        ledger.sort_by(SortKey::Date);
        let vendors: Vec<&str> = ledger
            .transactions()
            .iter()
            .map(|txn| txn.vendor())
            .collect();
        assert_eq!(vendors, ["Bistro", "Acme", "Cafe"]);
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let mut ledger = Ledger::new();
        ledger.append(entry("2024-01-01", "10:00:00", "First", 5.0));
        ledger.append(entry("2024-01-01", "11:00:00", "Second", 5.0));
        ledger.append(entry("2024-01-01", "12:00:00", "Third", 5.0));
        ledger.sort_by(SortKey::Amount);
        let vendors: Vec<&str> = ledger
            .transactions()
            .iter()
            .map(|txn| txn.vendor())
            .collect();
        assert_eq!(vendors, ["First", "Second", "Third"]);
    }

    #[test]
    fn search_preserves_original_order() {
        let ledger = sample_ledger();
        let hits = ledger.search("2024", false);
        let vendors: Vec<&str> = hits.iter().map(|txn| txn.vendor()).collect();
        assert_eq!(vendors, ["Acme", "Bistro", "Cafe"]);
    }

    #[test]
    fn search_respects_case_sensitivity() {
        let ledger = sample_ledger();
        assert_eq!(ledger.search("acme", false).len(), 1);
        assert!(ledger.search("acme", true).is_empty());
    }

    #[test]
    fn partition_splits_on_the_sign_convention() {
        let ledger = sample_ledger();
        let (income, expense) = ledger.partition_by_kind();
        assert_eq!(income.len(), 1);
        assert_eq!(expense.len(), 2);
        assert_eq!(expense[0].vendor(), "Acme");
        assert_eq!(expense[1].vendor(), "Cafe");
    }

    #[test]
    fn sort_key_parses_from_text() {
        assert_eq!("vendor".parse::<SortKey>().unwrap(), SortKey::Vendor);
        assert_eq!(" Amount ".parse::<SortKey>().unwrap(), SortKey::Amount);
        assert!("balance".parse::<SortKey>().is_err());
    }
}
