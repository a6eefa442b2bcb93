use std::path::Path;

use chrono::{Local, NaiveDate, NaiveTime, Timelike};

use crate::{
    errors::LedgerError,
    ledger::{Ledger, PeriodReport, ReportPeriod, SortKey, Totals, Transaction, VendorReport},
    storage::{LoadReport, StorageBackend},
};

/// Facade that coordinates the in-memory ledger and its backing store.
///
/// Owns exactly one lifecycle: `open` loads the file (or starts empty),
/// adds and sorts mutate the sequence, `save` flushes the current order
/// back. Front ends talk to this surface only and carry no ledger logic of
/// their own.
pub struct LedgerManager {
    ledger: Ledger,
    storage: Box<dyn StorageBackend>,
    load_warnings: Vec<String>,
    dirty: bool,
}

impl LedgerManager {
    /// Opens the backing store and surfaces per-line warnings from the load.
    pub fn open(storage: Box<dyn StorageBackend>) -> Result<Self, LedgerError> {
        let LoadReport { ledger, warnings } = storage.load()?;
        Ok(Self {
            ledger,
            storage,
            load_warnings: warnings,
            dirty: false,
        })
    }

    /// Warnings produced while loading the backing file (skipped lines).
    pub fn load_warnings(&self) -> &[String] {
        &self.load_warnings
    }

    pub fn ledger_path(&self) -> &Path {
        self.storage.path()
    }

    pub fn transaction_count(&self) -> usize {
        self.ledger.transaction_count()
    }

    /// True when the in-memory order differs from the backing file (after a
    /// sort) and a save is needed to reconcile them.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Records a deposit stamped with the current local date and time. The
    /// sign is fixed by the operation: deposits are stored non-negative.
    pub fn add_deposit(
        &mut self,
        amount: f64,
        description: &str,
        vendor: &str,
    ) -> Result<Transaction, LedgerError> {
        let (date, time) = now_stamp();
        self.add_record(Transaction::from_parts(
            date,
            time,
            description,
            vendor,
            amount.abs(),
        ))
    }

    /// Records a payment stamped with the current local date and time; the
    /// stored amount is always negative.
    pub fn add_payment(
        &mut self,
        amount: f64,
        description: &str,
        vendor: &str,
    ) -> Result<Transaction, LedgerError> {
        let (date, time) = now_stamp();
        self.add_record(Transaction::from_parts(
            date,
            time,
            description,
            vendor,
            -amount.abs(),
        ))
    }

    /// Records a deposit at an explicit date and time, validating both.
    pub fn add_deposit_at(
        &mut self,
        date: &str,
        time: &str,
        amount: f64,
        description: &str,
        vendor: &str,
    ) -> Result<Transaction, LedgerError> {
        let record = Transaction::new(date, time, description, vendor, amount.abs())?;
        self.add_record(record)
    }

    /// Records a payment at an explicit date and time, validating both.
    pub fn add_payment_at(
        &mut self,
        date: &str,
        time: &str,
        amount: f64,
        description: &str,
        vendor: &str,
    ) -> Result<Transaction, LedgerError> {
        let record = Transaction::new(date, time, description, vendor, -amount.abs())?;
        self.add_record(record)
    }

    /// Persist-as-you-go: the new record is appended to the backing file
    /// first, then to the in-memory sequence, so a failed write leaves the
    /// ledger unchanged.
    fn add_record(&mut self, transaction: Transaction) -> Result<Transaction, LedgerError> {
        self.storage.append_record(&transaction)?;
        self.ledger.append(transaction.clone());
        tracing::debug!(vendor = transaction.vendor(), "recorded {}", transaction.kind().label());
        Ok(transaction)
    }

    pub fn list_all(&self) -> Vec<Transaction> {
        self.ledger.transactions().to_vec()
    }

    pub fn list_income(&self) -> Vec<Transaction> {
        self.ledger.partition_by_kind().0
    }

    pub fn list_expense(&self) -> Vec<Transaction> {
        self.ledger.partition_by_kind().1
    }

    pub fn search(&self, term: &str, case_sensitive: bool) -> Vec<Transaction> {
        self.ledger.search(term, case_sensitive)
    }

    pub fn search_by_vendor(&self, term: &str) -> VendorReport {
        self.ledger.search_by_vendor(term)
    }

    /// Reorders the in-memory sequence. The backing file keeps its previous
    /// order until the next `save`.
    pub fn sort(&mut self, key: SortKey) {
        self.ledger.sort_by(key);
        self.dirty = true;
    }

    pub fn report(&self, period: ReportPeriod, reference: NaiveDate) -> PeriodReport {
        self.ledger.period_report(period, reference)
    }

    pub fn totals(&self) -> Totals {
        self.ledger.totals()
    }

    /// Rewrites the backing file in current in-memory order. On failure the
    /// in-memory ledger is untouched and the save may be retried.
    pub fn save(&mut self) -> Result<(), LedgerError> {
        self.storage.save(&self.ledger)?;
        self.dirty = false;
        Ok(())
    }

    /// Pretty-JSON snapshot of the ledger, for handing to other tools.
    pub fn export_json(&self) -> Result<String, LedgerError> {
        Ok(serde_json::to_string_pretty(&self.ledger)?)
    }
}

/// Current local date and time, truncated to whole seconds to match the
/// persisted precision.
fn now_stamp() -> (NaiveDate, NaiveTime) {
    let now = Local::now().naive_local();
    let time = now.time().with_nanosecond(0).unwrap_or_else(|| now.time());
    (now.date(), time)
}
