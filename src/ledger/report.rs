use chrono::{Datelike, NaiveDate};

use super::{
    ledger::Ledger,
    transaction::{EntryKind, Transaction},
};

/// Calendar window selected relative to a reference date. Windows match by
/// calendar month or year, not by day-of-month cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPeriod {
    MonthToDate,
    PreviousMonth,
    YearToDate,
    PreviousYear,
}

impl ReportPeriod {
    pub const ALL: [ReportPeriod; 4] = [
        ReportPeriod::MonthToDate,
        ReportPeriod::PreviousMonth,
        ReportPeriod::YearToDate,
        ReportPeriod::PreviousYear,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ReportPeriod::MonthToDate => "Month to date",
            ReportPeriod::PreviousMonth => "Previous month",
            ReportPeriod::YearToDate => "Year to date",
            ReportPeriod::PreviousYear => "Previous year",
        }
    }

    /// True when `date` falls inside the window derived from `reference`.
    pub fn contains(&self, reference: NaiveDate, date: NaiveDate) -> bool {
        match self {
            ReportPeriod::MonthToDate => {
                date.year() == reference.year() && date.month() == reference.month()
            }
            ReportPeriod::PreviousMonth => {
                let (year, month) = previous_month(reference);
                date.year() == year && date.month() == month
            }
            ReportPeriod::YearToDate => date.year() == reference.year(),
            ReportPeriod::PreviousYear => date.year() == reference.year() - 1,
        }
    }
}

/// Calendar month immediately before `reference`, rolling into December of
/// the prior year when the reference month is January.
fn previous_month(reference: NaiveDate) -> (i32, u32) {
    if reference.month() == 1 {
        (reference.year() - 1, 12)
    } else {
        (reference.year(), reference.month() - 1)
    }
}

/// Income/expense totals over a record subset. `expense` keeps the negative
/// sum of payment amounts, so `net = income + expense` holds arithmetically;
/// display layers render the absolute value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
    pub net: f64,
}

/// Sums the income and expense subsets of `records`.
pub fn totals(records: &[Transaction]) -> Totals {
    let mut totals = Totals::default();
    for record in records {
        match record.kind() {
            EntryKind::Deposit => totals.income += record.amount(),
            EntryKind::Payment => totals.expense += record.amount(),
        }
    }
    totals.net = totals.income + totals.expense;
    totals
}

/// Result of a calendar-period report: the filtered, originally-ordered
/// subsequence plus its totals.
#[derive(Debug, Clone)]
pub struct PeriodReport {
    pub period: ReportPeriod,
    pub reference: NaiveDate,
    pub records: Vec<Transaction>,
    pub totals: Totals,
}

/// Result of a vendor lookup.
#[derive(Debug, Clone)]
pub struct VendorReport {
    pub records: Vec<Transaction>,
    pub found: bool,
}

impl Ledger {
    pub fn totals(&self) -> Totals {
        totals(&self.transactions)
    }

    pub fn period_report(&self, period: ReportPeriod, reference: NaiveDate) -> PeriodReport {
        let records: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|txn| period.contains(reference, txn.date()))
            .cloned()
            .collect();
        let totals = totals(&records);
        PeriodReport {
            period,
            reference,
            records,
            totals,
        }
    }

    /// Case-insensitive substring match restricted to the vendor field.
    pub fn search_by_vendor(&self, term: &str) -> VendorReport {
        let needle = term.to_lowercase();
        let records: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|txn| txn.vendor().to_lowercase().contains(&needle))
            .cloned()
            .collect();
        let found = !records.is_empty();
        VendorReport { records, found }
    }
}
