//! Ledger domain models: the transaction record, the ordered record
//! sequence, and the query/report operations built on top of it.

#[allow(clippy::module_inception)]
pub mod ledger;
pub mod query;
pub mod report;
pub mod transaction;

pub use ledger::Ledger;
pub use query::SortKey;
pub use report::{totals, PeriodReport, ReportPeriod, Totals, VendorReport};
pub use transaction::{
    is_valid_date, is_valid_time, EntryKind, Transaction, DATE_FORMAT, TIME_FORMAT,
};
