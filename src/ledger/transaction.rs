use std::fmt;

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;

/// Fixed textual form for dates, zero-padded so lexicographic order equals
/// chronological order.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Fixed textual form for times-of-day.
pub const TIME_FORMAT: &str = "%H:%M:%S";

const FIELD_SEPARATOR: char = '|';
const FIELD_COUNT: usize = 5;

/// Which side of the ledger an entry belongs to. The boundary lives here and
/// nowhere else: zero counts as income.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Deposit,
    Payment,
}

impl EntryKind {
    pub fn of(amount: f64) -> Self {
        if amount >= 0.0 {
            EntryKind::Deposit
        } else {
            EntryKind::Payment
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::Deposit => "Income",
            EntryKind::Payment => "Expense",
        }
    }
}

/// One ledger entry. Immutable after validation: construction and the
/// date/time setters are the only paths that accept raw text, and both
/// reject anything outside the fixed formats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    date: NaiveDate,
    time: NaiveTime,
    description: String,
    vendor: String,
    amount: f64,
}

/// Strict `YYYY-MM-DD` check: fixed width, zero-padded, no rollover.
pub fn is_valid_date(value: &str) -> bool {
    value.len() == 10 && NaiveDate::parse_from_str(value, DATE_FORMAT).is_ok()
}

/// Strict `HH:MM:SS` check. chrono admits leap seconds through `%S`; the
/// ledger format does not.
pub fn is_valid_time(value: &str) -> bool {
    value.len() == 8
        && NaiveTime::parse_from_str(value, TIME_FORMAT)
            .map(|time| time.nanosecond() < 1_000_000_000)
            .unwrap_or(false)
}

fn parse_date(value: &str) -> Result<NaiveDate, LedgerError> {
    if !is_valid_date(value) {
        return Err(LedgerError::Validation(format!(
            "invalid date `{value}`, expected YYYY-MM-DD"
        )));
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|err| LedgerError::Validation(format!("invalid date `{value}`: {err}")))
}

fn parse_time(value: &str) -> Result<NaiveTime, LedgerError> {
    if !is_valid_time(value) {
        return Err(LedgerError::Validation(format!(
            "invalid time `{value}`, expected HH:MM:SS"
        )));
    }
    NaiveTime::parse_from_str(value, TIME_FORMAT)
        .map_err(|err| LedgerError::Validation(format!("invalid time `{value}`: {err}")))
}

impl Transaction {
    /// Builds a record from raw field text, rejecting malformed date/time.
    pub fn new(
        date: &str,
        time: &str,
        description: impl Into<String>,
        vendor: impl Into<String>,
        amount: f64,
    ) -> Result<Self, LedgerError> {
        Ok(Self {
            date: parse_date(date)?,
            time: parse_time(time)?,
            description: description.into(),
            vendor: vendor.into(),
            amount,
        })
    }

    /// Builds a record from already-typed date and time values.
    pub fn from_parts(
        date: NaiveDate,
        time: NaiveTime,
        description: impl Into<String>,
        vendor: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            date,
            time,
            description: description.into(),
            vendor: vendor.into(),
            amount,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn kind(&self) -> EntryKind {
        EntryKind::of(self.amount)
    }

    pub fn set_date(&mut self, date: &str) -> Result<(), LedgerError> {
        self.date = parse_date(date)?;
        Ok(())
    }

    pub fn set_time(&mut self, time: &str) -> Result<(), LedgerError> {
        self.time = parse_time(time)?;
        Ok(())
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_vendor(&mut self, vendor: impl Into<String>) {
        self.vendor = vendor.into();
    }

    pub fn set_amount(&mut self, amount: f64) {
        self.amount = amount;
    }

    pub fn date_text(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    pub fn time_text(&self) -> String {
        self.time.format(TIME_FORMAT).to_string()
    }

    /// Canonical on-disk amount text: plain decimal, two fraction digits, no
    /// currency symbol.
    pub fn amount_text(&self) -> String {
        format!("{:.2}", self.amount)
    }

    /// True when `term` occurs as a substring of any field, honoring the
    /// case-sensitivity flag independently on each field.
    pub fn matches(&self, term: &str, case_sensitive: bool) -> bool {
        let fields = [
            self.date_text(),
            self.time_text(),
            self.description.clone(),
            self.vendor.clone(),
            self.amount_text(),
        ];
        if case_sensitive {
            fields.iter().any(|field| field.contains(term))
        } else {
            let needle = term.to_lowercase();
            fields
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        }
    }

    /// Serializes into the persisted form: five fields joined by `|`.
    pub fn to_line(&self) -> String {
        format!(
            "{}{sep}{}{sep}{}{sep}{}{sep}{}",
            self.date_text(),
            self.time_text(),
            self.description,
            self.vendor,
            self.amount_text(),
            sep = FIELD_SEPARATOR,
        )
    }

    /// Parses one persisted line. Any failure means the caller should skip
    /// the line: wrong field count, unparseable amount, or invalid
    /// date/time.
    pub fn from_line(line: &str) -> Result<Self, LedgerError> {
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
        if fields.len() != FIELD_COUNT {
            return Err(LedgerError::Parse(format!(
                "expected {FIELD_COUNT} fields, found {}",
                fields.len()
            )));
        }
        let amount_text = fields[4].trim();
        let amount = parse_amount(amount_text).ok_or_else(|| {
            LedgerError::Parse(format!("unparseable amount `{amount_text}`"))
        })?;
        Self::new(
            fields[0].trim(),
            fields[1].trim(),
            fields[2].trim(),
            fields[3].trim(),
            amount,
        )
    }
}

/// Parses a stored amount, tolerating a leading `$` (or `-$`) left over from
/// older files that persisted the display form.
fn parse_amount(value: &str) -> Option<f64> {
    let normalized = if let Some(rest) = value.strip_prefix('$') {
        rest.to_string()
    } else if let Some(rest) = value.strip_prefix("-$") {
        format!("-{rest}")
    } else {
        value.to_string()
    };
    normalized.parse().ok()
}

impl fmt::Display for Transaction {
    /// Display form prefixes the amount with `$` for deposits and `-$` with
    /// the absolute value for payments.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let amount = match self.kind() {
            EntryKind::Deposit => format!("${:.2}", self.amount),
            EntryKind::Payment => format!("-${:.2}", self.amount.abs()),
        };
        write!(
            f,
            "{} | {} | {} | {} | {}",
            self.date_text(),
            self.time_text(),
            self.description,
            self.vendor,
            amount
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Transaction {
        Transaction::new("2024-03-15", "09:30:00", "Invoice 104", "Acme Corp", 1250.0)
            .expect("valid record")
    }

    #[test]
    fn rejects_out_of_range_dates_without_rollover() {
        assert!(!is_valid_date("2024-13-01"));
        assert!(!is_valid_date("2024-02-30"));
        assert!(!is_valid_date("2023-02-29"));
        assert!(is_valid_date("2024-02-29"));
    }

    #[test]
    fn rejects_unpadded_or_partial_dates() {
        assert!(!is_valid_date("2024-3-15"));
        assert!(!is_valid_date("2024-03-15 "));
        assert!(!is_valid_date("24-03-15"));
    }

    #[test]
    fn rejects_out_of_range_times() {
        assert!(!is_valid_time("25:00:00"));
        assert!(!is_valid_time("12:60:00"));
        assert!(is_valid_time("00:00:00"));
        assert!(is_valid_time("23:59:59"));
    }

    #[test]
    fn construction_fails_on_malformed_date() {
        let err = Transaction::new("2024-02-30", "10:00:00", "x", "y", 1.0)
            .expect_err("invalid date must fail");
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[test]
    fn line_roundtrip_preserves_the_record() {
        let record = sample();
        let parsed = Transaction::from_line(&record.to_line()).expect("parse own output");
        assert_eq!(parsed, record);
    }

    #[test]
    fn from_line_strips_a_leading_dollar_sign() {
        let parsed = Transaction::from_line("2024-03-15|09:30:00|Coffee|Starbucks|$4.50")
            .expect("tolerates display amounts");
        assert!((parsed.amount() - 4.50).abs() < f64::EPSILON);

        let negative = Transaction::from_line("2024-03-15|09:30:00|Coffee|Starbucks|-$4.50")
            .expect("tolerates negative display amounts");
        assert!((negative.amount() + 4.50).abs() < f64::EPSILON);
    }

    #[test]
    fn from_line_rejects_wrong_field_count() {
        let err = Transaction::from_line("2024-03-15|09:30:00|Coffee|4.50")
            .expect_err("four fields must fail");
        assert!(matches!(err, LedgerError::Parse(_)));
    }

    #[test]
    fn from_line_rejects_invalid_stored_dates() {
        assert!(Transaction::from_line("2024-02-30|09:30:00|Coffee|Starbucks|4.50").is_err());
    }

    #[test]
    fn matches_honors_case_sensitivity_per_field() {
        let record =
            Transaction::from_line("2024-03-15|09:30:00|Latte|Starbucks Coffee|-4.50").unwrap();
        assert!(record.matches("coffee", false));
        assert!(!record.matches("coffee", true));
        assert!(record.matches("Coffee", true));
        assert!(record.matches("2024-03", true));
        assert!(record.matches("4.50", true));
    }

    #[test]
    fn zero_amount_counts_as_income() {
        assert_eq!(EntryKind::of(0.0), EntryKind::Deposit);
        assert_eq!(EntryKind::of(-0.01), EntryKind::Payment);
    }

    #[test]
    fn display_prefixes_payments_with_negative_dollar() {
        let payment = Transaction::new("2024-03-15", "12:00:00", "Lunch", "Deli", -12.5).unwrap();
        assert_eq!(
            payment.to_string(),
            "2024-03-15 | 12:00:00 | Lunch | Deli | -$12.50"
        );
        assert_eq!(
            sample().to_string(),
            "2024-03-15 | 09:30:00 | Invoice 104 | Acme Corp | $1250.00"
        );
    }

    #[test]
    fn serialized_amount_has_two_fraction_digits_and_no_symbol() {
        let record = Transaction::new("2024-03-15", "12:00:00", "Lunch", "Deli", -12.5).unwrap();
        assert_eq!(record.to_line(), "2024-03-15|12:00:00|Lunch|Deli|-12.50");
    }

    #[test]
    fn validated_setters_reject_bad_input_and_keep_state() {
        let mut record = sample();
        assert!(record.set_date("2024-13-01").is_err());
        assert_eq!(record.date_text(), "2024-03-15");
        record.set_date("2024-04-01").expect("valid date accepted");
        assert_eq!(record.date_text(), "2024-04-01");
        assert!(record.set_time("12:60:00").is_err());
        record.set_time("23:59:59").expect("valid time accepted");
        assert_eq!(record.time_text(), "23:59:59");

        record.set_description("Invoice 105");
        record.set_vendor("Acme East");
        record.set_amount(-80.0);
        assert_eq!(record.description(), "Invoice 105");
        assert_eq!(record.vendor(), "Acme East");
        assert_eq!(record.kind(), EntryKind::Payment);
    }
}
