use std::fs;

use chrono::Local;
use dialoguer::theme::ColorfulTheme;

use crate::{
    config::Config,
    core::LedgerManager,
    ledger::{
        is_valid_date, is_valid_time, ReportPeriod, SortKey, Totals, Transaction, DATE_FORMAT,
        TIME_FORMAT,
    },
};

use super::core::{CommandError, CommandResult};
use super::{io as cli_io, output};

pub fn add_deposit(manager: &mut LedgerManager, theme: &ColorfulTheme) -> CommandResult {
    add_entry(manager, theme, true)
}

pub fn add_payment(manager: &mut LedgerManager, theme: &ColorfulTheme) -> CommandResult {
    add_entry(manager, theme, false)
}

/// Collects one entry's fields. Date and time default to "now"; explicit
/// values are re-prompted until they pass the core validators, so a typo
/// never aborts the add.
fn add_entry(manager: &mut LedgerManager, theme: &ColorfulTheme, deposit: bool) -> CommandResult {
    let label = if deposit { "deposit" } else { "payment" };
    output::section(format!("Add {label}"));

    let amount = cli_io::prompt_amount(theme, "Amount")?;
    let description = cli_io::prompt_text(theme, "Description")?;
    let vendor = cli_io::prompt_text(theme, "Vendor")?;
    let date = prompt_valid(theme, "Date (YYYY-MM-DD, blank for today)", is_valid_date)?;
    let time = prompt_valid(theme, "Time (HH:MM:SS, blank for now)", is_valid_time)?;

    let recorded = match (date, time) {
        (None, None) => {
            if deposit {
                manager.add_deposit(amount, &description, &vendor)?
            } else {
                manager.add_payment(amount, &description, &vendor)?
            }
        }
        (date, time) => {
            let now = Local::now().naive_local();
            let date = date.unwrap_or_else(|| now.date().format(DATE_FORMAT).to_string());
            let time = time.unwrap_or_else(|| now.time().format(TIME_FORMAT).to_string());
            if deposit {
                manager.add_deposit_at(&date, &time, amount, &description, &vendor)?
            } else {
                manager.add_payment_at(&date, &time, amount, &description, &vendor)?
            }
        }
    };

    cli_io::print_success(format!("Recorded: {recorded}"));
    Ok(())
}

/// Re-prompts until the answer is blank or passes `check`.
fn prompt_valid(
    theme: &ColorfulTheme,
    prompt: &str,
    check: fn(&str) -> bool,
) -> Result<Option<String>, CommandError> {
    loop {
        let answer = cli_io::prompt_optional_text(theme, prompt)?;
        let trimmed = answer.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        if check(trimmed) {
            return Ok(Some(trimmed.to_string()));
        }
        cli_io::print_error(format!("`{trimmed}` is not valid here, try again"));
    }
}

pub fn show_all(manager: &LedgerManager) {
    print_records("All entries", &manager.list_all());
}

pub fn show_income(manager: &LedgerManager) {
    print_records("Deposits", &manager.list_income());
}

pub fn show_expense(manager: &LedgerManager) {
    print_records("Payments", &manager.list_expense());
}

pub fn search(manager: &LedgerManager, config: &Config, theme: &ColorfulTheme) -> CommandResult {
    let term = cli_io::prompt_text(theme, "Search term")?;
    let term = term.trim();
    if term.is_empty() {
        cli_io::print_warning("Please enter a search term.");
        return Ok(());
    }
    let case_sensitive =
        cli_io::confirm_action(theme, "Case sensitive?", config.case_sensitive_search)?;
    let hits = manager.search(term, case_sensitive);
    if hits.is_empty() {
        cli_io::print_warning(format!("No transactions match `{term}`."));
    } else {
        print_records("Search results", &hits);
    }
    Ok(())
}

pub fn sort(manager: &mut LedgerManager, theme: &ColorfulTheme) -> CommandResult {
    let labels: Vec<&str> = SortKey::ALL.iter().map(|key| key.label()).collect();
    let choice = cli_io::select(theme, "Sort by", &labels)?;
    let key = SortKey::ALL[choice];
    manager.sort(key);
    print_records(&format!("Sorted by {}", key.label()), &manager.list_all());
    cli_io::print_info("The new order is in memory only until you save.");
    Ok(())
}

pub fn totals(manager: &LedgerManager) {
    output::section("Totals");
    print_totals(&manager.totals());
}

pub fn reports_menu(manager: &LedgerManager, theme: &ColorfulTheme) -> CommandResult {
    loop {
        let mut labels: Vec<&str> = ReportPeriod::ALL.iter().map(|p| p.label()).collect();
        labels.push("Search by vendor");
        labels.push("Back");
        let choice = cli_io::select(theme, "Reports", &labels)?;
        match choice {
            index if index < ReportPeriod::ALL.len() => {
                period_report(manager, ReportPeriod::ALL[index]);
            }
            index if index == ReportPeriod::ALL.len() => vendor_search(manager, theme)?,
            _ => return Ok(()),
        }
    }
}

fn period_report(manager: &LedgerManager, period: ReportPeriod) {
    let reference = Local::now().date_naive();
    let report = manager.report(period, reference);
    print_records(period.label(), &report.records);
    if !report.records.is_empty() {
        print_totals(&report.totals);
    }
}

fn vendor_search(manager: &LedgerManager, theme: &ColorfulTheme) -> CommandResult {
    let term = cli_io::prompt_text(theme, "Vendor")?;
    let report = manager.search_by_vendor(term.trim());
    if report.found {
        print_records("Vendor results", &report.records);
    } else {
        cli_io::print_warning(format!("No transactions for vendor `{}`.", term.trim()));
    }
    Ok(())
}

pub fn export_json(manager: &LedgerManager, theme: &ColorfulTheme) -> CommandResult {
    let default = manager.ledger_path().with_extension("json");
    let answer = cli_io::prompt_optional_text(
        theme,
        &format!("Export to (blank for {})", default.display()),
    )?;
    let target = if answer.trim().is_empty() {
        default
    } else {
        answer.trim().into()
    };
    fs::write(&target, manager.export_json()?)?;
    cli_io::print_success(format!("Exported ledger to {}", target.display()));
    Ok(())
}

pub fn save_and_exit(manager: &mut LedgerManager) -> CommandResult {
    manager.save()?;
    cli_io::print_success(format!(
        "Saved {} transactions to {}",
        manager.transaction_count(),
        manager.ledger_path().display()
    ));
    Ok(())
}

fn print_records(title: &str, records: &[Transaction]) {
    output::section(title);
    if records.is_empty() {
        cli_io::print_info("No transactions found.");
        return;
    }
    for record in records {
        cli_io::print_info(record);
    }
    cli_io::print_info(format!("({} entries)", records.len()));
}

fn print_totals(totals: &Totals) {
    cli_io::print_info(format!("Total income:   {}", money(totals.income)));
    cli_io::print_info(format!("Total expenses: {}", money(totals.expense)));
    cli_io::print_info(format!("Net:            {}", money(totals.net)));
}

fn money(value: f64) -> String {
    if value < 0.0 {
        format!("-${:.2}", value.abs())
    } else {
        format!("${:.2}", value)
    }
}
