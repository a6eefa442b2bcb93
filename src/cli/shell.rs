use dialoguer::theme::ColorfulTheme;

use crate::{config::Config, core::LedgerManager};

use super::core::CommandResult;
use super::{commands, io as cli_io, output};

/// Top-level interactive loop. A pure I/O adapter: every action delegates
/// to the `LedgerManager` surface and only collects input and renders
/// output.
pub fn run_cli(manager: &mut LedgerManager, config: &Config) -> CommandResult {
    let theme = ColorfulTheme::default();

    output::section("Accounting Ledger");
    cli_io::print_info(format!("Ledger file: {}", manager.ledger_path().display()));
    for warning in manager.load_warnings() {
        cli_io::print_warning(warning);
    }

    loop {
        let choice = cli_io::select(
            &theme,
            "Home",
            &["Add deposit", "Make payment", "Ledger", "Save and exit"],
        )?;
        match choice {
            0 => commands::add_deposit(manager, &theme)?,
            1 => commands::add_payment(manager, &theme)?,
            2 => ledger_menu(manager, config, &theme)?,
            _ => {
                commands::save_and_exit(manager)?;
                return Ok(());
            }
        }
    }
}

fn ledger_menu(
    manager: &mut LedgerManager,
    config: &Config,
    theme: &ColorfulTheme,
) -> CommandResult {
    loop {
        let choice = cli_io::select(
            theme,
            "Ledger",
            &[
                "All entries",
                "Deposits",
                "Payments",
                "Search",
                "Sort",
                "Totals",
                "Reports",
                "Export JSON",
                "Home",
            ],
        )?;
        match choice {
            0 => commands::show_all(manager),
            1 => commands::show_income(manager),
            2 => commands::show_expense(manager),
            3 => commands::search(manager, config, theme)?,
            4 => commands::sort(manager, theme)?,
            5 => commands::totals(manager),
            6 => commands::reports_menu(manager, theme)?,
            7 => commands::export_json(manager, theme)?,
            _ => return Ok(()),
        }
    }
}
