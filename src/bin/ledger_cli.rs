use std::{env, path::PathBuf, process};

use ledger_core::{
    cli::run_cli,
    config::ConfigManager,
    core::LedgerManager,
    init,
    storage::PipeFileStorage,
};

fn main() {
    init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_manager = ConfigManager::new()?;
    let mut config = config_manager.load()?;
    if !config_manager.path().exists() {
        config_manager.save(&config)?;
    }

    // An optional argument overrides the configured backing file for this run.
    if let Some(path) = env::args().nth(1) {
        config.ledger_file = PathBuf::from(path);
    }

    let storage = PipeFileStorage::new(config.ledger_file.clone());
    let mut manager = LedgerManager::open(Box::new(storage))?;
    run_cli(&mut manager, &config)?;
    Ok(())
}
