use std::io;

use thiserror::Error;

use crate::errors::LedgerError;

/// Errors surfaced by interactive commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
}

pub type CommandResult = Result<(), CommandError>;
