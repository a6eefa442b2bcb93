pub mod pipe_file;

use std::path::Path;

use crate::{
    errors::LedgerError,
    ledger::{Ledger, Transaction},
};

pub use pipe_file::PipeFileStorage;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Outcome of loading a backing file: the parsed ledger plus one warning per
/// line that had to be skipped.
#[derive(Debug)]
pub struct LoadReport {
    pub ledger: Ledger,
    pub warnings: Vec<String>,
}

/// Abstraction over persistence backends capable of storing the ledger.
pub trait StorageBackend: Send + Sync {
    /// Reads the full backing store. Missing data is not an error: the
    /// ledger starts empty.
    fn load(&self) -> Result<LoadReport>;

    /// Rewrites the full backing store in current in-memory order.
    fn save(&self, ledger: &Ledger) -> Result<()>;

    /// Persists a single new record without rewriting everything already
    /// stored.
    fn append_record(&self, transaction: &Transaction) -> Result<()>;

    fn path(&self) -> &Path;
}
