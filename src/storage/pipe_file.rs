use std::{
    fs::{self, OpenOptions},
    io::{BufRead, BufReader, ErrorKind, Write},
    path::{Path, PathBuf},
};

use crate::{
    ledger::{Ledger, Transaction},
    utils::{ensure_dir, tmp_path, write_atomic},
};

use super::{LoadReport, Result, StorageBackend};

/// Flat-file backend: UTF-8 text, one record per line, fields joined by `|`
/// in the order `date|time|description|vendor|amount`.
#[derive(Debug, Clone)]
pub struct PipeFileStorage {
    path: PathBuf,
}

impl PipeFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StorageBackend for PipeFileStorage {
    /// Reads the file line by line. Each line parses independently; a line
    /// that fails is skipped and reported as a warning, never aborting the
    /// load. A missing file yields an empty ledger.
    fn load(&self) -> Result<LoadReport> {
        let mut ledger = Ledger::new();
        let mut warnings = Vec::new();

        let file = match fs::File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "no ledger file yet, starting empty");
                return Ok(LoadReport { ledger, warnings });
            }
            Err(err) => return Err(err.into()),
        };

        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match Transaction::from_line(&line) {
                Ok(transaction) => ledger.append(transaction),
                Err(err) => {
                    let warning = format!("skipping line {}: {err}", index + 1);
                    tracing::warn!(path = %self.path.display(), "{warning}");
                    warnings.push(warning);
                }
            }
        }

        Ok(LoadReport { ledger, warnings })
    }

    /// Serializes every record in current in-memory order, staging through a
    /// temporary file so a failed write cannot truncate the original.
    fn save(&self, ledger: &Ledger) -> Result<()> {
        let mut contents = String::new();
        for transaction in ledger.transactions() {
            contents.push_str(&transaction.to_line());
            contents.push('\n');
        }
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &contents)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Appends one line in place, supporting persist-as-you-go adds without
    /// rewriting the whole file.
    fn append_record(&self, transaction: &Transaction) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                ensure_dir(parent)?;
            }
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", transaction.to_line())?;
        file.flush()?;
        Ok(())
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
