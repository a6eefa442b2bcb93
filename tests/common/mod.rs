use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use ledger_core::{core::LedgerManager, storage::PipeFileStorage};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Reserves an isolated directory for one test and keeps it alive.
pub fn test_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Opens a manager over the given backing file.
pub fn open_manager(path: &Path) -> LedgerManager {
    LedgerManager::open(Box::new(PipeFileStorage::new(path))).expect("open ledger")
}
