use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    errors::LedgerError,
    utils::{ensure_dir, tmp_path, write_atomic},
};

const APP_DIR: &str = "ledger-core";
const CONFIG_FILE: &str = "config.json";
const DEFAULT_LEDGER_FILE: &str = "transactions.txt";

/// User-facing preferences persisted between runs. The backing file path is
/// the only environment-level setting; front ends may override it per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub ledger_file: PathBuf,
    #[serde(default)]
    pub case_sensitive_search: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ledger_file: default_ledger_file(),
            case_sensitive_search: false,
        }
    }
}

fn default_ledger_file() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(DEFAULT_LEDGER_FILE)
}

/// Loads and saves the configuration file under the platform config
/// directory.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, LedgerError> {
        let base = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR);
        Self::from_base(base)
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, LedgerError> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self, LedgerError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    /// Missing file is not an error: defaults apply until the first save.
    pub fn load(&self) -> Result<Config, LedgerError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), LedgerError> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let config = manager.load().expect("defaults on missing file");
        assert!(!config.case_sensitive_search);
        assert!(config.ledger_file.ends_with(DEFAULT_LEDGER_FILE));
    }

    #[test]
    fn save_and_load_roundtrip() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let config = Config {
            ledger_file: temp.path().join("books.txt"),
            case_sensitive_search: true,
        };
        manager.save(&config).expect("save config");
        let loaded = manager.load().expect("load config");
        assert_eq!(loaded.ledger_file, config.ledger_file);
        assert!(loaded.case_sensitive_search);
    }
}
