//! Runtime configuration.
//!
//! Sources, later ones winning:
//! - built-in defaults
//! - `config.json` in the platform config directory
//! - `FREELANCE_DATA_FILE` / `FREELANCE_INVOICE_DIR`
//! - command-line flags (applied by the caller)

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::billing::DuplicateClientPolicy;
use crate::render::{CurrencyFormat, DocumentFormat};

const APP_NAME: &str = "freelance-suite";
const CONFIG_FILE: &str = "config.json";
const DATA_FILE: &str = "freelance_data.json";

pub const DATA_FILE_ENV: &str = "FREELANCE_DATA_FILE";
pub const INVOICE_DIR_ENV: &str = "FREELANCE_INVOICE_DIR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path of the JSON state file.
    pub data_file: PathBuf,
    /// Directory invoices are written to.
    pub invoice_dir: PathBuf,
    pub currency_symbol: String,
    /// Table rows per page in rendered invoices.
    pub rows_per_page: usize,
    pub document_format: DocumentFormat,
    /// What adding an already-registered client id does.
    pub duplicate_clients: DuplicateClientPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            invoice_dir: PathBuf::from("."),
            currency_symbol: "$".to_string(),
            rows_per_page: 40,
            document_format: DocumentFormat::Pdf,
            duplicate_clients: DuplicateClientPolicy::Reject,
        }
    }
}

impl Config {
    /// Load the config file and environment overrides.
    /// Falls back to defaults if the file is missing or unreadable.
    pub fn load() -> Self {
        let mut config = match Self::try_load() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config, using defaults: {:#}", e);
                Self::default()
            }
        };
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    fn try_load() -> Result<Self> {
        let Some(path) = config_path() else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::from_json(
            &fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
        )
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse config file")
    }

    /// Apply environment overrides, reading variables through `var`.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(path) = var(DATA_FILE_ENV).filter(|v| !v.is_empty()) {
            self.data_file = PathBuf::from(path);
        }
        if let Some(dir) = var(INVOICE_DIR_ENV).filter(|v| !v.is_empty()) {
            self.invoice_dir = PathBuf::from(dir);
        }
    }

    pub fn currency(&self) -> CurrencyFormat {
        CurrencyFormat::new(self.currency_symbol.clone())
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", APP_NAME)
}

fn config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

fn default_data_file() -> PathBuf {
    match project_dirs() {
        Some(dirs) => dirs.data_dir().join(DATA_FILE),
        None => PathBuf::from(DATA_FILE),
    }
}
