//! Configuration file handling for salebook.
//!
//! The configuration file is stored at `$SALEBOOK_HOME/config.json` and holds the storage key,
//! display settings and optional price hints. Sales data lives under `$SALEBOOK_HOME/data` and
//! CSV exports default to `$SALEBOOK_HOME/exports`.

use crate::ledger::{DEFAULT_DAY_WINDOW, RECENT_SALES};
use crate::prices::PriceHints;
use crate::store::{FileStore, StoredLedger, DEFAULT_STORAGE_KEY};
use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "salebook";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const DATA: &str = "data";
const EXPORTS: &str = "exports";
const CURRENCY_LABEL: &str = "Rs.";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$SALEBOOK_HOME` and from there it loads `$SALEBOOK_HOME/config.json`. It provides
/// paths to the data and export directories.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    data: PathBuf,
    exports: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the home directory, its subdirectories and an initial `config.json` with default
    /// settings.
    ///
    /// # Errors
    /// - Returns an error if `config.json` already exists, or if any file operations fail.
    pub async fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the salebook home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        if config_path.exists() {
            bail!(
                "A config file already exists at '{}'",
                config_path.display()
            )
        }

        let config_file = ConfigFile::default();
        config_file.save(&config_path).await?;

        let config = Self::from_parts(root, config_path, config_file);
        utils::make_dir(&config.data).await?;
        utils::make_dir(&config.exports).await?;
        Ok(config)
    }

    /// This will
    /// - validate that the home directory exists and that the config file exists
    /// - load the config file
    /// - validate that the data directory exists
    /// - return the loaded configuration object
    pub async fn load(home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("The salebook home directory is missing, run 'salebook init' first")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;

        let config = Self::from_parts(root, config_path, config_file);
        if !config.data.is_dir() {
            bail!(
                "The data directory is missing '{}'",
                config.data.display()
            )
        }
        Ok(config)
    }

    fn from_parts(root: PathBuf, config_path: PathBuf, config_file: ConfigFile) -> Self {
        Self {
            data: root.join(DATA),
            exports: root.join(EXPORTS),
            root,
            config_path,
            config_file,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn data(&self) -> &Path {
        &self.data
    }

    pub fn exports(&self) -> &Path {
        &self.exports
    }

    pub fn storage_key(&self) -> &str {
        &self.config_file.storage_key
    }

    pub fn currency_label(&self) -> &str {
        &self.config_file.currency_label
    }

    pub fn recent_count(&self) -> usize {
        self.config_file.recent_count
    }

    pub fn day_window(&self) -> usize {
        self.config_file.day_window
    }

    pub fn price_hints(&self) -> &PriceHints {
        &self.config_file.price_hints
    }

    /// The file store backing the data directory.
    pub fn store(&self) -> FileStore {
        FileStore::new(&self.data)
    }

    /// Opens the configured ledger from the data directory.
    pub async fn open_ledger(&self) -> Result<StoredLedger<FileStore>> {
        StoredLedger::open(self.store(), self.storage_key()).await
    }

    /// Replaces the price hints and rewrites `config.json`.
    pub async fn set_price_hints(&mut self, hints: PriceHints) -> Result<()> {
        self.config_file.price_hints = hints;
        self.config_file.save(&self.config_path).await
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "salebook",
///   "config_version": 1,
///   "storage_key": "sales",
///   "currency_label": "Rs.",
///   "recent_count": 5,
///   "day_window": 30,
///   "price_hints": { "printed": "170", "girly": "120" }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "salebook"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// The key the sales ledger is stored under, i.e. `data/<storage_key>.json`
    #[serde(default = "default_storage_key")]
    storage_key: String,

    /// Printed before amounts in command output
    #[serde(default = "default_currency_label")]
    currency_label: String,

    /// How many recent sales the summary shows
    #[serde(default = "default_recent_count")]
    recent_count: usize,

    /// How many distinct days the daily chart covers
    #[serde(default = "default_day_window")]
    day_window: usize,

    /// Default unit prices by product name
    #[serde(default, skip_serializing_if = "PriceHints::is_empty")]
    price_hints: PriceHints,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_currency_label() -> String {
    CURRENCY_LABEL.to_string()
}

fn default_recent_count() -> usize {
    RECENT_SALES
}

fn default_day_window() -> usize {
    DEFAULT_DAY_WINDOW
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            storage_key: default_storage_key(),
            currency_label: default_currency_label(),
            recent_count: RECENT_SALES,
            day_window: DEFAULT_DAY_WINDOW,
            price_hints: PriceHints::default(),
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile asynchronously from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = utils::read(path).await?;

        let config: ConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }
}
