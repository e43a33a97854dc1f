//! # Shell Configuration
//!
//! Shop settings loaded once at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     WARUNG_STORE_NAME="Warung Bu Sri"                                  │
//! │     WARUNG_CUSTOMER, WARUNG_MIN_STOCK, WARUNG_MARKUP_BPS               │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, or                                                │
//! │     ~/.config/warung/warung.toml (Linux)                               │
//! │     ~/Library/Application Support/id.warung.warung/warung.toml (macOS) │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [store]
//! name = "Warung Bu Sri"
//! address = "Jl. Melati No. 7"
//! receipt_footer = "Terima kasih!"
//!
//! [books]
//! walk_in_customer = "Pelanggan Umum"
//! default_min_stock = 5
//! purchase_markup_bps = 3000   # 30%
//! ```
//!
//! Configuration is read-only after startup.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use warung_core::{DEFAULT_MIN_STOCK, DEFAULT_PURCHASE_MARKUP_BPS, WALK_IN_CUSTOMER};
use warung_store::BooksSettings;

use crate::error::{CliError, CliResult};

pub const CONFIG_FILE_NAME: &str = "warung.toml";

// =============================================================================
// Store Section
// =============================================================================

/// What gets printed on receipts and the shell banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSection {
    pub name: String,
    pub address: Option<String>,
    pub receipt_footer: String,
}

impl Default for StoreSection {
    fn default() -> Self {
        StoreSection {
            name: "Warung".to_string(),
            address: None,
            receipt_footer: "Terima kasih atas kunjungan Anda".to_string(),
        }
    }
}

// =============================================================================
// Books Section
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BooksSection {
    /// Customer recorded on Kasir sales.
    pub walk_in_customer: String,
    /// Minimum stock for products added without one.
    pub default_min_stock: i64,
    /// Selling-price markup for products created by a purchase, in basis
    /// points (3000 = 30%).
    pub purchase_markup_bps: u32,
}

impl Default for BooksSection {
    fn default() -> Self {
        BooksSection {
            walk_in_customer: WALK_IN_CUSTOMER.to_string(),
            default_min_stock: DEFAULT_MIN_STOCK,
            purchase_markup_bps: DEFAULT_PURCHASE_MARKUP_BPS,
        }
    }
}

// =============================================================================
// Warung Config
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarungConfig {
    pub store: StoreSection,
    pub books: BooksSection,
}

impl WarungConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`--config`, else the platform config dir)
    /// 3. Environment variables
    ///
    /// An explicit `--config` path must exist; a missing default file is
    /// not an error.
    pub fn load(config_path: Option<PathBuf>) -> CliResult<Self> {
        let mut config = match config_path {
            Some(path) if !path.exists() => return Err(CliError::ConfigNotFound(path)),
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    fn from_file(path: &Path) -> CliResult<Self> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Checks the values the books depend on.
    pub fn validate(&self) -> CliResult<()> {
        if self.store.name.trim().is_empty() {
            return Err(CliError::InvalidConfig("store name is required".into()));
        }
        self.to_settings()
            .validate()
            .map_err(|e| CliError::InvalidConfig(e.to_string()))
    }

    /// Settings handed to [`warung_store::Books`].
    pub fn to_settings(&self) -> BooksSettings {
        BooksSettings {
            walk_in_customer: self.books.walk_in_customer.trim().to_string(),
            default_min_stock: self.books.default_min_stock,
            purchase_markup_bps: self.books.purchase_markup_bps,
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `WARUNG_*` overrides read through `lookup`.
    ///
    /// Values that do not parse are ignored with a warning.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("WARUNG_STORE_NAME") {
            debug!(store_name = %name, "Overriding store name from environment");
            self.store.name = name;
        }

        if let Some(customer) = lookup("WARUNG_CUSTOMER") {
            self.books.walk_in_customer = customer;
        }

        if let Some(min_stock) = lookup("WARUNG_MIN_STOCK") {
            match min_stock.trim().parse::<i64>() {
                Ok(v) => self.books.default_min_stock = v,
                Err(_) => warn!(value = %min_stock, "Ignoring invalid WARUNG_MIN_STOCK"),
            }
        }

        if let Some(markup) = lookup("WARUNG_MARKUP_BPS") {
            match markup.trim().parse::<u32>() {
                Ok(v) => {
                    debug!(markup_bps = v, "Overriding purchase markup from environment");
                    self.books.purchase_markup_bps = v;
                }
                Err(_) => warn!(value = %markup, "Ignoring invalid WARUNG_MARKUP_BPS"),
            }
        }
    }

    /// `warung.toml` in the platform config directory.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("id", "warung", "warung")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
