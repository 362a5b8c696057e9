//! Ledger configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use stockledger_core::Quantity;

/// Storage file used when none is configured (relative to the working directory).
pub const DEFAULT_STORAGE_PATH: &str = "inventory.json";

/// Items strictly below this quantity are reported as low stock.
pub const DEFAULT_LOW_STOCK_THRESHOLD: Quantity = Quantity::Whole(5);

pub const STORAGE_PATH_ENV: &str = "STOCK_LEDGER_PATH";
pub const LOW_THRESHOLD_ENV: &str = "STOCK_LEDGER_LOW_THRESHOLD";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub storage_path: PathBuf,
    pub low_stock_threshold: Quantity,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}

impl LedgerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Unset keys fall back to defaults; unparsable values are logged and
    /// ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        match lookup(STORAGE_PATH_ENV) {
            Some(path) if !path.trim().is_empty() => config.storage_path = PathBuf::from(path),
            _ => tracing::info!(
                "{STORAGE_PATH_ENV} not set; using {}",
                config.storage_path.display()
            ),
        }

        if let Some(raw) = lookup(LOW_THRESHOLD_ENV) {
            match parse_threshold(&raw) {
                Some(threshold) => config.low_stock_threshold = threshold,
                None => tracing::warn!(
                    value = %raw,
                    "{LOW_THRESHOLD_ENV} is not a finite number; using {}",
                    config.low_stock_threshold
                ),
            }
        }

        config
    }
}

fn parse_threshold(raw: &str) -> Option<Quantity> {
    let quantity: Quantity = serde_json::from_str(raw.trim()).ok()?;
    quantity.ensure_finite().ok()
}
