use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use stockledger_core::{DomainError, DomainResult, Quantity};

use crate::activity::ActivityEntry;
use crate::config::{DEFAULT_STORAGE_PATH, LedgerConfig};
use crate::report::StockReport;
use crate::storage::{self, LoadOutcome, StockMap, StorageError};

/// Item name used by [`AddItem::default`].
pub const DEFAULT_ITEM_NAME: &str = "default";

/// Command: add stock for an item.
///
/// Missing fields take their defaults (`"default"`, `0`) when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddItem {
    pub name: String,
    pub quantity: Quantity,
}

impl Default for AddItem {
    fn default() -> Self {
        Self {
            name: DEFAULT_ITEM_NAME.to_string(),
            quantity: Quantity::ZERO,
        }
    }
}

/// Stock ledger: item quantities, the activity that produced them, and the
/// file they are saved to.
///
/// - Items whose quantity drops to zero or below on removal are deleted;
///   absence means "no stock".
/// - Adding never floors the quantity, so negative stock is possible.
/// - Nothing is persisted until [`StockLedger::save_data`] is called, and the
///   activity log is never persisted at all.
#[derive(Debug, Clone)]
pub struct StockLedger {
    storage_path: PathBuf,
    low_stock_threshold: Quantity,
    stock: StockMap,
    activity: Vec<ActivityEntry>,
}

impl StockLedger {
    /// Empty ledger saving to `storage_path`.
    pub fn new(storage_path: impl Into<PathBuf>) -> Self {
        Self::from_config(&LedgerConfig {
            storage_path: storage_path.into(),
            ..LedgerConfig::default()
        })
    }

    /// Empty ledger saving to `inventory.json` in the working directory.
    pub fn with_default_path() -> Self {
        Self::new(DEFAULT_STORAGE_PATH)
    }

    pub fn from_config(config: &LedgerConfig) -> Self {
        Self {
            storage_path: config.storage_path.clone(),
            low_stock_threshold: config.low_stock_threshold,
            stock: StockMap::new(),
            activity: Vec::new(),
        }
    }

    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }

    pub fn low_stock_threshold(&self) -> Quantity {
        self.low_stock_threshold
    }

    pub fn activity(&self) -> &[ActivityEntry] {
        &self.activity
    }

    pub fn len(&self) -> usize {
        self.stock.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stock.is_empty()
    }

    /// Items and quantities in ledger order.
    pub fn items(&self) -> impl Iterator<Item = (&str, Quantity)> {
        self.stock.iter().map(|(name, qty)| (name.as_str(), *qty))
    }

    /// Increase `name` by `quantity`, creating it at zero first if absent.
    pub fn add_item(&mut self, name: &str, quantity: impl Into<Quantity>) -> DomainResult<()> {
        let quantity = quantity.into().ensure_finite().inspect_err(|e| {
            tracing::warn!(item = name, "Invalid item name or quantity type. ({e})");
        })?;

        let total = checked_total(name, self.get_qty(name) + quantity)?;
        // Re-inserting an existing key keeps its position.
        self.stock.insert(name.to_string(), total);

        tracing::debug!(item = name, %quantity, %total, "stock added");
        self.activity.push(ActivityEntry::added(name, quantity));
        Ok(())
    }

    pub fn apply_add(&mut self, command: AddItem) -> DomainResult<()> {
        self.add_item(&command.name, command.quantity)
    }

    /// Dynamically typed add: `name` must be a JSON string and `quantity` a
    /// JSON number, otherwise nothing changes.
    pub fn add_value(&mut self, name: &JsonValue, quantity: &JsonValue) -> DomainResult<()> {
        let (name, quantity) = check_input_types(name, quantity)?;
        self.add_item(name, quantity)
    }

    /// Decrease `name` by `quantity`; the item is deleted once depleted.
    pub fn remove_item(&mut self, name: &str, quantity: impl Into<Quantity>) -> DomainResult<()> {
        let quantity = quantity.into().ensure_finite().inspect_err(|e| {
            tracing::warn!(item = name, "Invalid item name or quantity type. ({e})");
        })?;

        let Some(current) = self.stock.get(name).copied() else {
            tracing::warn!("Item '{name}' not found in inventory.");
            return Err(DomainError::not_found(name));
        };

        let remaining = checked_total(name, current - quantity)?;
        if remaining.is_depleted() {
            self.stock.shift_remove(name);
            tracing::debug!(item = name, %quantity, "stock depleted; item removed");
        } else {
            self.stock.insert(name.to_string(), remaining);
            tracing::debug!(item = name, %quantity, total = %remaining, "stock removed");
        }

        self.activity.push(ActivityEntry::removed(name, quantity));
        Ok(())
    }

    /// Dynamically typed remove, validated the same way as [`Self::add_value`].
    pub fn remove_value(&mut self, name: &JsonValue, quantity: &JsonValue) -> DomainResult<()> {
        let (name, quantity) = check_input_types(name, quantity)?;
        self.remove_item(name, quantity)
    }

    /// Current quantity of `name`, zero if untracked.
    pub fn get_qty(&self, name: &str) -> Quantity {
        self.stock.get(name).copied().unwrap_or(Quantity::ZERO)
    }

    /// Names whose quantity is strictly below `threshold`, in ledger order.
    pub fn check_low_items(&self, threshold: impl Into<Quantity>) -> Vec<String> {
        let threshold = threshold.into();
        self.stock
            .iter()
            .filter(|(_, qty)| **qty < threshold)
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// [`Self::check_low_items`] against the configured threshold (5 unless
    /// configured otherwise).
    pub fn low_items(&self) -> Vec<String> {
        self.check_low_items(self.low_stock_threshold)
    }

    /// Replace the whole mapping with the storage file's contents.
    ///
    /// Never fails: a missing or unusable file leaves the ledger empty. The
    /// activity log is untouched.
    pub fn load_data(&mut self) -> LoadOutcome {
        match storage::read_stock(&self.storage_path) {
            Ok(stock) => {
                self.stock = stock;
                tracing::info!(
                    path = %self.storage_path.display(),
                    items = self.stock.len(),
                    "stock loaded"
                );
                LoadOutcome::Loaded(self.stock.len())
            }
            Err(StorageError::Missing { path }) => {
                tracing::warn!("File {} not found. Starting empty...", path.display());
                self.stock.clear();
                LoadOutcome::Missing
            }
            Err(err) => {
                tracing::warn!(error = %err, "Error decoding JSON file.");
                self.stock.clear();
                LoadOutcome::Malformed
            }
        }
    }

    /// Overwrite the storage file with the whole current mapping.
    ///
    /// Failures are logged and returned; the in-memory ledger is unaffected.
    pub fn save_data(&self) -> Result<(), StorageError> {
        storage::write_stock(&self.storage_path, &self.stock)
            .inspect(|_| {
                tracing::info!(
                    path = %self.storage_path.display(),
                    items = self.stock.len(),
                    "stock saved"
                );
            })
            .inspect_err(|err| {
                tracing::warn!(
                    error = %err,
                    "Error : File {} could not be written",
                    self.storage_path.display()
                );
            })
    }

    pub fn report(&self) -> StockReport {
        StockReport::new(
            self.stock
                .iter()
                .map(|(name, qty)| (name.clone(), *qty))
                .collect(),
        )
    }

    /// Print the report to stdout.
    pub fn print_data(&self) {
        println!("{}", self.report());
    }
}

/// A total that no longer fits a finite number would be written as `null`
/// and make the whole file unreadable, so the operation is refused instead.
fn checked_total(name: &str, total: Quantity) -> DomainResult<Quantity> {
    total.ensure_finite().inspect_err(|e| {
        tracing::warn!(item = name, "Quantity for item '{name}' out of range. ({e})");
    })
}

fn check_input_types<'a>(
    name: &'a JsonValue,
    quantity: &JsonValue,
) -> DomainResult<(&'a str, Quantity)> {
    match (name.as_str(), Quantity::from_json(quantity)) {
        (Some(name), Some(quantity)) => Ok((name, quantity)),
        _ => {
            tracing::warn!(%name, %quantity, "Invalid item name or quantity type.");
            Err(DomainError::invalid_input(format!(
                "expected text name and numeric quantity, got {name} and {quantity}"
            )))
        }
    }
}
