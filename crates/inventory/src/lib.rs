//! Inventory stock ledger.
//!
//! An in-memory mapping of item name to quantity with an ephemeral activity
//! log, persisted explicitly through a JSON file (`save_data` / `load_data`).

pub mod activity;
pub mod config;
pub mod ledger;
pub mod report;
pub mod storage;

pub use activity::{ActivityEntry, ActivityKind};
pub use config::{DEFAULT_LOW_STOCK_THRESHOLD, DEFAULT_STORAGE_PATH, LedgerConfig};
pub use ledger::{AddItem, DEFAULT_ITEM_NAME, StockLedger};
pub use report::StockReport;
pub use storage::{LoadOutcome, StockMap, StorageError};
