//! Activity log entries.
//!
//! The log is process-local: entries are never written to storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockledger_core::Quantity;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityKind {
    Added,
    Removed,
}

impl core::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ActivityKind::Added => f.write_str("Added"),
            ActivityKind::Removed => f.write_str("Removed"),
        }
    }
}

/// One mutation of the ledger, timestamped when it was applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub at: DateTime<Utc>,
    pub kind: ActivityKind,
    pub item: String,
    pub quantity: Quantity,
}

impl ActivityEntry {
    pub fn added(item: impl Into<String>, quantity: Quantity) -> Self {
        Self::now(ActivityKind::Added, item, quantity)
    }

    pub fn removed(item: impl Into<String>, quantity: Quantity) -> Self {
        Self::now(ActivityKind::Removed, item, quantity)
    }

    fn now(kind: ActivityKind, item: impl Into<String>, quantity: Quantity) -> Self {
        Self {
            at: Utc::now(),
            kind,
            item: item.into(),
            quantity,
        }
    }
}

impl core::fmt::Display for ActivityEntry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}: {} {} of {}",
            self.at.format("%Y-%m-%d %H:%M:%S%.6f"),
            self.kind,
            self.quantity,
            self.item
        )
    }
}
