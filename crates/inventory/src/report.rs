//! Human-readable stock report.

use stockledger_core::Quantity;

/// Snapshot of every item and its quantity, in ledger order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StockReport {
    lines: Vec<(String, Quantity)>,
}

impl StockReport {
    pub fn new(lines: Vec<(String, Quantity)>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[(String, Quantity)] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl core::fmt::Display for StockReport {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Items Report:")?;
        for (item, quantity) in &self.lines {
            write!(f, "\n{item} -> {quantity}")?;
        }
        Ok(())
    }
}
