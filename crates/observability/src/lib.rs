//! Diagnostics setup for the stock ledger.
//!
//! The ledger reports unknown items, rejected input and missing, malformed or
//! unwritable storage through `tracing`. `init` routes those events to stderr
//! as JSON lines so stdout stays free for reports.

/// Initialize process-wide observability (tracing/logging).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filters, layers).
pub mod tracing;
