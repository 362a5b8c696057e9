//! `stockledger-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no IO, no storage).

pub mod error;
pub mod quantity;

pub use error::{DomainError, DomainResult};
pub use quantity::Quantity;
