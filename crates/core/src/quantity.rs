//! Stock quantities.
//!
//! Quantities are numeric and may be fractional. Whole numbers stay whole
//! through arithmetic so that a file written with `10` is read back and
//! re-written as `10`, not `10.0`.

use core::cmp::Ordering;
use core::ops::{Add, Sub};

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::{DomainError, DomainResult};

/// A stock quantity: either a whole count or a fractional amount.
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Whole(i64),
    Fractional(f64),
}

impl Quantity {
    pub const ZERO: Quantity = Quantity::Whole(0);

    /// Interpret a dynamically typed value as a quantity.
    ///
    /// Only JSON numbers qualify; strings, booleans and containers yield `None`.
    pub fn from_json(value: &JsonValue) -> Option<Self> {
        let JsonValue::Number(number) = value else {
            return None;
        };
        if let Some(whole) = number.as_i64() {
            return Some(Quantity::Whole(whole));
        }
        number.as_f64().map(Quantity::Fractional)
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Quantity::Whole(n) => n as f64,
            Quantity::Fractional(x) => x,
        }
    }

    pub fn is_finite(self) -> bool {
        match self {
            Quantity::Whole(_) => true,
            Quantity::Fractional(x) => x.is_finite(),
        }
    }

    /// `true` once a quantity no longer represents any stock on hand.
    pub fn is_depleted(self) -> bool {
        self <= Quantity::ZERO
    }

    /// Reject NaN and infinities.
    pub fn ensure_finite(self) -> DomainResult<Self> {
        if self.is_finite() {
            Ok(self)
        } else {
            Err(DomainError::validation(format!(
                "quantity must be finite (got {self})"
            )))
        }
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Quantity::ZERO
    }
}

impl From<i64> for Quantity {
    fn from(value: i64) -> Self {
        Quantity::Whole(value)
    }
}

impl From<i32> for Quantity {
    fn from(value: i32) -> Self {
        Quantity::Whole(i64::from(value))
    }
}

impl From<f64> for Quantity {
    fn from(value: f64) -> Self {
        Quantity::Fractional(value)
    }
}

impl Add for Quantity {
    type Output = Quantity;

    fn add(self, rhs: Quantity) -> Quantity {
        match (self, rhs) {
            (Quantity::Whole(a), Quantity::Whole(b)) => match a.checked_add(b) {
                Some(sum) => Quantity::Whole(sum),
                None => Quantity::Fractional(a as f64 + b as f64),
            },
            (a, b) => Quantity::Fractional(a.as_f64() + b.as_f64()),
        }
    }
}

impl Sub for Quantity {
    type Output = Quantity;

    fn sub(self, rhs: Quantity) -> Quantity {
        match (self, rhs) {
            (Quantity::Whole(a), Quantity::Whole(b)) => match a.checked_sub(b) {
                Some(diff) => Quantity::Whole(diff),
                None => Quantity::Fractional(a as f64 - b as f64),
            },
            (a, b) => Quantity::Fractional(a.as_f64() - b.as_f64()),
        }
    }
}

// Compared by numeric value: `Whole(7) == Fractional(7.0)`.
impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Quantity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (*self, *other) {
            (Quantity::Whole(a), Quantity::Whole(b)) => Some(a.cmp(&b)),
            (Quantity::Fractional(a), Quantity::Fractional(b)) => a.partial_cmp(&b),
            (Quantity::Whole(a), Quantity::Fractional(b)) => cmp_whole_fractional(a, b),
            (Quantity::Fractional(a), Quantity::Whole(b)) => {
                cmp_whole_fractional(b, a).map(Ordering::reverse)
            }
        }
    }
}

/// 2^63, the first float above every `i64`.
const I64_END: f64 = 9_223_372_036_854_775_808.0;

/// Exact `i64` vs `f64` ordering; `a as f64` rounds above 2^53.
fn cmp_whole_fractional(a: i64, b: f64) -> Option<Ordering> {
    if b.is_nan() {
        return None;
    }
    if b >= I64_END {
        return Some(Ordering::Less);
    }
    if b < -I64_END {
        return Some(Ordering::Greater);
    }

    // `b` is inside the i64 range, so its integral part converts exactly and
    // `b - trunc` is exact.
    let whole = b.trunc();
    match a.cmp(&(whole as i64)) {
        Ordering::Equal => 0.0_f64.partial_cmp(&(b - whole)),
        ord => Some(ord),
    }
}

impl core::fmt::Display for Quantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Quantity::Whole(n) => write!(f, "{n}"),
            // Debug keeps the trailing `.0` on integral floats.
            Quantity::Fractional(x) => write!(f, "{x:?}"),
        }
    }
}
