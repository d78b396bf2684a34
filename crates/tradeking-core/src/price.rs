//! Fixed-point price representation.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::fmt;

/// A price carried as a signed count of milli-dollars.
///
/// Option symbols encode strikes as zero-padded milli-dollar integers, so
/// prices stay integral internally and convert to [`Decimal`] at the edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(i64);

impl Price {
    /// Milli-dollars per dollar.
    pub const BASE: i64 = 1_000;

    /// Wrap a raw milli-dollar count.
    pub fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Encode a decimal dollar amount, truncating below a milli-dollar.
    ///
    /// Returns `None` when the value does not fit in an `i64`.
    pub fn from_decimal(value: Decimal) -> Option<Self> {
        (value * Decimal::from(Self::BASE)).trunc().to_i64().map(Self)
    }

    /// The raw milli-dollar count.
    pub fn millis(&self) -> i64 {
        self.0
    }

    /// Decode back to a decimal dollar amount.
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 3)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal().normalize())
    }
}
