//! Basis-point fee rates.

use core::fmt;

use super::{Rounding, Shares};
use crate::error::{AmmError, Result};

/// The basis-point denominator: 10 000 bps = 100%.
pub const MAX_FEE: u32 = 10_000;

/// A fee rate expressed in basis points (1 bp = 0.01%).
///
/// Swap fees are fixed at pool creation and must not exceed
/// [`MAX_FEE`]; protocol fees are pulled from governance per operation
/// and validated the same way.
///
/// # Examples
///
/// ```
/// use tidepool::domain::{Bps, Rounding, Shares};
///
/// let fee = Bps::new(30); // 0.30%
/// let cut = fee.apply(Shares::new(10_000), Rounding::Down).unwrap();
/// assert_eq!(cut, Shares::new(30));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Bps(u32);

impl Bps {
    /// Zero basis points (0%).
    pub const ZERO: Self = Self(0);

    /// 100% expressed in basis points.
    pub const MAX: Self = Self(MAX_FEE);

    /// Creates a new `Bps` from a raw `u32` value.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the underlying `u32` value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns `true` if the rate is a valid fee (`0..=10_000`).
    #[must_use]
    pub const fn is_valid_fee(&self) -> bool {
        self.0 <= MAX_FEE
    }

    /// Returns `MAX_FEE - self`, the trader-retained portion of a fee.
    ///
    /// Only meaningful for valid fees; saturates at zero otherwise.
    #[must_use]
    pub const fn complement(&self) -> u32 {
        MAX_FEE.saturating_sub(self.0)
    }

    /// Computes `quantity * self / 10_000` with explicit rounding.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the intermediate multiplication
    /// overflows `u128`.
    pub const fn apply(&self, quantity: Shares, rounding: Rounding) -> Result<Shares> {
        let bps = self.0 as u128;
        let product = match quantity.get().checked_mul(bps) {
            Some(v) => v,
            None => return Err(AmmError::Overflow("bps apply overflow")),
        };
        let divisor = MAX_FEE as u128;
        let q = product / divisor;
        let r = product % divisor;
        match rounding {
            Rounding::Down => Ok(Shares::new(q)),
            Rounding::Up => {
                if r != 0 {
                    Ok(Shares::new(q + 1))
                } else {
                    Ok(Shares::new(q))
                }
            }
        }
    }
}

impl fmt::Display for Bps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}
