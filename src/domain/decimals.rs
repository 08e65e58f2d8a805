//! Asset decimal places.

use crate::error::{AmmError, Result};

/// Maximum supported decimal places.
const MAX_DECIMALS: u8 = 18;

/// The number of decimal places an asset is denominated in.
///
/// Valid range is `0..=18`. The stable-swap curve uses this to
/// normalise raw reserves into its 18-decimal working precision; the
/// constant-product curve ignores it and operates on shares directly.
///
/// # Examples
///
/// ```
/// use tidepool::domain::Decimals;
///
/// let d = Decimals::new(6).expect("6 is valid");
/// assert_eq!(d.factor(), 1_000_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Decimals(u8);

impl Default for Decimals {
    fn default() -> Self {
        Self(0)
    }
}

impl Decimals {
    /// Maximum standard decimal places (18).
    pub const MAX: Self = Self(MAX_DECIMALS);

    /// Creates a new `Decimals` value after validating the range.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidPrecision`] if `value` exceeds 18.
    pub const fn new(value: u8) -> Result<Self> {
        if value > MAX_DECIMALS {
            return Err(AmmError::InvalidPrecision("decimals must be 0..=18"));
        }
        Ok(Self(value))
    }

    /// Returns the raw decimal count.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Returns `10^decimals` as `u128`.
    ///
    /// This is the divisor used when normalising a raw quantity to the
    /// 18-decimal working precision: `wad = raw * 1e18 / factor`.
    #[must_use]
    pub const fn factor(&self) -> u128 {
        10u128.pow(self.0 as u32)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn valid_range_accepted() {
        for v in 0..=18u8 {
            assert!(Decimals::new(v).is_ok(), "decimals {v} should be valid");
        }
    }

    #[test]
    fn out_of_range_rejected() {
        assert!(matches!(
            Decimals::new(19),
            Err(AmmError::InvalidPrecision(_))
        ));
        assert!(Decimals::new(u8::MAX).is_err());
    }

    #[test]
    fn factor_values() {
        let Ok(d0) = Decimals::new(0) else {
            panic!("valid");
        };
        let Ok(d6) = Decimals::new(6) else {
            panic!("valid");
        };
        let Ok(d18) = Decimals::new(18) else {
            panic!("valid");
        };
        assert_eq!(d0.factor(), 1);
        assert_eq!(d6.factor(), 1_000_000);
        assert_eq!(d18.factor(), 1_000_000_000_000_000_000);
    }

    #[test]
    fn default_is_zero() {
        assert_eq!(Decimals::default().get(), 0);
    }

    #[test]
    fn max_constant() {
        assert_eq!(Decimals::MAX.get(), 18);
    }
}
