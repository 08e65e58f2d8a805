//! Ordered pair of distinct pooled assets.

use super::{Address, Asset};
use crate::error::{AmmError, Result};

/// An ordered pair of distinct assets, canonically sorted by address.
///
/// The canonical ordering guarantees `first().address() <
/// second().address()`, so a pair constructed from `(A, B)` and one
/// from `(B, A)` are identical. Zero addresses and identical addresses
/// are rejected at construction, which is where the engine enforces the
/// creation-time half of its configuration validation.
///
/// # Examples
///
/// ```
/// use tidepool::domain::{Address, Asset, AssetPair, Decimals};
///
/// let a = Asset::new(Address::from_bytes([1u8; 32]), Decimals::new(6).expect("valid"));
/// let b = Asset::new(Address::from_bytes([2u8; 32]), Decimals::new(18).expect("valid"));
///
/// let pair = AssetPair::new(b, a).expect("distinct assets");
/// assert_eq!(pair.first(), a); // sorted regardless of argument order
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetPair {
    asset_a: Asset,
    asset_b: Asset,
}

impl AssetPair {
    /// Creates a new canonically-ordered `AssetPair`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if either address is
    /// zero or both assets share the same address.
    pub fn new(asset_1: Asset, asset_2: Asset) -> Result<Self> {
        if asset_1.address().is_zero() || asset_2.address().is_zero() {
            return Err(AmmError::InvalidConfiguration(
                "asset address must be non-zero",
            ));
        }
        if asset_1.address() == asset_2.address() {
            return Err(AmmError::InvalidConfiguration(
                "pool assets must be distinct",
            ));
        }

        let (asset_a, asset_b) = if asset_1.address() < asset_2.address() {
            (asset_1, asset_2)
        } else {
            (asset_2, asset_1)
        };

        Ok(Self { asset_a, asset_b })
    }

    /// Returns the first asset (lower address).
    #[must_use]
    pub const fn first(&self) -> Asset {
        self.asset_a
    }

    /// Returns the second asset (higher address).
    #[must_use]
    pub const fn second(&self) -> Asset {
        self.asset_b
    }

    /// Returns `true` if `address` identifies one of the pair's assets.
    #[must_use]
    pub fn contains(&self, address: Address) -> bool {
        self.asset_a.address() == address || self.asset_b.address() == address
    }

    /// Returns the counterpart of the asset identified by `address`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidInput`] if `address` is not in the
    /// pair.
    pub fn other(&self, address: Address) -> Result<Asset> {
        if self.asset_a.address() == address {
            Ok(self.asset_b)
        } else if self.asset_b.address() == address {
            Ok(self.asset_a)
        } else {
            Err(AmmError::InvalidInput("asset is not part of this pool"))
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::Decimals;

    fn asset(byte: u8, dec: u8) -> Asset {
        let Ok(d) = Decimals::new(dec) else {
            panic!("valid decimals");
        };
        Asset::new(Address::from_bytes([byte; 32]), d)
    }

    #[test]
    fn sorts_canonically() {
        let lo = asset(1, 6);
        let hi = asset(2, 18);
        let Ok(pair) = AssetPair::new(hi, lo) else {
            panic!("expected Ok");
        };
        assert_eq!(pair.first(), lo);
        assert_eq!(pair.second(), hi);
    }

    #[test]
    fn same_order_same_pair() {
        let lo = asset(1, 6);
        let hi = asset(2, 18);
        let Ok(p1) = AssetPair::new(lo, hi) else {
            panic!("expected Ok");
        };
        let Ok(p2) = AssetPair::new(hi, lo) else {
            panic!("expected Ok");
        };
        assert_eq!(p1, p2);
    }

    #[test]
    fn identical_assets_rejected() {
        let a = asset(1, 6);
        assert!(matches!(
            AssetPair::new(a, a),
            Err(AmmError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn zero_address_rejected() {
        let Ok(d) = Decimals::new(6) else {
            panic!("valid decimals");
        };
        let zero = Asset::new(Address::ZERO, d);
        let other = asset(2, 18);
        assert!(matches!(
            AssetPair::new(zero, other),
            Err(AmmError::InvalidConfiguration(_))
        ));
        assert!(AssetPair::new(other, zero).is_err());
    }

    #[test]
    fn contains_and_other() {
        let lo = asset(1, 6);
        let hi = asset(2, 18);
        let Ok(pair) = AssetPair::new(lo, hi) else {
            panic!("expected Ok");
        };
        assert!(pair.contains(lo.address()));
        assert!(pair.contains(hi.address()));
        assert!(!pair.contains(Address::from_bytes([9u8; 32])));

        let Ok(counterpart) = pair.other(lo.address()) else {
            panic!("expected Ok");
        };
        assert_eq!(counterpart, hi);
        assert!(matches!(
            pair.other(Address::from_bytes([9u8; 32])),
            Err(AmmError::InvalidInput(_))
        ));
    }
}
