//! Asset identity.

use super::{Address, Decimals};

/// The identity of one pooled asset: its ledger address and the decimal
/// precision it is denominated in.
///
/// Decimals are fixed at pool creation. Two assets are equal only if
/// both address and decimals match.
///
/// # Examples
///
/// ```
/// use tidepool::domain::{Address, Asset, Decimals};
///
/// let usd = Asset::new(
///     Address::from_bytes([1u8; 32]),
///     Decimals::new(6).expect("valid"),
/// );
/// assert_eq!(usd.decimals().get(), 6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Asset {
    address: Address,
    decimals: Decimals,
}

impl Asset {
    /// Creates a new `Asset`.
    ///
    /// Infallible: both components are validated at their own
    /// construction sites. Zero-address rejection happens at
    /// [`AssetPair`](super::AssetPair) construction.
    #[must_use]
    pub const fn new(address: Address, decimals: Decimals) -> Self {
        Self { address, decimals }
    }

    /// Returns the asset's ledger address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Returns the asset's decimal precision.
    #[must_use]
    pub const fn decimals(&self) -> Decimals {
        self.decimals
    }
}
