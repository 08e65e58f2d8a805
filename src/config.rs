//! Pool configuration.

use crate::domain::{AssetPair, Bps};
use crate::error::{AmmError, Result};

/// The immutable parameters a pool is created with.
///
/// Asset validation (distinct, non-zero addresses) happens at
/// [`AssetPair`] construction; the remaining creation-time checks live
/// in [`PoolConfig::validate`]. The swap fee is fixed for the pool's
/// lifetime — only the protocol's cut of it is governance-mutable.
///
/// # Examples
///
/// ```
/// use tidepool::config::PoolConfig;
/// use tidepool::domain::{Address, Asset, AssetPair, Bps, Decimals};
///
/// let a = Asset::new(Address::from_bytes([1u8; 32]), Decimals::new(6).expect("valid"));
/// let b = Asset::new(Address::from_bytes([2u8; 32]), Decimals::new(18).expect("valid"));
/// let pair = AssetPair::new(a, b).expect("distinct");
///
/// let config = PoolConfig::new(pair, Bps::new(30), true).expect("valid");
/// assert_eq!(config.swap_fee(), Bps::new(30));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    assets: AssetPair,
    swap_fee: Bps,
    track_time_weighted_prices: bool,
}

impl PoolConfig {
    /// Creates a new `PoolConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if the swap fee
    /// exceeds 100%.
    pub fn new(assets: AssetPair, swap_fee: Bps, track_time_weighted_prices: bool) -> Result<Self> {
        let config = Self {
            assets,
            swap_fee,
            track_time_weighted_prices,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if the swap fee
    /// exceeds 100%.
    pub fn validate(&self) -> Result<()> {
        if !self.swap_fee.is_valid_fee() {
            return Err(AmmError::InvalidConfiguration("swap fee exceeds maximum"));
        }
        Ok(())
    }

    /// Returns the asset pair.
    #[must_use]
    pub const fn assets(&self) -> &AssetPair {
        &self.assets
    }

    /// Returns the swap fee.
    #[must_use]
    pub const fn swap_fee(&self) -> Bps {
        self.swap_fee
    }

    /// Returns whether the pool maintains time-weighted price
    /// accumulators.
    #[must_use]
    pub const fn track_time_weighted_prices(&self) -> bool {
        self.track_time_weighted_prices
    }
}
