//! Reserve and price-accumulator manager.

use ethereum_types::U256;
use tracing::debug;

use crate::domain::Shares;
use crate::error::{AmmError, Result};
use crate::math::WAD_U256;
use crate::traits::ReserveSnapshot;

/// Upper bound on a stored reserve, in shares.
///
/// Balances observed above this are rejected as fatal overflow rather
/// than silently wrapped; the bound also keeps the product of two
/// reserves comfortably inside 256 bits for invariant math.
pub const MAX_RESERVE: u128 = (1 << 112) - 1;

/// Stored reserves plus time-weighted price accumulators.
///
/// Reserves mirror the custody balances observed at the end of the
/// last completed operation. When time-weighted tracking is enabled,
/// each sync that crosses into a new timestamp first advances both
/// accumulators by the price that was in effect during the elapsed
/// interval — computed from the *pre-update* reserves — and only then
/// overwrites the reserves.
///
/// Accumulators are 256-bit, WAD-scaled, monotonically non-decreasing
/// modulo wrap-around; consumers derive average prices from differences
/// between observations, so wrapping is harmless by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReserveState {
    reserve_a: Shares,
    reserve_b: Shares,
    price_a_cumulative: U256,
    price_b_cumulative: U256,
    last_sync: u64,
    twap: bool,
}

impl ReserveState {
    /// Creates an empty reserve state.
    ///
    /// With `twap` disabled, `last_sync` stays zero forever — the
    /// signal that this pool instance never accumulates.
    #[must_use]
    pub fn new(twap: bool) -> Self {
        Self {
            reserve_a: Shares::ZERO,
            reserve_b: Shares::ZERO,
            price_a_cumulative: U256::zero(),
            price_b_cumulative: U256::zero(),
            last_sync: 0,
            twap,
        }
    }

    /// Returns the stored reserve of the first asset.
    #[must_use]
    pub const fn reserve_a(&self) -> Shares {
        self.reserve_a
    }

    /// Returns the stored reserve of the second asset.
    #[must_use]
    pub const fn reserve_b(&self) -> Shares {
        self.reserve_b
    }

    /// Returns the timestamp of the last accumulator update (zero when
    /// accumulation is disabled or has not started).
    #[must_use]
    pub const fn last_sync(&self) -> u64 {
        self.last_sync
    }

    /// Returns the cumulative WAD-scaled price of asset A in asset B.
    #[must_use]
    pub const fn price_a_cumulative(&self) -> U256 {
        self.price_a_cumulative
    }

    /// Returns the cumulative WAD-scaled price of asset B in asset A.
    #[must_use]
    pub const fn price_b_cumulative(&self) -> U256 {
        self.price_b_cumulative
    }

    /// Returns a read-only snapshot of reserves and sync timestamp.
    #[must_use]
    pub const fn snapshot(&self) -> ReserveSnapshot {
        ReserveSnapshot {
            reserve_a: self.reserve_a,
            reserve_b: self.reserve_b,
            last_sync: self.last_sync,
        }
    }

    /// Reconciles stored reserves against observed custody balances.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if either balance exceeds
    /// [`MAX_RESERVE`]. Nothing is mutated on error.
    pub fn sync(&mut self, balance_a: Shares, balance_b: Shares, now: u64) -> Result<()> {
        if balance_a.get() > MAX_RESERVE || balance_b.get() > MAX_RESERVE {
            return Err(AmmError::Overflow("reserve exceeds representable range"));
        }

        if self.twap {
            if self.last_sync != 0
                && now > self.last_sync
                && !self.reserve_a.is_zero()
                && !self.reserve_b.is_zero()
            {
                let elapsed = U256::from(now - self.last_sync);
                // Price during the elapsed interval comes from the
                // pre-update reserves.
                let price_a =
                    U256::from(self.reserve_b.get()) * WAD_U256 / U256::from(self.reserve_a.get());
                let price_b =
                    U256::from(self.reserve_a.get()) * WAD_U256 / U256::from(self.reserve_b.get());
                let (acc_a, _) = self.price_a_cumulative.overflowing_add(price_a * elapsed);
                let (acc_b, _) = self.price_b_cumulative.overflowing_add(price_b * elapsed);
                self.price_a_cumulative = acc_a;
                self.price_b_cumulative = acc_b;
            }
            self.last_sync = now;
        }

        self.reserve_a = balance_a;
        self.reserve_b = balance_b;
        debug!(reserve_a = %balance_a, reserve_b = %balance_b, timestamp = now, "reserves synced");
        Ok(())
    }
}
