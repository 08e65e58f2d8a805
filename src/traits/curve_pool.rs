//! Core pool trait: the caller-facing operation surface.

use super::{CustodyLedger, FeeGovernor};
use crate::domain::{Address, Amount, AssetPair, Liquidity, Shares};
use crate::error::Result;

/// Everything an operation needs from the outside world, captured once
/// at entry: the custody ledger, the fee governor, and the current
/// timestamp.
///
/// Bundling the collaborators keeps operation signatures uniform and
/// makes the single-snapshot rule explicit — an operation never
/// re-reads time or governance mid-flight.
#[derive(Debug)]
pub struct OpContext<'a, V: CustodyLedger, G: FeeGovernor> {
    /// The shared custody ledger.
    pub vault: &'a mut V,
    /// The governance parameter source.
    pub governor: &'a G,
    /// The current timestamp, in seconds. Drives time-weighted price
    /// accumulation; operations at the same timestamp accumulate once.
    pub now: u64,
}

impl<'a, V: CustodyLedger, G: FeeGovernor> OpContext<'a, V, G> {
    /// Creates a new operation context.
    pub fn new(vault: &'a mut V, governor: &'a G, now: u64) -> Self {
        Self {
            vault,
            governor,
            now,
        }
    }
}

/// One side of a burn payout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Withdrawal {
    /// The asset paid out.
    pub asset: Address,
    /// The payout, in custody-ledger shares.
    pub shares: Shares,
}

/// A read-only view of a pool's reserve state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReserveSnapshot {
    /// Stored reserve of the first (lower-address) asset, in shares.
    pub reserve_a: Shares,
    /// Stored reserve of the second asset, in shares.
    pub reserve_b: Shares,
    /// Timestamp of the last accumulator update; zero when
    /// time-weighted accumulation is disabled.
    pub last_sync: u64,
}

/// The three state-changing entry points plus read-only queries that
/// every curve implementation provides.
///
/// Each mutating operation is a single atomic transition: it reads the
/// custody balances once at entry, runs all fallible computation, and
/// only then commits reserves, accumulators, and liquidity supply.
/// Nested invocation against the same pool is rejected with
/// [`AmmError::Reentrancy`](crate::error::AmmError).
pub trait CurvePool {
    /// Returns the pool's own ledger address.
    fn pool_address(&self) -> Address;

    /// Returns the pool's asset pair.
    fn assets(&self) -> &AssetPair;

    /// Mints liquidity for share deposits already sitting in the
    /// pool's ledger balance.
    ///
    /// Deposited amounts are inferred as balance minus stored reserve.
    /// The first mint seeds the pool and permanently locks the minimum
    /// liquidity at the burn address; later mints credit the smaller of
    /// the two proportional ratios, protecting existing holders from
    /// imbalanced deposits.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidInput`](crate::error::AmmError) if the
    ///   first deposit is missing one side.
    /// - [`AmmError::InsufficientLiquidityMinted`](crate::error::AmmError)
    ///   if the computed liquidity is zero.
    fn mint<V: CustodyLedger, G: FeeGovernor>(
        &mut self,
        ctx: &mut OpContext<'_, V, G>,
        recipient: Address,
    ) -> Result<Liquidity>;

    /// Burns the liquidity tokens held by the pool's own address
    /// (pre-transferred by the caller) and pays out the proportional
    /// share of both reserves.
    ///
    /// With `unwrap` set, payouts leave the custody ledger as native
    /// tokens; otherwise they move as ledger shares.
    fn burn<V: CustodyLedger, G: FeeGovernor>(
        &mut self,
        ctx: &mut OpContext<'_, V, G>,
        recipient: Address,
        unwrap: bool,
    ) -> Result<[Withdrawal; 2]>;

    /// Swaps the inferred input (balance minus reserve of `asset_in`)
    /// for the curve-determined output, which is transferred to
    /// `recipient`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Uninitialized`](crate::error::AmmError) if the
    ///   pool has no liquidity.
    /// - [`AmmError::InvalidInput`](crate::error::AmmError) if
    ///   `asset_in` is not part of the pool pair.
    /// - [`AmmError::InsufficientOutput`](crate::error::AmmError) if
    ///   the computed output is zero.
    fn swap<V: CustodyLedger, G: FeeGovernor>(
        &mut self,
        ctx: &mut OpContext<'_, V, G>,
        asset_in: Address,
        recipient: Address,
        unwrap: bool,
    ) -> Result<Shares>;

    /// Quotes the output for a hypothetical input without touching
    /// state. Quoting then swapping the same input with no intervening
    /// operation yields the identical output.
    fn get_amount_out(&self, asset_in: Address, amount_in: Shares) -> Result<Shares>;

    /// Returns stored reserves and the last accumulator timestamp.
    fn reserves(&self) -> ReserveSnapshot;

    /// Returns the reserves converted from ledger shares to native
    /// token amounts at the ledger's current rate.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`](crate::error::AmmError) if a
    /// conversion exceeds the representable range.
    fn native_reserves<V: CustodyLedger>(&self, vault: &V) -> Result<(Amount, Amount)>;
}
