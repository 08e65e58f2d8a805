//! Custody ledger collaborator boundary.

use crate::domain::{Address, Amount, Rounding, Shares};
use crate::error::Result;

/// The external balance store that custodies every pool's assets.
///
/// The ledger tracks per-`(asset, owner)` balances in its own *share*
/// unit; shares may appreciate against native token amounts through
/// pooled-yield accounting, so the conversion is the ledger's to
/// define. Pools read their own balances at the start of each
/// operation, treat the snapshot as consistent for the rest of the
/// operation, and only ever move entries for their own two assets and
/// their own address.
///
/// Implementations must be deterministic: the engine assumes one
/// operation completes fully before the next begins, with no
/// interleaving mutation of ledger state.
pub trait CustodyLedger {
    /// Returns the share balance the ledger holds for `owner` in
    /// `asset`.
    fn balance_of(&self, asset: Address, owner: Address) -> Shares;

    /// Moves `shares` of `asset` from `from` to `to` inside the
    /// ledger, without unwrapping to native tokens.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientBalance`](crate::error::AmmError)
    /// if `from` does not hold `shares`.
    fn transfer(&mut self, asset: Address, from: Address, to: Address, shares: Shares)
        -> Result<()>;

    /// Burns `shares` of `asset` from `from` and releases the
    /// corresponding native amount to `to` outside the ledger.
    ///
    /// Returns the `(amount, shares)` actually withdrawn.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientBalance`](crate::error::AmmError)
    /// if `from` does not hold `shares`.
    fn withdraw(
        &mut self,
        asset: Address,
        from: Address,
        to: Address,
        shares: Shares,
    ) -> Result<(Amount, Shares)>;

    /// Converts `shares` of `asset` to a native token amount at the
    /// ledger's current rate, with the given rounding direction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`](crate::error::AmmError) if the
    /// amount exceeds the representable range.
    fn to_amount(&self, asset: Address, shares: Shares, rounding: Rounding) -> Result<Amount>;
}
