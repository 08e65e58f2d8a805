//! Liquidity-token supply and balance ledger.

use std::collections::BTreeMap;

use crate::domain::{Address, Liquidity};
use crate::error::{AmmError, Result};

/// The fungible liquidity-token ledger owned by a single pool.
///
/// Tracks total outstanding supply and per-address balances. The burn
/// protocol relies on transferability: a caller moves liquidity tokens
/// to the pool's own address, then invokes burn, which consumes
/// whatever the pool holds.
///
/// Supply invariant: `total == Σ balances`, maintained because mint and
/// burn are the only entry points that touch both sides.
#[derive(Debug, Clone, Default)]
pub struct LpLedger {
    total: Liquidity,
    balances: BTreeMap<Address, Liquidity>,
}

impl LpLedger {
    /// Creates an empty ledger (uninitialised pool: zero supply).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total outstanding supply.
    #[must_use]
    pub const fn total_supply(&self) -> Liquidity {
        self.total
    }

    /// Returns the balance held by `owner`.
    #[must_use]
    pub fn balance_of(&self, owner: Address) -> Liquidity {
        self.balances.get(&owner).copied().unwrap_or(Liquidity::ZERO)
    }

    /// Mints `liquidity` to `to`, growing the supply.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if supply or balance would
    /// overflow.
    pub fn mint(&mut self, to: Address, liquidity: Liquidity) -> Result<()> {
        if liquidity.is_zero() {
            return Ok(());
        }
        let new_total = self
            .total
            .checked_add(&liquidity)
            .ok_or(AmmError::Overflow("liquidity supply"))?;
        let balance = self.balances.entry(to).or_insert(Liquidity::ZERO);
        *balance = balance
            .checked_add(&liquidity)
            .ok_or(AmmError::Overflow("liquidity balance"))?;
        self.total = new_total;
        Ok(())
    }

    /// Burns `liquidity` from `from`, shrinking the supply.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientBalance`] if `from` holds less
    /// than `liquidity`.
    pub fn burn(&mut self, from: Address, liquidity: Liquidity) -> Result<()> {
        if liquidity.is_zero() {
            return Ok(());
        }
        let balance = self
            .balances
            .get_mut(&from)
            .ok_or(AmmError::InsufficientBalance("no liquidity balance"))?;
        *balance = balance
            .checked_sub(&liquidity)
            .ok_or(AmmError::InsufficientBalance("liquidity burn"))?;
        // Supply cannot underflow if balances never exceed it.
        self.total = self
            .total
            .checked_sub(&liquidity)
            .ok_or(AmmError::Underflow("liquidity supply"))?;
        Ok(())
    }

    /// Moves `liquidity` between holders without changing supply.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientBalance`] if `from` holds less
    /// than `liquidity`.
    pub fn transfer(&mut self, from: Address, to: Address, liquidity: Liquidity) -> Result<()> {
        if liquidity.is_zero() {
            return Ok(());
        }
        let from_balance = self
            .balances
            .get_mut(&from)
            .ok_or(AmmError::InsufficientBalance("no liquidity balance"))?;
        *from_balance = from_balance
            .checked_sub(&liquidity)
            .ok_or(AmmError::InsufficientBalance("liquidity transfer"))?;
        let to_balance = self.balances.entry(to).or_insert(Liquidity::ZERO);
        *to_balance = to_balance
            .checked_add(&liquidity)
            .ok_or(AmmError::Overflow("liquidity balance"))?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn alice() -> Address {
        Address::from_bytes([0xaa; 32])
    }

    fn bob() -> Address {
        Address::from_bytes([0xbb; 32])
    }

    #[test]
    fn starts_empty() {
        let ledger = LpLedger::new();
        assert!(ledger.total_supply().is_zero());
        assert!(ledger.balance_of(alice()).is_zero());
    }

    #[test]
    fn mint_grows_supply_and_balance() {
        let mut ledger = LpLedger::new();
        let Ok(()) = ledger.mint(alice(), Liquidity::new(9_000)) else {
            panic!("expected Ok");
        };
        assert_eq!(ledger.total_supply(), Liquidity::new(9_000));
        assert_eq!(ledger.balance_of(alice()), Liquidity::new(9_000));
    }

    #[test]
    fn zero_mint_is_noop() {
        let mut ledger = LpLedger::new();
        let Ok(()) = ledger.mint(alice(), Liquidity::ZERO) else {
            panic!("expected Ok");
        };
        assert!(ledger.total_supply().is_zero());
    }

    #[test]
    fn burn_shrinks_both_sides() {
        let mut ledger = LpLedger::new();
        let Ok(()) = ledger.mint(alice(), Liquidity::new(1_000)) else {
            panic!("expected Ok");
        };
        let Ok(()) = ledger.burn(alice(), Liquidity::new(400)) else {
            panic!("expected Ok");
        };
        assert_eq!(ledger.total_supply(), Liquidity::new(600));
        assert_eq!(ledger.balance_of(alice()), Liquidity::new(600));
    }

    #[test]
    fn burn_more_than_balance_rejected() {
        let mut ledger = LpLedger::new();
        let Ok(()) = ledger.mint(alice(), Liquidity::new(100)) else {
            panic!("expected Ok");
        };
        assert!(matches!(
            ledger.burn(alice(), Liquidity::new(101)),
            Err(AmmError::InsufficientBalance(_))
        ));
        assert_eq!(ledger.total_supply(), Liquidity::new(100));
    }

    #[test]
    fn burn_unknown_holder_rejected() {
        let mut ledger = LpLedger::new();
        assert!(ledger.burn(bob(), Liquidity::new(1)).is_err());
    }

    #[test]
    fn transfer_preserves_supply() {
        let mut ledger = LpLedger::new();
        let Ok(()) = ledger.mint(alice(), Liquidity::new(1_000)) else {
            panic!("expected Ok");
        };
        let Ok(()) = ledger.transfer(alice(), bob(), Liquidity::new(300)) else {
            panic!("expected Ok");
        };
        assert_eq!(ledger.total_supply(), Liquidity::new(1_000));
        assert_eq!(ledger.balance_of(alice()), Liquidity::new(700));
        assert_eq!(ledger.balance_of(bob()), Liquidity::new(300));
    }

    #[test]
    fn transfer_insufficient_rejected() {
        let mut ledger = LpLedger::new();
        let Ok(()) = ledger.mint(alice(), Liquidity::new(100)) else {
            panic!("expected Ok");
        };
        assert!(ledger.transfer(alice(), bob(), Liquidity::new(200)).is_err());
        assert_eq!(ledger.balance_of(alice()), Liquidity::new(100));
    }

    #[test]
    fn multiple_holders_sum_to_supply() {
        let mut ledger = LpLedger::new();
        let Ok(()) = ledger.mint(alice(), Liquidity::new(600)) else {
            panic!("expected Ok");
        };
        let Ok(()) = ledger.mint(bob(), Liquidity::new(400)) else {
            panic!("expected Ok");
        };
        let sum = ledger.balance_of(alice()).get() + ledger.balance_of(bob()).get();
        assert_eq!(sum, ledger.total_supply().get());
    }
}
