//! In-memory custody ledger.
//!
//! [`MemoryVault`] is a reference [`CustodyLedger`] used by the test
//! suite and by embedders without their own balance store. It models
//! the elastic share accounting the engine is written against: each
//! asset has a total native amount and a total share count, and the
//! amount-per-share rate drifts upward when yield is donated to the
//! pot.

use std::collections::BTreeMap;

use ethereum_types::U256;

use crate::domain::{Address, Amount, Rounding, Shares};
use crate::error::{AmmError, Result};
use crate::math::{mul_div, to_u128};
use crate::traits::CustodyLedger;

/// Per-asset elastic totals: the native amount backing the pot and the
/// shares issued against it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Totals {
    amount: u128,
    shares: u128,
}

/// An in-memory share-accounting balance store.
///
/// Shares convert to amounts at `amount_total / share_total` per asset;
/// a fresh asset converts 1:1. [`MemoryVault::donate`] adds native
/// amount without minting shares, which is how pooled yield makes a
/// share worth more than one token unit.
///
/// # Examples
///
/// ```
/// use tidepool::domain::{Address, Amount, Rounding, Shares};
/// use tidepool::traits::CustodyLedger;
/// use tidepool::vault::MemoryVault;
///
/// let asset = Address::from_bytes([1u8; 32]);
/// let owner = Address::from_bytes([9u8; 32]);
///
/// let mut vault = MemoryVault::new();
/// let minted = vault.deposit(asset, owner, Amount::new(1_000)).unwrap();
/// assert_eq!(minted, Shares::new(1_000));
/// assert_eq!(vault.balance_of(asset, owner), minted);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryVault {
    totals: BTreeMap<Address, Totals>,
    balances: BTreeMap<(Address, Address), u128>,
}

impl MemoryVault {
    /// Creates an empty vault.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deposits a native `amount` of `asset`, crediting `to` with the
    /// corresponding shares at the current rate.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if totals would exceed the
    /// representable range.
    pub fn deposit(&mut self, asset: Address, to: Address, amount: Amount) -> Result<Shares> {
        let totals = self.totals.entry(asset).or_default();
        let minted = if totals.shares == 0 {
            amount.get()
        } else {
            to_u128(mul_div(
                U256::from(amount.get()),
                U256::from(totals.shares),
                U256::from(totals.amount),
            )?)?
        };

        totals.amount = totals
            .amount
            .checked_add(amount.get())
            .ok_or(AmmError::Overflow("vault amount total"))?;
        totals.shares = totals
            .shares
            .checked_add(minted)
            .ok_or(AmmError::Overflow("vault share total"))?;

        let balance = self.balances.entry((asset, to)).or_insert(0);
        *balance = balance
            .checked_add(minted)
            .ok_or(AmmError::Overflow("vault balance"))?;

        Ok(Shares::new(minted))
    }

    /// Adds native `amount` to the asset's pot without minting shares,
    /// raising the amount-per-share rate. Simulates yield accrual.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidInput`] if the asset has no shares
    /// outstanding, or [`AmmError::Overflow`] on total overflow.
    pub fn donate(&mut self, asset: Address, amount: Amount) -> Result<()> {
        let totals = self
            .totals
            .get_mut(&asset)
            .filter(|t| t.shares > 0)
            .ok_or(AmmError::InvalidInput("donation to empty pot"))?;
        totals.amount = totals
            .amount
            .checked_add(amount.get())
            .ok_or(AmmError::Overflow("vault amount total"))?;
        Ok(())
    }

    fn debit(&mut self, asset: Address, from: Address, shares: Shares) -> Result<()> {
        let balance = self
            .balances
            .get_mut(&(asset, from))
            .ok_or(AmmError::InsufficientBalance("no vault balance"))?;
        *balance = balance
            .checked_sub(shares.get())
            .ok_or(AmmError::InsufficientBalance("vault debit"))?;
        Ok(())
    }

    fn rate_convert(&self, asset: Address, shares: Shares, rounding: Rounding) -> Result<u128> {
        let Some(totals) = self.totals.get(&asset).filter(|t| t.shares > 0) else {
            // No pot yet: 1:1.
            return Ok(shares.get());
        };
        let floor = to_u128(mul_div(
            U256::from(shares.get()),
            U256::from(totals.amount),
            U256::from(totals.shares),
        )?)?;
        match rounding {
            Rounding::Down => Ok(floor),
            Rounding::Up => {
                // (a·b) mod d via modular reduction of each factor, so
                // the product stays within 256 bits.
                let d = U256::from(totals.shares);
                let remainder =
                    U256::from(shares.get() % totals.shares) * (U256::from(totals.amount) % d) % d;
                if remainder.is_zero() {
                    Ok(floor)
                } else {
                    floor
                        .checked_add(1)
                        .ok_or(AmmError::Overflow("vault rate ceil"))
                }
            }
        }
    }
}

impl CustodyLedger for MemoryVault {
    fn balance_of(&self, asset: Address, owner: Address) -> Shares {
        Shares::new(self.balances.get(&(asset, owner)).copied().unwrap_or(0))
    }

    fn transfer(
        &mut self,
        asset: Address,
        from: Address,
        to: Address,
        shares: Shares,
    ) -> Result<()> {
        if shares.is_zero() {
            return Ok(());
        }
        self.debit(asset, from, shares)?;
        let balance = self.balances.entry((asset, to)).or_insert(0);
        *balance = balance
            .checked_add(shares.get())
            .ok_or(AmmError::Overflow("vault balance"))?;
        Ok(())
    }

    fn withdraw(
        &mut self,
        asset: Address,
        from: Address,
        _to: Address,
        shares: Shares,
    ) -> Result<(Amount, Shares)> {
        if shares.is_zero() {
            return Ok((Amount::ZERO, Shares::ZERO));
        }
        let amount = self.rate_convert(asset, shares, Rounding::Down)?;
        self.debit(asset, from, shares)?;

        let totals = self
            .totals
            .get_mut(&asset)
            .ok_or(AmmError::InsufficientBalance("no vault pot"))?;
        totals.amount = totals
            .amount
            .checked_sub(amount)
            .ok_or(AmmError::InsufficientBalance("vault pot amount"))?;
        totals.shares = totals
            .shares
            .checked_sub(shares.get())
            .ok_or(AmmError::InsufficientBalance("vault pot shares"))?;

        Ok((Amount::new(amount), shares))
    }

    fn to_amount(&self, asset: Address, shares: Shares, rounding: Rounding) -> Result<Amount> {
        Ok(Amount::new(self.rate_convert(asset, shares, rounding)?))
    }
}
