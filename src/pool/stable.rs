//! Stable-swap pool (`x·y·(x² + y²) = k`).
//!
//! Designed for tightly correlated assets: the quartic invariant is
//! flat near balanced reserves, so trades close to parity pay almost no
//! slippage, and steepens sharply as the pool drains to one side.
//!
//! Unlike the constant-product curve there is no closed form for the
//! output side, so swaps normalise both reserves to 18-decimal fixed
//! point and invert the curve with the bounded Newton solver in
//! [`crate::math::stable`]. A solve that exhausts its iteration cap
//! still produces the best-estimate output — determinism over failure —
//! and bumps [`StablePool::solver_misses`] so the condition is
//! observable from outside.

use ethereum_types::U256;
use tracing::{debug, warn};

use super::events::PoolEvent;
use super::fees::protocol_fee_share;
use super::guard::Guard;
use super::reserves::{ReserveState, MAX_RESERVE};
use super::MINIMUM_LIQUIDITY;
use crate::config::PoolConfig;
use crate::domain::{Address, Amount, AssetPair, Decimals, Liquidity, Rounding, Shares};
use crate::error::{AmmError, Result};
use crate::lp::LpLedger;
use crate::math::{from_wad, isqrt, mul_div, solve_y, stable_k, to_u128, to_wad};
use crate::traits::{CurvePool, CustodyLedger, FeeGovernor, OpContext, ReserveSnapshot, Withdrawal};

/// A two-asset stable-swap pool over a custody ledger.
///
/// Carries the same accounting state as the constant-product pool plus
/// a diagnostic counter for Newton iterations that hit the cap.
#[derive(Debug, Clone)]
pub struct StablePool {
    address: Address,
    config: PoolConfig,
    reserves: ReserveState,
    lp: LpLedger,
    k_last: U256,
    guard: Guard,
    events: Vec<PoolEvent>,
    solver_misses: u64,
}

impl StablePool {
    /// Creates an uninitialised pool at `address`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if the configuration
    /// fails validation or `address` is zero.
    pub fn new(address: Address, config: PoolConfig) -> Result<Self> {
        config.validate()?;
        if address.is_zero() {
            return Err(AmmError::InvalidConfiguration(
                "pool address must be non-zero",
            ));
        }
        Ok(Self {
            address,
            reserves: ReserveState::new(config.track_time_weighted_prices()),
            config,
            lp: LpLedger::new(),
            k_last: U256::zero(),
            guard: Guard::new(),
            events: Vec::new(),
            solver_misses: 0,
        })
    }

    /// Returns the pool's swap fee.
    #[must_use]
    pub const fn swap_fee(&self) -> crate::domain::Bps {
        self.config.swap_fee()
    }

    /// Returns the total liquidity-token supply.
    #[must_use]
    pub const fn liquidity_supply(&self) -> Liquidity {
        self.lp.total_supply()
    }

    /// Returns the liquidity-token balance of `owner`.
    #[must_use]
    pub fn liquidity_balance_of(&self, owner: Address) -> Liquidity {
        self.lp.balance_of(owner)
    }

    /// Moves liquidity tokens between holders, e.g. to pre-fund a burn.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientBalance`] if `from` holds less
    /// than `liquidity`.
    pub fn transfer_liquidity(
        &mut self,
        from: Address,
        to: Address,
        liquidity: Liquidity,
    ) -> Result<()> {
        self.lp.transfer(from, to, liquidity)
    }

    /// Returns the fee baseline recorded by the last mint or burn.
    #[must_use]
    pub const fn k_last(&self) -> U256 {
        self.k_last
    }

    /// Returns how many swaps have run the Newton solver to its
    /// iteration cap without reaching tolerance. Each such swap still
    /// returned a best-estimate output.
    #[must_use]
    pub const fn solver_misses(&self) -> u64 {
        self.solver_misses
    }

    /// Drains and returns the pending event buffer.
    pub fn take_events(&mut self) -> Vec<PoolEvent> {
        core::mem::take(&mut self.events)
    }

    const fn decimals_a(&self) -> Decimals {
        self.config.assets().first().decimals()
    }

    const fn decimals_b(&self) -> Decimals {
        self.config.assets().second().decimals()
    }

    /// The stable invariant over raw share reserves, in wad units.
    fn invariant(&self, reserve_a: Shares, reserve_b: Shares) -> Result<U256> {
        stable_k(
            to_wad(reserve_a.get(), self.decimals_a()),
            to_wad(reserve_b.get(), self.decimals_b()),
        )
    }

    /// Curve output for `amount_in` against the given oriented
    /// reserves. Returns the output and whether the solver converged.
    fn amount_out_for(
        &self,
        amount_in: Shares,
        reserve_in: Shares,
        reserve_out: Shares,
        a_in: bool,
    ) -> Result<(Shares, bool)> {
        let (dec_in, dec_out) = if a_in {
            (self.decimals_a(), self.decimals_b())
        } else {
            (self.decimals_b(), self.decimals_a())
        };

        // Swap fee comes off the input before the curve sees it.
        let fee = self
            .config
            .swap_fee()
            .apply(amount_in, Rounding::Down)?;
        let adjusted = amount_in
            .checked_sub(&fee)
            .ok_or(AmmError::Underflow("fee deduction"))?;

        let x_wad = to_wad(reserve_in.get(), dec_in);
        let y_wad = to_wad(reserve_out.get(), dec_out);
        let k = stable_k(x_wad, y_wad)?;

        let x_new = x_wad
            .checked_add(to_wad(adjusted.get(), dec_in))
            .ok_or(AmmError::Overflow("post-trade reserve"))?;
        let outcome = solve_y(x_new, k, y_wad)?;

        let out_wad = y_wad
            .checked_sub(outcome.y)
            .ok_or(AmmError::InsufficientOutput("swap output is zero"))?;
        let out = from_wad(out_wad, dec_out)?;
        if out == 0 {
            return Err(AmmError::InsufficientOutput("swap output is zero"));
        }
        Ok((Shares::new(out), outcome.converged))
    }

    fn mint_inner<V: CustodyLedger, G: FeeGovernor>(
        &mut self,
        ctx: &mut OpContext<'_, V, G>,
        recipient: Address,
    ) -> Result<Liquidity> {
        let pair = *self.config.assets();
        let asset_a = pair.first().address();
        let asset_b = pair.second().address();

        let balance_a = ctx.vault.balance_of(asset_a, self.address);
        let balance_b = ctx.vault.balance_of(asset_b, self.address);
        if balance_a.get() > MAX_RESERVE || balance_b.get() > MAX_RESERVE {
            return Err(AmmError::Overflow("reserve exceeds representable range"));
        }

        let reserve_a = self.reserves.reserve_a();
        let reserve_b = self.reserves.reserve_b();
        let amount_a = balance_a
            .checked_sub(&reserve_a)
            .ok_or(AmmError::Underflow("deposit accounting"))?;
        let amount_b = balance_b
            .checked_sub(&reserve_b)
            .ok_or(AmmError::Underflow("deposit accounting"))?;

        let fee_share = protocol_fee_share(
            self.invariant(reserve_a, reserve_b)?,
            self.k_last,
            self.lp.total_supply(),
            ctx.governor.protocol_fee_bps(),
        )?;
        let supply = self
            .lp
            .total_supply()
            .checked_add(&fee_share)
            .ok_or(AmmError::Overflow("liquidity supply"))?;

        let (minted, locked) = if supply.is_zero() {
            if amount_a.is_zero() || amount_b.is_zero() {
                return Err(AmmError::InvalidInput("first deposit requires both assets"));
            }
            let product = amount_a
                .checked_mul(&amount_b)
                .ok_or(AmmError::Overflow("initial deposit product"))?;
            let seeded = Liquidity::new(isqrt(product.get()))
                .checked_sub(&MINIMUM_LIQUIDITY)
                .ok_or(AmmError::InsufficientLiquidityMinted)?;
            (seeded, MINIMUM_LIQUIDITY)
        } else {
            let share_a = mul_div(
                U256::from(amount_a.get()),
                U256::from(supply.get()),
                U256::from(reserve_a.get()),
            )?;
            let share_b = mul_div(
                U256::from(amount_b.get()),
                U256::from(supply.get()),
                U256::from(reserve_b.get()),
            )?;
            (Liquidity::new(to_u128(share_a.min(share_b))?), Liquidity::ZERO)
        };
        if minted.is_zero() {
            return Err(AmmError::InsufficientLiquidityMinted);
        }

        let _projected = supply
            .checked_add(&locked)
            .and_then(|s| s.checked_add(&minted))
            .ok_or(AmmError::Overflow("liquidity supply"))?;
        // Record the post-deposit invariant before committing: it must
        // be representable or the mint is rejected whole.
        let k_next = self.invariant(balance_a, balance_b)?;

        self.reserves.sync(balance_a, balance_b, ctx.now)?;
        if !fee_share.is_zero() {
            let fee_recipient = ctx.governor.protocol_fee_recipient();
            self.lp.mint(fee_recipient, fee_share)?;
            self.events.push(PoolEvent::ProtocolFee {
                recipient: fee_recipient,
                liquidity: fee_share,
            });
        }
        if !locked.is_zero() {
            self.lp.mint(Address::ZERO, locked)?;
        }
        self.lp.mint(recipient, minted)?;
        self.k_last = k_next;

        self.events.push(PoolEvent::Sync {
            reserve_a: balance_a,
            reserve_b: balance_b,
        });
        self.events.push(PoolEvent::Mint {
            recipient,
            amount_a,
            amount_b,
            liquidity: minted,
        });
        debug!(%recipient, %amount_a, %amount_b, %minted, "liquidity minted");
        Ok(minted)
    }

    fn burn_inner<V: CustodyLedger, G: FeeGovernor>(
        &mut self,
        ctx: &mut OpContext<'_, V, G>,
        recipient: Address,
        unwrap: bool,
    ) -> Result<[Withdrawal; 2]> {
        let pair = *self.config.assets();
        let asset_a = pair.first().address();
        let asset_b = pair.second().address();

        let balance_a = ctx.vault.balance_of(asset_a, self.address);
        let balance_b = ctx.vault.balance_of(asset_b, self.address);
        let liquidity = self.lp.balance_of(self.address);
        if liquidity.is_zero() {
            return Err(AmmError::InsufficientOutput("no liquidity to burn"));
        }

        let fee_share = protocol_fee_share(
            self.invariant(self.reserves.reserve_a(), self.reserves.reserve_b())?,
            self.k_last,
            self.lp.total_supply(),
            ctx.governor.protocol_fee_bps(),
        )?;
        let supply = self
            .lp
            .total_supply()
            .checked_add(&fee_share)
            .ok_or(AmmError::Overflow("liquidity supply"))?;

        let amount_a = Shares::new(to_u128(mul_div(
            U256::from(liquidity.get()),
            U256::from(balance_a.get()),
            U256::from(supply.get()),
        )?)?);
        let amount_b = Shares::new(to_u128(mul_div(
            U256::from(liquidity.get()),
            U256::from(balance_b.get()),
            U256::from(supply.get()),
        )?)?);
        if amount_a.is_zero() || amount_b.is_zero() {
            return Err(AmmError::InsufficientOutput("burn amounts are zero"));
        }

        let new_a = balance_a
            .checked_sub(&amount_a)
            .ok_or(AmmError::Underflow("burn accounting"))?;
        let new_b = balance_b
            .checked_sub(&amount_b)
            .ok_or(AmmError::Underflow("burn accounting"))?;
        let k_next = self.invariant(new_a, new_b)?;

        if !fee_share.is_zero() {
            let fee_recipient = ctx.governor.protocol_fee_recipient();
            self.lp.mint(fee_recipient, fee_share)?;
            self.events.push(PoolEvent::ProtocolFee {
                recipient: fee_recipient,
                liquidity: fee_share,
            });
        }
        self.lp.burn(self.address, liquidity)?;

        if unwrap {
            ctx.vault
                .withdraw(asset_a, self.address, recipient, amount_a)?;
            ctx.vault
                .withdraw(asset_b, self.address, recipient, amount_b)?;
        } else {
            ctx.vault
                .transfer(asset_a, self.address, recipient, amount_a)?;
            ctx.vault
                .transfer(asset_b, self.address, recipient, amount_b)?;
        }

        self.reserves.sync(new_a, new_b, ctx.now)?;
        self.k_last = k_next;

        self.events.push(PoolEvent::Sync {
            reserve_a: new_a,
            reserve_b: new_b,
        });
        self.events.push(PoolEvent::Burn {
            recipient,
            amount_a,
            amount_b,
            liquidity,
        });
        debug!(%recipient, %amount_a, %amount_b, %liquidity, "liquidity burned");

        Ok([
            Withdrawal {
                asset: asset_a,
                shares: amount_a,
            },
            Withdrawal {
                asset: asset_b,
                shares: amount_b,
            },
        ])
    }

    fn swap_inner<V: CustodyLedger, G: FeeGovernor>(
        &mut self,
        ctx: &mut OpContext<'_, V, G>,
        asset_in: Address,
        recipient: Address,
        unwrap: bool,
    ) -> Result<Shares> {
        let pair = *self.config.assets();
        if !pair.contains(asset_in) {
            return Err(AmmError::InvalidInput("asset is not part of this pool"));
        }
        let asset_out = pair.other(asset_in)?.address();
        let a_in = asset_in == pair.first().address();

        let (reserve_in, reserve_out) = if a_in {
            (self.reserves.reserve_a(), self.reserves.reserve_b())
        } else {
            (self.reserves.reserve_b(), self.reserves.reserve_a())
        };
        if reserve_in.is_zero() || reserve_out.is_zero() {
            return Err(AmmError::Uninitialized);
        }

        let balance_in = ctx.vault.balance_of(asset_in, self.address);
        let balance_out = ctx.vault.balance_of(asset_out, self.address);
        if balance_in.get() > MAX_RESERVE {
            return Err(AmmError::Overflow("reserve exceeds representable range"));
        }

        let amount_in = balance_in
            .checked_sub(&reserve_in)
            .ok_or(AmmError::Underflow("swap accounting"))?;
        let (amount_out, converged) =
            self.amount_out_for(amount_in, reserve_in, reserve_out, a_in)?;
        if !converged {
            self.solver_misses += 1;
            warn!(misses = self.solver_misses, "stable solver hit iteration cap");
        }

        if unwrap {
            ctx.vault
                .withdraw(asset_out, self.address, recipient, amount_out)?;
        } else {
            ctx.vault
                .transfer(asset_out, self.address, recipient, amount_out)?;
        }

        let new_out = balance_out
            .checked_sub(&amount_out)
            .ok_or(AmmError::Underflow("swap accounting"))?;
        let (new_a, new_b) = if a_in {
            (balance_in, new_out)
        } else {
            (new_out, balance_in)
        };
        self.reserves.sync(new_a, new_b, ctx.now)?;

        self.events.push(PoolEvent::Sync {
            reserve_a: new_a,
            reserve_b: new_b,
        });
        self.events.push(PoolEvent::Swap {
            recipient,
            asset_in,
            amount_in,
            amount_out,
        });
        debug!(%asset_in, %amount_in, %amount_out, "swap executed");
        Ok(amount_out)
    }
}

impl CurvePool for StablePool {
    fn pool_address(&self) -> Address {
        self.address
    }

    fn assets(&self) -> &AssetPair {
        self.config.assets()
    }

    fn mint<V: CustodyLedger, G: FeeGovernor>(
        &mut self,
        ctx: &mut OpContext<'_, V, G>,
        recipient: Address,
    ) -> Result<Liquidity> {
        self.guard.enter()?;
        let result = self.mint_inner(ctx, recipient);
        self.guard.exit();
        result
    }

    fn burn<V: CustodyLedger, G: FeeGovernor>(
        &mut self,
        ctx: &mut OpContext<'_, V, G>,
        recipient: Address,
        unwrap: bool,
    ) -> Result<[Withdrawal; 2]> {
        self.guard.enter()?;
        let result = self.burn_inner(ctx, recipient, unwrap);
        self.guard.exit();
        result
    }

    fn swap<V: CustodyLedger, G: FeeGovernor>(
        &mut self,
        ctx: &mut OpContext<'_, V, G>,
        asset_in: Address,
        recipient: Address,
        unwrap: bool,
    ) -> Result<Shares> {
        self.guard.enter()?;
        let result = self.swap_inner(ctx, asset_in, recipient, unwrap);
        self.guard.exit();
        result
    }

    fn get_amount_out(&self, asset_in: Address, amount_in: Shares) -> Result<Shares> {
        let pair = self.config.assets();
        if !pair.contains(asset_in) {
            return Err(AmmError::InvalidInput("asset is not part of this pool"));
        }
        let a_in = asset_in == pair.first().address();
        let (reserve_in, reserve_out) = if a_in {
            (self.reserves.reserve_a(), self.reserves.reserve_b())
        } else {
            (self.reserves.reserve_b(), self.reserves.reserve_a())
        };
        if reserve_in.is_zero() || reserve_out.is_zero() {
            return Err(AmmError::Uninitialized);
        }
        let (out, _) = self.amount_out_for(amount_in, reserve_in, reserve_out, a_in)?;
        Ok(out)
    }

    fn reserves(&self) -> ReserveSnapshot {
        self.reserves.snapshot()
    }

    fn native_reserves<V: CustodyLedger>(&self, vault: &V) -> Result<(Amount, Amount)> {
        let pair = self.config.assets();
        let a = vault.to_amount(
            pair.first().address(),
            self.reserves.reserve_a(),
            Rounding::Down,
        )?;
        let b = vault.to_amount(
            pair.second().address(),
            self.reserves.reserve_b(),
            Rounding::Down,
        )?;
        Ok((a, b))
    }
}
