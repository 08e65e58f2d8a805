//! Protocol-fee skimming.
//!
//! Swap fees stay in the reserves, which makes the curve invariant grow
//! with trading activity. At the start of every mint and burn the pool
//! measures that growth since the last liquidity event and dilutes the
//! existing holders by exactly the protocol's share of it, minting
//! fresh liquidity tokens to the governance recipient. Deposits and
//! withdrawals themselves never generate a fee because the baseline is
//! re-recorded immediately after each of them.

use ethereum_types::{U256, U512};
use tracing::debug;

use crate::domain::{Bps, Liquidity, MAX_FEE};
use crate::error::{AmmError, Result};

/// Computes the fee-share liquidity owed to the protocol for invariant
/// growth from `k_last` to `k`.
///
/// ```text
/// share = supply · (k − k_last) · fee
///         ─────────────────────────────────────────
///         (MAX_FEE − fee) · k  +  fee · k_last
/// ```
///
/// Zero when no baseline is recorded (`k_last == 0`), when no growth
/// occurred, or when the fee is zero. Floor division throughout.
///
/// # Errors
///
/// Returns [`AmmError::Overflow`] if the share exceeds `u128`, or
/// [`AmmError::DivisionByZero`] if the denominator vanishes (only
/// possible when both `k` and `k_last` are zero, which the growth check
/// already excludes).
pub fn protocol_fee_share(
    k: U256,
    k_last: U256,
    supply: Liquidity,
    fee: Bps,
) -> Result<Liquidity> {
    if k_last.is_zero() || k <= k_last || fee.get() == 0 {
        return Ok(Liquidity::ZERO);
    }

    let growth = k - k_last;
    let fee_wide = U256::from(fee.get());
    let retained = U256::from(MAX_FEE - fee.get().min(MAX_FEE));

    // numerator = supply · fee · growth  — needs up to 512 bits.
    let scaled_supply = U256::from(supply.get())
        .checked_mul(fee_wide)
        .ok_or(AmmError::Overflow("fee numerator"))?;
    let numerator: U512 = scaled_supply.full_mul(growth);

    // denominator = (MAX_FEE − fee)·k + fee·k_last — fits 256 bits for
    // any k below 2^242.
    let denominator = retained
        .checked_mul(k)
        .and_then(|left| fee_wide.checked_mul(k_last).and_then(|r| left.checked_add(r)))
        .ok_or(AmmError::Overflow("fee denominator"))?;
    if denominator.is_zero() {
        return Err(AmmError::DivisionByZero);
    }

    let share = numerator / U512::from(denominator);
    let U512(ref limbs) = share;
    if limbs[2] | limbs[3] | limbs[4] | limbs[5] | limbs[6] | limbs[7] != 0 {
        return Err(AmmError::Overflow("fee share exceeds 128 bits"));
    }
    let share = u128::from(limbs[0]) | (u128::from(limbs[1]) << 64);

    if share != 0 {
        debug!(share, "protocol fee accrued");
    }
    Ok(Liquidity::new(share))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn share(k: u128, k_last: u128, supply: u128, fee: u32) -> Liquidity {
        let Ok(s) = protocol_fee_share(
            U256::from(k),
            U256::from(k_last),
            Liquidity::new(supply),
            Bps::new(fee),
        ) else {
            panic!("expected Ok");
        };
        s
    }

    #[test]
    fn no_baseline_no_fee() {
        assert_eq!(share(1_000_000, 0, 9_000, 1_667), Liquidity::ZERO);
    }

    #[test]
    fn no_growth_no_fee() {
        assert_eq!(share(1_000_000, 1_000_000, 9_000, 1_667), Liquidity::ZERO);
        assert_eq!(share(900_000, 1_000_000, 9_000, 1_667), Liquidity::ZERO);
    }

    #[test]
    fn zero_fee_rate_no_fee() {
        assert_eq!(share(2_000_000, 1_000_000, 9_000, 0), Liquidity::ZERO);
    }

    #[test]
    fn exact_formula_floor() {
        // supply = 10_000, k: 100 -> 110, fee = 1_000 bps (10%).
        // numerator   = 10_000 · 10 · 1_000        = 100_000_000
        // denominator = 9_000 · 110 + 1_000 · 100  = 1_090_000
        // share       = floor(100_000_000 / 1_090_000) = 91
        assert_eq!(share(110, 100, 10_000, 1_000), Liquidity::new(91));
    }

    #[test]
    fn full_fee_takes_growth_fraction_of_baseline() {
        // fee = 100%: denominator collapses to MAX_FEE·k_last term.
        // supply·(k−k0)·10000 / (0·k + 10000·k0) = supply·(k−k0)/k0
        assert_eq!(share(200, 100, 1_000, 10_000), Liquidity::new(1_000));
    }

    #[test]
    fn grows_with_fee_rate() {
        let low = share(2_000_000, 1_000_000, 9_000, 500);
        let high = share(2_000_000, 1_000_000, 9_000, 5_000);
        assert!(high > low);
    }

    #[test]
    fn grows_with_invariant_growth() {
        let small = share(1_100_000, 1_000_000, 9_000, 1_667);
        let large = share(2_000_000, 1_000_000, 9_000, 1_667);
        assert!(large > small);
    }

    #[test]
    fn wide_invariants_still_exact() {
        // Constant-product invariants approach 2^224; the formula must
        // survive them without overflow.
        let k_last = U256::from(u128::MAX >> 8);
        let k = k_last * U256::from(2u64);
        let Ok(s) = protocol_fee_share(k, k_last, Liquidity::new(1_000_000), Bps::new(1_667))
        else {
            panic!("expected Ok");
        };
        assert!(!s.is_zero());
    }

    #[test]
    fn dust_growth_floors_to_zero() {
        // Tiny growth against a huge denominator floors away.
        assert_eq!(share(1_000_001, 1_000_000, 10, 30), Liquidity::ZERO);
    }
}
