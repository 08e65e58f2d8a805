//! 18-decimal fixed-point ("wad") arithmetic over 256-bit integers.
//!
//! The stable-swap curve works at a uniform 18-decimal precision so
//! that assets with different native decimals price against each other
//! correctly. Intermediates are `U256`, and every multiply/divide pair
//! goes through a full 512-bit product before dividing, so precision is
//! never lost to premature truncation and overflow is detected instead
//! of wrapping.

use ethereum_types::{U256, U512};

use crate::domain::Decimals;
use crate::error::{AmmError, Result};

/// One unit in 18-decimal fixed point.
pub const WAD: u128 = 1_000_000_000_000_000_000;

/// [`WAD`] as a `U256` constant.
pub const WAD_U256: U256 = U256([1_000_000_000_000_000_000u64, 0, 0, 0]);

/// Narrows a 512-bit value back to 256 bits.
///
/// # Errors
///
/// Returns [`AmmError::Overflow`] if any of the upper four limbs is
/// non-zero.
fn narrow(value: U512) -> Result<U256> {
    let U512(ref limbs) = value;
    if limbs[4] | limbs[5] | limbs[6] | limbs[7] != 0 {
        return Err(AmmError::Overflow("wide result exceeds 256 bits"));
    }
    Ok(U256([limbs[0], limbs[1], limbs[2], limbs[3]]))
}

/// Computes `a * b / denominator` with a full 512-bit intermediate.
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if `denominator` is zero.
/// - [`AmmError::Overflow`] if the quotient exceeds 256 bits.
pub fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256> {
    if denominator.is_zero() {
        return Err(AmmError::DivisionByZero);
    }
    let product = a.full_mul(b);
    narrow(product / U512::from(denominator))
}

/// Computes `a * b / 1e18`, the wad product.
///
/// # Errors
///
/// Returns [`AmmError::Overflow`] if the result exceeds 256 bits.
pub fn mul_wad(a: U256, b: U256) -> Result<U256> {
    mul_div(a, b, WAD_U256)
}

/// Normalises a raw quantity with the given decimals into wad
/// precision: `raw * 1e18 / 10^decimals`.
///
/// Cannot overflow: `u128 * 1e18` always fits in 256 bits.
#[must_use]
pub fn to_wad(raw: u128, decimals: Decimals) -> U256 {
    U256::from(raw) * WAD_U256 / U256::from(decimals.factor())
}

/// Denormalises a wad quantity back to raw units with floor rounding:
/// `wad * 10^decimals / 1e18`.
///
/// # Errors
///
/// Returns [`AmmError::Overflow`] if the raw result exceeds `u128`.
pub fn from_wad(wad: U256, decimals: Decimals) -> Result<u128> {
    let raw = mul_div(wad, U256::from(decimals.factor()), WAD_U256)?;
    to_u128(raw)
}

/// Narrows a `U256` to `u128`.
///
/// # Errors
///
/// Returns [`AmmError::Overflow`] if the value exceeds `u128::MAX`.
pub fn to_u128(value: U256) -> Result<u128> {
    if value > U256::from(u128::MAX) {
        return Err(AmmError::Overflow("value exceeds 128 bits"));
    }
    Ok(value.low_u128())
}
