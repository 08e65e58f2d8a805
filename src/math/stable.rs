//! Stable-swap curve: invariant and bounded Newton–Raphson solver.
//!
//! The curve is `k = x·y·(x² + y²)` in 18-decimal fixed point — a
//! constant-product generalisation weighted toward balanced reserves,
//! which flattens the price near parity and steepens it away from
//! parity. Swaps invert the curve: given one post-trade reserve `x0`
//! and the target invariant `xy`, find `y` such that
//!
//! ```text
//! f(x0, y) = x0·y³ + x0³·y = xy
//! ```
//!
//! via Newton iteration on `f` with derivative
//! `d(x0, y) = 3·x0·y² + x0³`. The iteration is a counted loop with a
//! hard cap: it either converges to within one wad unit or returns its
//! best estimate after [`SOLVER_MAX_ITERATIONS`] steps, flagged in the
//! [`SolverOutcome`]. Identical inputs always produce identical
//! outputs.

use ethereum_types::U256;
use tracing::trace;

use super::wad::{mul_div, mul_wad, WAD_U256};
use crate::error::{AmmError, Result};

/// Hard cap on Newton iterations. The loop never runs unbounded.
pub const SOLVER_MAX_ITERATIONS: u32 = 255;

/// Result of a stable-curve inversion.
///
/// `converged == false` means the iteration cap was hit and `y` is the
/// best estimate at that point. Callers surface this through a
/// diagnostic counter rather than an error, since the estimate is still
/// economically usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverOutcome {
    /// The solved (or best-estimate) reserve, in wad precision.
    pub y: U256,
    /// Newton steps taken.
    pub iterations: u32,
    /// Whether the one-unit tolerance band was reached.
    pub converged: bool,
}

/// Computes the stable-swap invariant for two wad-normalised reserves:
/// `k = (x·y/1e18) · ((x²/1e18 + y²/1e18)) / 1e18`.
///
/// Zero if either reserve is zero; strictly increasing in each argument
/// otherwise.
///
/// # Errors
///
/// Returns [`AmmError::Overflow`] if an intermediate exceeds 256 bits.
pub fn stable_k(x_wad: U256, y_wad: U256) -> Result<U256> {
    let a = mul_wad(x_wad, y_wad)?;
    let x_sq = mul_wad(x_wad, x_wad)?;
    let y_sq = mul_wad(y_wad, y_wad)?;
    let b = x_sq
        .checked_add(y_sq)
        .ok_or(AmmError::Overflow("stable invariant sum"))?;
    mul_wad(a, b)
}

/// `f(x0, y) = x0·y³ + x0³·y`, staged through wad divisions.
fn f(x0: U256, y: U256) -> Result<U256> {
    let y_cubed = mul_wad(mul_wad(y, y)?, y)?;
    let x0_cubed = mul_wad(mul_wad(x0, x0)?, x0)?;
    let term_a = mul_wad(x0, y_cubed)?;
    let term_b = mul_wad(x0_cubed, y)?;
    term_a
        .checked_add(term_b)
        .ok_or(AmmError::Overflow("stable f sum"))
}

/// `d(x0, y) = 3·x0·y² + x0³`, the derivative of [`f`] in `y`.
fn d(x0: U256, y: U256) -> Result<U256> {
    let y_sq = mul_wad(y, y)?;
    let triple = mul_wad(x0, y_sq)?
        .checked_mul(U256::from(3u64))
        .ok_or(AmmError::Overflow("stable d triple"))?;
    let x0_cubed = mul_wad(mul_wad(x0, x0)?, x0)?;
    triple
        .checked_add(x0_cubed)
        .ok_or(AmmError::Overflow("stable d sum"))
}

/// Solves `f(x0, y) == xy` for `y` by Newton–Raphson, starting from
/// `y_seed` (callers pass the pre-trade output reserve).
///
/// Stops when consecutive iterates differ by at most one wad unit, or
/// after [`SOLVER_MAX_ITERATIONS`] steps — in which case the last
/// iterate is returned with `converged == false`.
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if the derivative vanishes
///   (`x0 == 0`).
/// - [`AmmError::Overflow`] / [`AmmError::Underflow`] if an iterate
///   leaves the representable range.
pub fn solve_y(x0: U256, xy: U256, y_seed: U256) -> Result<SolverOutcome> {
    let mut y = y_seed;

    for i in 0..SOLVER_MAX_ITERATIONS {
        let f_y = f(x0, y)?;
        let d_y = d(x0, y)?;
        if d_y.is_zero() {
            return Err(AmmError::DivisionByZero);
        }

        let y_next = if f_y < xy {
            let step = mul_div(xy - f_y, WAD_U256, d_y)?;
            y.checked_add(step)
                .ok_or(AmmError::Overflow("solver iterate"))?
        } else {
            let step = mul_div(f_y - xy, WAD_U256, d_y)?;
            y.checked_sub(step)
                .ok_or(AmmError::Underflow("solver iterate"))?
        };

        let delta = if y_next > y { y_next - y } else { y - y_next };
        trace!(iteration = i, delta = %delta, "newton step");
        if delta <= U256::one() {
            return Ok(SolverOutcome {
                y: y_next,
                iterations: i + 1,
                converged: true,
            });
        }
        y = y_next;
    }

    Ok(SolverOutcome {
        y,
        iterations: SOLVER_MAX_ITERATIONS,
        converged: false,
    })
}
