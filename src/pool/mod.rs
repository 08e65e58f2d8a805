//! Pool implementations and their shared accounting machinery.
//!
//! Two curve families share one accounting protocol — reserves synced
//! against custody balances, time-weighted price accumulators, and
//! invariant-growth fee skimming — and differ only in the invariant
//! function and the swap output computation:
//!
//! | Pool | Invariant | Output function |
//! |------|-----------|-----------------|
//! | [`ConstantProductPool`] | `k = x·y` | closed-form ratio algebra |
//! | [`StablePool`] | `k = x·y·(x² + y²)` | Newton–Raphson inversion |

pub mod constant_product;
pub mod events;
pub mod fees;
pub mod guard;
pub mod reserves;
pub mod stable;

#[cfg(test)]
mod proptest_properties;

pub use constant_product::ConstantProductPool;
pub use events::PoolEvent;
pub use guard::Guard;
pub use reserves::{ReserveState, MAX_RESERVE};
pub use stable::StablePool;

use crate::domain::Liquidity;

/// Liquidity permanently locked at the burn address by the first mint.
///
/// Locking a floor of supply makes the share price manipulation-
/// resistant: the first depositor cannot later drain the pool to a
/// state where rounding lets them capture subsequent deposits.
pub const MINIMUM_LIQUIDITY: Liquidity = Liquidity::new(1_000);
