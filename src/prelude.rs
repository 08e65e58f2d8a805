//! Convenience re-exports for common types and traits.
//!
//! A single import brings the frequently used surface into scope:
//!
//! ```rust
//! use tidepool::prelude::*;
//! ```

pub use crate::config::PoolConfig;
pub use crate::domain::{
    Address, Amount, Asset, AssetPair, Bps, Decimals, Liquidity, Rounding, Shares, MAX_FEE,
};
pub use crate::error::{AmmError, Result};
pub use crate::governance::FlatFeeGovernor;
pub use crate::pool::{ConstantProductPool, PoolEvent, StablePool, MINIMUM_LIQUIDITY};
pub use crate::traits::{
    CurvePool, CustodyLedger, FeeGovernor, OpContext, ReserveSnapshot, Withdrawal,
};
pub use crate::vault::MemoryVault;
