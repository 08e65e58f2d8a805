//! Fundamental domain value types used throughout the pool engine.
//!
//! Quantities are newtypes with checked arithmetic: [`Shares`] for the
//! custody ledger's internal unit, [`Amount`] for native token units,
//! [`Liquidity`] for pool-issued liquidity tokens, and [`Bps`] for fee
//! rates. Identities are [`Address`], [`Asset`], and the canonically
//! sorted [`AssetPair`].

mod address;
mod amount;
mod asset;
mod asset_pair;
mod bps;
mod decimals;
mod liquidity;
mod rounding;
mod shares;

pub use address::Address;
pub use amount::Amount;
pub use asset::Asset;
pub use asset_pair::AssetPair;
pub use bps::{Bps, MAX_FEE};
pub use decimals::Decimals;
pub use liquidity::Liquidity;
pub use rounding::Rounding;
pub use shares::Shares;
