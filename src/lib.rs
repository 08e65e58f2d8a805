//! # Tidepool
//!
//! A two-asset AMM pool engine over a share-based custody ledger,
//! providing constant-product and stable-swap curves with invariant-
//! growth protocol fees and time-weighted price accumulators.
//!
//! The engine is deterministic and single-threaded by construction:
//! each operation reads its custody balances once, runs to completion,
//! and commits atomically. Custody, governance, and routing live behind
//! trait boundaries — the crate owns only the curve math and the
//! accounting protocol that keeps reserves, accumulators, and
//! liquidity-token supply consistent.
//!
//! ## Quick Start
//!
//! ```rust
//! use tidepool::config::PoolConfig;
//! use tidepool::domain::{Address, Amount, Asset, AssetPair, Bps, Decimals, Shares};
//! use tidepool::governance::FlatFeeGovernor;
//! use tidepool::pool::ConstantProductPool;
//! use tidepool::traits::{CurvePool, OpContext};
//! use tidepool::vault::MemoryVault;
//!
//! // 1. Two assets and a pool configuration.
//! let usd = Asset::new(Address::from_bytes([1u8; 32]), Decimals::new(6).expect("valid"));
//! let eur = Asset::new(Address::from_bytes([2u8; 32]), Decimals::new(6).expect("valid"));
//! let pair = AssetPair::new(usd, eur).expect("distinct assets");
//! let config = PoolConfig::new(pair, Bps::new(30), false).expect("valid config");
//!
//! // 2. A pool, a custody ledger, and a governor.
//! let pool_address = Address::from_bytes([0x70; 32]);
//! let mut pool = ConstantProductPool::new(pool_address, config).expect("pool created");
//! let mut vault = MemoryVault::new();
//! let governor = FlatFeeGovernor::disabled();
//!
//! // 3. Deposit both sides to the pool's address, then mint.
//! let alice = Address::from_bytes([0xaa; 32]);
//! vault.deposit(usd.address(), pool_address, Amount::new(10_000)).expect("deposit");
//! vault.deposit(eur.address(), pool_address, Amount::new(10_000)).expect("deposit");
//! let mut ctx = OpContext::new(&mut vault, &governor, 1);
//! let minted = pool.mint(&mut ctx, alice).expect("mint");
//! assert_eq!(minted.get(), 9_000); // isqrt(10_000²) − 1_000 locked
//!
//! // 4. Swap: deposit the input, then execute.
//! vault.deposit(usd.address(), pool_address, Amount::new(100)).expect("deposit");
//! let mut ctx = OpContext::new(&mut vault, &governor, 2);
//! let out = pool.swap(&mut ctx, usd.address(), alice, false).expect("swap");
//! assert!(out.get() > 0);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐
//! │    Router     │  external collaborator (out of scope)
//! └──────┬───────┘
//!        │ mint / burn / swap / get_amount_out
//!        ▼
//! ┌──────────────┐     ┌───────────────┐
//! │    Pools      │────▶│ CustodyLedger  │  balance_of / transfer /
//! │  CP · Stable  │     │  FeeGovernor   │  withdraw / fee params
//! └──────┬───────┘     └───────────────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │  Accounting   │  reserves + accumulators · fee engine · LP ledger
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │     Math      │  isqrt · wad fixed point · stable Newton solver
//! └──────────────┘
//! ```
//!
//! ## Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Newtype value types: [`Shares`](domain::Shares), [`Liquidity`](domain::Liquidity), [`Bps`](domain::Bps), … |
//! | [`traits`] | Seams: [`CurvePool`](traits::CurvePool), [`CustodyLedger`](traits::CustodyLedger), [`FeeGovernor`](traits::FeeGovernor) |
//! | [`config`] | [`PoolConfig`](config::PoolConfig) with creation-time validation |
//! | [`pool`] | Pool implementations and shared accounting machinery |
//! | [`math`] | Integer sqrt, wad fixed point, stable-curve solver |
//! | [`vault`] | [`MemoryVault`](vault::MemoryVault) reference custody ledger |
//! | [`governance`] | [`FlatFeeGovernor`](governance::FlatFeeGovernor) |
//! | [`lp`] | Liquidity-token supply and balance ledger |
//! | [`error`] | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports |

pub mod config;
pub mod domain;
pub mod error;
pub mod governance;
pub mod lp;
pub mod math;
pub mod pool;
pub mod prelude;
pub mod traits;
pub mod vault;
