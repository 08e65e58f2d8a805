//! Core trait abstractions at the engine's seams.
//!
//! [`CurvePool`] is the caller-facing operation surface implemented by
//! every pool type. [`CustodyLedger`] and [`FeeGovernor`] are the two
//! consumed collaborator boundaries: the balance store that custodies
//! pool assets, and the governance source of protocol-fee parameters.

mod curve_pool;
mod custody_ledger;
mod fee_governor;

pub use curve_pool::{CurvePool, OpContext, ReserveSnapshot, Withdrawal};
pub use custody_ledger::CustodyLedger;
pub use fee_governor::FeeGovernor;
