//! Governance collaborator boundary.

use crate::domain::{Address, Bps};

/// Source of the mutable protocol-fee parameters.
///
/// The swap fee is fixed per pool at creation; the protocol's cut of
/// fee revenue and its recipient are governance-controlled and read
/// fresh at the start of every mint and burn. A governor returning
/// [`Bps::ZERO`](crate::domain::Bps) disables protocol-fee skimming
/// without touching pool state.
pub trait FeeGovernor {
    /// The protocol's current share of fee revenue, in basis points of
    /// invariant growth (see the fee engine for the exact formula).
    fn protocol_fee_bps(&self) -> Bps;

    /// The address credited with freshly minted fee-share liquidity
    /// tokens.
    fn protocol_fee_recipient(&self) -> Address;
}
