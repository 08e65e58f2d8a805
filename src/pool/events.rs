//! Typed pool events for external indexers.

use crate::domain::{Address, Liquidity, Shares};

/// An observable state transition.
///
/// Events are appended to the pool's internal buffer as operations
/// commit and drained by the embedder (an indexer, a test harness).
/// `Sync` is emitted by every reserve update and is the engine's only
/// side channel besides committed state; the remaining variants narrate
/// the operation that caused the sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolEvent {
    /// Reserves were reconciled against observed custody balances.
    Sync {
        /// New stored reserve of the first asset, in shares.
        reserve_a: Shares,
        /// New stored reserve of the second asset, in shares.
        reserve_b: Shares,
    },
    /// Liquidity was minted for a deposit.
    Mint {
        /// Recipient of the minted liquidity tokens.
        recipient: Address,
        /// Deposited shares of the first asset.
        amount_a: Shares,
        /// Deposited shares of the second asset.
        amount_b: Shares,
        /// Liquidity tokens minted.
        liquidity: Liquidity,
    },
    /// Liquidity was burned for a withdrawal.
    Burn {
        /// Recipient of the withdrawn assets.
        recipient: Address,
        /// Withdrawn shares of the first asset.
        amount_a: Shares,
        /// Withdrawn shares of the second asset.
        amount_b: Shares,
        /// Liquidity tokens burned.
        liquidity: Liquidity,
    },
    /// A swap executed.
    Swap {
        /// Recipient of the output.
        recipient: Address,
        /// The input asset.
        asset_in: Address,
        /// Inferred input, in shares.
        amount_in: Shares,
        /// Output transferred, in shares.
        amount_out: Shares,
    },
    /// Protocol fee-share liquidity was minted to the governance
    /// recipient.
    ProtocolFee {
        /// The governance fee recipient.
        recipient: Address,
        /// Fee-share liquidity minted.
        liquidity: Liquidity,
    },
}
