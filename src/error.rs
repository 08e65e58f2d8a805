//! Unified error types for the Tidepool engine.
//!
//! All fallible operations across the crate return [`AmmError`] as their
//! error type. Every variant is fatal for the operation that raised it:
//! the operation aborts and no partial state change is committed. The
//! calling collaborator (typically a router) owns any retry policy.
//!
//! Solver non-convergence is deliberately *not* an error: the
//! stable-curve solver always returns its best estimate and the owning
//! pool records the miss in a diagnostic counter instead.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, AmmError>;

/// Unified error enum for all Tidepool operations.
///
/// The `&'static str` payloads carry the failing call site's context;
/// match on the variant, not the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AmmError {
    /// Pool parameters rejected at creation: zero asset address,
    /// identical assets, or a swap fee above 100%.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// A swap was attempted against a pool that has never been seeded
    /// with liquidity (a reserve is zero).
    #[error("pool is uninitialized")]
    Uninitialized,

    /// An operation input was rejected: the input asset is not part of
    /// the pool pair, or a first deposit is missing one side.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    /// A mint computed zero liquidity for the deposited amounts.
    #[error("insufficient liquidity minted")]
    InsufficientLiquidityMinted,

    /// A swap or burn computed a zero output where a positive result is
    /// required.
    #[error("insufficient output: {0}")]
    InsufficientOutput(&'static str),

    /// A ledger balance is too small to honour a transfer, withdrawal,
    /// or burn.
    #[error("insufficient balance: {0}")]
    InsufficientBalance(&'static str),

    /// A computed value exceeds the representable range. Reserves are
    /// capped below `2^112`; wide intermediates are capped at 256 bits.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// A subtraction would produce a negative quantity.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero in curve or accounting math.
    #[error("division by zero")]
    DivisionByZero,

    /// A pool operation was entered while another operation on the same
    /// pool was still in progress.
    #[error("reentrant pool operation rejected")]
    Reentrancy,

    /// A precision parameter is out of range (decimals above 18).
    #[error("invalid precision: {0}")]
    InvalidPrecision(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_context() {
        let err = AmmError::Overflow("reserve exceeds range");
        assert_eq!(
            format!("{err}"),
            "arithmetic overflow: reserve exceeds range"
        );
    }

    #[test]
    fn display_unit_variants() {
        assert_eq!(format!("{}", AmmError::DivisionByZero), "division by zero");
        assert_eq!(
            format!("{}", AmmError::Uninitialized),
            "pool is uninitialized"
        );
        assert_eq!(
            format!("{}", AmmError::Reentrancy),
            "reentrant pool operation rejected"
        );
    }

    #[test]
    fn errors_are_comparable() {
        assert_eq!(AmmError::Uninitialized, AmmError::Uninitialized);
        assert_ne!(
            AmmError::Uninitialized,
            AmmError::InsufficientLiquidityMinted
        );
    }

    #[test]
    fn error_trait_object() {
        let err: Box<dyn std::error::Error> = Box::new(AmmError::DivisionByZero);
        assert!(err.to_string().contains("division"));
    }
}
