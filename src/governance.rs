//! Governance parameter sources.

use crate::domain::{Address, Bps};
use crate::error::{AmmError, Result};
use crate::traits::FeeGovernor;

/// A [`FeeGovernor`] with fixed parameters.
///
/// Suitable for tests and for deployments where protocol-fee changes go
/// through redeployment rather than live governance. The rate is
/// validated once at construction; pools can then trust every read.
///
/// # Examples
///
/// ```
/// use tidepool::domain::{Address, Bps};
/// use tidepool::governance::FlatFeeGovernor;
/// use tidepool::traits::FeeGovernor;
///
/// let treasury = Address::from_bytes([7u8; 32]);
/// let governor = FlatFeeGovernor::new(Bps::new(1_667), treasury).unwrap();
/// assert_eq!(governor.protocol_fee_bps(), Bps::new(1_667));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatFeeGovernor {
    fee: Bps,
    recipient: Address,
}

impl FlatFeeGovernor {
    /// Creates a governor with a fixed fee and recipient.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `fee` exceeds
    /// 100% or if a non-zero fee pays out to the zero address.
    pub fn new(fee: Bps, recipient: Address) -> Result<Self> {
        if !fee.is_valid_fee() {
            return Err(AmmError::InvalidConfiguration(
                "protocol fee exceeds maximum",
            ));
        }
        if fee.get() != 0 && recipient.is_zero() {
            return Err(AmmError::InvalidConfiguration(
                "protocol fee recipient must be non-zero",
            ));
        }
        Ok(Self { fee, recipient })
    }

    /// A governor that charges no protocol fee.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            fee: Bps::ZERO,
            recipient: Address::ZERO,
        }
    }
}

impl FeeGovernor for FlatFeeGovernor {
    fn protocol_fee_bps(&self) -> Bps {
        self.fee
    }

    fn protocol_fee_recipient(&self) -> Address {
        self.recipient
    }
}
