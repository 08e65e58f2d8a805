//! Reentrancy guard.

use crate::error::{AmmError, Result};

/// An explicit busy flag marking a pool as mid-operation.
///
/// The engine runs one operation to completion before the next begins;
/// a nested entry while the flag is set is a protocol violation and is
/// rejected rather than queued. Operations call [`Guard::enter`] first
/// and [`Guard::exit`] on every path out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Guard {
    busy: bool,
}

impl Guard {
    /// Creates an idle guard.
    #[must_use]
    pub const fn new() -> Self {
        Self { busy: false }
    }

    /// Marks the pool busy.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Reentrancy`] if the pool is already busy.
    pub fn enter(&mut self) -> Result<()> {
        if self.busy {
            return Err(AmmError::Reentrancy);
        }
        self.busy = true;
        Ok(())
    }

    /// Marks the pool idle again.
    pub fn exit(&mut self) {
        self.busy = false;
    }

    /// Returns `true` while an operation is in progress.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.busy
    }
}
