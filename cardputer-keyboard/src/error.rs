//! Controller fault kinds.
//!
//! Neither kind ever reaches the caller of a poll: both are matched in
//! [`Fault::absorb`] and reduced to "no new keys observed".

use core::fmt::Debug;

use log::{trace, warn};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Fault<E> {
    /// The one-time register setup failed. The controller stays in degraded
    /// mode and reports no events until re-initialized.
    #[error("keyboard controller initialization failed: {0:?}")]
    Initialization(E),
    /// A bus transfer failed during a poll. Events read before the failure
    /// are kept; the rest of the queue is left for the next poll.
    #[error("keyboard controller transfer failed: {0:?}")]
    TransientIo(E),
}

impl<E: Debug> Fault<E> {
    /// Log and discard.
    pub(crate) fn absorb(self) {
        match &self {
            Fault::Initialization(_) => warn!("{}; continuing without key events", self),
            Fault::TransientIo(_) => trace!("{}; poll cut short", self),
        }
    }
}
