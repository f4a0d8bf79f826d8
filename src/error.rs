//! Unified error type for the rigkontrol firmware.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.

use defmt::Format;
use embassy_nrf::uarte;

/// Top-level error type used by the firmware tasks.
#[derive(Debug, Format)]
pub enum Error {
    // Player
    /// UARTE transfer to a DFPlayer failed.
    Uart(uarte::Error),

    /// A request named a player index that is not attached.
    NoSuchPlayer(usize),

    // Status
    /// Status document did not fit its fixed buffer.
    StatusOverflow,
}

// Convenience conversions

impl From<uarte::Error> for Error {
    fn from(e: uarte::Error) -> Self {
        Error::Uart(e)
    }
}

impl From<core::fmt::Error> for Error {
    fn from(_: core::fmt::Error) -> Self {
        Error::StatusOverflow
    }
}
