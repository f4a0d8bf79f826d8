//! Platform boundary for raw digital reads and pin-change interrupts.
//!
//! Pin identifiers are small integers in the platform's own numbering
//! (on nRF: `port * 32 + pin`). Levels returned here are electrical
//! (`true` = high); polarity is applied by the registry.

/// Platform pin identifier.
pub type PinId = u8;

/// Input bias applied when a pin is configured.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pull {
    /// Internal pull-up; the button shorts to ground (active-low).
    Up,
    /// No bias; the button drives the pin high (active-high).
    None,
}

impl Pull {
    pub fn from_pullup(pullup: bool) -> Self {
        if pullup {
            Pull::Up
        } else {
            Pull::None
        }
    }

    /// Whether an electrical low means "pressed".
    pub fn active_low(self) -> bool {
        matches!(self, Pull::Up)
    }
}

/// Register-level read descriptor: input register selector + bit mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FastRead {
    pub port: u8,
    pub mask: u32,
}

/// Result of a successful interrupt registration for one pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterruptLine {
    /// Hardware line the handler reports this pin's captures on.
    pub line: u8,
    /// Interrupt-source group this pin belongs to (bit index into the
    /// mask later passed to [`InputSource::enable_groups`]).
    pub group: u8,
    /// Register and mask for fast reads after a change notice.
    pub fast: FastRead,
}

/// Raw input access for a set of pins.
pub trait InputSource {
    /// Configure `pin` as a digital input with the given bias.
    fn configure(&mut self, pin: PinId, pull: Pull);

    /// Read the electrical level of `pin`.
    fn read(&mut self, pin: PinId) -> bool;

    /// Arm edge notification for `pin`.
    ///
    /// Returns `None` when the platform or the pin has no interrupt
    /// support; the channel then stays poll-only.
    fn listen(&mut self, _pin: PinId) -> Option<InterruptLine> {
        None
    }

    /// Enable the interrupt groups collected during registration.
    /// Called once after every pin has been offered to [`listen`].
    ///
    /// [`listen`]: InputSource::listen
    fn enable_groups(&mut self, _groups: u32) {}

    /// Read a level through a register descriptor from [`listen`].
    ///
    /// [`listen`]: InputSource::listen
    fn fast_read(&mut self, fast: FastRead) -> bool;

    /// Read and clear the shared "something changed" notice.
    ///
    /// Must be a single atomic read-and-clear so that a change arriving
    /// after the caller's reads is seen on the next call.
    fn take_changed(&mut self) -> bool {
        false
    }
}
