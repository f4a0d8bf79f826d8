//! Debounced button input.
//!
//! ## Components
//!
//! - **InputSource**: raw pin reads, optional interrupt registration
//! - **InterruptBridge**: ISR-safe "changed" flag and per-line capture
//! - **DebounceFilter**: raw level → stable level
//! - **GestureDetector**: stable transitions → pressed / released /
//!   long-press / double-click
//! - **ChannelRegistry**: fixed-capacity channel set, per-tick update
//!   and the query API

pub mod bridge;
pub mod channel;
pub mod debounce;
pub mod gesture;
pub mod registry;
pub mod source;


use crate::config::{DEFAULT_DEBOUNCE_MS, DEFAULT_DOUBLE_CLICK_MS, DEFAULT_LONG_PRESS_MS};

pub use bridge::{Capture, InterruptBridge};
pub use channel::{Capability, Channel};
pub use debounce::{DebounceFilter, Edge};
pub use gesture::{Event, EventFlags, GestureDetector};
pub use registry::ChannelRegistry;
pub use source::{FastRead, InputSource, InterruptLine, PinId, Pull};

/// Timing windows shared by every channel (milliseconds).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timing {
    pub debounce_ms: u32,
    pub long_press_ms: u32,
    pub double_click_ms: u32,
}

impl Timing {
    pub const fn new() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            long_press_ms: DEFAULT_LONG_PRESS_MS,
            double_click_ms: DEFAULT_DOUBLE_CLICK_MS,
        }
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::new()
    }
}
