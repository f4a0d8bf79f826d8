//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and player
//! defaults live here so they can be tuned in one place.

// Input channels

/// Maximum number of button channels a registry can hold.
pub const MAX_CHANNELS: usize = 16;

/// Default debounce window (ms): raw level must hold this long.
pub const DEFAULT_DEBOUNCE_MS: u32 = 50;

/// Default hold time (ms) before a long-press fires.
pub const DEFAULT_LONG_PRESS_MS: u32 = 1000;

/// Default maximum gap (ms) between two presses of a double-click.
pub const DEFAULT_DOUBLE_CLICK_MS: u32 = 400;

/// Input tick period (ms). Keep well below the debounce window.
pub const TICK_PERIOD_MS: u64 = 5;

// GPIO pin assignments (nRF52840-DK defaults)
//
// Pin identifiers use the nRF PSEL numbering: `port * 32 + pin`.
//
//   S1 top-left      → P0.11
//   S2 top-right     → P0.12
//   S3 bottom-left   → P0.24
//   S4 bottom-right  → P0.25
//   Status LED       → P0.13
//   Player 1 TX      → P1.01
//   Player 2 TX      → P1.03

/// Button pins in channel order.
pub const BUTTON_PINS: [u8; 4] = [11, 12, 24, 25];

/// Number of wired buttons.
pub const BUTTON_COUNT: usize = BUTTON_PINS.len();

/// Buttons are wired to ground and use the internal pull-up.
pub const BUTTON_PULLUP: bool = true;

/// Channel whose long-press flips the status toggle flag.
pub const TOGGLE_CHANNEL: usize = 0;

// Interrupts

/// Number of GPIOTE IN channels on the nRF52840.
pub const INTERRUPT_LINES: usize = 8;

// Status reporting

/// Interval between status reports (ms).
pub const STATUS_REPORT_INTERVAL_MS: u64 = 1000;

/// Capacity of the rendered status document.
pub const STATUS_JSON_CAPACITY: usize = 256;

// DFPlayer Mini

/// Number of attached players.
pub const PLAYER_COUNT: usize = 2;

/// Time the module needs after a reset before it accepts commands (ms).
pub const PLAYER_RESET_SETTLE_MS: u64 = 1500;

/// Volume applied after reset (0..=30).
pub const PLAYER_DEFAULT_VOLUME: u8 = 20;

/// Highest volume the module accepts.
pub const PLAYER_MAX_VOLUME: u8 = 30;
