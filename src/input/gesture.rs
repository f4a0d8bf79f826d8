//! Press / release / long-press / double-click classification.
//!
//! The detector consumes committed stable transitions from the
//! debounce filter and is also ticked every update so that the
//! long-press threshold and the double-click window are checked
//! against elapsed time. All events are one-shot flags that stay set
//! until a reader takes them.

use super::debounce::Edge;
use super::Timing;

/// One-shot events a channel can report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    Pressed,
    Released,
    LongPress,
    DoubleClick,
}

impl Event {
    const fn bit(self) -> u8 {
        match self {
            Event::Pressed => 1 << 0,
            Event::Released => 1 << 1,
            Event::LongPress => 1 << 2,
            Event::DoubleClick => 1 << 3,
        }
    }
}

/// Pending one-shot event set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EventFlags(u8);

impl EventFlags {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn set(&mut self, event: Event) {
        self.0 |= event.bit();
    }

    pub fn is_set(&self, event: Event) -> bool {
        self.0 & event.bit() != 0
    }

    /// Read and clear a single event.
    pub fn take(&mut self, event: Event) -> bool {
        let was_set = self.is_set(event);
        self.0 &= !event.bit();
        was_set
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// Per-channel gesture state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GestureDetector {
    clicks: u8,
    last_press_ms: Option<u32>,
    long_reported: bool,
    events: EventFlags,
}

impl Default for GestureDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureDetector {
    pub const fn new() -> Self {
        Self {
            clicks: 0,
            last_press_ms: None,
            long_reported: false,
            events: EventFlags::empty(),
        }
    }

    /// Handle a committed stable transition.
    pub fn on_edge(&mut self, edge: Edge, now_ms: u32, timing: &Timing) {
        self.long_reported = false;

        match edge {
            Edge::Pressed => {
                self.events.set(Event::Pressed);

                let within_window = self
                    .last_press_ms
                    .is_some_and(|t| now_ms.wrapping_sub(t) <= timing.double_click_ms);
                self.clicks = if within_window {
                    self.clicks.saturating_add(1)
                } else {
                    1
                };
                self.last_press_ms = Some(now_ms);

                if self.clicks >= 2 {
                    self.events.set(Event::DoubleClick);
                    self.reset_clicks();
                }
            }
            Edge::Released => self.events.set(Event::Released),
        }
    }

    /// Time-based checks, run once per update after the debounce step.
    ///
    /// `pressed_since_ms` is the timestamp of the last stable transition.
    pub fn tick(&mut self, stable: bool, pressed_since_ms: u32, now_ms: u32, timing: &Timing) {
        if stable
            && !self.long_reported
            && now_ms.wrapping_sub(pressed_since_ms) >= timing.long_press_ms
        {
            self.events.set(Event::LongPress);
            self.long_reported = true;
            // A long hold cancels any pending double-click.
            self.reset_clicks();
        }

        if self.clicks == 1 {
            if let Some(t) = self.last_press_ms {
                if now_ms.wrapping_sub(t) > timing.double_click_ms {
                    self.reset_clicks();
                }
            }
        }
    }

    fn reset_clicks(&mut self) {
        self.clicks = 0;
        self.last_press_ms = None;
    }

    /// Presses counted toward a double-click (0 or 1 between events).
    pub fn clicks(&self) -> u8 {
        self.clicks
    }

    pub fn long_reported(&self) -> bool {
        self.long_reported
    }

    pub fn events(&self) -> EventFlags {
        self.events
    }

    pub fn take(&mut self, event: Event) -> bool {
        self.events.take(event)
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }
}
