//! One configured button pin and its debounce / gesture state.

use super::debounce::DebounceFilter;
use super::gesture::{Event, GestureDetector};
use super::source::{FastRead, InputSource, PinId};
use super::Timing;

/// How a channel learns about level changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Capability {
    /// Read unconditionally every tick.
    PollOnly,
    /// Re-read through `fast` only on ticks after a change notice.
    Interrupt { line: u8, fast: FastRead },
}

impl Capability {
    pub fn is_interrupt(&self) -> bool {
        matches!(self, Capability::Interrupt { .. })
    }
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Channel {
    pin: PinId,
    active_low: bool,
    capability: Capability,
    filter: DebounceFilter,
    gesture: GestureDetector,
}

impl Channel {
    /// Create a channel seeded from an initial electrical level.
    pub fn new(pin: PinId, active_low: bool, capability: Capability, high: bool, now_ms: u32) -> Self {
        Self {
            pin,
            active_low,
            capability,
            filter: DebounceFilter::new(high != active_low, now_ms),
            gesture: GestureDetector::new(),
        }
    }

    /// Run one tick: optional re-read, debounce, then gesture checks.
    pub fn poll<S: InputSource>(&mut self, source: &mut S, changed: bool, now_ms: u32, timing: &Timing) {
        let high = match self.capability {
            Capability::PollOnly => Some(source.read(self.pin)),
            Capability::Interrupt { fast, .. } if changed => Some(source.fast_read(fast)),
            Capability::Interrupt { .. } => None,
        };

        let edge = match high {
            Some(high) => self
                .filter
                .update(high != self.active_low, now_ms, timing.debounce_ms),
            None => self.filter.settle(now_ms, timing.debounce_ms),
        };
        if let Some(edge) = edge {
            self.gesture.on_edge(edge, now_ms, timing);
        }

        self.gesture.tick(
            self.filter.stable(),
            self.filter.last_transition_ms(),
            now_ms,
            timing,
        );
    }

    pub fn pin(&self) -> PinId {
        self.pin
    }

    pub fn capability(&self) -> Capability {
        self.capability
    }

    pub fn is_down(&self) -> bool {
        self.filter.stable()
    }

    pub fn take(&mut self, event: Event) -> bool {
        self.gesture.take(event)
    }

    pub fn clear_events(&mut self) {
        self.gesture.clear_events();
    }

    pub fn gesture(&self) -> &GestureDetector {
        &self.gesture
    }
}
