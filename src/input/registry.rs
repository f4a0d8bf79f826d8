//! Fixed-capacity button channel set.
//!
//! Owns the input source and every channel. `update()` is the single
//! per-tick entry point; all event flags are set and cleared through
//! `&mut self`, so queries never interleave with an update.

use core::sync::atomic::{AtomicBool, Ordering};

use heapless::Vec;

use super::channel::{Capability, Channel};
use super::gesture::Event;
use super::source::{InputSource, PinId, Pull};
use super::Timing;

pub struct ChannelRegistry<S, const N: usize> {
    source: S,
    channels: Vec<Channel, N>,
    timing: Timing,
}

impl<S: InputSource, const N: usize> ChannelRegistry<S, N> {
    /// Configure the first `N` pins of `pins`; extra pins are ignored.
    ///
    /// Each pin is read once to seed its raw and stable level, so a
    /// button held during boot reports no press event. Pins the source
    /// cannot listen on fall back to polling.
    pub fn init(mut source: S, pins: &[PinId], pull: Pull, now_ms: u32) -> Self {
        let mut channels = Vec::new();
        let mut groups = 0u32;

        for &pin in pins.iter().take(N) {
            source.configure(pin, pull);

            let capability = match source.listen(pin) {
                Some(line) => {
                    groups |= 1u32 << (line.group & 31);
                    Capability::Interrupt {
                        line: line.line,
                        fast: line.fast,
                    }
                }
                None => Capability::PollOnly,
            };

            let high = source.read(pin);
            // Cannot fail: at most N pins are taken.
            let _ = channels.push(Channel::new(pin, pull.active_low(), capability, high, now_ms));
        }

        // Pins are armed before their seeding read, so an edge in between
        // is latched and shows up as a change notice on the first update.
        if groups != 0 {
            source.enable_groups(groups);
        }

        Self {
            source,
            channels,
            timing: Timing::new(),
        }
    }

    /// Run one tick over every channel and publish stable levels.
    ///
    /// `levels` is index-aligned with channel order; entries beyond the
    /// channel count are left untouched.
    pub fn update(&mut self, now_ms: u32, levels: &[AtomicBool]) {
        // Swap before any read: a change after this point re-arms the
        // notice for the next tick.
        let changed = self.source.take_changed();
        let timing = self.timing;

        for channel in self.channels.iter_mut() {
            channel.poll(&mut self.source, changed, now_ms, &timing);
        }

        for (slot, channel) in levels.iter().zip(self.channels.iter()) {
            slot.store(channel.is_down(), Ordering::Relaxed);
        }
    }

    /// Debounced level; `false` for an unknown index.
    pub fn is_down(&self, idx: usize) -> bool {
        self.channels.get(idx).is_some_and(Channel::is_down)
    }

    pub fn was_pressed(&mut self, idx: usize) -> bool {
        self.take(idx, Event::Pressed)
    }

    pub fn was_released(&mut self, idx: usize) -> bool {
        self.take(idx, Event::Released)
    }

    pub fn was_long_pressed(&mut self, idx: usize) -> bool {
        self.take(idx, Event::LongPress)
    }

    pub fn was_double_clicked(&mut self, idx: usize) -> bool {
        self.take(idx, Event::DoubleClick)
    }

    fn take(&mut self, idx: usize, event: Event) -> bool {
        self.channels
            .get_mut(idx)
            .is_some_and(|channel| channel.take(event))
    }

    pub fn clear_all_events(&mut self) {
        for channel in self.channels.iter_mut() {
            channel.clear_events();
        }
    }

    /// Number of configured channels.
    pub fn count(&self) -> usize {
        self.channels.len()
    }

    pub fn pin(&self, idx: usize) -> Option<PinId> {
        self.channels.get(idx).map(Channel::pin)
    }

    pub fn capability(&self, idx: usize) -> Option<Capability> {
        self.channels.get(idx).map(Channel::capability)
    }

    /// Number of channels accelerated by pin-change interrupts.
    pub fn interrupt_channels(&self) -> usize {
        self.channels
            .iter()
            .filter(|c| c.capability().is_interrupt())
            .count()
    }

    pub fn channel(&self, idx: usize) -> Option<&Channel> {
        self.channels.get(idx)
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// Takes effect from the next update.
    pub fn set_debounce_ms(&mut self, ms: u32) {
        self.timing.debounce_ms = ms;
    }

    pub fn set_long_press_ms(&mut self, ms: u32) {
        self.timing.long_press_ms = ms;
    }

    pub fn set_double_click_ms(&mut self, ms: u32) {
        self.timing.double_click_ms = ms;
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}
