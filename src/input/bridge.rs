//! Interrupt-to-tick handoff for pin-change notifications.
//!
//! The interrupt side only stores into atomics: a shared "changed"
//! flag plus the last level and timestamp seen on each interrupt line.
//! No debounce or gesture logic runs here. The tick side reads and
//! clears the flag with a single swap before it re-reads any pin.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Level and time captured by the interrupt handler for one line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Capture {
    /// Electrical level read in the handler.
    pub high: bool,
    pub at_ms: u32,
}

/// Shared state between a pin-change interrupt and the input tick.
///
/// `LINES` is the number of hardware interrupt lines the platform
/// exposes. Intended to live in a `static`.
pub struct InterruptBridge<const LINES: usize> {
    changed: AtomicBool,
    seen: [AtomicBool; LINES],
    high: [AtomicBool; LINES],
    at_ms: [AtomicU32; LINES],
}

impl<const LINES: usize> Default for InterruptBridge<LINES> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const LINES: usize> InterruptBridge<LINES> {
    #[allow(clippy::declare_interior_mutable_const)]
    const FLAG: AtomicBool = AtomicBool::new(false);
    #[allow(clippy::declare_interior_mutable_const)]
    const STAMP: AtomicU32 = AtomicU32::new(0);

    pub const fn new() -> Self {
        Self {
            changed: AtomicBool::new(false),
            seen: [Self::FLAG; LINES],
            high: [Self::FLAG; LINES],
            at_ms: [Self::STAMP; LINES],
        }
    }

    /// Interrupt side: record a change on `line` and raise the flag.
    ///
    /// O(1), lock-free, never allocates. Out-of-range lines still
    /// raise the flag.
    pub fn record(&self, line: usize, high: bool, now_ms: u32) {
        if line < LINES {
            self.high[line].store(high, Ordering::Relaxed);
            self.at_ms[line].store(now_ms, Ordering::Relaxed);
            self.seen[line].store(true, Ordering::Relaxed);
        }
        // Release orders the capture stores before the flag.
        self.changed.store(true, Ordering::Release);
    }

    /// Interrupt side: raise the flag without a capture.
    pub fn signal(&self) {
        self.changed.store(true, Ordering::Release);
    }

    /// Tick side: read and clear the flag in one step.
    pub fn take_changed(&self) -> bool {
        self.changed.swap(false, Ordering::AcqRel)
    }

    /// Last capture on `line`, if the handler has ever fired for it.
    pub fn capture(&self, line: usize) -> Option<Capture> {
        if line >= LINES || !self.seen[line].load(Ordering::Acquire) {
            return None;
        }
        Some(Capture {
            high: self.high[line].load(Ordering::Relaxed),
            at_ms: self.at_ms[line].load(Ordering::Relaxed),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static BRIDGE: InterruptBridge<4> = InterruptBridge::new();

    #[test]
    fn static_bridge_starts_quiet() {
        let bridge = InterruptBridge::<2>::new();
        assert!(!bridge.take_changed());
        assert_eq!(bridge.capture(0), None);
        assert!(!BRIDGE.take_changed());
        assert!(BRIDGE.capture(3).is_none());
    }

    #[test]
    fn take_changed_clears_flag() {
        let bridge = InterruptBridge::<2>::new();
        bridge.signal();
        assert!(bridge.take_changed());
        assert!(!bridge.take_changed());
    }

    #[test]
    fn record_captures_level_and_time() {
        let bridge = InterruptBridge::<2>::new();
        bridge.record(1, false, 1234);
        assert!(bridge.take_changed());
        assert_eq!(
            bridge.capture(1),
            Some(Capture {
                high: false,
                at_ms: 1234
            })
        );
        assert_eq!(bridge.capture(0), None);
    }

    #[test]
    fn record_after_take_is_not_lost() {
        let bridge = InterruptBridge::<1>::new();
        bridge.record(0, true, 10);
        assert!(bridge.take_changed());
        // Change arriving after the tick consumed the flag.
        bridge.record(0, false, 11);
        assert!(bridge.take_changed());
    }

    #[test]
    fn out_of_range_line_still_signals() {
        let bridge = InterruptBridge::<1>::new();
        bridge.record(7, true, 5);
        assert!(bridge.take_changed());
        assert_eq!(bridge.capture(7), None);
    }

    #[test]
    fn concurrent_records_are_observed() {
        use std::sync::Arc;
        use std::thread;

        let bridge = Arc::new(InterruptBridge::<1>::new());
        let writer = {
            let bridge = Arc::clone(&bridge);
            thread::spawn(move || {
                for i in 0..1000u32 {
                    bridge.record(0, i % 2 == 0, i);
                }
            })
        };
        writer.join().unwrap();
        assert!(bridge.take_changed());
        assert_eq!(bridge.capture(0).map(|c| c.at_ms), Some(999));
    }
}
