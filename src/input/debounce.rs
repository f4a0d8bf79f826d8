//! Time-window debounce filter.
//!
//! A raw reading only becomes the stable level after it has held
//! unchanged for the whole debounce interval. Every raw change restarts
//! the window, so a pulse shorter than the interval never reaches the
//! stable level.

/// Direction of a committed stable-level transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Stable level went from released to pressed.
    Pressed,
    /// Stable level went from pressed to released.
    Released,
}

/// Per-channel debounce state. Levels are logical (`true` = pressed).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DebounceFilter {
    raw: bool,
    stable: bool,
    window_start_ms: u32,
    last_transition_ms: u32,
}

impl DebounceFilter {
    /// Seed both raw and stable level from a single reading.
    pub const fn new(level: bool, now_ms: u32) -> Self {
        Self {
            raw: level,
            stable: level,
            window_start_ms: now_ms,
            last_transition_ms: now_ms,
        }
    }

    /// Feed one timestamped raw reading.
    ///
    /// Returns the edge when the stable level changes on this call.
    pub fn update(&mut self, raw: bool, now_ms: u32, interval_ms: u32) -> Option<Edge> {
        if raw != self.raw {
            self.raw = raw;
            self.window_start_ms = now_ms;
        }
        self.settle(now_ms, interval_ms)
    }

    /// Re-evaluate the window against the last raw reading without a
    /// new sample.
    pub fn settle(&mut self, now_ms: u32, interval_ms: u32) -> Option<Edge> {
        if self.raw == self.stable {
            return None;
        }
        if now_ms.wrapping_sub(self.window_start_ms) < interval_ms {
            return None;
        }

        self.stable = self.raw;
        self.last_transition_ms = now_ms;
        Some(if self.stable {
            Edge::Pressed
        } else {
            Edge::Released
        })
    }

    /// Debounced, authoritative level.
    pub fn stable(&self) -> bool {
        self.stable
    }

    /// Last raw reading (pre-debounce).
    pub fn raw(&self) -> bool {
        self.raw
    }

    /// Timestamp of the last committed stable transition.
    pub fn last_transition_ms(&self) -> u32 {
        self.last_transition_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: u32 = 50;

    #[test]
    fn seed_does_not_emit() {
        let mut f = DebounceFilter::new(true, 0);
        assert!(f.stable());
        assert_eq!(f.update(true, 100, WINDOW), None);
    }

    #[test]
    fn commits_after_full_window() {
        let mut f = DebounceFilter::new(false, 0);
        assert_eq!(f.update(true, 10, WINDOW), None);
        assert_eq!(f.update(true, 59, WINDOW), None);
        assert_eq!(f.update(true, 60, WINDOW), Some(Edge::Pressed));
        assert!(f.stable());
        assert_eq!(f.last_transition_ms(), 60);
    }

    #[test]
    fn short_pulse_is_rejected() {
        let mut f = DebounceFilter::new(false, 0);
        assert_eq!(f.update(true, 100, WINDOW), None);
        assert_eq!(f.update(false, 140, WINDOW), None);
        assert_eq!(f.update(false, 400, WINDOW), None);
        assert!(!f.stable());
    }

    #[test]
    fn bounce_restarts_window() {
        let mut f = DebounceFilter::new(false, 0);
        let mut edges = 0;
        // 10 ms bounce for 100 ms, then settle pressed.
        for step in 0..10u32 {
            let level = step % 2 == 0;
            if f.update(level, step * 10, WINDOW).is_some() {
                edges += 1;
            }
        }
        for t in (100..300).step_by(5) {
            if f.update(true, t, WINDOW).is_some() {
                edges += 1;
            }
        }
        assert_eq!(edges, 1);
        assert_eq!(f.last_transition_ms(), 150);
    }

    #[test]
    fn settle_commits_without_new_sample() {
        let mut f = DebounceFilter::new(false, 0);
        f.update(true, 10, WINDOW);
        assert_eq!(f.settle(30, WINDOW), None);
        assert_eq!(f.settle(60, WINDOW), Some(Edge::Pressed));
    }

    #[test]
    fn zero_window_commits_immediately() {
        let mut f = DebounceFilter::new(false, 0);
        assert_eq!(f.update(true, 5, 0), Some(Edge::Pressed));
    }

    #[test]
    fn window_survives_timer_wrap() {
        let start = u32::MAX - 20;
        let mut f = DebounceFilter::new(false, start);
        f.update(true, start, WINDOW);
        assert_eq!(f.update(true, start.wrapping_add(49), WINDOW), None);
        assert_eq!(
            f.update(true, start.wrapping_add(50), WINDOW),
            Some(Edge::Pressed)
        );
    }
}
