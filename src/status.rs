//! Status document and toggle flag shared with the reporting side.
//!
//! The input task publishes each channel's stable level into
//! [`StatusBoard::levels`]; readers only ever see these atomics and
//! the separately owned toggle flag, never channel internals.
//!
//! Document layout (single line, no whitespace):
//! ```text
//! {"uptime_ms":1234,"led":false,"s1":true,"s2":false,...}
//! ```

use core::fmt::{self, Write};
use core::sync::atomic::{AtomicBool, Ordering};

pub struct StatusBoard<const N: usize> {
    levels: [AtomicBool; N],
    toggle: AtomicBool,
}

impl<const N: usize> Default for StatusBoard<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> StatusBoard<N> {
    #[allow(clippy::declare_interior_mutable_const)]
    const RELEASED: AtomicBool = AtomicBool::new(false);

    pub const fn new() -> Self {
        Self {
            levels: [Self::RELEASED; N],
            toggle: AtomicBool::new(false),
        }
    }

    /// Observer buffer, index-aligned with channel order.
    pub fn levels(&self) -> &[AtomicBool] {
        &self.levels
    }

    pub fn level(&self, idx: usize) -> bool {
        self.levels
            .get(idx)
            .is_some_and(|l| l.load(Ordering::Relaxed))
    }

    /// Flip the toggle flag and return its new value.
    pub fn toggle(&self) -> bool {
        !self.toggle.fetch_xor(true, Ordering::AcqRel)
    }

    pub fn toggle_state(&self) -> bool {
        self.toggle.load(Ordering::Acquire)
    }

    /// Write the status document for the first `count` channels.
    pub fn render_json<W: Write>(&self, uptime_ms: u64, count: usize, out: &mut W) -> fmt::Result {
        write!(
            out,
            "{{\"uptime_ms\":{},\"led\":{}",
            uptime_ms,
            self.toggle_state()
        )?;
        for (i, level) in self.levels.iter().take(count).enumerate() {
            write!(out, ",\"s{}\":{}", i + 1, level.load(Ordering::Relaxed))?;
        }
        out.write_char('}')
    }
}
