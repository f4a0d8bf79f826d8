//! Register-level button input with GPIOTE pin-change interrupts.
//!
//! Each button pin gets one GPIOTE IN channel in toggle mode while
//! channels last; the remaining pins stay poll-only. The GPIOTE
//! handler only clears the event, samples the pin, and records into
//! [`PIN_CHANGES`]. Debouncing happens in the input task.
//!
//! Pins are addressed in PSEL numbering (`port * 32 + pin`) and are
//! configured through the PAC, so the button pins must not also be
//! handed to an embassy GPIO driver.

use core::sync::atomic::{AtomicU8, Ordering};

use defmt::debug;
use embassy_nrf::interrupt::{self, typelevel, InterruptExt, Priority};
use embassy_nrf::pac;
use embassy_nrf::pac::gpio::vals as gpio_vals;
use embassy_nrf::pac::gpiote::vals as gpiote_vals;
use embassy_time::Instant;
use rigkontrol::config::INTERRUPT_LINES;
use rigkontrol::input::{FastRead, InputSource, InterruptBridge, InterruptLine, PinId, Pull};

/// Change notices from the GPIOTE handler to the input task.
pub static PIN_CHANGES: InterruptBridge<INTERRUPT_LINES> = InterruptBridge::new();

/// Bit per armed GPIOTE channel.
static ARMED: AtomicU8 = AtomicU8::new(0);

#[allow(clippy::declare_interior_mutable_const)]
const NO_PIN: AtomicU8 = AtomicU8::new(0);

/// Pin bound to each GPIOTE channel.
static LINE_PINS: [AtomicU8; INTERRUPT_LINES] = [NO_PIN; INTERRUPT_LINES];

fn port(index: u8) -> pac::gpio::Gpio {
    if index == 0 {
        pac::P0
    } else {
        pac::P1
    }
}

fn fast_for(pin: PinId) -> FastRead {
    FastRead {
        port: pin / 32,
        mask: 1u32 << (pin % 32),
    }
}

fn read_fast(fast: FastRead) -> bool {
    port(fast.port).in_().read().0 & fast.mask != 0
}

/// GPIOTE interrupt handler. Bound in `main.rs`.
pub struct PinChangeHandler;

impl typelevel::Handler<typelevel::GPIOTE> for PinChangeHandler {
    unsafe fn on_interrupt() {
        let g = pac::GPIOTE;
        let armed = ARMED.load(Ordering::Relaxed);
        let now_ms = Instant::now().as_millis() as u32;

        for line in 0..INTERRUPT_LINES {
            if armed & (1 << line) == 0 || g.events_in(line).read() == 0 {
                continue;
            }
            g.events_in(line).write_value(0);
            let pin = LINE_PINS[line].load(Ordering::Relaxed);
            PIN_CHANGES.record(line, read_fast(fast_for(pin)), now_ms);
        }
    }
}

/// Button input backed by the P0/P1 registers and GPIOTE.
pub struct NrfInput {
    next_line: usize,
}

impl NrfInput {
    pub const fn new() -> Self {
        Self { next_line: 0 }
    }
}

impl InputSource for NrfInput {
    fn configure(&mut self, pin: PinId, pull: Pull) {
        let fast = fast_for(pin);
        port(fast.port).pin_cnf((pin % 32) as usize).write(|w| {
            w.set_dir(gpio_vals::Dir::INPUT);
            w.set_input(gpio_vals::Input::CONNECT);
            w.set_pull(match pull {
                Pull::Up => gpio_vals::Pull::PULLUP,
                Pull::None => gpio_vals::Pull::DISABLED,
            });
            w.set_drive(gpio_vals::Drive::S0S1);
            w.set_sense(gpio_vals::Sense::DISABLED);
        });
    }

    fn read(&mut self, pin: PinId) -> bool {
        read_fast(fast_for(pin))
    }

    fn listen(&mut self, pin: PinId) -> Option<InterruptLine> {
        if self.next_line >= INTERRUPT_LINES {
            debug!("pin {}: no free GPIOTE channel", pin);
            return None;
        }
        let line = self.next_line;
        self.next_line += 1;

        let g = pac::GPIOTE;
        g.config(line).write(|w| {
            w.set_mode(gpiote_vals::Mode::EVENT);
            w.set_polarity(gpiote_vals::Polarity::TOGGLE);
            w.set_port(pin >= 32);
            w.set_psel(pin % 32);
        });
        g.events_in(line).write_value(0);

        LINE_PINS[line].store(pin, Ordering::Relaxed);
        ARMED.fetch_or(1 << line, Ordering::Relaxed);

        Some(InterruptLine {
            line: line as u8,
            // One group per GPIOTE channel: the INTEN bit.
            group: line as u8,
            fast: fast_for(pin),
        })
    }

    fn enable_groups(&mut self, groups: u32) {
        pac::GPIOTE.intenset().write(|w| w.0 = groups);
        interrupt::GPIOTE.set_priority(Priority::P2);
        unsafe { interrupt::GPIOTE.enable() };
    }

    fn fast_read(&mut self, fast: FastRead) -> bool {
        read_fast(fast)
    }

    fn take_changed(&mut self) -> bool {
        PIN_CHANGES.take_changed()
    }
}
