//! UARTE transmit side for a DFPlayer Mini.

use embassy_nrf::uarte::{self, Baudrate, Parity, UarteTx};
use rigkontrol::player::{Frame, FrameSink};

/// 9600 8N1, as the module expects.
pub fn player_config() -> uarte::Config {
    let mut config = uarte::Config::default();
    config.parity = Parity::EXCLUDED;
    config.baudrate = Baudrate::BAUD9600;
    config
}

pub struct UartSink<'d, T: uarte::Instance> {
    tx: UarteTx<'d, T>,
}

impl<'d, T: uarte::Instance> UartSink<'d, T> {
    pub fn new(tx: UarteTx<'d, T>) -> Self {
        Self { tx }
    }
}

impl<T: uarte::Instance> FrameSink for UartSink<'_, T> {
    type Error = uarte::Error;

    fn send(&mut self, frame: &Frame) -> Result<(), Self::Error> {
        // Frames are built on the stack, so the buffer is in RAM for EasyDMA.
        self.tx.blocking_write(frame.bytes())
    }
}
