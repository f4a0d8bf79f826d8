//! nRF52840 glue: GPIO input source and UART transport.

pub mod gpiote;
pub mod uart;
