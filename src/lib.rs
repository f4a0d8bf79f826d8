//! Host-testable core of rigkontrol.
//!
//! Everything here is pure logic with no hardware access: debounced
//! button channels and gesture detection, the interrupt handoff
//! primitive, the status document, and the DFPlayer protocol. The
//! embedded binary (`main.rs`) supplies the nRF52840 input source and
//! UART transport.
//!
//! Usage: `cargo test --lib` (host) or
//! `cargo build --release --features embedded --target thumbv7em-none-eabihf`.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod controller;
pub mod input;
pub mod player;
pub mod status;
