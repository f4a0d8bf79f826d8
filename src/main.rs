//! rigkontrol firmware for nRF52840.
//!
//! Four buttons drive two DFPlayer Mini modules; button state and a
//! toggle flag are reported as a JSON status document over RTT.
//!
//! ## Tasks
//!
//! - **input**: ticks the channel registry, turns presses into player
//!   requests, long-press on S1 flips the toggle flag
//! - **player**: owns both UARTE links and applies requests
//! - **status**: renders the status document once per interval
//! - **led**: mirrors the toggle flag on the status LED

#![no_std]
#![no_main]

mod error;
mod nrf;

use defmt::{info, warn};
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Level, Output, OutputDrive};
use embassy_nrf::uarte::{self, UarteTx};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{Duration, Instant, Ticker, Timer};
use {defmt_rtt as _, panic_probe as _};

use rigkontrol::config::{
    BUTTON_COUNT, BUTTON_PINS, BUTTON_PULLUP, MAX_CHANNELS, PLAYER_DEFAULT_VOLUME,
    PLAYER_RESET_SETTLE_MS, STATUS_JSON_CAPACITY, STATUS_REPORT_INTERVAL_MS, TICK_PERIOD_MS,
    TOGGLE_CHANNEL,
};
use rigkontrol::controller::{self, AudioController, Request, DEFAULT_BINDINGS};
use rigkontrol::input::{Capability, ChannelRegistry, Pull};
use rigkontrol::player::{FrameSink, Mp3Player};
use rigkontrol::status::StatusBoard;

use crate::error::Error;
use crate::nrf::gpiote::{NrfInput, PinChangeHandler};
use crate::nrf::uart::{player_config, UartSink};

bind_interrupts!(struct Irqs {
    GPIOTE => PinChangeHandler;
    UARTE0_UART0 => uarte::InterruptHandler<peripherals::UARTE0>;
    UARTE1 => uarte::InterruptHandler<peripherals::UARTE1>;
});

type Registry = ChannelRegistry<NrfInput, MAX_CHANNELS>;
type Player<T> = Mp3Player<UartSink<'static, T>>;

/// Stable button levels and the toggle flag, shared with status/LED.
static STATUS: StatusBoard<BUTTON_COUNT> = StatusBoard::new();

/// Player requests from the input task.
static REQUESTS: Channel<CriticalSectionRawMutex, Request, 8> = Channel::new();

fn now_ms() -> u32 {
    Instant::now().as_millis() as u32
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("rigkontrol starting");

    let registry = Registry::init(
        NrfInput::new(),
        &BUTTON_PINS,
        Pull::from_pullup(BUTTON_PULLUP),
        now_ms(),
    );
    for idx in 0..registry.count() {
        let pin = registry.pin(idx).unwrap_or_default();
        match registry.capability(idx) {
            Some(Capability::Interrupt { line, .. }) => {
                info!("S{}: pin {} on GPIOTE line {}", idx + 1, pin, line)
            }
            _ => info!("S{}: pin {} polled", idx + 1, pin),
        }
    }

    let p0 = Mp3Player::new(
        UartSink::new(UarteTx::new(p.UARTE0, Irqs, p.P1_01, player_config())),
        true,
    );
    let p1 = Mp3Player::new(
        UartSink::new(UarteTx::new(p.UARTE1, Irqs, p.P1_03, player_config())),
        true,
    );

    // nRF52840-DK LED1, active-low.
    let led = Output::new(p.P0_13, Level::High, OutputDrive::Standard);

    spawner.must_spawn(input_task(registry));
    spawner.must_spawn(player_task(p0, p1));
    spawner.must_spawn(status_task());
    spawner.must_spawn(led_task(led));
}

#[embassy_executor::task]
async fn input_task(mut registry: Registry) -> ! {
    let controller = AudioController::new(&DEFAULT_BINDINGS);
    let mut ticker = Ticker::every(Duration::from_millis(TICK_PERIOD_MS));

    loop {
        registry.update(now_ms(), STATUS.levels());

        for request in controller.poll(&mut registry) {
            if REQUESTS.try_send(request).is_err() {
                warn!("player queue full, dropping {}", request);
            }
        }

        if registry.was_long_pressed(TOGGLE_CHANNEL) {
            info!("toggle -> {}", STATUS.toggle());
        }
        for idx in 0..registry.count() {
            if registry.was_double_clicked(idx) {
                info!("S{}: double-click", idx + 1);
            }
        }

        ticker.next().await;
    }
}

fn start<T: FrameSink>(player: &mut Mp3Player<T>) -> Result<(), T::Error> {
    player.begin(false)?;
    player.set_volume(PLAYER_DEFAULT_VOLUME)
}

#[embassy_executor::task]
async fn player_task(
    mut p0: Player<peripherals::UARTE0>,
    mut p1: Player<peripherals::UARTE1>,
) -> ! {
    for (idx, reset) in [p0.begin(true), p1.begin(true)].into_iter().enumerate() {
        if let Err(e) = reset {
            warn!("player {}: reset failed: {}", idx, e);
        }
    }
    Timer::after_millis(PLAYER_RESET_SETTLE_MS).await;
    for (idx, result) in [start(&mut p0), start(&mut p1)].into_iter().enumerate() {
        if let Err(e) = result {
            warn!("player {}: setup failed: {}", idx, e);
        }
    }

    loop {
        let request = REQUESTS.receive().await;
        let result: Result<(), Error> = match request.player {
            0 => controller::apply(&mut p0, request.action).map_err(Error::from),
            1 => controller::apply(&mut p1, request.action).map_err(Error::from),
            n => Err(Error::NoSuchPlayer(n)),
        };
        if let Err(e) = result {
            warn!("player request {} failed: {}", request, e);
        }
    }
}

#[embassy_executor::task]
async fn status_task() -> ! {
    let started = Instant::now();
    let mut ticker = Ticker::every(Duration::from_millis(STATUS_REPORT_INTERVAL_MS));

    loop {
        ticker.next().await;
        let mut doc: heapless::String<STATUS_JSON_CAPACITY> = heapless::String::new();
        match STATUS
            .render_json(started.elapsed().as_millis(), BUTTON_COUNT, &mut doc)
            .map_err(Error::from)
        {
            Ok(()) => info!("status {}", doc.as_str()),
            Err(e) => warn!("status: {}", e),
        }
    }
}

#[embassy_executor::task]
async fn led_task(mut led: Output<'static>) -> ! {
    let mut ticker = Ticker::every(Duration::from_millis(20));
    loop {
        if STATUS.toggle_state() {
            led.set_low();
        } else {
            led.set_high();
        }
        ticker.next().await;
    }
}
