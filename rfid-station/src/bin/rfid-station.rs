// rfid-station/src/bin/rfid-station.rs

//! Firmware entry point for a Raspberry Pi with an MFRC522 on SPI0.
//!
//! Logging goes to stderr through `env_logger` (`RUST_LOG=debug` for card
//! traces); the operator console is the UART.

use log::info;
use rppal::gpio::Gpio;

use rfid_station::constants::{
    BAUD_RATE, IDLE_POLL_INTERVAL_MS, RESET_PIN_BCM, TRIGGER_PIN_BCM,
};
use rfid_station::device::rpi::{self, UartConsole};
use rfid_station::{Mfrc522, ModeFlag, Result, SpiRegisterBus, Station, StationConfig};

/// Raised by the trigger interrupt, lowered by the station after a write.
static WRITE_REQUEST: ModeFlag = ModeFlag::new();

fn main() -> Result<()> {
    env_logger::init();

    let gpio = Gpio::new()?;
    let _reset = rpi::power_up_reader(&gpio, RESET_PIN_BCM)?;

    let mut reader = Mfrc522::new(SpiRegisterBus::new(rpi::open_reader_spi()?));
    reader.init()?;
    info!("MFRC522 version {:#04x}", reader.version()?);

    let console = UartConsole::open(BAUD_RATE)?;
    let _trigger = rpi::attach_trigger(&gpio, TRIGGER_PIN_BCM, &WRITE_REQUEST)?;

    let config = StationConfig::default().poll_interval_ms(IDLE_POLL_INTERVAL_MS);
    let mut station = Station::with_config(reader, console, &WRITE_REQUEST, config);
    info!("station ready, scanning");
    station.run()
}
