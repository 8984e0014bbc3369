// rfid-station/src/device/mod.rs

/// Register access over SPI
pub mod bus;
/// The MFRC522 driver
pub mod mfrc522;
/// Raspberry Pi wiring
#[cfg(feature = "rpi")]
pub mod rpi;

pub use bus::{RegisterBus, SpiRegisterBus};
pub use mfrc522::Mfrc522;
