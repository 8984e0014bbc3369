// rfid-station/src/device/bus.rs

//! Register access for the MFRC522.
//!
//! The chip is driven through 6-bit register addresses. Over SPI the address
//! byte is `(reg << 1) & 0x7E`, with bit 7 set for reads. Reading several
//! bytes from the same register (the FIFO) repeats the address byte.

use embedded_hal::spi::{Error as _, SpiDevice};

use crate::{Error, Result};

/// Byte-level access to the reader's registers.
pub trait RegisterBus {
    /// Read `value.len()` bytes from `reg`, one register read per byte.
    fn read(&mut self, reg: u8, value: &mut [u8]) -> Result<()>;

    /// Write every byte of `value` to `reg` in a single burst.
    fn write(&mut self, reg: u8, value: &[u8]) -> Result<()>;
}

impl<T: RegisterBus + ?Sized> RegisterBus for Box<T> {
    fn read(&mut self, reg: u8, value: &mut [u8]) -> Result<()> {
        (**self).read(reg, value)
    }

    fn write(&mut self, reg: u8, value: &[u8]) -> Result<()> {
        (**self).write(reg, value)
    }
}

/// SPI address byte for reading `reg`.
pub fn read_address(reg: u8) -> u8 {
    0x80 | write_address(reg)
}

/// SPI address byte for writing `reg`.
pub fn write_address(reg: u8) -> u8 {
    (reg << 1) & 0x7E
}

/// [`RegisterBus`] over any `embedded-hal` SPI device (chip select handled
/// by the device).
pub struct SpiRegisterBus<SPI> {
    spi: SPI,
}

impl<SPI: SpiDevice> SpiRegisterBus<SPI> {
    /// Wrap an SPI device wired to the reader.
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Give back the SPI device.
    pub fn into_inner(self) -> SPI {
        self.spi
    }
}

fn bus_error<E: embedded_hal::spi::Error>(e: E) -> Error {
    Error::Bus(format!("spi: {:?}", e.kind()))
}

impl<SPI: SpiDevice> RegisterBus for SpiRegisterBus<SPI> {
    fn read(&mut self, reg: u8, value: &mut [u8]) -> Result<()> {
        if value.is_empty() {
            return Ok(());
        }
        // address repeated once per byte, then a dummy 0x00 to clock out the last one
        let mut buf = vec![read_address(reg); value.len() + 1];
        buf[value.len()] = 0;
        self.spi.transfer_in_place(&mut buf).map_err(bus_error)?;
        value.copy_from_slice(&buf[1..]);
        Ok(())
    }

    fn write(&mut self, reg: u8, value: &[u8]) -> Result<()> {
        // CS must stay asserted from the address byte to the last value byte
        let mut frame = Vec::with_capacity(value.len() + 1);
        frame.push(write_address(reg));
        frame.extend_from_slice(value);
        self.spi.write(&frame).map_err(bus_error)
    }
}
