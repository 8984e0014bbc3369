// rfid-station/src/device/rpi.rs

//! Raspberry Pi wiring: MFRC522 on SPI0/CE0, RST and the write-request
//! button on GPIO, operator console on the primary UART.

use std::thread;
use std::time::Duration;

use log::{debug, info};
use rppal::gpio::{Gpio, InputPin, OutputPin, Trigger};
use rppal::spi::{Bus, Mode, SimpleHalSpiDevice, SlaveSelect, Spi};
use rppal::uart::{Parity, Uart};

use crate::Result;
use crate::console::Console;
use crate::constants::SPI_CLOCK_HZ;
use crate::flag::ModeFlag;
use crate::utils::ms;

/// SPI0 / CE0 as an `embedded-hal` device, ready for
/// [`SpiRegisterBus`](crate::device::SpiRegisterBus).
pub fn open_reader_spi() -> Result<SimpleHalSpiDevice> {
    let spi = Spi::new(Bus::Spi0, SlaveSelect::Ss0, SPI_CLOCK_HZ, Mode::Mode0)?;
    Ok(SimpleHalSpiDevice::new(spi))
}

/// Pulse the reader's RST line and give the oscillator time to start.
/// The returned pin must be kept alive; dropping it leaves RST high.
pub fn power_up_reader(gpio: &Gpio, pin: u8) -> Result<OutputPin> {
    let mut reset = gpio.get(pin)?.into_output();
    reset.set_reset_on_drop(false);
    reset.set_low();
    thread::sleep(ms(1));
    reset.set_high();
    thread::sleep(ms(50));
    debug!("reader reset on bcm {}", pin);
    Ok(reset)
}

/// Raise `flag` on every falling edge of `pin` (button to ground, internal
/// pull-up). The handler runs on rppal's interrupt thread and only touches
/// the flag.
pub fn attach_trigger(gpio: &Gpio, pin: u8, flag: &'static ModeFlag) -> Result<InputPin> {
    let mut input = gpio.get(pin)?.into_input_pullup();
    input.set_async_interrupt(Trigger::FallingEdge, move |_| flag.raise())?;
    info!("write request trigger on bcm {}", pin);
    Ok(input)
}

/// Operator console on the primary UART, 8N1. Reads never block.
pub struct UartConsole {
    uart: Uart,
}

impl UartConsole {
    /// Open the primary UART at `baud_rate`.
    pub fn open(baud_rate: u32) -> Result<Self> {
        let mut uart = Uart::new(baud_rate, Parity::None, 8, 1)?;
        uart.set_read_mode(0, Duration::ZERO)?;
        uart.set_write_mode(true)?;
        Ok(Self { uart })
    }
}

impl Console for UartConsole {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        let mut rest = bytes;
        while !rest.is_empty() {
            let n = self.uart.write(rest)?;
            rest = &rest[n..];
        }
        Ok(())
    }

    fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8];
        match self.uart.read(&mut byte)? {
            0 => Ok(None),
            _ => Ok(Some(byte[0])),
        }
    }
}
