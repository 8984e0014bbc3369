// rfid-station/src/device/mfrc522/mod.rs

//! MFRC522 reader driver.
//!
//! Implements just enough of ISO/IEC 14443-3 type A and MIFARE Classic to
//! back [`CardTransport`]: REQA, anticollision/select over up to three
//! cascade levels (no collision resolution), Key A authentication, 16-byte
//! block read and write, and HLTA.

use log::{debug, trace};

use crate::device::bus::RegisterBus;
use crate::transport::CardTransport;
use crate::types::{BlockData, MifareKey, StatusCode, Uid};
use crate::{Error, Result};

/// Register map and command bytes
pub mod registers;

#[cfg(test)]
mod fake;

use registers::*;

/// Upper bound for IRQ polling loops. The chip timer (about 25 ms after
/// `init`) normally ends a transceive well before this.
pub const DEFAULT_MAX_IRQ_POLLS: u32 = 2000;

/// Frame returned by the card after a PCD command.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PiccResponse {
    /// Received bytes, CRC_A included when it was checked
    pub data: Vec<u8>,
    /// Valid bits in the last byte, 0 means the whole byte
    pub valid_bits: u8,
}

fn status(code: StatusCode) -> Error {
    Error::Status(code)
}

/// MFRC522 reader on a [`RegisterBus`].
pub struct Mfrc522<B> {
    bus: B,
    max_polls: u32,
}

impl<B: RegisterBus> Mfrc522<B> {
    /// Wrap the bus. Call [`init`](Self::init) before talking to cards.
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            max_polls: DEFAULT_MAX_IRQ_POLLS,
        }
    }

    /// Override the IRQ polling bound (at least 1).
    pub fn with_max_polls(mut self, max_polls: u32) -> Self {
        self.max_polls = max_polls.max(1);
        self
    }

    /// The underlying bus.
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// The underlying bus, mutably.
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Give back the bus.
    pub fn into_bus(self) -> B {
        self.bus
    }

    // --- register helpers ---

    fn read_register(&mut self, reg: Register) -> Result<u8> {
        let mut value = [0u8];
        self.bus.read(reg.addr(), &mut value)?;
        Ok(value[0])
    }

    fn write_register(&mut self, reg: Register, value: u8) -> Result<()> {
        self.bus.write(reg.addr(), &[value])
    }

    fn set_bits(&mut self, reg: Register, mask: u8) -> Result<()> {
        let value = self.read_register(reg)?;
        self.write_register(reg, value | mask)
    }

    fn clear_bits(&mut self, reg: Register, mask: u8) -> Result<()> {
        let value = self.read_register(reg)?;
        self.write_register(reg, value & !mask)
    }

    fn command(&mut self, command: PcdCommand) -> Result<()> {
        self.write_register(Register::Command, command as u8)
    }

    // --- PCD ---

    /// Soft reset, timer and modulation setup, antenna on.
    pub fn init(&mut self) -> Result<()> {
        self.soft_reset()?;

        self.write_register(Register::TxMode, 0x00)?;
        self.write_register(Register::RxMode, 0x00)?;
        self.write_register(Register::ModWidth, 0x26)?;

        // TAuto, prescaler 0xA9 -> 40 kHz tick, reload 1000 -> 25 ms timeout
        self.write_register(Register::TMode, 0x80)?;
        self.write_register(Register::TPrescaler, 0xA9)?;
        self.write_register(Register::TReloadHigh, 0x03)?;
        self.write_register(Register::TReloadLow, 0xE8)?;

        // 100 % ASK, CRC preset 0x6363
        self.write_register(Register::TxAsk, 0x40)?;
        self.write_register(Register::Mode, 0x3D)?;

        self.antenna_on()?;
        debug!("mfrc522 initialised");
        Ok(())
    }

    fn soft_reset(&mut self) -> Result<()> {
        self.command(PcdCommand::SoftReset)?;
        for _ in 0..self.max_polls {
            if self.read_register(Register::Command)? & COMMAND_POWER_DOWN == 0 {
                return Ok(());
            }
        }
        Err(status(StatusCode::Timeout))
    }

    /// Enable both TX pins. No-op when already on.
    pub fn antenna_on(&mut self) -> Result<()> {
        let value = self.read_register(Register::TxControl)?;
        if value & TX_CONTROL_ANTENNA != TX_CONTROL_ANTENNA {
            self.write_register(Register::TxControl, value | TX_CONTROL_ANTENNA)?;
        }
        Ok(())
    }

    /// VersionReg. 0x91 / 0x92 for genuine chips, clones report other values.
    pub fn version(&mut self) -> Result<u8> {
        self.read_register(Register::Version)
    }

    /// CRC_A of `data`, computed by the chip's coprocessor. Returns the two
    /// bytes in transmission order (low first).
    pub fn calculate_crc(&mut self, data: &[u8]) -> Result<[u8; 2]> {
        self.command(PcdCommand::Idle)?;
        self.write_register(Register::DivIrq, DIV_IRQ_CRC)?;
        self.write_register(Register::FifoLevel, FIFO_FLUSH)?;
        self.bus.write(Register::FifoData.addr(), data)?;
        self.command(PcdCommand::CalcCrc)?;

        for _ in 0..self.max_polls {
            if self.read_register(Register::DivIrq)? & DIV_IRQ_CRC != 0 {
                self.command(PcdCommand::Idle)?;
                let low = self.read_register(Register::CrcResultLow)?;
                let high = self.read_register(Register::CrcResultHigh)?;
                return Ok([low, high]);
            }
        }
        Err(status(StatusCode::Timeout))
    }

    fn with_crc(&mut self, frame: &[u8]) -> Result<Vec<u8>> {
        let crc = self.calculate_crc(frame)?;
        let mut out = Vec::with_capacity(frame.len() + 2);
        out.extend_from_slice(frame);
        out.extend_from_slice(&crc);
        Ok(out)
    }

    /// Run `command` with `send` in the FIFO and collect the answer.
    ///
    /// `max_back` is the largest answer accepted (0 = do not read the FIFO).
    /// `tx_last_bits` is the number of bits sent from the last byte (0 = 8).
    /// With `check_crc` the trailing CRC_A of the answer is verified and
    /// stays in `data`.
    pub fn communicate_with_picc(
        &mut self,
        command: PcdCommand,
        wait_irq: u8,
        send: &[u8],
        max_back: usize,
        tx_last_bits: u8,
        check_crc: bool,
    ) -> Result<PiccResponse> {
        trace!("pcd {:?} -> {}", command, crate::utils::bytes_to_hex_spaced(send));

        self.command(PcdCommand::Idle)?;
        self.write_register(Register::ComIrq, IRQ_CLEAR_ALL)?;
        self.write_register(Register::FifoLevel, FIFO_FLUSH)?;
        self.bus.write(Register::FifoData.addr(), send)?;
        self.write_register(Register::BitFraming, tx_last_bits & CONTROL_RX_LAST_BITS)?;
        self.command(command)?;
        if command == PcdCommand::Transceive {
            self.set_bits(Register::BitFraming, BIT_FRAMING_START_SEND)?;
        }

        let mut completed = false;
        for _ in 0..self.max_polls {
            let irq = self.read_register(Register::ComIrq)?;
            if irq & wait_irq != 0 {
                completed = true;
                break;
            }
            if irq & IRQ_TIMER != 0 {
                return Err(status(StatusCode::Timeout));
            }
        }
        if !completed {
            return Err(status(StatusCode::Timeout));
        }

        let error = self.read_register(Register::Error)?;
        if error & (ERR_BUFFER_OVFL | ERR_PARITY | ERR_PROTOCOL) != 0 {
            return Err(status(StatusCode::Error));
        }

        let mut response = PiccResponse::default();
        if max_back > 0 {
            let level = self.read_register(Register::FifoLevel)? as usize;
            if level > max_back {
                return Err(status(StatusCode::NoRoom));
            }
            response.data = vec![0u8; level];
            self.bus.read(Register::FifoData.addr(), &mut response.data)?;
            response.valid_bits = self.read_register(Register::Control)? & CONTROL_RX_LAST_BITS;
        }

        if error & ERR_COLL != 0 {
            return Err(status(StatusCode::Collision));
        }

        if check_crc && !response.data.is_empty() {
            let data = &response.data;
            // a lone 4-bit answer is a MIFARE NAK
            if data.len() == 1 && response.valid_bits == 4 {
                return Err(status(StatusCode::MifareNack));
            }
            if data.len() < 2 || response.valid_bits != 0 {
                return Err(status(StatusCode::CrcWrong));
            }
            let (payload, crc) = data.split_at(data.len() - 2);
            if self.calculate_crc(payload)? != crc {
                return Err(status(StatusCode::CrcWrong));
            }
        }

        trace!("picc <- {}", crate::utils::bytes_to_hex_spaced(&response.data));
        Ok(response)
    }

    /// [`communicate_with_picc`](Self::communicate_with_picc) with the Transceive command.
    pub fn transceive(
        &mut self,
        send: &[u8],
        max_back: usize,
        tx_last_bits: u8,
        check_crc: bool,
    ) -> Result<PiccResponse> {
        self.communicate_with_picc(
            PcdCommand::Transceive,
            IRQ_RX | IRQ_IDLE,
            send,
            max_back,
            tx_last_bits,
            check_crc,
        )
    }

    // --- PICC ---

    /// REQA (7-bit short frame). Returns the ATQA.
    pub fn request_a(&mut self) -> Result<[u8; 2]> {
        self.clear_bits(Register::Coll, COLL_VALUES_AFTER_COLL)?;
        let resp = self.transceive(&[picc::REQA], 2, 7, false)?;
        if resp.data.len() != 2 || resp.valid_bits != 0 {
            return Err(status(StatusCode::Error));
        }
        Ok([resp.data[0], resp.data[1]])
    }

    /// Anticollision and select through the cascade levels. A collision
    /// (more than one card) is reported, not resolved.
    pub fn select(&mut self) -> Result<Uid> {
        self.clear_bits(Register::Coll, COLL_VALUES_AFTER_COLL)?;
        let mut uid = Vec::with_capacity(crate::constants::MAX_UID_LEN);

        for sel in [picc::SEL_CL1, picc::SEL_CL2, picc::SEL_CL3] {
            let resp = self.transceive(&[sel, picc::NVB_ANTICOLLISION], 5, 0, false)?;
            if resp.data.len() != 5 || resp.valid_bits != 0 {
                return Err(status(StatusCode::Error));
            }
            let part = [resp.data[0], resp.data[1], resp.data[2], resp.data[3]];
            let bcc = resp.data[4];
            if part.iter().fold(0u8, |acc, b| acc ^ b) != bcc {
                debug!("cascade level {:#04x}: bcc mismatch", sel);
                return Err(status(StatusCode::Error));
            }

            let mut frame = vec![sel, picc::NVB_SELECT];
            frame.extend_from_slice(&part);
            frame.push(bcc);
            let frame = self.with_crc(&frame)?;
            let sak = self.transceive(&frame, 3, 0, true)?;
            if sak.data.len() != 3 || sak.valid_bits != 0 {
                return Err(status(StatusCode::Error));
            }
            let sak = sak.data[0];

            let cascade = part[0] == picc::CT;
            if cascade {
                uid.extend_from_slice(&part[1..]);
            } else {
                uid.extend_from_slice(&part);
            }

            if sak & picc::SAK_CASCADE == 0 {
                debug!("selected, sak {:#04x}", sak);
                return Uid::try_from(&uid[..]);
            }
            if !cascade {
                // SAK asks for another level but no cascade tag was sent
                return Err(status(StatusCode::Error));
            }
        }

        Err(status(StatusCode::InternalError))
    }

    /// MIFARE Classic authentication with key A. On success the chip keeps
    /// the Crypto1 session until [`stop_crypto`](Self::stop_crypto).
    pub fn authenticate_key_a(&mut self, block: u8, key: &MifareKey, uid: &Uid) -> Result<()> {
        let mut send = Vec::with_capacity(12);
        send.push(picc::MF_AUTH_KEY_A);
        send.push(block);
        send.extend_from_slice(key.as_bytes());
        send.extend_from_slice(&uid.auth_bytes());
        self.communicate_with_picc(PcdCommand::MfAuthent, IRQ_IDLE, &send, 0, 0, false)?;
        Ok(())
    }

    /// MIFARE READ of one block; the answer CRC_A is checked.
    pub fn read_block(&mut self, block: u8) -> Result<BlockData> {
        let frame = self.with_crc(&[picc::MF_READ, block])?;
        let resp = self.transceive(&frame, 18, 0, true)?;
        if resp.data.len() != 18 {
            return Err(status(StatusCode::Error));
        }
        BlockData::try_from(&resp.data[..16])
    }

    /// Two-phase MIFARE write: command, then the 16 data bytes, each acked.
    pub fn write_block(&mut self, block: u8, data: &BlockData) -> Result<()> {
        self.mifare_transceive(&[picc::MF_WRITE, block])?;
        self.mifare_transceive(data.as_bytes())
    }

    fn mifare_transceive(&mut self, send: &[u8]) -> Result<()> {
        let frame = self.with_crc(send)?;
        let resp = self.transceive(&frame, 1, 0, false)?;
        if resp.data.len() != 1 || resp.valid_bits != 4 {
            return Err(status(StatusCode::Error));
        }
        if resp.data[0] != picc::MF_ACK {
            return Err(status(StatusCode::MifareNack));
        }
        Ok(())
    }

    /// HLTA. The card must stay silent; a timeout is the success case.
    pub fn halt(&mut self) -> Result<()> {
        let frame = self.with_crc(&[picc::HLTA, 0x00])?;
        match self.transceive(&frame, 0, 0, false) {
            Err(Error::Status(StatusCode::Timeout)) => Ok(()),
            Ok(_) => Err(status(StatusCode::Error)),
            Err(e) => Err(e),
        }
    }

    /// Leave the Crypto1 session (clears MFCrypto1On).
    pub fn stop_crypto(&mut self) -> Result<()> {
        self.clear_bits(Register::Status2, STATUS2_MF_CRYPTO1_ON)
    }

    /// Back to 106 kBd, then REQA.
    fn probe(&mut self) -> Result<[u8; 2]> {
        self.write_register(Register::TxMode, 0x00)?;
        self.write_register(Register::RxMode, 0x00)?;
        self.write_register(Register::ModWidth, 0x26)?;
        self.request_a()
    }
}

impl<B: RegisterBus> CardTransport for Mfrc522<B> {
    fn is_new_card_present(&mut self) -> bool {
        match self.probe() {
            Ok(_) | Err(Error::Status(StatusCode::Collision)) => true,
            Err(Error::Status(_)) => false,
            Err(e) => {
                debug!("presence probe failed: {}", e);
                false
            }
        }
    }

    fn read_card_serial(&mut self) -> Result<Uid> {
        self.select()
    }

    fn authenticate(&mut self, block: u8, key: &MifareKey, uid: &Uid) -> Result<()> {
        self.authenticate_key_a(block, key, uid)
    }

    fn mifare_read(&mut self, block: u8) -> Result<BlockData> {
        self.read_block(block)
    }

    fn mifare_write(&mut self, block: u8, data: &BlockData) -> Result<()> {
        self.write_block(block, data)
    }

    fn halt_a(&mut self) -> Result<()> {
        self.halt()
    }

    fn stop_crypto1(&mut self) -> Result<()> {
        self.stop_crypto()
    }
}
