// rfid-station/src/device/mfrc522/fake.rs

//! Register-level MFRC522 simulation for driver tests.
//!
//! Models the parts the driver touches: the register file, the FIFO, the
//! CRC coprocessor, MFAuthent and Transceive. The card side is a queue of
//! scripted replies consumed one per transceive.

use std::collections::VecDeque;

use super::registers::*;
use crate::Result;
use crate::device::bus::RegisterBus;

pub(crate) fn crc_a(data: &[u8]) -> [u8; 2] {
    let mut crc: u16 = 0x6363;
    for &b in data {
        let mut ch = b ^ (crc & 0x00FF) as u8;
        ch ^= ch << 4;
        crc = (crc >> 8) ^ ((ch as u16) << 8) ^ ((ch as u16) << 3) ^ ((ch as u16) >> 4);
    }
    crc.to_le_bytes()
}

/// What the card answers to the next transceive.
#[derive(Debug, Clone)]
pub(crate) enum Reply {
    /// Bytes plus valid bits of the last byte
    Frame(Vec<u8>, u8),
    /// Bytes received with a bit collision
    Collision(Vec<u8>),
}

pub(crate) struct FakeChip {
    regs: [u8; 0x40],
    fifo: VecDeque<u8>,
    replies: VecDeque<Reply>,
    /// Frames the card received, in order
    pub frames: Vec<Vec<u8>>,
    /// MFAuthent payloads, in order
    pub auths: Vec<Vec<u8>>,
    pub auth_ok: bool,
    pub version: u8,
}

impl FakeChip {
    pub fn new() -> Self {
        let mut chip = Self {
            regs: [0; 0x40],
            fifo: VecDeque::new(),
            replies: VecDeque::new(),
            frames: Vec::new(),
            auths: Vec::new(),
            auth_ok: true,
            version: 0x92,
        };
        chip.regs[Register::Version.addr() as usize] = chip.version;
        chip
    }

    pub fn reply(&mut self, reply: Reply) {
        self.replies.push_back(reply);
    }

    pub fn reg(&self, reg: Register) -> u8 {
        self.regs[reg.addr() as usize]
    }

    fn set(&mut self, reg: Register, value: u8) {
        self.regs[reg.addr() as usize] = value;
    }

    fn or(&mut self, reg: Register, mask: u8) {
        self.regs[reg.addr() as usize] |= mask;
    }

    fn start_command(&mut self, cmd: u8) {
        self.set(Register::Command, cmd);
        if cmd == PcdCommand::SoftReset as u8 {
            self.regs = [0; 0x40];
            self.fifo.clear();
            self.set(Register::Version, self.version);
        } else if cmd == PcdCommand::CalcCrc as u8 {
            let data: Vec<u8> = self.fifo.drain(..).collect();
            let [low, high] = crc_a(&data);
            self.set(Register::CrcResultLow, low);
            self.set(Register::CrcResultHigh, high);
            self.or(Register::DivIrq, DIV_IRQ_CRC);
        } else if cmd == PcdCommand::MfAuthent as u8 {
            let data: Vec<u8> = self.fifo.drain(..).collect();
            self.auths.push(data);
            if self.auth_ok {
                self.or(Register::Status2, STATUS2_MF_CRYPTO1_ON);
                self.or(Register::ComIrq, IRQ_IDLE);
            } else {
                self.or(Register::ComIrq, IRQ_TIMER);
            }
        }
    }

    /// StartSend with Transceive active.
    fn exchange(&mut self) {
        let frame: Vec<u8> = self.fifo.drain(..).collect();
        self.frames.push(frame);
        self.set(Register::Error, 0);
        match self.replies.pop_front() {
            Some(Reply::Frame(bytes, bits)) => {
                self.fifo.extend(bytes);
                self.set(Register::Control, bits & CONTROL_RX_LAST_BITS);
                self.or(Register::ComIrq, IRQ_RX | IRQ_IDLE);
            }
            Some(Reply::Collision(bytes)) => {
                self.fifo.extend(bytes);
                self.set(Register::Control, 0);
                self.set(Register::Error, ERR_COLL);
                // ErrIRq
                self.or(Register::ComIrq, IRQ_RX | IRQ_IDLE | 0x02);
            }
            None => self.or(Register::ComIrq, IRQ_TIMER),
        }
    }

    fn write_one(&mut self, reg: u8, value: u8) {
        match reg {
            r if r == Register::Command.addr() => self.start_command(value & 0x0F),
            r if r == Register::ComIrq.addr() || r == Register::DivIrq.addr() => {
                // Set1 bit selects set or clear of the marked bits
                let slot = &mut self.regs[r as usize];
                if value & 0x80 != 0 {
                    *slot |= value & 0x7F;
                } else {
                    *slot &= !(value & 0x7F);
                }
            }
            r if r == Register::FifoLevel.addr() => {
                if value & FIFO_FLUSH != 0 {
                    self.fifo.clear();
                }
            }
            r if r == Register::BitFraming.addr() => {
                self.regs[r as usize] = value & 0x7F;
                if value & BIT_FRAMING_START_SEND != 0
                    && self.reg(Register::Command) == PcdCommand::Transceive as u8
                {
                    self.exchange();
                }
            }
            r => self.regs[r as usize & 0x3F] = value,
        }
    }
}

impl RegisterBus for FakeChip {
    fn read(&mut self, reg: u8, value: &mut [u8]) -> Result<()> {
        for v in value.iter_mut() {
            *v = if reg == Register::FifoData.addr() {
                self.fifo.pop_front().unwrap_or(0)
            } else if reg == Register::FifoLevel.addr() {
                self.fifo.len() as u8
            } else {
                self.regs[reg as usize & 0x3F]
            };
        }
        Ok(())
    }

    fn write(&mut self, reg: u8, value: &[u8]) -> Result<()> {
        if reg == Register::FifoData.addr() {
            self.fifo.extend(value.iter().copied());
        } else {
            for &v in value {
                self.write_one(reg, v);
            }
        }
        Ok(())
    }
}

#[test]
fn crc_a_known_frames() {
    // HLTA as sent on the air, and the ISO/IEC 14443-3 example
    assert_eq!(crc_a(&[0x50, 0x00]), [0x57, 0xCD]);
    assert_eq!(crc_a(&[0x00, 0x00]), [0xA0, 0x1E]);
}
