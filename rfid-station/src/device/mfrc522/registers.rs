// rfid-station/src/device/mfrc522/registers.rs
//! MFRC522 register map, PCD commands and PICC command bytes
//!
//! Names follow the NXP datasheet (register names without the `Reg` suffix).
#![allow(missing_docs)]

#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Register {
    // Reserved = 0x00
    Command = 0x01,
    ComIEn = 0x02,
    DivIEn = 0x03,
    ComIrq = 0x04,
    DivIrq = 0x05,
    Error = 0x06,
    Status1 = 0x07,
    Status2 = 0x08,
    FifoData = 0x09,
    FifoLevel = 0x0A,
    WaterLevel = 0x0B,
    Control = 0x0C,
    BitFraming = 0x0D,
    Coll = 0x0E,
    Mode = 0x11,
    TxMode = 0x12,
    RxMode = 0x13,
    TxControl = 0x14,
    TxAsk = 0x15,
    TxSel = 0x16,
    RxSel = 0x17,
    RxThreshold = 0x18,
    Demod = 0x19,
    MfTx = 0x1C,
    MfRx = 0x1D,
    SerialSpeed = 0x1F,
    CrcResultHigh = 0x21,
    CrcResultLow = 0x22,
    ModWidth = 0x24,
    RfCfg = 0x26,
    GsN = 0x27,
    CwGsP = 0x28,
    ModGsP = 0x29,
    TMode = 0x2A,
    TPrescaler = 0x2B,
    TReloadHigh = 0x2C,
    TReloadLow = 0x2D,
    TCounterValHigh = 0x2E,
    TCounterValLow = 0x2F,
    Version = 0x37,
}

impl Register {
    pub fn addr(self) -> u8 {
        self as u8
    }
}

#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PcdCommand {
    Idle = 0x00,
    Mem = 0x01,
    GenerateRandomId = 0x02,
    CalcCrc = 0x03,
    Transmit = 0x04,
    NoCmdChange = 0x07,
    Receive = 0x08,
    Transceive = 0x0C,
    MfAuthent = 0x0E,
    SoftReset = 0x0F,
}

/// ISO/IEC 14443-3 and MIFARE Classic command bytes
pub mod picc {
    pub const REQA: u8 = 0x26;
    pub const HLTA: u8 = 0x50;
    /// Cascade tag: first UID byte of an incomplete cascade level
    pub const CT: u8 = 0x88;
    pub const SEL_CL1: u8 = 0x93;
    pub const SEL_CL2: u8 = 0x95;
    pub const SEL_CL3: u8 = 0x97;
    /// NVB for "send the whole UID part" (anticollision)
    pub const NVB_ANTICOLLISION: u8 = 0x20;
    /// NVB for a full select frame
    pub const NVB_SELECT: u8 = 0x70;
    pub const MF_AUTH_KEY_A: u8 = 0x60;
    pub const MF_READ: u8 = 0x30;
    pub const MF_WRITE: u8 = 0xA0;
    /// 4-bit MIFARE acknowledge
    pub const MF_ACK: u8 = 0x0A;
    /// SAK bit: UID not complete, next cascade level follows
    pub const SAK_CASCADE: u8 = 0x04;
}

// ComIrqReg bits
pub const IRQ_TIMER: u8 = 0x01;
pub const IRQ_IDLE: u8 = 0x10;
pub const IRQ_RX: u8 = 0x20;
/// Writing this to ComIrqReg clears all seven request bits
pub const IRQ_CLEAR_ALL: u8 = 0x7F;

// DivIrqReg bits
pub const DIV_IRQ_CRC: u8 = 0x04;

// ErrorReg bits
pub const ERR_PROTOCOL: u8 = 0x01;
pub const ERR_PARITY: u8 = 0x02;
pub const ERR_COLL: u8 = 0x08;
pub const ERR_BUFFER_OVFL: u8 = 0x10;

pub const STATUS2_MF_CRYPTO1_ON: u8 = 0x08;
pub const FIFO_FLUSH: u8 = 0x80;
pub const BIT_FRAMING_START_SEND: u8 = 0x80;
/// CollReg ValuesAfterColl
pub const COLL_VALUES_AFTER_COLL: u8 = 0x80;
/// CommandReg PowerDown: set while the soft reset is still running
pub const COMMAND_POWER_DOWN: u8 = 0x10;
pub const CONTROL_RX_LAST_BITS: u8 = 0x07;
pub const TX_CONTROL_ANTENNA: u8 = 0x03;
