// rfid-station/src/types.rs

use crate::Error;
use crate::constants::{BLOCK_LEN, DEFAULT_KEY, MAX_UID_LEN};
use derive_more::Display;
use std::convert::TryFrom;

/// Card UID - 4, 7 or 10 bytes (single/double/triple size)
///
/// With the `serde` feature a UID (de)serializes as its byte sequence, and
/// deserializing goes through the same length check as `TryFrom`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<u8>", into = "Vec<u8>"))]
pub struct Uid {
    bytes: [u8; MAX_UID_LEN],
    len: u8,
}

impl Uid {
    /// The UID bytes, cascade tags removed.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    /// Number of UID bytes (4, 7 or 10).
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Never true for a validated UID.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The four bytes used by MIFARE authentication (the last four).
    pub fn auth_bytes(&self) -> [u8; 4] {
        let b = self.as_bytes();
        let mut out = [0u8; 4];
        out.copy_from_slice(&b[b.len() - 4..]);
        out
    }

    /// Serial-monitor style report: `" 04 A1 ..."`
    pub fn to_report(&self) -> String {
        crate::utils::format_uid(self.as_bytes())
    }
}

impl TryFrom<&[u8]> for Uid {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        match bytes.len() {
            4 | 7 | 10 => {
                let mut arr = [0u8; MAX_UID_LEN];
                arr[..bytes.len()].copy_from_slice(bytes);
                Ok(Self {
                    bytes: arr,
                    len: bytes.len() as u8,
                })
            }
            other => Err(Error::InvalidUidLength(other)),
        }
    }
}

impl TryFrom<Vec<u8>> for Uid {
    type Error = Error;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        Self::try_from(bytes.as_slice())
    }
}

impl From<Uid> for Vec<u8> {
    fn from(uid: Uid) -> Self {
        uid.as_bytes().to_vec()
    }
}

impl std::fmt::Debug for Uid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Uid({:02x?})", self.as_bytes())
    }
}

/// BlockData (16 バイト)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockData([u8; BLOCK_LEN]);

impl BlockData {
    /// All-NUL block, as on a blank card.
    pub const EMPTY: Self = Self([0; BLOCK_LEN]);

    /// None
    pub fn from_bytes(bytes: [u8; BLOCK_LEN]) -> Self {
        Self(bytes)
    }

    /// The 16 raw bytes.
    pub fn as_bytes(&self) -> &[u8; BLOCK_LEN] {
        &self.0
    }

    /// Build a block from operator text: the first 16 bytes are copied,
    /// anything shorter is padded with NUL. Longer input is clipped silently.
    pub fn from_line(line: &[u8]) -> Self {
        let mut arr = [0u8; BLOCK_LEN];
        let n = line.len().min(BLOCK_LEN);
        arr[..n].copy_from_slice(&line[..n]);
        Self(arr)
    }

    /// A block carries data when its first byte is not NUL. Bytes 1..16 are
    /// not inspected.
    pub fn has_data(&self) -> bool {
        self.0[0] != 0
    }

    /// Spaced lower-case hex, for logs.
    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex_spaced(self.as_bytes())
    }
}

impl TryFrom<&[u8]> for BlockData {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != BLOCK_LEN {
            return Err(Error::InvalidLength {
                expected: BLOCK_LEN,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; BLOCK_LEN];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }
}

/// MIFARE Classic key (6 バイト)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MifareKey([u8; 6]);

impl MifareKey {
    /// `FF FF FF FF FF FF`
    pub const FACTORY_DEFAULT: Self = Self(DEFAULT_KEY);

    /// A key from its six bytes.
    pub const fn new(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    /// None
    pub fn as_bytes(&self) -> &[u8; 6] {
        &self.0
    }
}

impl Default for MifareKey {
    fn default() -> Self {
        Self::FACTORY_DEFAULT
    }
}

/// Sector/block pair of the MIFARE Classic 1K layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockAddress {
    /// Sector number
    pub sector: u8,
    /// Block within the sector
    pub block: u8,
}

impl BlockAddress {
    /// None
    pub const fn new(sector: u8, block: u8) -> Self {
        Self { sector, block }
    }

    /// Absolute block number as the transport numbers blocks
    pub fn absolute(&self) -> u8 {
        self.sector.wrapping_mul(4).wrapping_add(self.block)
    }
}

impl Default for BlockAddress {
    fn default() -> Self {
        Self::new(crate::constants::DATA_SECTOR, crate::constants::DATA_BLOCK)
    }
}

/// Failure statuses reported by the card transport. The display text is the
/// status name printed on the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusCode {
    /// Generic protocol or framing error
    #[display(fmt = "Error in communication.")]
    Error,
    /// More than one card answered
    #[display(fmt = "Collision detected.")]
    Collision,
    /// No answer within the chip timer
    #[display(fmt = "Timeout in communication.")]
    Timeout,
    /// Answer larger than the buffer
    #[display(fmt = "A buffer is not big enough.")]
    NoRoom,
    /// Driver bug
    #[display(fmt = "Internal error in the code. Should not happen.")]
    InternalError,
    /// Bad argument
    #[display(fmt = "Invalid argument.")]
    Invalid,
    /// CRC_A mismatch
    #[display(fmt = "The CRC_A does not match.")]
    CrcWrong,
    /// 4-bit NAK from the card
    #[display(fmt = "A MIFARE PICC responded with NAK.")]
    MifareNack,
}

impl std::error::Error for StatusCode {}
