// rfid-station/src/error.rs

use thiserror::Error;

use crate::types::StatusCode;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// A status reported by the card transport. Displays as the bare status
    /// name so it can be printed after a "... failed: " prefix.
    #[error("{0}")]
    Status(#[from] StatusCode),

    /// A UID that is not 4, 7 or 10 bytes long
    #[error("invalid uid length: {0} (expected 4, 7 or 10)")]
    InvalidUidLength(usize),

    /// A fixed-size value built from a slice of the wrong length
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Required length
        expected: usize,
        /// Length supplied
        actual: usize,
    },

    /// The register bus to the reader failed
    #[error("register bus error: {0}")]
    Bus(String),

    /// Console I/O failed
    #[error("console error: {0}")]
    Console(#[from] std::io::Error),

    /// A bounded wait ran out of polls
    #[error("wait gave up after {0} polls")]
    WaitExhausted(u64),

    /// A wait was ended through its cancel token
    #[error("operation cancelled")]
    Cancelled,

    // 実機 (Raspberry Pi) 向けは optional dependency にしている
    /// GPIO setup failed
    #[cfg(feature = "rpi")]
    #[error("gpio error: {0}")]
    Gpio(#[from] rppal::gpio::Error),

    /// SPI transfer failed
    #[cfg(feature = "rpi")]
    #[error("spi error: {0}")]
    Spi(#[from] rppal::spi::Error),

    /// UART setup or transfer failed
    #[cfg(feature = "rpi")]
    #[error("uart error: {0}")]
    Uart(#[from] rppal::uart::Error),
}

impl Error {
    /// The transport status carried by this error, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Status(code) => Some(*code),
            _ => None,
        }
    }
}

/// Crate-wide result type
pub type Result<T> = std::result::Result<T, Error>;
