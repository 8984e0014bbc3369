// rfid-station/src/constants.rs
//! Compile-time configuration shared across the crate

/// Sector holding the application block
pub const DATA_SECTOR: u8 = 1;

/// Block within the sector; absolute address is `sector * 4 + block`
pub const DATA_BLOCK: u8 = 4;

/// Payload size of one MIFARE Classic block
pub const BLOCK_LEN: usize = 16;

/// Factory-default MIFARE key (Key A and Key B)
pub const DEFAULT_KEY: [u8; 6] = [0xFF; 6];

/// Longest UID a card can report (triple size)
pub const MAX_UID_LEN: usize = 10;

/// Serial console line ending (serial monitor convention)
pub const LINE_ENDING: &[u8] = b"\r\n";

/// Console baud rate
pub const BAUD_RATE: u32 = 9600;

/// BCM pin wired to the MFRC522 RST line
pub const RESET_PIN_BCM: u8 = 25;

/// BCM pin wired to the write-request button (pull-up, active low)
pub const TRIGGER_PIN_BCM: u8 = 27;

/// SPI clock used for the MFRC522
pub const SPI_CLOCK_HZ: u32 = 1_000_000;

/// Sleep after an idle loop iteration on hosted builds, in milliseconds
pub const IDLE_POLL_INTERVAL_MS: u64 = 5;
