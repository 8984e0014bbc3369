// rfid-station/src/lib.rs

//! rfid-station
//!
//! MIFARE Classic card station for an MFRC522 reader: in scan mode it reports
//! the UID and one fixed data block of every card presented; when the
//! write-request flag is raised it takes one line from the operator and
//! writes it into that block.
#![warn(missing_docs)]

/// Station settings
pub mod config;
/// Operator console
pub mod console;
/// Compile-time constants
pub mod constants;
/// Reader hardware
pub mod device;
/// Error type
pub mod error;
/// Write-request flag and cancel token
pub mod flag;
/// Common imports
pub mod prelude;
/// Scan and write control loop
pub mod station;
pub mod test_support;
/// Card transport abstraction
pub mod transport;
/// Value types
pub mod types;
/// Small helpers
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`
// and the newtypes in `types` are available for consumers and for the
// `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
