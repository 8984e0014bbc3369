// rfid-station/src/prelude.rs

pub use crate::config::StationConfig;
pub use crate::console::Console;
pub use crate::device::{Mfrc522, RegisterBus, SpiRegisterBus};
pub use crate::flag::{CancelToken, ModeFlag};
pub use crate::station::{CardFailure, InputLine, Stage, Station, StepOutcome};
pub use crate::transport::CardTransport;
pub use crate::{BlockAddress, BlockData, Error, MifareKey, Result, StatusCode, Uid};

// Re-export small utilities for convenience
pub use crate::utils::{WaitBound, bytes_to_hex_spaced, format_uid, ms};
