// rfid-station/src/station/mod.rs

use std::thread;

use log::{debug, warn};

use crate::config::StationConfig;
use crate::console::Console;
use crate::flag::{CancelToken, ModeFlag};
use crate::transport::CardTransport;
use crate::types::{BlockData, Uid};
use crate::{Error, Result};

/// Operator line collection
pub mod input;
mod scan;
mod write;

pub use input::InputLine;

const MSG_SERIAL_FAILED: &str = "Read card serial failed! Try again";
const MSG_READING: &str = "Card detected. Reading data...";
const MSG_NO_DATA: &str = "No data from card!";
const MSG_DATA_PREFIX: &str = "Data from card : ";
const MSG_ENTER_DATA: &str = "Please enter the data you want to write to the card:";
const MSG_ECHO_PREFIX: &str = "Data to write: ";
const MSG_PLACE_CARD: &str = "Place the card you want to write to near the reader";
const MSG_WRITING: &str = "Card detected. Writing data...";
const MSG_WRITTEN: &str = "Data written successfully!";

/// Card operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Key A authentication
    Authenticate,
    /// Block read
    Read,
    /// Block write
    Write,
}

impl Stage {
    fn label(&self) -> &'static str {
        match self {
            Stage::Authenticate => "Authentication",
            Stage::Read => "Read",
            Stage::Write => "Write",
        }
    }
}

/// A reported card failure: which stage, and the transport's status text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardFailure {
    /// Operation that failed
    pub stage: Stage,
    /// Status name as printed
    pub message: String,
}

/// What a single [`Station::step`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Scan mode, nothing in the field.
    NoCard,
    /// Scan mode, a card answered but its UID could not be read.
    SerialFailed,
    /// Scan mode, UID reported; the block read may have failed.
    Scanned {
        /// UID of the card
        uid: Uid,
        /// Block content, or the reported failure
        block: std::result::Result<BlockData, CardFailure>,
    },
    /// Write mode completed a write attempt.
    Written {
        /// UID of the card written to
        uid: Uid,
        /// Block built from the operator line
        block: BlockData,
        /// Outcome of authentication and write
        result: std::result::Result<(), CardFailure>,
    },
}

/// The card station control loop.
///
/// Each [`step`](Station::step) looks at the write-request flag once and runs
/// exactly one of the scan or write cycles. The flag is the only state shared
/// with the trigger.
pub struct Station<'f, T, C> {
    transport: T,
    console: C,
    flag: &'f ModeFlag,
    config: StationConfig,
}

impl<'f, T, C> Station<'f, T, C>
where
    T: CardTransport,
    C: Console,
{
    /// A station with the firmware configuration.
    pub fn new(transport: T, console: C, flag: &'f ModeFlag) -> Self {
        Self::with_config(transport, console, flag, StationConfig::default())
    }

    /// A station with an explicit configuration.
    pub fn with_config(transport: T, console: C, flag: &'f ModeFlag, config: StationConfig) -> Self {
        Self {
            transport,
            console,
            flag,
            config,
        }
    }

    /// One main-loop iteration.
    ///
    /// Card failures are reported on the console and returned inside the
    /// outcome; only console errors and exhausted/cancelled waits come back as
    /// `Err`.
    pub fn step(&mut self) -> Result<StepOutcome> {
        if self.flag.is_raised() {
            debug!("write request pending, entering write mode");
            self.write_cycle()
        } else {
            self.scan_cycle()
        }
    }

    /// Run forever. Returns only on an error `step` could not absorb.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.iterate()?;
        }
    }

    /// Run until `token` is cancelled. The token also aborts the blocking
    /// waits of a write cycle in progress.
    pub fn run_until(&mut self, token: &CancelToken) -> Result<()> {
        let saved = self.config.clone();
        self.config = saved.clone().cancel_with(token);
        let result = loop {
            if token.is_cancelled() {
                break Ok(());
            }
            match self.iterate() {
                Ok(()) => {}
                Err(Error::Cancelled) => break Ok(()),
                Err(e) => break Err(e),
            }
        };
        self.config = saved;
        result
    }

    fn iterate(&mut self) -> Result<()> {
        let outcome = self.step()?;
        if outcome == StepOutcome::NoCard && !self.config.poll_interval.is_zero() {
            thread::sleep(self.config.poll_interval);
        }
        Ok(())
    }

    /// Print `<Stage> failed: <status>` and turn the error into a
    /// [`CardFailure`].
    fn report_failure(&mut self, stage: Stage, err: Error) -> Result<CardFailure> {
        warn!("{} failed: {}", stage.label(), err);
        self.console
            .println(&format!("{} failed: {}", stage.label(), err))?;
        Ok(CardFailure {
            stage,
            message: err.to_string(),
        })
    }

    /// HALT and stop crypto. A failure here is logged only; the card is
    /// released either way as far as the station is concerned.
    fn release_card(&mut self) {
        if let Err(e) = self.transport.release() {
            warn!("releasing card failed: {}", e);
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &StationConfig {
        &self.config
    }

    /// The card transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The card transport, mutably.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// The console.
    pub fn console(&self) -> &C {
        &self.console
    }

    /// The console, mutably.
    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    /// The write-request flag this station watches.
    pub fn flag(&self) -> &ModeFlag {
        self.flag
    }

    /// Give back the transport and the console.
    pub fn into_parts(self) -> (T, C) {
        (self.transport, self.console)
    }
}
